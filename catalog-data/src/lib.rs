// lib.rs
//
// Copyright 2026 The catalog-episodes Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

#![recursion_limit = "1024"]
#![allow(unknown_lints)]
// Enable lint group collections
#![warn(nonstandard_style, bad_style, unused)]
// standalone lints
#![warn(
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    unconditional_recursion,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    elided_lifetimes_in_paths
)]

//! Fetch the episode list of a catalog show and keep it in a local
//! SQLite database.
//!
//! The crate is split the same way the data flows:
//! [`auth`] exchanges client credentials for a bearer token,
//! [`fetcher`] pages through the show's episodes and
//! [`store`] writes them into the `episodio` table one row at a time.

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

pub mod auth;
pub mod config;
pub mod database;
#[allow(missing_docs)]
pub mod dbqueries;
#[allow(missing_docs)]
pub mod errors;
pub mod fetcher;
pub(crate) mod models;
mod schema;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::models::{EpisodePage, EpisodeRecord, EpisodeRecordBuilder};

/// The user-agent to be used for all the requests.
pub const USER_AGENT: &str = concat!("catalog-episodes/", env!("CARGO_PKG_VERSION"));
