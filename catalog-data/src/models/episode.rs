// episode.rs
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

use diesel::prelude::*;
use serde::Deserialize;

use std::fmt;

use crate::schema::episodio;

/// A single episode of a show, as the catalog api returns it.
///
/// Values are kept verbatim, the `release_date` is whatever string the
/// provider sent. Records are never changed after they are built.
#[derive(Queryable, Selectable, Insertable, Deserialize)]
#[diesel(table_name = episodio)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[derive(Debug, Clone, Builder, PartialEq, Eq)]
#[builder(derive(Debug))]
#[builder(setter(into))]
#[builder_struct_attr(allow(missing_docs))]
#[builder_impl_attr(allow(missing_docs))]
pub struct EpisodeRecord {
    /// Catalog id of the episode, unique within the table.
    #[diesel(column_name = item_id)]
    id: String,
    /// Duration in milliseconds.
    duration_ms: i64,
    /// Release date, kept as sent by the catalog.
    release_date: String,
    /// Display title.
    name: String,
    /// Free text description. Empty when not set.
    #[builder(default)]
    description: String,
}

impl EpisodeRecord {
    /// Get the catalog id of the episode.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the duration of the episode in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Get the release date, as provided by the catalog.
    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    /// Get the display title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description. Might be empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for EpisodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Episode(Id: {}", self.id)?;
        writeln!(f, "Duration (ms): {}", self.duration_ms)?;
        writeln!(f, "Release Date: {}", self.release_date)?;
        writeln!(f, "Name: {}", self.name)?;
        write!(f, "Description: {})", self.description)
    }
}
