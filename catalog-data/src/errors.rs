// errors.rs
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

use diesel::result;
use thiserror::Error;
use url::Url;

use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("{var} is not a valid url: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Token request was rejected with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Token response could not be parsed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Request to {url} returned {status}")]
    HttpStatus {
        url: Url,
        status: reqwest::StatusCode,
    },
    #[error("Episode page could not be parsed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Can not build a request url on top of {0}")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("SQL Query failed: {0}")]
    DieselResultError(#[from] result::Error),
    #[error("Could not open the database: {0}")]
    ConnectionError(#[from] diesel::ConnectionError),
    #[error("Database path is not valid unicode: {0:?}")]
    InvalidPath(PathBuf),
}
