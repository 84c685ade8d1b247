// database.rs
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

//! Database Setup.
//!
//! There is a single table and no versioning of it. It is created the first
//! time a database is used and left alone afterwards.

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};

use std::path::Path;

use crate::errors::DataError;

/// Name of the episode table.
pub const EPISODE_TABLE: &str = "episodio";

const CREATE_EPISODE_TABLE: &str = "CREATE TABLE episodio (
    item_id TEXT PRIMARY KEY,
    duration_ms INTEGER,
    release_date TEXT,
    name TEXT,
    description TEXT
)";

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Open the SQLite database at `path`, creating the file if needed.
pub fn establish_connection<P: AsRef<Path>>(path: P) -> Result<SqliteConnection, DataError> {
    let path = path.as_ref();
    let db_path = path
        .to_str()
        .ok_or_else(|| DataError::InvalidPath(path.to_path_buf()))?;

    let con = SqliteConnection::establish(db_path)?;
    info!("Database connection to {} established.", db_path);
    Ok(con)
}

/// Check the catalog for a table called `name`.
pub fn table_exists(con: &mut SqliteConnection, name: &str) -> Result<bool, DataError> {
    let found = sql_query(
        "SELECT count(name) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(name)
    .get_result::<TableCount>(con)?;

    Ok(found.count == 1)
}

/// Create the episode table unless it is already there.
///
/// Returns `true` if the table was created by this call.
pub fn ensure_table(con: &mut SqliteConnection) -> Result<bool, DataError> {
    if table_exists(con, EPISODE_TABLE)? {
        debug!("Table {} already exists.", EPISODE_TABLE);
        return Ok(false);
    }

    info!("Creating table {}.", EPISODE_TABLE);
    sql_query(CREATE_EPISODE_TABLE).execute(con)?;
    Ok(true)
}
