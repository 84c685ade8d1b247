// dbqueries.rs
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

//! Random CRUD helper functions.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::select;

use crate::errors::DataError;
use crate::models::EpisodeRecord;

pub fn get_episodes(con: &mut SqliteConnection) -> Result<Vec<EpisodeRecord>, DataError> {
    use crate::schema::episodio::dsl::*;

    episodio
        .order(item_id.asc())
        .select(EpisodeRecord::as_select())
        .load::<EpisodeRecord>(con)
        .map_err(From::from)
}

pub fn get_episode_from_id(
    con: &mut SqliteConnection,
    ep_id: &str,
) -> Result<EpisodeRecord, DataError> {
    use crate::schema::episodio::dsl::*;

    episodio
        .filter(item_id.eq(ep_id))
        .select(EpisodeRecord::as_select())
        .get_result::<EpisodeRecord>(con)
        .map_err(From::from)
}

pub fn episode_exists(con: &mut SqliteConnection, ep_id: &str) -> Result<bool, DataError> {
    use crate::schema::episodio::dsl::*;

    select(exists(episodio.filter(item_id.eq(ep_id))))
        .get_result(con)
        .map_err(From::from)
}

pub fn count_episodes(con: &mut SqliteConnection) -> Result<i64, DataError> {
    use crate::schema::episodio::dsl::*;

    episodio.count().get_result(con).map_err(From::from)
}
