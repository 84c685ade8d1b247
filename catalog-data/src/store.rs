// store.rs
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

//! Writing fetched episodes into the database.
//!
//! Rows are inserted one statement at a time outside of any transaction,
//! so every successful insert is committed on its own. A row that fails to
//! insert is logged and reported in its [`StoreOutcome`], the rest of the
//! batch carries on.

use diesel::prelude::*;

use std::fmt;

use crate::config::StoreConfig;
use crate::database;
use crate::errors::DataError;
use crate::models::EpisodeRecord;
use crate::schema::episodio;

/// What happened to a single episode handed to the store.
#[derive(Debug)]
pub struct StoreOutcome {
    item_id: String,
    result: Result<(), DataError>,
}

impl StoreOutcome {
    /// Id of the episode this outcome is about.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Whether the row made it into the table.
    pub fn is_stored(&self) -> bool {
        self.result.is_ok()
    }

    /// The storage error, if the insert failed.
    pub fn error(&self) -> Option<&DataError> {
        self.result.as_ref().err()
    }
}

/// Owns the single database connection episodes are written through.
pub struct EpisodeStore {
    con: SqliteConnection,
}

impl fmt::Debug for EpisodeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpisodeStore").finish_non_exhaustive()
    }
}

impl EpisodeStore {
    /// Open the database described by `config` and make sure the episode
    /// table exists.
    pub fn open(config: &StoreConfig) -> Result<Self, DataError> {
        let con = database::establish_connection(&config.path)?;
        Self::with_connection(con)
    }

    /// Use an already open connection.
    pub fn with_connection(mut con: SqliteConnection) -> Result<Self, DataError> {
        database::ensure_table(&mut con)?;
        Ok(EpisodeStore { con })
    }

    /// Borrow the underlying connection, for queries.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.con
    }

    /// Insert a single episode.
    ///
    /// Never fails: a storage error, such as an `id` that is already in the
    /// table, is logged and returned inside the outcome.
    pub fn store_episode(&mut self, episode: &EpisodeRecord) -> StoreOutcome {
        info!("Inserting {:?}", episode.id());
        let result = diesel::insert_into(episodio::table)
            .values(episode)
            .execute(&mut self.con)
            .map(|_| ())
            .map_err(DataError::from);

        if let Err(ref err) = result {
            error!("Failed to store episode {}: {}", episode.id(), err);
        }

        StoreOutcome {
            item_id: episode.id().to_owned(),
            result,
        }
    }

    /// Insert every episode of `episodes`, in order.
    ///
    /// Returns one outcome per episode, in the same order.
    pub fn store_episodes(&mut self, episodes: &[EpisodeRecord]) -> Vec<StoreOutcome> {
        let outcomes: Vec<StoreOutcome> =
            episodes.iter().map(|ep| self.store_episode(ep)).collect();

        let failed = outcomes.iter().filter(|o| !o.is_stored()).count();
        if failed > 0 {
            warn!("{} of {} episodes could not be stored", failed, outcomes.len());
        } else {
            info!("Stored {} episodes", outcomes.len());
        }

        outcomes
    }
}
