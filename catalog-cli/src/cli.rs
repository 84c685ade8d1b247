// cli.rs
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

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;

use std::path::PathBuf;

use catalog_data::auth::request_access_token;
use catalog_data::config::{Config, StoreConfig};
use catalog_data::fetcher::EpisodeFetcher;
use catalog_data::store::EpisodeStore;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-episodes",
    version,
    about = "Fetch the episodes of a catalog show and store them in a SQLite database."
)]
pub(crate) struct Opt {
    /// Search term sent along with the episode listing request
    #[arg(short = 'c', long = "search", default_value = "")]
    search: String,

    /// Catalog id of the show
    #[arg(short = 'i', long = "show-id")]
    show_id: String,

    /// Database file to store the episodes in, they are printed when omitted
    #[arg(short = 'd', long = "database")]
    database: Option<PathBuf>,

    /// Enable logging, use multiple `v`s to increase verbosity
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // Only fails if a logger is already set.
    let _ = builder.try_init();
}

pub(crate) fn run() -> Result<()> {
    let args = Opt::parse();
    init_logger(args.verbosity);
    debug!("{:?}", args);

    let config = Config::from_env().context("Could not load the api configuration")?;
    let token = request_access_token(&config.api, &config.credentials)
        .context("Could not get an access token")?;

    let fetcher = EpisodeFetcher::from_config(&config.api)?;
    let episodes = fetcher
        .fetch_episodes(&args.show_id, &args.search, &token)
        .with_context(|| format!("Could not fetch the episodes of show {}", args.show_id))?;

    if episodes.is_empty() {
        println!("No episodes found");
        return Ok(());
    }

    match args.database {
        Some(path) => {
            let mut store = EpisodeStore::open(&StoreConfig::new(&path))
                .with_context(|| format!("Could not open database {}", path.display()))?;
            // Rows that fail are already logged by the store.
            store.store_episodes(&episodes);
        }
        None => {
            for ep in &episodes {
                println!("{}\n", ep);
            }
        }
    }

    Ok(())
}
