// page.rs
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

use serde::Deserialize;

use crate::models::EpisodeRecord;

// curl -H "Authorization: Bearer $TOKEN" \
//   "https://api.spotify.com/v1/shows/38bS44xjbVVZ3No3ByF1dJ/episodes?offset=0&limit=50&market=US"
/// One page of the show episodes listing.
///
/// Both `items` and `total` are required, a page missing either of them
/// does not deserialize.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EpisodePage {
    items: Vec<EpisodeRecord>,
    total: u32,
}

impl EpisodePage {
    /// Build a page out of already parsed episodes.
    pub fn new(items: Vec<EpisodeRecord>, total: u32) -> Self {
        EpisodePage { items, total }
    }

    /// The episodes of this page, in the order the api returned them.
    pub fn items(&self) -> &[EpisodeRecord] {
        &self.items
    }

    /// Number of episodes the whole listing holds, not just this page.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Consume the page, keeping only the episodes.
    pub fn into_items(self) -> Vec<EpisodeRecord> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_two_items() -> Result<()> {
        let input = std::fs::read_to_string("tests/spotify/page_two.json")?;
        let page: EpisodePage = serde_json::from_str(&input)?;

        assert_eq!(page.total(), 2);
        let ids: Vec<&str> = page.items().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["5Xt5DXGzch68nYYamXrNxZ", "0Q86acNRm6V9GYx55SXKwf"]);
        assert_eq!(page.items()[0].duration_ms(), 3_600_000);
        assert_eq!(page.items()[1].description(), "");
        Ok(())
    }

    #[test]
    fn test_empty_page() -> Result<()> {
        let input = std::fs::read_to_string("tests/spotify/page_empty.json")?;
        let page: EpisodePage = serde_json::from_str(&input)?;

        assert_eq!(page.total(), 0);
        assert!(page.into_items().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_total() -> Result<()> {
        let input = std::fs::read_to_string("tests/spotify/page_missing_total.json")?;
        let page = serde_json::from_str::<EpisodePage>(&input);
        assert!(page.is_err());
        Ok(())
    }

    #[test]
    fn test_missing_items() {
        let page = serde_json::from_str::<EpisodePage>(r#"{"total": 12}"#);
        assert!(page.is_err());
    }
}
