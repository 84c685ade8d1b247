// fetcher.rs
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

//! Paging through the episodes of a show.
//!
//! A failed request or a page that does not parse aborts the whole fetch.
//! Nothing is retried.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::auth::AccessToken;
use crate::config::ApiConfig;
use crate::errors::FetchError;
use crate::models::{EpisodePage, EpisodeRecord};

/// Number of episodes requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Blocking http client with the crate user-agent and the configured timeout.
pub fn client_builder(config: &ApiConfig) -> ClientBuilder {
    Client::builder()
        .user_agent(crate::USER_AGENT)
        .timeout(config.timeout)
}

/// Offset of the `page`-th page, counting from zero.
///
/// Never overflows for the pages of a listing: the last page index is
/// `total / PAGE_SIZE`, so its offset is at most `total`.
pub fn page_offset(page: u32) -> u32 {
    page.saturating_mul(PAGE_SIZE)
}

/// Parameters of a single page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    /// Catalog id of the show.
    pub show_id: &'a str,
    /// Search filter, passed through as is.
    pub search: &'a str,
    /// Index of the first episode of the page.
    pub offset: u32,
    /// Page size.
    pub limit: u32,
    /// Bearer token for the request.
    pub access_token: &'a AccessToken,
}

/// Something that can hand out pages of a show's episode listing.
pub trait PageSource {
    /// Fetch the single page described by `request`.
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<EpisodePage, FetchError>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<EpisodePage, FetchError> {
        (**self).fetch_page(request)
    }
}

/// Build the url of the episode listing for `request`.
pub fn episodes_url(
    base: &Url,
    market: &str,
    request: &PageRequest<'_>,
) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(&["v1", "shows", request.show_id, "episodes"]);

    url.query_pairs_mut()
        .append_pair("q", request.search)
        .append_pair("type", "episodes")
        .append_pair("offset", &request.offset.to_string())
        .append_pair("market", market)
        .append_pair("limit", &request.limit.to_string());

    Ok(url)
}

/// [`PageSource`] talking to the catalog http api.
#[derive(Debug)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
    market: String,
}

impl HttpPageSource {
    /// Build the http client out of `config`.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = client_builder(config).build()?;
        Ok(HttpPageSource {
            client,
            base_url: config.base_url.clone(),
            market: config.market.clone(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, request: &PageRequest<'_>) -> Result<EpisodePage, FetchError> {
        let url = episodes_url(&self.base_url, &self.market, request)?;
        debug!("GET request to: {}", url);

        let resp = self
            .client
            .get(url.clone())
            .bearer_auth(request.access_token.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()?;

        let status = resp.status();
        debug!("Status Resp: {}", status);
        if !status.is_success() {
            return Err(FetchError::HttpStatus { url, status });
        }

        let body = resp.text()?;
        serde_json::from_str(&body).map_err(From::from)
    }
}

/// Collects every episode of a show, page after page.
#[derive(Debug)]
pub struct EpisodeFetcher<S> {
    source: S,
}

impl EpisodeFetcher<HttpPageSource> {
    /// Fetcher backed by the catalog http api.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        HttpPageSource::new(config).map(EpisodeFetcher::new)
    }
}

impl<S: PageSource> EpisodeFetcher<S> {
    /// Fetch pages from `source`.
    pub fn new(source: S) -> Self {
        EpisodeFetcher { source }
    }

    /// Fetch every episode of `show_id` that matches `search`.
    ///
    /// The number of pages is `total / PAGE_SIZE + 1`, with `total` taken
    /// from the first page. That means at least one request is made, even
    /// for a show without episodes, and a listing whose `total` is an exact
    /// multiple of the page size ends with an empty page.
    ///
    /// Episodes are returned in the order the api listed them.
    pub fn fetch_episodes(
        &self,
        show_id: &str,
        search: &str,
        access_token: &AccessToken,
    ) -> Result<Vec<EpisodeRecord>, FetchError> {
        let mut episodes = Vec::new();
        let mut pages = 1;
        let mut fetched = 0;

        while fetched < pages {
            let request = PageRequest {
                show_id,
                search,
                offset: page_offset(fetched),
                limit: PAGE_SIZE,
                access_token,
            };
            let page = self.source.fetch_page(&request)?;

            if fetched == 0 {
                pages = page.total() / PAGE_SIZE + 1;
                debug!(
                    "Show {} lists {} episodes, fetching {} pages",
                    show_id,
                    page.total(),
                    pages
                );
            }

            episodes.extend(page.into_items());
            fetched += 1;
        }

        info!("Fetched {} episodes of show {}", episodes.len(), show_id);
        Ok(episodes)
    }
}
