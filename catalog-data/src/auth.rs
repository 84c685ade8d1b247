// auth.rs
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

//! Client-credentials token exchange.
//!
//! The token is requested once per run. There is no refresh, a run is
//! expected to finish well within the token lifetime.

use serde::Deserialize;

use std::collections::HashMap;
use std::fmt;

use crate::config::{ApiConfig, ClientCredentials};
use crate::errors::AuthError;
use crate::fetcher::client_builder;

/// A bearer token for the catalog api.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an already obtained token.
    pub fn new<S: Into<String>>(token: S) -> Self {
        AccessToken(token.into())
    }

    /// The raw token, as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// {"access_token": "NgCXRKc...MzYjw", "token_type": "bearer", "expires_in": 3600}
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
}

fn parse_token_response(body: &str) -> Result<AccessToken, AuthError> {
    let resp: TokenResponse = serde_json::from_str(body)?;
    info!(
        "Got a {} token, valid for {}s",
        resp.token_type, resp.expires_in
    );
    Ok(AccessToken(resp.access_token))
}

/// Exchange the application credentials for an access token.
pub fn request_access_token(
    config: &ApiConfig,
    credentials: &ClientCredentials,
) -> Result<AccessToken, AuthError> {
    let form = HashMap::from([("grant_type", "client_credentials")]);

    info!("POST request to: {}", config.token_url);
    let resp = client_builder(config)
        .build()?
        .post(config.token_url.clone())
        .basic_auth(credentials.id(), Some(credentials.secret()))
        .form(&form)
        .send()?;

    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        return Err(AuthError::Rejected { status, body });
    }

    parse_token_response(&body)
}
