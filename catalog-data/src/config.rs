// config.rs
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

//! Explicit configuration for the api client and the store.
//!
//! Nothing in the crate reads the environment on its own, everything is
//! handed a [`Config`], an [`ApiConfig`] or a [`StoreConfig`].

use url::Url;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
const API_URL_VAR: &str = "SPOTIFY_API_URL";
const TOKEN_URL_VAR: &str = "SPOTIFY_TOKEN_URL";
const MARKET_VAR: &str = "SPOTIFY_MARKET";

/// Default catalog api host.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/";
/// Default client-credentials token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Default market the episodes are requested for.
pub const DEFAULT_MARKET: &str = "US";

/// Application id and secret used for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    id: String,
    secret: String,
}

impl ClientCredentials {
    /// Pair an application id with its secret.
    pub fn new<S: Into<String>, T: Into<String>>(id: S, secret: T) -> Self {
        ClientCredentials {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// The application (client) id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The application secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Where and how to talk to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base url the `v1/shows/...` paths are appended to.
    pub base_url: Url,
    /// Client-credentials token endpoint.
    pub token_url: Url,
    /// Market code sent with every episode request.
    pub market: String,
    /// Per request timeout. `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            token_url: Url::parse(DEFAULT_TOKEN_URL).expect("default token url is valid"),
            market: DEFAULT_MARKET.to_owned(),
            timeout: None,
        }
    }
}

/// Everything needed to authenticate and fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application credentials.
    pub credentials: ClientCredentials,
    /// Api endpoints and request options.
    pub api: ApiConfig,
}

impl Config {
    /// Load a `.env` file if there is one, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config out of an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(var))
        };
        let url_or = |var: &'static str, default: &str| {
            let raw = lookup(var).unwrap_or_else(|| default.to_owned());
            Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
        };

        let credentials = ClientCredentials::new(required(CLIENT_ID_VAR)?, required(CLIENT_SECRET_VAR)?);
        let api = ApiConfig {
            base_url: url_or(API_URL_VAR, DEFAULT_API_URL)?,
            token_url: url_or(TOKEN_URL_VAR, DEFAULT_TOKEN_URL)?,
            market: lookup(MARKET_VAR).unwrap_or_else(|| DEFAULT_MARKET.to_owned()),
            timeout: None,
        };

        Ok(Config { credentials, api })
    }
}

/// Location of the episode database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the single-file SQLite database. Created if missing.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Store episodes in the database file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_in(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let env = HashMap::from([(CLIENT_ID_VAR, "id"), (CLIENT_SECRET_VAR, "secret")]);
        let config = Config::from_lookup(lookup_in(env)).unwrap();

        assert_eq!(config.credentials, ClientCredentials::new("id", "secret"));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_overrides() {
        let env = HashMap::from([
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            (API_URL_VAR, "http://127.0.0.1:8080/"),
            (TOKEN_URL_VAR, "http://127.0.0.1:8080/token"),
            (MARKET_VAR, "ES"),
        ]);
        let config = Config::from_lookup(lookup_in(env)).unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.api.token_url.as_str(), "http://127.0.0.1:8080/token");
        assert_eq!(config.api.market, "ES");
    }

    #[test]
    fn test_missing_secret() {
        let env = HashMap::from([(CLIENT_ID_VAR, "id"), (CLIENT_SECRET_VAR, "")]);
        let err = Config::from_lookup(lookup_in(env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(CLIENT_SECRET_VAR)));

        let err = Config::from_lookup(lookup_in(HashMap::new())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(CLIENT_ID_VAR)));
    }

    #[test]
    fn test_invalid_url() {
        let env = HashMap::from([
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            (API_URL_VAR, "not a url"),
        ]);
        let err = Config::from_lookup(lookup_in(env)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: API_URL_VAR, .. }));
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let creds = ClientCredentials::new("id", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("id"));
        assert!(!debug.contains("hunter2"));
    }
}
