// test_cli.rs
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

use assert_cmd::Command;
use catalog_data::database::establish_connection;
use catalog_data::dbqueries;
use catalog_data::test_utils::CannedServer;
use predicates::prelude::*;
use tempfile::TempDir;

// Notes:
// None of these tests reach the real catalog. They run from an empty
// temporary directory so a developer's `.env` is never picked up, and
// talk to a local server answering with canned responses instead.

const TOKEN: &str = r#"{"access_token": "tok", "token_type": "bearer", "expires_in": 3600}"#;

fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("catalog-episodes").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SPOTIFY_CLIENT_ID")
        .env_remove("SPOTIFY_CLIENT_SECRET")
        .env_remove("SPOTIFY_API_URL")
        .env_remove("SPOTIFY_TOKEN_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// The token response followed by `pages`.
fn catalog(pages: &[&str]) -> CannedServer {
    let mut responses = vec![(200, TOKEN.to_string())];
    responses.extend(pages.iter().map(|p| (200, p.to_string())));
    CannedServer::start(responses).unwrap()
}

fn command_against(dir: &TempDir, server: &CannedServer) -> Command {
    let mut cmd = command(dir);
    cmd.env("SPOTIFY_CLIENT_ID", "id")
        .env("SPOTIFY_CLIENT_SECRET", "secret")
        .env("SPOTIFY_TOKEN_URL", server.url_for("/api/token").as_str())
        .env("SPOTIFY_API_URL", server.url().as_str());
    cmd
}

fn item(id: &str) -> String {
    format!(
        r#"{{"id": "{id}", "duration_ms": 1000, "release_date": "2021-01-01", "name": "Episode {id}", "description": ""}}"#
    )
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--show-id"))
        .stdout(predicate::str::contains("--database"));
}

#[test]
fn test_missing_show_id_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["-c", "rust"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--show-id"));
}

#[test]
fn test_missing_credentials() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["-i", "38bS44xjbVVZ3No3ByF1dJ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPOTIFY_CLIENT_ID"));
}

#[test]
fn test_unreachable_token_endpoint() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("episodes.db");

    command(&dir)
        .env("SPOTIFY_CLIENT_ID", "id")
        .env("SPOTIFY_CLIENT_SECRET", "secret")
        .env("SPOTIFY_TOKEN_URL", "http://127.0.0.1:9/api/token")
        .args(["-i", "38bS44xjbVVZ3No3ByF1dJ", "-d"])
        .arg(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not get an access token"));

    // Nothing was fetched, so no database was created.
    assert!(!db.exists());
}

#[test]
fn test_empty_show_creates_no_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("episodes.db");
    let server = catalog(&[r#"{"items": [], "total": 0}"#]);

    command_against(&dir, &server)
        .args(["-i", "show", "-d"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No episodes found"));

    assert!(!db.exists());
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn test_prints_episodes_without_database() {
    let dir = TempDir::new().unwrap();
    let page = format!(r#"{{"items": [{}, {}], "total": 2}}"#, item("a"), item("b"));
    let server = catalog(&[&page]);

    command_against(&dir, &server)
        .args(["-c", "rust", "-i", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Episode(Id: a"))
        .stdout(predicate::str::contains("Episode(Id: b"));

    let requests = server.requests();
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok"));
    assert!(requests[1].request_line.contains("q=rust"));
}

#[test]
fn test_duplicate_row_is_logged_and_skipped() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("episodes.db");
    let page = format!(r#"{{"items": [{}, {}], "total": 2}}"#, item("a"), item("a"));
    let server = catalog(&[&page]);

    command_against(&dir, &server)
        .args(["-i", "show", "-d"])
        .arg(&db)
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to store episode a"))
        .stderr(predicate::str::contains("1 of 2 episodes could not be stored"));

    let mut con = establish_connection(&db).unwrap();
    assert_eq!(dbqueries::count_episodes(&mut con).unwrap(), 1);
}

#[test]
fn test_rejected_page_request_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("episodes.db");
    let server = CannedServer::start(vec![
        (200, TOKEN.to_string()),
        (401, r#"{"error": {"status": 401}}"#.to_string()),
    ])
    .unwrap();

    command_against(&dir, &server)
        .args(["-i", "show", "-d"])
        .arg(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch the episodes of show show"));

    assert!(!db.exists());
}
