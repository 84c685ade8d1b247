// test_utils.rs
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

//! A local http server answering with canned responses, for tests.
//!
//! Every accepted connection gets the next response of the list and is then
//! closed. Requests are recorded before they are answered.

use url::Url;

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A request as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// `METHOD /path?query HTTP/1.1`
    pub request_line: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    /// Request body, lossily decoded.
    pub body: String,
}

impl RecordedRequest {
    /// First value of the header `name`, case insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Serves `responses` in order, one per connection.
#[derive(Debug)]
pub struct CannedServer {
    url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    /// Bind a free local port and start answering with `responses`,
    /// given as `(status, json body)` pairs.
    pub fn start(responses: Vec<(u16, String)>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                if let Err(err) = answer(&stream, status, &body, &recorded) {
                    error!("Test server failed to answer: {}", err);
                    return;
                }
            }
        });

        Ok(CannedServer { url, requests })
    }

    /// Base url of the server, ending with a `/`.
    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// Absolute url of `path` on the server.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.url();
        url.set_path(path);
        url
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

fn answer(
    stream: &TcpStream,
    status: u16,
    body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let request = read_request(stream)?;
    if let Ok(mut r) = recorded.lock() {
        r.push(request);
    }

    let response = format!(
        "HTTP/1.1 {} Canned\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let mut out = stream;
    out.write_all(response.as_bytes())?;
    out.flush()
}

fn read_request(stream: &TcpStream) -> io::Result<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_ascii_lowercase(), v.trim().to_owned()));
        }
    }

    let len = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0; len];
    reader.read_exact(&mut body)?;

    Ok(RecordedRequest {
        request_line: request_line.trim_end().to_owned(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
