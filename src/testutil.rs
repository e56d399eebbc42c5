// src/testutil.rs
// =============================================================================
// A tiny HTTP server on 127.0.0.1 for tests, so no test depends on the
// internet. It understands just enough HTTP/1.1 to answer HEAD requests:
//
//   /, /ok     -> 200
//   /moved     -> 301 to /ok
//   /hop       -> 301 to /gone, which is 302 to /missing (404)
//   /loop      -> 302 to itself, forever
//   /bounce    -> 302 to /bounce-back, which is 302 to /bounce; the second
//                 visit to /bounce answers 200
//   /nowhere   -> 302 with no Location header
//   /slow      -> never answers in time
//   anything   -> 404
//
// Every response closes the connection, so each request gets a fresh accept.
// =============================================================================

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct FixtureServer {
    port: u16,
}

impl FixtureServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let bounces = Arc::new(AtomicUsize::new(0));

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let bounces = Arc::clone(&bounces);
                thread::spawn(move || handle(stream, &bounces));
            }
        });

        FixtureServer { port }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// A URL on a port nobody listens on.
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/", port)
    }
}

fn handle(stream: TcpStream, bounces: &AtomicUsize) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    // drain headers up to the blank line
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let response = match path.as_str() {
        "/" | "/ok" => status_only("200 OK"),
        "/moved" => redirect("301 Moved Permanently", "/ok"),
        "/hop" => redirect("301 Moved Permanently", "/gone"),
        "/gone" => redirect("302 Found", "/missing"),
        "/loop" => redirect("302 Found", "/loop"),
        "/bounce" => {
            if bounces.fetch_add(1, Ordering::SeqCst) == 0 {
                redirect("302 Found", "/bounce-back")
            } else {
                status_only("200 OK")
            }
        }
        "/bounce-back" => redirect("302 Found", "/bounce"),
        "/nowhere" => status_only("302 Found"),
        "/slow" => {
            thread::sleep(Duration::from_secs(3));
            status_only("200 OK")
        }
        _ => status_only("404 Not Found"),
    };

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn status_only(status: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status
    )
}

fn redirect(status: &str, location: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status, location
    )
}
