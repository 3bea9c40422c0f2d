//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes keyed by request path. Every response closes
//! the connection, so bodies without `Content-Length` are close-delimited.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<String>,
    /// Sent verbatim as `Content-Length` (even if it disagrees with the body).
    pub content_length: Option<String>,
    pub location: Option<String>,
    pub body: Vec<u8>,
    /// When set, the body goes out in 100-byte pieces with this pause between them.
    pub pace: Option<Duration>,
}

impl Route {
    /// 200 with the given type and an accurate `Content-Length`.
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            content_length: Some(body.len().to_string()),
            location: None,
            body,
            pace: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            content_length: Some("0".to_string()),
            location: None,
            body: Vec::new(),
            pace: None,
        }
    }

    pub fn redirect(to: &str) -> Self {
        Self {
            location: Some(to.to_string()),
            ..Self::status(302)
        }
    }

    pub fn without_length(mut self) -> Self {
        self.content_length = None;
        self
    }

    pub fn declared_length(mut self, n: u64) -> Self {
        self.content_length = Some(n.to_string());
        self
    }

    pub fn paced(mut self, gap: Duration) -> Self {
        self.pace = Some(gap);
        self
    }

    /// Sends any string as `Content-Length`, e.g. values that overflow `u64`.
    pub fn raw_length(mut self, value: &str) -> Self {
        self.content_length = Some(value.to_string());
        self
    }
}

/// A running server. Threads live until the process exits.
pub struct ImageServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl ImageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server on an ephemeral port. Paths not in `routes` get 404.
pub fn start(routes: Vec<(&str, Route)>) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> =
        Arc::new(routes.into_iter().map(|(p, r)| (p.to_string(), r)).collect());
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            hits_srv.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    ImageServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// Starts a server that accepts connections and never answers.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _held = stream;
                thread::sleep(Duration::from_secs(30));
            });
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let not_found = Route::status(404);
    let route = routes.get(&path).unwrap_or(&not_found);

    let mut head = format!("HTTP/1.1 {} {}\r\n", route.status, reason(route.status));
    if let Some(ct) = &route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(len) = &route.content_length {
        head.push_str(&format!("Content-Length: {}\r\n", len));
    }
    if let Some(loc) = &route.location {
        head.push_str(&format!("Location: {}\r\n", loc));
    }
    head.push_str("Connection: close\r\n\r\n");

    let _ = stream.write_all(head.as_bytes());
    match route.pace {
        None => {
            let _ = stream.write_all(&route.body);
        }
        Some(gap) => {
            for piece in route.body.chunks(100) {
                let _ = stream.flush();
                thread::sleep(gap);
                if stream.write_all(piece).is_err() {
                    return;
                }
            }
        }
    }
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
