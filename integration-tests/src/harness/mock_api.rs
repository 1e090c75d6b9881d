use authdeck_core::config::ClientConfig;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

/// One-thread HTTP/1.1 stand-in for the external API.
///
/// Answers `(method, path)` pairs with canned responses (404 otherwise) and
/// records every request it sees. A pair listed more than once is answered
/// in order, the last response repeating. Every response closes the connection.
pub struct MockApi {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    pub fn start(routes: Vec<(&str, &str, CannedResponse)>) -> Self {
        let mut table: Routes = HashMap::new();
        for (method, path, res) in routes {
            table
                .entry((method.to_string(), path.to_string()))
                .or_default()
                .push_back(res);
        }

        // Port 0: the OS picks a free one, so tests can run in parallel.
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind mock api");
        let port = listener.local_addr().unwrap().port();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &mut table, &recorded);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client config pointed at this server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_url: Some(self.base_url.clone()),
            timeout_secs: 2,
            ..ClientConfig::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// A URL nothing listens on.
pub fn closed_port_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{port}")
}

type Routes = HashMap<(String, String), VecDeque<CannedResponse>>;

fn handle(stream: TcpStream, routes: &mut Routes, recorded: &Mutex<Vec<RecordedRequest>>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default().to_string();

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    let body = serde_json::from_slice::<Value>(&body).ok();

    recorded.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let res = match routes.get_mut(&(method, path)) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
    }
    .unwrap_or_else(|| CannedResponse::raw(404, r#"{"message":"not found"}"#));

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        res.status,
        reason(res.status),
        res.body.len(),
        res.body
    );

    let mut stream = reader.into_inner();
    let _ = stream.write_all(reply.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
