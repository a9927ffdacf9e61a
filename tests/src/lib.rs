// Integration test infrastructure for Atrium end-to-end tests.
//
// Provides a canned single-threaded HTTP/1.1 responder on an ephemeral port,
// plus recording fakes for the client's collaborator seams. Every accepted
// connection serves exactly one request and closes, so request ordering is
// deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use atrium_sdk::context::{CredentialStore, Notifier};

/// Install a test subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Request target, path plus query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub extra_headers: Vec<(String, String)>,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json".into(),
            body: body.as_bytes().to_vec(),
            extra_headers: Vec::new(),
        }
    }

    /// A `{code: 200, data, msg: "ok"}` business envelope.
    pub fn ok_envelope(data: serde_json::Value) -> Self {
        Self::json(
            200,
            &serde_json::json!({"code": 200, "data": data, "msg": "ok"}).to_string(),
        )
    }

    pub fn binary(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: content_type.into(),
            body,
            extra_headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }
}

/// Canned HTTP server. Replies are served in order; requests beyond the
/// script get a 500 so a test failure is loud rather than hung.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(responses: Vec<CannedResponse>) -> std::io::Result<Self> {
        init_tracing();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            let mut script = responses.into_iter();
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let Ok(req) = read_request(&mut stream).await else {
                    continue;
                };
                tracing::debug!(method = %req.method, target = %req.target, "request captured");
                captured.lock().push(req);
                let resp = script.next().unwrap_or_else(|| {
                    CannedResponse::json(500, r#"{"msg":"script exhausted"}"#)
                });
                let _ = write_response(&mut stream, &resp).await;
            }
        });
        Ok(Self { base_url: format!("http://{addr}"), requests, handle })
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut buf = Vec::with_capacity(1024);
    let mut tmp = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut tmp).await?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed before headers",
            ));
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > 1024 * 1024 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "headers too large",
            ));
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut tmp).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&tmp[..n]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest { method, target, headers, body })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn write_response(stream: &mut TcpStream, resp: &CannedResponse) -> std::io::Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: {}\r\nConnection: close\r\n",
        resp.status,
        reason(resp.status),
        resp.body.len(),
        resp.content_type,
    );
    for (name, value) in &resp.extra_headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&resp.body).await?;
    stream.flush().await
}

/// Credential store that counts forced invalidations.
pub struct CountingCredentials {
    token: Mutex<Option<String>>,
    invalidations: AtomicUsize,
}

impl CountingCredentials {
    pub fn new(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl CredentialStore for CountingCredentials {
    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn invalidate(&self) {
        *self.token.lock() = None;
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that records what the user would have seen.
#[derive(Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    warns: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn warns(&self) -> Vec<String> {
        self.warns.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warns.lock().push(message.to_string());
    }
}
