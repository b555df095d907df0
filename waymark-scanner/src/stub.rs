// Canned transport for tests. Enabled with the `stub` feature outside this crate

use crate::error::{Result, ScanError};
use crate::transport::{Transport, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// What the stub should do when a URL is requested.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Status { status: u16, body: String },
    Timeout,
    ConnectionRefused,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        StubResponse::Status {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        StubResponse::Status {
            status,
            body: String::new(),
        }
    }
}

/// Transport answering from a fixed URL table. Unknown URLs get the fallback.
pub struct StubTransport {
    routes: HashMap<String, StubResponse>,
    fallback: StubResponse,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new(fallback: StubResponse) -> Self {
        Self {
            routes: HashMap::new(),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_route(mut self, url: impl Into<String>, response: StubResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.routes.get(url).unwrap_or(&self.fallback) {
            StubResponse::Status { status, body } => Ok(TransportResponse {
                status: *status,
                body: body.clone().into_bytes(),
                ..TransportResponse::default()
            }),
            StubResponse::Timeout => Err(ScanError::Timeout {
                url: url.to_string(),
                timeout_secs: 15,
            }),
            StubResponse::ConnectionRefused => Err(ScanError::Connection {
                url: url.to_string(),
                reason: "Connection refused".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_take_precedence_over_fallback() {
        let stub = StubTransport::new(StubResponse::status(404))
            .with_route("https://example.test/", StubResponse::ok("home"));

        let home = stub.get("https://example.test/").await.unwrap();
        assert_eq!(home.status, 200);
        assert_eq!(home.body, b"home");

        let other = stub.get("https://example.test/missing").await.unwrap();
        assert_eq!(other.status, 404);

        assert_eq!(
            stub.requests(),
            vec!["https://example.test/", "https://example.test/missing"]
        );
    }

    #[tokio::test]
    async fn test_timeout_route() {
        let stub = StubTransport::new(StubResponse::Timeout);
        let err = stub.get("https://example.test/slow").await.unwrap_err();
        assert!(err.is_timeout());
    }
}
