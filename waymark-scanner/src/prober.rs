use crate::error::Result;
use crate::result::{EMPTY_RESPONSE, NO_CONTENT, ProbeResult};
use crate::transport::{ClientSettings, HttpTransport, Transport, TransportResponse};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_PREVIEW_CHARS: usize = 300;
pub const DEFAULT_ERROR_PREVIEW_CHARS: usize = 200;

/// Issues one GET per call and turns whatever happens into a `ProbeResult`.
///
/// The prober never fails: HTTP errors and transport errors alike are folded
/// into the returned result, so a single bad URL can't abort a run.
pub struct Prober {
    transport: Arc<dyn Transport>,
    preview_chars: usize,
    error_preview_chars: usize,
}

impl Prober {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            error_preview_chars: DEFAULT_ERROR_PREVIEW_CHARS,
        }
    }

    /// Prober over a real HTTP client.
    pub fn http(settings: &ClientSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(settings)?)))
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn with_error_preview_chars(mut self, chars: usize) -> Self {
        self.error_preview_chars = chars;
        self
    }

    pub async fn probe(&self, url: &str) -> ProbeResult {
        match self.transport.get(url).await {
            Ok(response) => self.interpret(url, response),
            Err(e) => {
                warn!("Probe of {} failed: {}", url, e);
                ProbeResult::with_error(url.to_string(), e.to_string())
            }
        }
    }

    fn interpret(&self, url: &str, response: TransportResponse) -> ProbeResult {
        let TransportResponse {
            status,
            headers,
            body,
        } = response;
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        if (200..300).contains(&status) {
            let preview = if body.is_empty() {
                EMPTY_RESPONSE.to_string()
            } else {
                preview_text(&body, self.preview_chars)
            };
            ProbeResult::success(url.to_string(), status, body.len() as u64, preview, headers)
        } else {
            let preview = if body.is_empty() {
                NO_CONTENT.to_string()
            } else {
                preview_text(&body, self.error_preview_chars)
            };
            ProbeResult::http_error(url.to_string(), status, preview)
        }
    }
}

/// First `max_chars` characters of the body, decoded leniently.
pub fn preview_text(body: &[u8], max_chars: usize) -> String {
    String::from_utf8_lossy(body).chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubResponse, StubTransport};

    fn stub_prober(stub: StubTransport) -> Prober {
        Prober::new(Arc::new(stub))
    }

    #[test]
    fn test_preview_text_counts_chars_not_bytes() {
        let body = "héllo wörld".as_bytes();
        assert_eq!(preview_text(body, 5), "héllo");
        assert_eq!(preview_text(body, 100), "héllo wörld");
    }

    #[test]
    fn test_preview_text_tolerates_invalid_utf8() {
        let body = [b'o', b'k', 0xff, b'!'];
        let preview = preview_text(&body, 10);
        assert!(preview.starts_with("ok"));
        assert!(preview.ends_with('!'));
    }

    #[tokio::test]
    async fn test_success_truncates_preview() {
        let body = "x".repeat(1000);
        let prober = stub_prober(
            StubTransport::new(StubResponse::status(404))
                .with_route("https://example.test/", StubResponse::ok(body.clone())),
        );

        let result = prober.probe("https://example.test/").await;

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.content_length, Some(1000));
        assert_eq!(result.content_preview.len(), DEFAULT_PREVIEW_CHARS);
        assert!(result.error.is_none());
        assert!(result.headers.is_some());
    }

    #[tokio::test]
    async fn test_empty_success_body_uses_placeholder() {
        let prober = stub_prober(StubTransport::new(StubResponse::ok("")));
        let result = prober.probe("https://example.test/").await;

        assert!(result.success);
        assert_eq!(result.content_length, Some(0));
        assert_eq!(result.content_preview, EMPTY_RESPONSE);
    }

    #[tokio::test]
    async fn test_http_error_keeps_short_body_preview() {
        let prober = stub_prober(StubTransport::new(StubResponse::Status {
            status: 500,
            body: "e".repeat(400),
        }))
        .with_error_preview_chars(50);

        let result = prober.probe("https://example.test/api").await;

        assert!(!result.success);
        assert_eq!(result.status_code, Some(500));
        assert_eq!(result.error.as_deref(), Some("HTTP 500"));
        assert_eq!(result.content_preview.len(), 50);
    }

    #[tokio::test]
    async fn test_timeout_becomes_failed_result() {
        let prober = stub_prober(StubTransport::new(StubResponse::Timeout));
        let result = prober.probe("https://example.test/slow").await;

        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert_eq!(result.content_preview, NO_CONTENT);
        assert!(result.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_becomes_failed_result() {
        let prober = stub_prober(StubTransport::new(StubResponse::ConnectionRefused));
        let result = prober.probe("https://example.test/").await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("Connection refused"));
    }
}
