use crate::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Raw response handed back by a transport, before the prober interprets it.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Something that can perform a single GET request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Client configuration shared for the lifetime of one run.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout: Duration,
    pub user_agent: String,
    /// Accept any TLS certificate. Only for targets with a broken chain.
    pub skip_certificate_validation: bool,
    pub max_redirects: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_certificate_validation: false,
            max_redirects: 10,
        }
    }
}

/// reqwest-backed transport. Keeps a cookie session across requests.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        if settings.skip_certificate_validation {
            tracing::warn!("TLS certificate validation is disabled for this run");
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout)
            .cookie_store(true)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .danger_accept_invalid_certs(settings.skip_certificate_validation)
            .build()
            .map_err(|e| ScanError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            timeout: settings.timeout,
        })
    }

    fn classify_error(&self, url: &str, error: reqwest::Error) -> ScanError {
        if error.is_timeout() {
            ScanError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else if error.is_connect() {
            ScanError::Connection {
                url: url.to_string(),
                reason: root_cause(&error),
            }
        } else {
            ScanError::HttpError(error)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_error(url, e))?
            .to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Innermost error message, which is where hyper puts "Connection refused" and DNS failures.
fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn fast_settings() -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(1),
            ..ClientSettings::default()
        }
    }

    #[tokio::test]
    async fn test_get_returns_status_headers_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html>catalog</html>"),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&fast_settings()).unwrap();
        let response = transport
            .get(&format!("{}/products", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"<html>catalog</html>");
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("text/html")
        );

        // The header matcher splits on commas, so compare the raw value
        let received = mock_server.received_requests().await.unwrap();
        let user_agent = received[0]
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok());
        assert_eq!(user_agent, Some(DEFAULT_USER_AGENT));
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&fast_settings()).unwrap();
        let response = transport.get(&mock_server.uri()).await.unwrap();

        assert_eq!(response.status, 403);
        assert_eq!(response.body, b"forbidden");
    }

    #[tokio::test]
    async fn test_slow_response_maps_to_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&fast_settings()).unwrap();
        let err = transport.get(&mock_server.uri()).await.unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {:?}", err);
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_connection_error() {
        // Bind then drop to get a port nothing is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::new(&fast_settings()).unwrap();
        let err = transport
            .get(&format!("http://127.0.0.1:{}/", port))
            .await
            .unwrap_err();

        assert!(
            matches!(err, ScanError::Connection { .. }),
            "expected connection error, got {:?}",
            err
        );
    }
}
