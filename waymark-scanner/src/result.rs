use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder preview for a successful response with an empty body.
pub const EMPTY_RESPONSE: &str = "Empty response";
/// Placeholder preview when no body could be read at all.
pub const NO_CONTENT: &str = "No content";

/// Outcome of a single GET attempt against one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    pub content_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Set when the probed URL was rewritten from a legacy URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

impl ProbeResult {
    pub fn success(
        url: String,
        status_code: u16,
        content_length: u64,
        content_preview: String,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            url,
            status_code: Some(status_code),
            success: true,
            content_length: Some(content_length),
            content_preview,
            error: None,
            headers: Some(headers),
            original_url: None,
        }
    }

    pub fn http_error(url: String, status_code: u16, content_preview: String) -> Self {
        Self {
            url,
            status_code: Some(status_code),
            success: false,
            content_length: None,
            content_preview,
            error: Some(format!("HTTP {}", status_code)),
            headers: None,
            original_url: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            status_code: None,
            success: false,
            content_length: None,
            content_preview: NO_CONTENT.to_string(),
            error: Some(error),
            headers: None,
            original_url: None,
        }
    }

    pub fn with_original_url(mut self, original_url: impl Into<String>) -> Self {
        self.original_url = Some(original_url.into());
        self
    }

    /// A working endpoint: the probe succeeded with exactly HTTP 200.
    pub fn is_working(&self) -> bool {
        self.success && self.status_code == Some(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_working_requires_200() {
        let ok = ProbeResult::success(
            "https://example.test/".to_string(),
            200,
            5,
            "hello".to_string(),
            BTreeMap::new(),
        );
        assert!(ok.is_working());

        let no_content = ProbeResult::success(
            "https://example.test/a".to_string(),
            204,
            0,
            EMPTY_RESPONSE.to_string(),
            BTreeMap::new(),
        );
        assert!(no_content.success);
        assert!(!no_content.is_working());

        let missing = ProbeResult::http_error(
            "https://example.test/b".to_string(),
            404,
            NO_CONTENT.to_string(),
        );
        assert!(!missing.is_working());
        assert_eq!(missing.error.as_deref(), Some("HTTP 404"));
    }

    #[test]
    fn test_with_error_has_no_status() {
        let result = ProbeResult::with_error(
            "https://example.test/".to_string(),
            "Connection refused".to_string(),
        );
        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert_eq!(result.content_preview, NO_CONTENT);
    }
}
