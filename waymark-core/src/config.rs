// Run configuration: target domain, URL lists, client and pacing settings

use crate::error::{CoreError, Result};
use crate::retest::upgrade_scheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use waymark_scanner::transport::DEFAULT_USER_AGENT;
use waymark_scanner::{ClientSettings, Prober, RequestPacing};

pub const DEFAULT_CONFIG_FILE: &str = "waymark.toml";
pub const DEFAULT_DOMAIN: &str = "www.d2pbuyersguide.com";
pub const DEFAULT_OUTPUT_PATH: &str = "scraping_output/detailed_analysis.json";

/// Paths guessed as plausible live endpoints on the target.
pub const DEFAULT_CANDIDATE_SUFFIXES: &[&str] = &[
    "/",
    "/index.html",
    "/index.php",
    "/home",
    "/main",
    "/products",
    "/items",
    "/guide",
    "/buyers-guide",
    "/d2p",
    "/api",
    "/api/products",
    "/api/items",
    "/search",
    "/category",
    "/categories",
    "/filter",
    "/list",
    "/all",
    "/page/1",
    "/page1",
    "/p/1",
    "/1",
];

/// The paginated listing that used to work.
pub fn default_legacy_urls() -> Vec<String> {
    (1..=25)
        .map(|page| format!("http://{}/filter/all/page/{}", DEFAULT_DOMAIN, page))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaymarkConfig {
    /// Bare host name to explore, without scheme
    pub domain: String,

    /// Previously known URLs to retest over HTTPS
    pub legacy_urls: Vec<String>,

    /// Path suffixes tried against the domain
    pub candidate_suffixes: Vec<String>,

    pub timeout_secs: u64,

    /// Pause between consecutive requests, 0 disables pacing
    pub inter_request_delay_ms: u64,

    /// Accept invalid TLS certificates
    pub skip_certificate_validation: bool,

    pub user_agent: String,

    pub preview_chars: usize,

    pub error_preview_chars: usize,

    pub output_path: PathBuf,
}

impl Default for WaymarkConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            legacy_urls: default_legacy_urls(),
            candidate_suffixes: DEFAULT_CANDIDATE_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 15,
            inter_request_delay_ms: 500,
            skip_certificate_validation: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            preview_chars: waymark_scanner::prober::DEFAULT_PREVIEW_CHARS,
            error_preview_chars: waymark_scanner::prober::DEFAULT_ERROR_PREVIEW_CHARS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl WaymarkConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: WaymarkConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Explicit path if given, otherwise `./waymark.toml` when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            tracing::info!("Using config file {}", local.display());
            return Self::load_from_file(local);
        }

        Ok(Self::default())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            return Err(CoreError::Config("domain must not be empty".to_string()));
        }
        if domain.contains('/') {
            return Err(CoreError::Config(format!(
                "domain '{}' must be a bare host name without scheme or path",
                domain
            )));
        }
        let base = format!("https://{}", domain);
        if Url::parse(&base).map(|u| u.host_str().is_none()).unwrap_or(true) {
            return Err(CoreError::Config(format!("domain '{}' is not a valid host", domain)));
        }

        if self.timeout_secs == 0 {
            return Err(CoreError::Config("timeout_secs must be at least 1".to_string()));
        }

        for url in &self.legacy_urls {
            Url::parse(&upgrade_scheme(url)).map_err(|e| {
                CoreError::Config(format!("legacy URL '{}' is invalid: {}", url, e))
            })?;
        }

        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            skip_certificate_validation: self.skip_certificate_validation,
            ..ClientSettings::default()
        }
    }

    pub fn pacing(&self) -> RequestPacing {
        RequestPacing::from_millis(self.inter_request_delay_ms)
    }

    /// HTTP prober carrying this config's client settings and preview lengths.
    pub fn prober(&self) -> Result<Prober> {
        let prober = Prober::http(&self.client_settings())?
            .with_preview_chars(self.preview_chars)
            .with_error_preview_chars(self.error_preview_chars);
        Ok(prober)
    }
}

/// Load a newline-delimited list of path suffixes. Blank lines and `#` comments are skipped.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("Failed to read wordlist {}: {}", path.display(), e)))?;

    let words: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#'))
        .map(String::from)
        .collect();

    if words.is_empty() {
        return Err(CoreError::Config(format!(
            "Wordlist {} is empty or contains only comments",
            path.display()
        )));
    }

    Ok(words)
}
