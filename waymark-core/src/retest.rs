// Retest previously known URLs over HTTPS

use crate::explore::{ProbeProgressCallback, probe_sequentially};
use serde::{Deserialize, Serialize};
use tracing::info;
use waymark_scanner::{ProbeResult, Prober, RequestPacing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetestSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage with one decimal, e.g. "12.0%"
    pub success_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetestReport {
    pub all_results: Vec<ProbeResult>,
    pub successful: Vec<ProbeResult>,
    pub failed: Vec<ProbeResult>,
    pub summary: RetestSummary,
}

impl RetestReport {
    pub fn from_results(all_results: Vec<ProbeResult>) -> Self {
        let (successful, failed): (Vec<ProbeResult>, Vec<ProbeResult>) =
            all_results.iter().cloned().partition(ProbeResult::is_working);

        let summary = RetestSummary {
            total: all_results.len(),
            successful: successful.len(),
            failed: failed.len(),
            success_rate: format_success_rate(successful.len(), all_results.len()),
        };

        Self {
            all_results,
            successful,
            failed,
            summary,
        }
    }
}

/// `successful / total` as a one-decimal percentage. An empty run is "0.0%".
pub fn format_success_rate(successful: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", successful as f64 / total as f64 * 100.0)
}

const HTTP_PREFIX: &str = "http://";

/// Rewrite plain HTTP (or a missing scheme) to HTTPS. Other schemes pass through.
pub fn upgrade_scheme(url: &str) -> String {
    let url = url.trim();
    // Schemes are case-insensitive
    let plain_http = url
        .get(..HTTP_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(HTTP_PREFIX));
    if plain_http {
        format!("https://{}", &url[HTTP_PREFIX.len()..])
    } else if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Probe each legacy URL over HTTPS, tagging results with the URL as given.
pub async fn retest(
    prober: &Prober,
    urls: &[String],
    pacing: RequestPacing,
    progress: Option<ProbeProgressCallback>,
) -> RetestReport {
    info!("Retesting {} legacy URLs", urls.len());

    let targets = urls
        .iter()
        .map(|original| (upgrade_scheme(original), Some(original.clone())))
        .collect();
    let results = probe_sequentially(prober, targets, pacing, progress).await;

    let report = RetestReport::from_results(results);
    info!(
        "Retest complete: {}/{} working ({})",
        report.summary.successful, report.summary.total, report.summary.success_rate
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_scheme() {
        assert_eq!(
            upgrade_scheme("http://www.example.test/filter/all/page/1"),
            "https://www.example.test/filter/all/page/1"
        );
        assert_eq!(
            upgrade_scheme("https://example.test/a"),
            "https://example.test/a"
        );
        assert_eq!(upgrade_scheme("example.test/a"), "https://example.test/a");
        assert_eq!(upgrade_scheme("ftp://example.test/a"), "ftp://example.test/a");
        assert_eq!(
            upgrade_scheme("HTTP://www.example.test/filter/all/page/1"),
            "https://www.example.test/filter/all/page/1"
        );
        assert_eq!(upgrade_scheme("Http://example.test/a"), "https://example.test/a");
        assert_eq!(upgrade_scheme("HTTPS://example.test/a"), "HTTPS://example.test/a");
        assert_eq!(upgrade_scheme("héllo"), "https://héllo");
    }

    #[test]
    fn test_format_success_rate() {
        assert_eq!(format_success_rate(0, 0), "0.0%");
        assert_eq!(format_success_rate(0, 25), "0.0%");
        assert_eq!(format_success_rate(1, 3), "33.3%");
        assert_eq!(format_success_rate(2, 3), "66.7%");
        assert_eq!(format_success_rate(25, 25), "100.0%");
    }
}
