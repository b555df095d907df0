// Endpoint exploration: probe a catalog of guessed paths on one domain

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use url::Url;
use waymark_scanner::{ProbeResult, Prober, RequestPacing};

/// Called after every probe with the 1-based position, the total, and the result.
pub type ProbeProgressCallback = Arc<dyn Fn(usize, usize, &ProbeResult) + Send + Sync>;

/// Options for configuring an exploration
pub struct ExploreOptions {
    pub domain: String,
    pub candidate_suffixes: Vec<String>,
    pub pacing: RequestPacing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub total_tested: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub all_tests: Vec<ProbeResult>,
    pub working_endpoints: Vec<ProbeResult>,
    pub summary: ExplorationSummary,
}

impl ExplorationReport {
    pub fn from_results(all_tests: Vec<ProbeResult>) -> Self {
        let working_endpoints: Vec<ProbeResult> = all_tests
            .iter()
            .filter(|r| r.is_working())
            .cloned()
            .collect();

        let summary = ExplorationSummary {
            total_tested: all_tests.len(),
            successful: working_endpoints.len(),
            failed: all_tests.len() - working_endpoints.len(),
        };

        Self {
            all_tests,
            working_endpoints,
            summary,
        }
    }
}

/// Bare domain over HTTPS and HTTP, then every suffix over HTTPS.
///
/// URLs are normalized before deduplication, so `https://host` and
/// `https://host/` count once. First occurrence wins.
pub fn build_candidate_urls(domain: &str, suffixes: &[String]) -> Result<Vec<String>> {
    let domain = domain.trim();
    let mut candidates = vec![
        normalize(&format!("https://{}", domain))?,
        normalize(&format!("http://{}", domain))?,
    ];

    for suffix in suffixes {
        let suffix = suffix.trim();
        let path = if suffix.starts_with('/') {
            suffix.to_string()
        } else {
            format!("/{}", suffix)
        };
        candidates.push(normalize(&format!("https://{}{}", domain, path))?);
    }

    let mut seen = HashSet::new();
    candidates.retain(|url| seen.insert(url.clone()));
    Ok(candidates)
}

fn normalize(raw: &str) -> Result<String> {
    let url = Url::parse(raw).map_err(|e| CoreError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.host_str().is_none() {
        return Err(CoreError::InvalidUrl(format!("{}: missing host", raw)));
    }
    Ok(url.to_string())
}

/// Probe every candidate URL in order, pausing between requests.
pub async fn explore(
    prober: &Prober,
    options: &ExploreOptions,
    progress: Option<ProbeProgressCallback>,
) -> Result<ExplorationReport> {
    let urls = build_candidate_urls(&options.domain, &options.candidate_suffixes)?;
    info!("Exploring {} with {} candidate URLs", options.domain, urls.len());

    let targets = urls.into_iter().map(|url| (url, None)).collect();
    let results = probe_sequentially(prober, targets, options.pacing, progress).await;

    let report = ExplorationReport::from_results(results);
    info!(
        "Exploration complete: {}/{} working",
        report.summary.successful, report.summary.total_tested
    );
    Ok(report)
}

/// Probe `(url, original_url)` pairs one at a time. No pause after the last request.
pub(crate) async fn probe_sequentially(
    prober: &Prober,
    targets: Vec<(String, Option<String>)>,
    pacing: RequestPacing,
    progress: Option<ProbeProgressCallback>,
) -> Vec<ProbeResult> {
    let total = targets.len();
    let mut results = Vec::with_capacity(total);

    for (idx, (url, original_url)) in targets.into_iter().enumerate() {
        if idx > 0 {
            pacing.pause().await;
        }

        let mut result = prober.probe(&url).await;
        if let Some(original) = original_url {
            result = result.with_original_url(original);
        }

        if let Some(ref callback) = progress {
            callback(idx + 1, total, &result);
        }
        results.push(result);
    }

    results
}
