// Report assembly, JSON persistence and the console summary

use crate::classify::{ErrorAnalysis, classify};
use crate::error::Result;
use crate::explore::ExplorationReport;
use crate::recommend::recommend;
use crate::retest::RetestReport;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PREVIEW_SNIPPET_CHARS: usize = 100;

/// The document written to disk at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// `null` when only the retest ran
    pub exploration_results: Option<ExplorationReport>,
    /// `null` when only exploration ran
    pub scraping_results: Option<RetestReport>,
    pub error_analysis: ErrorAnalysis,
    pub recommendations: Vec<String>,
    pub timestamp: String,
}

impl AnalysisReport {
    /// Full pipeline output: classification and recommendations derived here.
    pub fn new(exploration: ExplorationReport, retest: RetestReport) -> Self {
        let error_analysis = classify(&retest.failed);
        let recommendations = recommend(&exploration, &retest);

        Self {
            exploration_results: Some(exploration),
            scraping_results: Some(retest),
            error_analysis,
            recommendations,
            timestamp: current_timestamp(),
        }
    }

    /// Exploration alone. Failures of the exploration itself are classified.
    pub fn exploration_only(exploration: ExplorationReport) -> Self {
        let failed: Vec<_> = exploration
            .all_tests
            .iter()
            .filter(|r| !r.is_working())
            .cloned()
            .collect();
        let recommendations = recommend(&exploration, &RetestReport::from_results(Vec::new()));

        Self {
            error_analysis: classify(&failed),
            exploration_results: Some(exploration),
            scraping_results: None,
            recommendations,
            timestamp: current_timestamp(),
        }
    }

    /// Retest alone. Exploration-dependent advice is skipped.
    pub fn retest_only(retest: RetestReport) -> Self {
        let placeholder = ExplorationReport::from_results(Vec::new());
        // The first rule only talks about exploration, which did not run.
        let recommendations = recommend(&placeholder, &retest)
            .into_iter()
            .skip_while(|rec| is_exploration_advice(rec))
            .collect();

        Self {
            error_analysis: classify(&retest.failed),
            exploration_results: None,
            scraping_results: Some(retest),
            recommendations,
            timestamp: current_timestamp(),
        }
    }
}

fn is_exploration_advice(rec: &str) -> bool {
    use crate::recommend::{CHECK_DOMAIN_MOVE, CONTACT_ADMIN, NO_ENDPOINTS_FOUND};
    rec == NO_ENDPOINTS_FOUND || rec == CHECK_DOMAIN_MOVE || rec == CONTACT_ADMIN
}

pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the report, creating parent directories as needed.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn generate_text_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════════════════════════════════════\n");
    out.push_str("                            WAYMARK ANALYSIS\n");
    out.push_str("═══════════════════════════════════════════════════════════════════════════════\n\n");

    if let Some(ref exploration) = report.exploration_results {
        out.push_str("Site Exploration Summary:\n");
        out.push_str(&format!("  Total endpoints tested: {}\n", exploration.summary.total_tested));
        out.push_str(&format!("  Successful: {}\n", exploration.summary.successful));
        out.push_str(&format!("  Failed: {}\n\n", exploration.summary.failed));

        if !exploration.working_endpoints.is_empty() {
            out.push_str("Working Endpoints Found:\n");
            for endpoint in &exploration.working_endpoints {
                out.push_str(&format!(
                    "  • {} ({}) - {} bytes\n",
                    endpoint.url,
                    endpoint.status_code.unwrap_or_default(),
                    endpoint.content_length.unwrap_or_default()
                ));
                let snippet: String = endpoint
                    .content_preview
                    .chars()
                    .take(PREVIEW_SNIPPET_CHARS)
                    .collect();
                out.push_str(&format!("    Preview: {}...\n", snippet.replace('\n', " ")));
            }
            out.push('\n');
        }
    }

    if let Some(ref retest) = report.scraping_results {
        out.push_str("Original URL Testing Results:\n");
        out.push_str(&format!("  Total URLs tested: {}\n", retest.summary.total));
        out.push_str(&format!("  Successful: {}\n", retest.summary.successful));
        out.push_str(&format!("  Failed: {}\n", retest.summary.failed));
        out.push_str(&format!("  Success rate: {}\n\n", retest.summary.success_rate));
    }

    if report.error_analysis.total_failures > 0 {
        out.push_str("Error Analysis:\n");
        out.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        out.push_str("  Status codes:\n");
        for (status, count) in &report.error_analysis.status_codes {
            out.push_str(&format!("    {:<10} {}\n", status.to_string(), count));
        }
        out.push_str("  Error types:\n");
        for (error, count) in &report.error_analysis.error_types {
            out.push_str(&format!("    {} ({})\n", error, count));
        }
        out.push('\n');
    }

    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for (idx, rec) in report.recommendations.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, rec));
        }
        out.push('\n');
    }

    if let Some(conclusion) = conclusion(report) {
        out.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        out.push_str(&conclusion);
        out.push('\n');
    }

    out.push_str("═══════════════════════════════════════════════════════════════════════════════\n");
    out
}

fn conclusion(report: &AnalysisReport) -> Option<String> {
    let retest = report.scraping_results.as_ref()?;
    if retest.summary.total == 0 || retest.summary.successful > 0 {
        return None;
    }

    let has_working = report
        .exploration_results
        .as_ref()
        .is_some_and(|e| e.summary.successful > 0);

    Some(if has_working {
        "CONCLUSION: The legacy URLs no longer resolve because the site structure has\n\
         changed. Use the working endpoints listed above instead."
            .to_string()
    } else {
        "CONCLUSION: Neither the legacy URLs nor any candidate endpoint responded.\n\
         The site may be down, moved, or blocking automated requests."
            .to_string()
    })
}
