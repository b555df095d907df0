// Fixed if/then rules turning exploration and retest outcomes into advice

use crate::classify::classify;
use crate::explore::ExplorationReport;
use crate::retest::RetestReport;

pub const NO_ENDPOINTS_FOUND: &str =
    "No working endpoints found - site may be down or completely restructured";
pub const CHECK_DOMAIN_MOVE: &str = "Consider checking if the site has moved to a different domain";
pub const CONTACT_ADMIN: &str = "Contact the site administrator for current URL structure";
pub const USE_WORKING_ENDPOINTS: &str = "Use the working endpoints instead of the pagination URLs";
pub const PAGINATION_FAILED: &str = "All original pagination URLs failed";
pub const STRUCTURE_CHANGED: &str = "The pagination structure has likely changed";
pub const TRY_EXPLORED_ENDPOINTS: &str = "Try using the working endpoints found during exploration";
pub const NOT_FOUND_ERRORS: &str = "404 errors confirm URL structure has changed";
pub const USE_SITEMAP: &str = "Consider using a sitemap or site exploration tool";
pub const FORBIDDEN_ERRORS: &str = "403 errors suggest access restrictions";
pub const CHECK_AUTH: &str = "Check if authentication is required";

pub fn found_endpoints_message(count: usize) -> String {
    let noun = if count == 1 { "endpoint" } else { "endpoints" };
    format!("Found {} working {}", count, noun)
}

/// Rules run in a fixed order and only ever append; nothing is deduplicated or sorted.
pub fn recommend(exploration: &ExplorationReport, retest: &RetestReport) -> Vec<String> {
    let mut recommendations = Vec::new();

    if exploration.summary.successful == 0 {
        recommendations.push(NO_ENDPOINTS_FOUND.to_string());
        recommendations.push(CHECK_DOMAIN_MOVE.to_string());
        recommendations.push(CONTACT_ADMIN.to_string());
    } else {
        recommendations.push(found_endpoints_message(exploration.summary.successful));
        recommendations.push(USE_WORKING_ENDPOINTS.to_string());
    }

    if retest.summary.total > 0 && retest.summary.successful == 0 {
        recommendations.push(PAGINATION_FAILED.to_string());
        recommendations.push(STRUCTURE_CHANGED.to_string());
        recommendations.push(TRY_EXPLORED_ENDPOINTS.to_string());
    }

    if !retest.failed.is_empty() {
        let analysis = classify(&retest.failed);
        if analysis.count_for_status(404) > 0 {
            recommendations.push(NOT_FOUND_ERRORS.to_string());
            recommendations.push(USE_SITEMAP.to_string());
        }
        if analysis.count_for_status(403) > 0 {
            recommendations.push(FORBIDDEN_ERRORS.to_string());
            recommendations.push(CHECK_AUTH.to_string());
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_endpoints_message_pluralizes() {
        assert_eq!(found_endpoints_message(1), "Found 1 working endpoint");
        assert_eq!(found_endpoints_message(3), "Found 3 working endpoints");
    }

    #[test]
    fn test_empty_runs_only_report_missing_endpoints() {
        let exploration = ExplorationReport::from_results(Vec::new());
        let retest = RetestReport::from_results(Vec::new());

        let recs = recommend(&exploration, &retest);
        assert_eq!(recs, vec![NO_ENDPOINTS_FOUND, CHECK_DOMAIN_MOVE, CONTACT_ADMIN]);
    }
}
