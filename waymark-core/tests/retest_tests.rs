// Tests for legacy URL retesting

use std::sync::Arc;
use waymark_core::config::default_legacy_urls;
use waymark_core::explore::ExplorationReport;
use waymark_core::recommend::{NOT_FOUND_ERRORS, PAGINATION_FAILED, recommend};
use waymark_core::retest::{RetestReport, retest};
use waymark_core::classify::StatusKey;
use waymark_core::report::AnalysisReport;
use waymark_scanner::{ProbeResult, Prober, RequestPacing, StubResponse, StubTransport};

#[tokio::test]
async fn test_all_pagination_urls_not_found() {
    let stub = Arc::new(StubTransport::new(StubResponse::status(404)));
    let prober = Prober::new(stub.clone());
    let urls = default_legacy_urls();

    let report = retest(&prober, &urls, RequestPacing::None, None).await;

    assert_eq!(report.summary.total, 25);
    assert_eq!(report.summary.successful, 0);
    assert_eq!(report.summary.failed, 25);
    assert_eq!(report.summary.success_rate, "0.0%");

    // Every request went out over HTTPS
    assert!(stub.requests().iter().all(|u| u.starts_with("https://")));

    let exploration = ExplorationReport::from_results(Vec::new());
    let recs = recommend(&exploration, &report);
    assert!(recs.iter().any(|r| r == NOT_FOUND_ERRORS));
    assert!(recs.iter().any(|r| r == PAGINATION_FAILED));

    let analysis = AnalysisReport::new(exploration, report);
    assert_eq!(analysis.error_analysis.status_codes.get(&StatusKey::Code(404)), Some(&25));
}

#[tokio::test]
async fn test_results_tagged_with_original_url() {
    let stub = StubTransport::new(StubResponse::status(404)).with_route(
        "https://www.example.test/filter/all/page/2",
        StubResponse::ok("page two"),
    );
    let prober = Prober::new(Arc::new(stub));
    let urls = vec![
        "http://www.example.test/filter/all/page/1".to_string(),
        "http://www.example.test/filter/all/page/2".to_string(),
    ];

    let report = retest(&prober, &urls, RequestPacing::None, None).await;

    assert_eq!(report.all_results.len(), 2);
    for (result, original) in report.all_results.iter().zip(&urls) {
        assert_eq!(result.original_url.as_ref(), Some(original));
        assert_eq!(result.url, original.replace("http://", "https://"));
    }

    assert_eq!(report.successful.len(), 1);
    assert_eq!(report.successful[0].url, "https://www.example.test/filter/all/page/2");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.summary.success_rate, "50.0%");
}

#[tokio::test]
async fn test_uppercase_http_scheme_is_upgraded() {
    let stub = Arc::new(StubTransport::new(StubResponse::status(404)));
    let prober = Prober::new(stub.clone());
    let urls = vec!["HTTP://www.example.test/filter/all/page/1".to_string()];

    let report = retest(&prober, &urls, RequestPacing::None, None).await;

    assert_eq!(
        stub.requests(),
        vec!["https://www.example.test/filter/all/page/1".to_string()]
    );
    assert_eq!(report.all_results[0].original_url.as_ref(), Some(&urls[0]));
}

#[test]
fn test_partition_covers_all_results() {
    let results = vec![
        ProbeResult::success(
            "https://example.test/1".to_string(),
            200,
            1,
            "a".to_string(),
            Default::default(),
        ),
        ProbeResult::success(
            "https://example.test/2".to_string(),
            204,
            0,
            "Empty response".to_string(),
            Default::default(),
        ),
        ProbeResult::with_error("https://example.test/3".to_string(), "dns error".to_string()),
    ];

    let report = RetestReport::from_results(results);

    assert_eq!(report.successful.len() + report.failed.len(), report.all_results.len());
    // 204 is a success at the prober level but not a working endpoint
    assert_eq!(report.summary.successful, 1);
    assert_eq!(report.summary.failed, 2);
    assert_eq!(report.summary.success_rate, "33.3%");
}

#[test]
fn test_empty_retest_has_guarded_rate() {
    let report = RetestReport::from_results(Vec::new());
    assert_eq!(report.summary.total, 0);
    assert_eq!(report.summary.success_rate, "0.0%");
}

