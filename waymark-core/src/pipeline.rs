// Full run: exploration followed by the legacy URL retest

use crate::error::Result;
use crate::explore::{ExploreOptions, ProbeProgressCallback, explore};
use crate::report::AnalysisReport;
use crate::retest::retest;
use std::sync::Arc;
use waymark_scanner::Prober;

/// Called once between the two phases with the number of legacy URLs.
pub type PhaseCallback = Arc<dyn Fn(usize) + Send + Sync>;

#[derive(Default, Clone)]
pub struct RunHooks {
    pub explore_progress: Option<ProbeProgressCallback>,
    pub retest_progress: Option<ProbeProgressCallback>,
    pub on_retest_start: Option<PhaseCallback>,
}

/// Explore, then retest, with the pacing delay kept across the phase boundary.
pub async fn explore_and_retest(
    prober: &Prober,
    options: &ExploreOptions,
    legacy_urls: &[String],
    hooks: RunHooks,
) -> Result<AnalysisReport> {
    let exploration = explore(prober, options, hooks.explore_progress).await?;

    if let Some(ref callback) = hooks.on_retest_start {
        callback(legacy_urls.len());
    }
    if !exploration.all_tests.is_empty() && !legacy_urls.is_empty() {
        options.pacing.pause().await;
    }

    let retest_report = retest(prober, legacy_urls, options.pacing, hooks.retest_progress).await;
    Ok(AnalysisReport::new(exploration, retest_report))
}
