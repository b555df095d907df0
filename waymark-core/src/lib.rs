pub mod classify;
pub mod config;
pub mod error;
pub mod explore;
pub mod pipeline;
pub mod recommend;
pub mod report;
pub mod retest;

use colored::Colorize;

pub use classify::{ErrorAnalysis, StatusKey, classify};
pub use config::WaymarkConfig;
pub use error::CoreError;
pub use explore::{ExplorationReport, ExploreOptions, ProbeProgressCallback, explore};
pub use pipeline::{RunHooks, explore_and_retest};
pub use recommend::recommend;
pub use report::AnalysisReport;
pub use retest::{RetestReport, retest};

pub fn print_banner() {
    let banner = r#"
 __      __                                 __
/  \    /  \_____  ___.__. _____ _____ ____|  | __
\   \/\/   /\__  \<   |  |/     \\__  \\_  __ \ |/ /
 \        /  / __ \\___  |  Y Y  \/ __ \|  | \/    <
  \__/\  /  (____  / ____|__|_|  (____  /__|  |__|_ \
       \/        \/\/          \/     \/           \/
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} {}\n",
        "endpoint discovery & legacy URL triage".white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
