// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, format_probe_line, load_urls_from_file, parse_url_line, resolve_config};

// Re-export the analysis entry points from waymark-core
pub use waymark_core::{AnalysisReport, ExploreOptions, WaymarkConfig, explore, retest};
