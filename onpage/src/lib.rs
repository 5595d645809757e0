pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{load_urls_from_file, load_urls_from_source, parse_url_line};

// Re-export analysis functionality from onpage-core
pub use onpage_core::analyze::{
    AnalyzeOptions, AnalyzeProgressCallback, TargetOutcome, TargetResult, execute_analysis,
    summarize_outcomes,
};
