pub mod analyzer;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod lexicon;
pub mod result;

pub use analyzer::{AnalysisState, Analyzer};
pub use error::{Result, ScanError};
pub use fetcher::{FetchConfig, FetchOutcome, Fetcher, UnavailableReason};
pub use result::PageReport;
