use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No target URL set; call update_url first")]
    NoTarget,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network faults that are not timeouts or redirect loops.
    #[error("HTTP request failed: {0}")]
    Fetch(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
