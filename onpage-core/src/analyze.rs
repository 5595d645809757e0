use indicatif::{ProgressBar, ProgressStyle};
use onpage_scanner::{Analyzer, FetchConfig, PageReport};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Options for analyzing one or more pages
pub struct AnalyzeOptions {
    pub urls: Vec<String>,
    pub fetch: FetchConfig,
    pub show_progress: bool,
}

/// What happened to a single target
#[derive(Debug, Clone)]
pub enum TargetOutcome {
    Report(Box<PageReport>),
    /// Timed out, hit the redirect limit, or returned nothing
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TargetResult {
    pub url: String,
    pub outcome: TargetOutcome,
}

impl TargetResult {
    pub fn report(&self) -> Option<&PageReport> {
        match &self.outcome {
            TargetOutcome::Report(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// Callback for reporting analysis progress
pub type AnalyzeProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Analyze each URL in turn with one analyzer, re-targeting it between runs.
/// A failing target never stops the batch.
pub async fn execute_analysis(
    options: AnalyzeOptions,
    progress_callback: Option<AnalyzeProgressCallback>,
) -> Result<Vec<TargetResult>, String> {
    let AnalyzeOptions {
        urls,
        fetch,
        show_progress,
    } = options;

    let mut analyzer =
        Analyzer::with_config(fetch).map_err(|e| format!("Failed to create analyzer: {}", e))?;

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(urls.len());
    for (idx, url) in urls.iter().enumerate() {
        if let Some(ref pb) = spinner {
            pb.set_message(format!("Analyzing {} ({}/{})", url, idx + 1, urls.len()));
        }
        if let Some(ref callback) = progress_callback
            && urls.len() > 1
        {
            callback(format!("Analyzing page {}/{}: {}", idx + 1, urls.len(), url));
        }

        let outcome = match analyze_one(&mut analyzer, url).await {
            Ok(Some(report)) => TargetOutcome::Report(Box::new(report)),
            Ok(None) => {
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  {} is unavailable", url));
                }
                TargetOutcome::Unavailable
            }
            Err(e) => {
                warn!("Failed to analyze {}: {}", url, e);
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to analyze {}: {}", url, e));
                }
                TargetOutcome::Failed(e.to_string())
            }
        };

        results.push(TargetResult {
            url: url.clone(),
            outcome,
        });
    }

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(results)
}

async fn analyze_one(
    analyzer: &mut Analyzer,
    url: &str,
) -> onpage_scanner::Result<Option<PageReport>> {
    analyzer.update_url(url)?;
    analyzer.page_check().await
}

/// One-block summary of a batch
pub fn summarize_outcomes(results: &[TargetResult]) -> String {
    let analyzed = results.iter().filter(|r| r.report().is_some()).count();
    let unavailable = results
        .iter()
        .filter(|r| matches!(r.outcome, TargetOutcome::Unavailable))
        .count();
    let failed = results
        .iter()
        .filter(|r| matches!(r.outcome, TargetOutcome::Failed(_)))
        .count();

    let mut summary = String::new();
    summary.push_str("# Summary:\n");
    summary.push_str(&format!("  Pages requested:   {}\n", results.len()));
    summary.push_str(&format!("  Pages analyzed:    {}\n", analyzed));
    summary.push_str(&format!("  Pages unavailable: {}\n", unavailable));
    summary.push_str(&format!("  Pages failed:      {}\n", failed));

    for result in results {
        match &result.outcome {
            TargetOutcome::Unavailable => {
                summary.push_str(&format!("  - {} (unavailable)\n", result.url))
            }
            TargetOutcome::Failed(reason) => {
                summary.push_str(&format!("  - {} (failed: {})\n", result.url, reason))
            }
            TargetOutcome::Report(_) => {}
        }
    }

    summary
}
