use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use onpage_core::analyze::{
    AnalyzeOptions, AnalyzeProgressCallback, TargetOutcome, execute_analysis, summarize_outcomes,
};
use onpage_core::report::{ReportFormat, render_report, save_report};
use onpage_scanner::FetchConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

// Helper functions for the analyze handler

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&Url>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.as_str().to_string()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as an http(s) URL, adding http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if let Ok(url) = Url::parse(&with_scheme)
        && url.host_str().is_some_and(|host| !host.contains(' '))
    {
        return Some(with_scheme);
    }

    warn!("Skipping invalid URL '{}'", line);
    None
}

/// Fetch settings from the analyze subcommand's flags
pub fn fetch_config_from_args(args: &ArgMatches) -> FetchConfig {
    let mut config = FetchConfig::default();
    if let Some(secs) = args.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*secs));
    }
    if let Some(secs) = args.get_one::<u64>("connect-timeout") {
        config = config.with_connect_timeout(Duration::from_secs(*secs));
    }
    if let Some(max) = args.get_one::<usize>("max-redirects") {
        config = config.with_max_redirects(*max);
    }
    config
}

/// Runs the analyze subcommand. Returns `false` if any target failed outright.
pub async fn handle_analyze(args: &ArgMatches, quiet: bool) -> Result<bool> {
    let urls = load_urls_from_source(
        args.get_one::<Url>("url"),
        args.get_one::<PathBuf>("hosts-file"),
    )
    .map_err(|e| anyhow!(e))?;

    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_name))?;

    let output = args
        .get_one::<PathBuf>("output")
        .map(|path| PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref()));

    let progress_callback: AnalyzeProgressCallback = Arc::new(|msg: String| {
        eprintln!("{}", msg.bright_black());
    });

    let results = execute_analysis(
        AnalyzeOptions {
            urls,
            fetch: fetch_config_from_args(args),
            show_progress: !quiet,
        },
        Some(progress_callback),
    )
    .await
    .map_err(|e| anyhow!(e))?;

    let mut rendered = Vec::new();
    for result in &results {
        match &result.outcome {
            TargetOutcome::Report(report) => {
                rendered.push(render_report(report, &format).context("Failed to render report")?)
            }
            TargetOutcome::Unavailable => eprintln!(
                "{} {} is unavailable (timed out or too many redirects); no report produced",
                "⚠".yellow().bold(),
                result.url
            ),
            TargetOutcome::Failed(reason) => eprintln!(
                "{} Failed to analyze {}: {}",
                "✗".red().bold(),
                result.url,
                reason
            ),
        }
    }

    let content = rendered.join("\n");
    match output {
        Some(path) if !rendered.is_empty() => {
            save_report(&content, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            eprintln!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        _ => print!("{}", content),
    }

    if results.len() > 1 && !quiet {
        eprintln!("\n{}", summarize_outcomes(&results));
    }

    Ok(!results
        .iter()
        .any(|r| matches!(r.outcome, TargetOutcome::Failed(_))))
}
