use crate::error::{Result, ScanError};
use crate::extract::{
    PageAuthority, extract_alt_text, extract_headings, extract_keywords, extract_links,
    extract_meta, extract_title,
};
use crate::fetcher::{FetchConfig, FetchOutcome, Fetcher};
use crate::lexicon;
use crate::result::PageReport;
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

/// Where the analyzer is in its current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    /// No target set yet.
    Idle,
    /// Target set, nothing fetched.
    Targeted,
    Fetched,
    Analyzed,
    /// The last fetch timed out or hit the redirect limit.
    Unavailable,
}

/// Fetches one page and builds its [`PageReport`].
///
/// Only the target URL carries over between runs; every call to
/// [`page_check`](Analyzer::page_check) parses and reports from scratch.
pub struct Analyzer {
    fetcher: Fetcher,
    target: Option<Url>,
    state: AnalysisState,
}

impl Analyzer {
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self> {
        lexicon::init();

        Ok(Self {
            fetcher: Fetcher::new(&config)?,
            target: None,
            state: AnalysisState::Idle,
        })
    }

    /// Sets the page to analyze. Accepts absolute http(s) URLs only.
    pub fn update_url(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!(
                "{url}: expected an absolute http(s) URL"
            )));
        }

        info!("Target set to {}", parsed);
        self.target = Some(parsed);
        self.state = AnalysisState::Targeted;
        Ok(())
    }

    pub fn url(&self) -> Option<&str> {
        self.target.as_ref().map(Url::as_str)
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    /// Fetches the current target and runs every extractor on it.
    ///
    /// Returns `Ok(None)` when the page is unavailable (timeout, redirect
    /// limit, empty body).
    pub async fn page_check(&mut self) -> Result<Option<PageReport>> {
        let target = self.target.clone().ok_or(ScanError::NoTarget)?;
        self.state = AnalysisState::Targeted;

        let body = match self.fetcher.fetch(target.as_str()).await? {
            FetchOutcome::Body(body) => body,
            FetchOutcome::Unavailable(reason) => {
                warn!("Skipping analysis of {}: {}", target, reason);
                self.state = AnalysisState::Unavailable;
                return Ok(None);
            }
        };
        self.state = AnalysisState::Fetched;

        let report = Self::analyze_html(&target, &body)?;
        self.state = AnalysisState::Analyzed;
        info!(
            "Analyzed {}: {} headings, {} internal / {} external links, {} images, {} keywords",
            target,
            report.head.total(),
            report.links.in_links.count(),
            report.links.out_links.count(),
            report.alt_text.len(),
            report.keywords.len()
        );

        Ok(Some(report))
    }

    /// Runs the extractors against an already fetched body.
    pub fn analyze_html(url: &Url, html: &str) -> Result<PageReport> {
        lexicon::init();
        let page = PageAuthority::from_url(url)?;
        let document = Html::parse_document(html);
        debug!("Parsed {} bytes of HTML from {}", html.len(), url);

        Ok(PageReport {
            url: url.to_string(),
            title: extract_title(&document),
            meta: extract_meta(&document),
            head: extract_headings(&document),
            links: extract_links(&page, &document),
            alt_text: extract_alt_text(&document),
            keywords: extract_keywords(&document),
        })
    }
}
