use crate::error::{Result, ScanError};
use crate::result::{LinkRecord, LinkSet, PageLinks};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;
use url::{Position, Url};

use super::static_selector;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));

/// A single anchor that could not be turned into a link record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedLink {
    #[error("anchor has an empty href")]
    EmptyHref,

    #[error("'{0}' does not form a valid URL")]
    Unresolvable(String),
}

/// Scheme and `host[:port]` of the analyzed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAuthority {
    scheme: String,
    authority: String,
}

impl PageAuthority {
    pub fn from_url(url: &Url) -> Result<Self> {
        if url.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{url} has no host")));
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            authority: url[Position::BeforeHost..Position::AfterPort].to_string(),
        })
    }

    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{url}: {e}")))?;
        Self::from_url(&parsed)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}

enum LinkClass {
    Internal(LinkRecord),
    External(LinkRecord),
}

/// Splits the page's anchors into internal and external links.
///
/// Domain matching is substring containment of the page authority in the
/// href, so `example.com` also claims `notexample.com.evil.net`.
pub fn extract_links(page: &PageAuthority, document: &Html) -> PageLinks {
    let mut links = PageLinks {
        in_links: LinkSet::new(),
        out_links: LinkSet::new(),
    };

    for element in document.select(&LINK_SELECTOR) {
        match classify(page, element) {
            Ok(Some(LinkClass::Internal(record))) => links.in_links.push(record),
            Ok(Some(LinkClass::External(record))) => links.out_links.push(record),
            Ok(None) => {}
            Err(e) => debug!("Skipping link: {}", e),
        }
    }

    debug!(
        "Found {} internal and {} external links",
        links.in_links.count(),
        links.out_links.count()
    );
    links
}

fn classify(
    page: &PageAuthority,
    element: ElementRef<'_>,
) -> std::result::Result<Option<LinkClass>, MalformedLink> {
    let Some(href) = element.value().attr("href") else {
        return Ok(None);
    };
    let href = href.trim_matches(|c: char| c.is_ascii_whitespace());
    if href.is_empty() {
        return Err(MalformedLink::EmptyHref);
    }

    let text = element.text().collect::<String>().trim().to_string();

    if href.starts_with('/') {
        let link = format!("{}://{}{}", page.scheme, page.authority, href);
        Url::parse(&link).map_err(|_| MalformedLink::Unresolvable(link.clone()))?;
        Ok(Some(LinkClass::Internal(LinkRecord { text, link })))
    } else if href.contains(page.authority.as_str()) {
        Ok(Some(LinkClass::Internal(LinkRecord {
            text,
            link: href.to_string(),
        })))
    } else if !href.starts_with('#') {
        Ok(Some(LinkClass::External(LinkRecord {
            text,
            link: href.to_string(),
        })))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links_of(url: &str, html: &str) -> PageLinks {
        let page = PageAuthority::parse(url).unwrap();
        extract_links(&page, &Html::parse_document(html))
    }

    #[test]
    fn test_root_relative_and_external() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="/about">About</a><a href="https://external.com/x">Ext</a>"#,
        );

        assert_eq!(links.in_links.count(), 1);
        assert_eq!(links.in_links.records()[0].link, "https://example.com/about");
        assert_eq!(links.in_links.records()[0].text, "About");
        assert_eq!(links.out_links.count(), 1);
        assert_eq!(links.out_links.records()[0].link, "https://external.com/x");
        assert_eq!(links.out_links.records()[0].text, "Ext");
    }

    #[test]
    fn test_root_relative_reconstruction_keeps_port_and_query() {
        let links = links_of(
            "http://localhost:8080/page",
            r#"<a href="/search?q=rust#top">Search</a>"#,
        );
        assert_eq!(
            links.in_links.records()[0].link,
            "http://localhost:8080/search?q=rust#top"
        );
    }

    #[test]
    fn test_absolute_same_domain_kept_verbatim() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="https://example.com/blog">Blog</a>"#,
        );
        assert_eq!(links.in_links.records()[0].link, "https://example.com/blog");
        assert_eq!(links.out_links.count(), 0);
    }

    #[test]
    fn test_substring_match_is_permissive() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="https://notexample.com/">Lookalike</a>
               <a href="https://cdn.net/?ref=example.com">Ref</a>"#,
        );
        assert_eq!(links.in_links.count(), 2);
        assert_eq!(links.out_links.count(), 0);
    }

    #[test]
    fn test_fragment_links_skipped() {
        let links = links_of(
            "https://example.com/",
            r##"<a href="#section">Jump</a><a href="#">Top</a>"##,
        );
        assert_eq!(links.in_links.count(), 0);
        assert_eq!(links.out_links.count(), 0);
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let links = links_of("https://example.com/", r#"<a name="anchor">No link</a>"#);
        assert_eq!(links.in_links.count() + links.out_links.count(), 0);
    }

    #[test]
    fn test_empty_href_dropped_without_aborting_scan() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="">Empty</a><a href="   ">Blank</a><a href="/ok">Ok</a>"#,
        );
        assert_eq!(links.in_links.count(), 1);
        assert_eq!(links.in_links.records()[0].link, "https://example.com/ok");
        assert_eq!(links.out_links.count(), 0);
    }

    #[test]
    fn test_relative_and_scheme_links_are_external() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="contact.html">Contact</a><a href="mailto:hi@other.org">Mail</a>"#,
        );
        assert_eq!(links.out_links.count(), 2);
        assert_eq!(links.out_links.records()[0].link, "contact.html");
    }

    #[test]
    fn test_counts_match_records() {
        let links = links_of(
            "https://example.com/",
            r#"<a href="/a">a</a><a href="/b">b</a><a href="https://x.org">x</a>"#,
        );
        assert_eq!(links.in_links.count(), links.in_links.records().len());
        assert_eq!(links.out_links.count(), links.out_links.records().len());
        assert!(
            links
                .in_links
                .records()
                .iter()
                .chain(links.out_links.records())
                .all(|record| !record.link.is_empty())
        );
    }

    #[test]
    fn test_authority_includes_explicit_port() {
        let page = PageAuthority::parse("http://127.0.0.1:3000/index.html").unwrap();
        assert_eq!(page.authority(), "127.0.0.1:3000");
        assert_eq!(page.scheme(), "http");
    }

    #[test]
    fn test_authority_requires_host() {
        assert!(PageAuthority::parse("mailto:someone@example.com").is_err());
        assert!(PageAuthority::parse("not a url").is_err());
    }
}
