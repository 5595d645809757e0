// Report rendering for a single page analysis

use onpage_scanner::PageReport;
use onpage_scanner::result::{LinkSet, MetaReport, TitleReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

pub fn render_report(report: &PageReport, format: &ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

fn section(report: &mut String, heading: &str) {
    report.push_str(RULE);
    report.push('\n');
    report.push_str(heading);
    report.push('\n');
    report.push_str(RULE);
    report.push_str("\n\n");
}

pub fn generate_text_report(data: &PageReport) -> String {
    let mut report = String::new();

    // Header
    report.push_str(RULE);
    report.push('\n');
    report.push_str("                          ONPAGE SEO REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");
    report.push_str(&format!("URL:          {}\n\n", data.url));

    section(&mut report, "TITLE");
    push_title(&mut report, &data.title);

    section(&mut report, "META DESCRIPTION");
    push_meta(&mut report, &data.meta);

    section(&mut report, "HEADINGS");
    for (level, bucket) in data.head.iter() {
        report.push_str(&format!("{}  ({})\n", level.as_str().to_uppercase(), bucket.count()));
        for text in bucket.text() {
            report.push_str(&format!("  - {}\n", collapse_whitespace(text)));
        }
    }
    report.push('\n');

    section(&mut report, "LINKS");
    push_links(&mut report, "Internal links", &data.links.in_links);
    push_links(&mut report, "External links", &data.links.out_links);

    section(&mut report, "IMAGE ALT TEXT");
    report.push_str(&format!(
        "Images: {}  (missing alt: {})\n\n",
        data.alt_text.len(),
        data.missing_alt_count()
    ));
    for record in &data.alt_text {
        let image = record.src.as_deref().unwrap_or(record.image.as_str());
        let marker = if record.has_alt { "✓" } else { "✗" };
        report.push_str(&format!("  {} {}\n", marker, image));
        report.push_str(&format!("      alt: {}\n", record.alt));
    }
    report.push('\n');

    section(&mut report, "TOP KEYWORDS");
    if data.keywords.is_empty() {
        report.push_str("  (none)\n");
    }
    for (idx, keyword) in data.keywords.iter().enumerate() {
        report.push_str(&format!("  {:>2}. {:<24} {}\n", idx + 1, keyword.word, keyword.count));
    }
    report.push('\n');

    // Footer
    report.push_str(RULE);
    report.push('\n');
    report.push_str("                            End of Report\n");
    report.push_str(RULE);
    report.push('\n');

    report
}

fn push_title(report: &mut String, title: &TitleReport) {
    report.push_str(&format!("Present:      {}\n", yes_no(title.has_title)));
    report.push_str(&format!("Title:        {}\n", title.title));
    report.push_str(&format!("Length:       {}\n\n", title.title_length));
}

fn push_meta(report: &mut String, meta: &MetaReport) {
    report.push_str(&format!("Present:      {}\n", yes_no(meta.has_meta)));
    report.push_str(&format!("Length:       {}\n", meta.meta_len));
    report.push_str(&format!("Advice:       {}\n", meta.meta_advice));
    report.push_str("\nDescription:\n");
    report.push_str(&wrap_text(&meta.meta, 80, "  "));
    report.push('\n');
}

fn push_links(report: &mut String, label: &str, links: &LinkSet) {
    report.push_str(&format!("{} ({})\n", label, links.count()));
    report.push_str(THIN_RULE);
    report.push('\n');
    for record in links.records() {
        let text = collapse_whitespace(&record.text);
        if text.is_empty() {
            report.push_str(&format!("  {}\n", record.link));
        } else {
            report.push_str(&format!("  {} -> {}\n", text, record.link));
        }
    }
    report.push('\n');
}

pub fn generate_json_report(data: &PageReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "onpage",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "page": data
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(data: &PageReport) -> String {
    let mut report = String::new();

    report.push_str(&format!("# SEO report for {}\n\n", data.url));

    report.push_str("## Title\n\n");
    report.push_str("| Present | Title | Length |\n|---|---|---|\n");
    report.push_str(&format!(
        "| {} | {} | {} |\n\n",
        yes_no(data.title.has_title),
        escape_cell(&data.title.title),
        escape_cell(&data.title.title_length)
    ));

    report.push_str("## Meta description\n\n");
    report.push_str("| Present | Length | Advice |\n|---|---|---|\n");
    report.push_str(&format!(
        "| {} | {} | {} |\n\n",
        yes_no(data.meta.has_meta),
        data.meta.meta_len,
        escape_cell(&data.meta.meta_advice)
    ));
    if data.meta.has_meta {
        for line in data.meta.meta.lines() {
            report.push_str(&format!("> {}\n", line));
        }
        report.push('\n');
    }

    report.push_str("## Headings\n\n");
    report.push_str("| Level | Count | Text |\n|---|---|---|\n");
    for (level, bucket) in data.head.iter() {
        let text = bucket
            .text()
            .iter()
            .map(|t| escape_cell(&collapse_whitespace(t)))
            .collect::<Vec<_>>()
            .join("<br>");
        report.push_str(&format!("| {} | {} | {} |\n", level, bucket.count(), text));
    }
    report.push('\n');

    for (label, links) in [
        ("Internal links", &data.links.in_links),
        ("External links", &data.links.out_links),
    ] {
        report.push_str(&format!("## {} ({})\n\n", label, links.count()));
        if links.count() > 0 {
            report.push_str("| Text | Link |\n|---|---|\n");
            for record in links.records() {
                report.push_str(&format!(
                    "| {} | {} |\n",
                    escape_cell(&collapse_whitespace(&record.text)),
                    escape_cell(&record.link)
                ));
            }
            report.push('\n');
        }
    }

    report.push_str(&format!(
        "## Image alt text ({} images, {} missing)\n\n",
        data.alt_text.len(),
        data.missing_alt_count()
    ));
    if !data.alt_text.is_empty() {
        report.push_str("| Image | Alt |\n|---|---|\n");
        for record in &data.alt_text {
            let image = record.src.as_deref().unwrap_or(record.image.as_str());
            report.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(image),
                escape_cell(&record.alt)
            ));
        }
        report.push('\n');
    }

    report.push_str("## Top keywords\n\n");
    report.push_str("| # | Word | Count |\n|---|---|---|\n");
    for (idx, keyword) in data.keywords.iter().enumerate() {
        report.push_str(&format!("| {} | {} | {} |\n", idx + 1, keyword.word, keyword.count));
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() && !current_line.is_empty() {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
