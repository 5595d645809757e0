use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleReport {
    pub has_title: bool,
    pub title: String,
    pub title_length: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaReport {
    pub has_meta: bool,
    pub meta: String,
    pub meta_len: String,
    pub meta_advice: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headings found at one level. `count` always equals `text.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HeadingBucketFields")]
pub struct HeadingBucket {
    count: usize,
    text: Vec<String>,
}

#[derive(Deserialize)]
struct HeadingBucketFields {
    count: usize,
    text: Vec<String>,
}

impl TryFrom<HeadingBucketFields> for HeadingBucket {
    type Error = String;

    fn try_from(fields: HeadingBucketFields) -> Result<Self, Self::Error> {
        check_count(fields.count, fields.text.len())?;
        Ok(Self {
            count: fields.count,
            text: fields.text,
        })
    }
}

fn check_count(count: usize, len: usize) -> Result<(), String> {
    if count == len {
        Ok(())
    } else {
        Err(format!("count is {count} but {len} entries are listed"))
    }
}

impl HeadingBucket {
    pub fn push(&mut self, text: String) {
        self.text.push(text);
        self.count = self.text.len();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadingInventory {
    levels: BTreeMap<HeadingLevel, HeadingBucket>,
}

impl HeadingInventory {
    pub fn new() -> Self {
        let levels = HeadingLevel::ALL
            .iter()
            .map(|level| (*level, HeadingBucket::default()))
            .collect();
        Self { levels }
    }

    pub fn record(&mut self, level: HeadingLevel, text: String) {
        self.levels.entry(level).or_default().push(text);
    }

    pub fn level(&self, level: HeadingLevel) -> &HeadingBucket {
        // every level is inserted by new()
        &self.levels[&level]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeadingLevel, &HeadingBucket)> {
        self.levels.iter()
    }

    pub fn total(&self) -> usize {
        self.levels.values().map(HeadingBucket::count).sum()
    }
}

impl Default for HeadingInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LinkSetFields")]
pub struct LinkSet {
    count: usize,
    records: Vec<LinkRecord>,
}

#[derive(Deserialize)]
struct LinkSetFields {
    count: usize,
    records: Vec<LinkRecord>,
}

impl TryFrom<LinkSetFields> for LinkSet {
    type Error = String;

    fn try_from(fields: LinkSetFields) -> Result<Self, Self::Error> {
        check_count(fields.count, fields.records.len())?;
        Ok(Self {
            count: fields.count,
            records: fields.records,
        })
    }
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LinkRecord) {
        self.records.push(record);
        self.count = self.records.len();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "in-links")]
    pub in_links: LinkSet,
    #[serde(rename = "out-links")]
    pub out_links: LinkSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltTextRecord {
    /// Serialized `<img>` element.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub alt: String,
    pub has_alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub title: TitleReport,
    pub meta: MetaReport,
    pub head: HeadingInventory,
    pub links: PageLinks,
    #[serde(rename = "alt-text")]
    pub alt_text: Vec<AltTextRecord>,
    pub keywords: Vec<KeywordRecord>,
}

impl PageReport {
    pub fn missing_alt_count(&self) -> usize {
        self.alt_text.iter().filter(|record| !record.has_alt).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_bucket_deserializes_consistent_count() {
        let bucket: HeadingBucket =
            serde_json::from_str(r#"{"count": 2, "text": ["Mugs", "Bowls"]}"#).unwrap();
        assert_eq!(bucket.count(), 2);
        assert_eq!(bucket.text(), ["Mugs", "Bowls"]);
    }

    #[test]
    fn test_heading_bucket_rejects_mismatched_count() {
        let result = serde_json::from_str::<HeadingBucket>(r#"{"count": 5, "text": ["Mugs"]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("count is 5 but 1 entries are listed"), "{err}");
    }

    #[test]
    fn test_link_set_rejects_mismatched_count() {
        let json = r#"{"count": 0, "records": [{"text": "Shop", "link": "https://pottery.example/shop"}]}"#;
        assert!(serde_json::from_str::<LinkSet>(json).is_err());
    }

    #[test]
    fn test_link_set_round_trips_through_json() {
        let mut links = LinkSet::new();
        links.push(LinkRecord {
            text: "Shop".to_string(),
            link: "https://pottery.example/shop".to_string(),
        });
        let json = serde_json::to_string(&links).unwrap();
        let back: LinkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, links);
        assert_eq!(back.count(), 1);
    }

    #[test]
    fn test_inventory_with_bad_bucket_is_rejected() {
        let json = r#"{"h1": {"count": 3, "text": []}}"#;
        assert!(serde_json::from_str::<HeadingInventory>(json).is_err());
    }
}
