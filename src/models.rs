//! Data models for extracted headlines and the report handed to the outputs.
//!
//! - [`NewsItem`]: one headline with its absolute link and optional time
//! - [`Report`]: the items of one run together with where they came from
//! - [`Provenance`] / [`FallbackReason`]: live page vs. sample data, and why

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A single headline extracted from the front page.
///
/// Items live for one run only: they are built during extraction, then
/// printed and/or exported, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Cleaned headline text.
    pub title: String,
    /// Absolute article URL.
    pub link: String,
    /// Display time taken from the markup or stamped at extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, time: Option<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            time,
        }
    }

    /// Host of the link without a leading `www.`, e.g. `"ria.ru"`.
    pub fn source_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.link).ok()?;
        let host = parsed.host_str()?;
        Some(host.trim_start_matches("www.").to_string())
    }
}

/// Why the report carries sample data instead of live headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The front page could not be downloaded.
    FetchFailed(String),
    /// The page was downloaded but no strategy produced a headline.
    NothingExtracted,
    /// Any other failure upstream of the outputs.
    Unexpected(String),
}

/// Where the items of a [`Report`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Sample(FallbackReason),
}

/// Result of one run, ready for the console and file outputs.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Local time the report was assembled, `YYYY-MM-DD HH:MM:SS`.
    pub generated_at: String,
    pub provenance: Provenance,
    /// Headlines accepted before truncation to the display limit.
    pub found: usize,
    pub items: Vec<NewsItem>,
}

impl Report {
    pub fn live(items: Vec<NewsItem>, found: usize) -> Self {
        Self {
            generated_at: now_stamp(),
            provenance: Provenance::Live,
            found,
            items,
        }
    }

    /// A report made of [`crate::sample::sample_items`].
    pub fn fallback(reason: FallbackReason) -> Self {
        let items = crate::sample::sample_items();
        Self {
            generated_at: now_stamp(),
            provenance: Provenance::Sample(reason),
            found: items.len(),
            items,
        }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self.provenance, Provenance::Sample(_))
    }
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag() {
        let item = NewsItem::new("t", "https://ria.ru/20260101/foo-123.html", None);
        assert_eq!(item.source_tag().as_deref(), Some("ria.ru"));

        let item = NewsItem::new("t", "https://www.example.com/news", None);
        assert_eq!(item.source_tag().as_deref(), Some("example.com"));

        let item = NewsItem::new("t", "not a url", None);
        assert_eq!(item.source_tag(), None);
    }

    #[test]
    fn test_fallback_report_uses_samples() {
        let report = Report::fallback(FallbackReason::NothingExtracted);
        assert!(report.is_sample());
        assert_eq!(report.found, 4);
        assert_eq!(report.items, crate::sample::sample_items());
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = Report::live(
            vec![NewsItem::new("Заголовок", "https://ria.ru/a.html", Some("12:30".into()))],
            1,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["provenance"], "live");
        assert_eq!(json["items"][0]["time"], "12:30");

        let report = Report::fallback(FallbackReason::FetchFailed("timeout".into()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["provenance"]["sample"]["kind"], "fetch_failed");
        assert_eq!(json["provenance"]["sample"]["detail"], "timeout");
        assert!(json["items"][0].get("time").is_none());
    }
}
