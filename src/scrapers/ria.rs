//! RIA.ru front page headline extractor.
//!
//! Front page markup drifts over time, so headlines are collected with a
//! cascade of increasingly permissive strategies over the parsed document:
//!
//! 1. [`Strategy::DatePath`]: anchors whose href carries the year marker (`/2026...`)
//! 2. [`Strategy::Heading`]: anchors that are direct children of `h1`–`h3`
//! 3. [`Strategy::LongLink`]: any anchor with a long title and a content-looking path
//!
//! Each strategy is a pure function from the document to candidates. The
//! cascade stops escalating once `min_items` headlines are collected.
//! [`ExtractMode::Combined`] replaces the cascade with one unioned query
//! over article containers, headings and dated anchors.
//!
//! All titles go through [`clean_text`] before any length check and every link
//! is absolutized against the configured origin. The long-link fallback and
//! the combined query also drop any title whose first `prefix_guard_len`
//! characters match an already accepted one.

use crate::config::{ConfigError, ExtractMode, ExtractorConfig, StrategyConfig};
use crate::models::NewsItem;
use crate::utils::{char_prefix, clean_text, clock_time, title_len};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static ANCHOR_WITH_HREF: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static ANY_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static HEADING_ANCHOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1 > a[href], h2 > a[href], h3 > a[href]").expect("valid heading anchor selector")
});
static HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("valid heading selector"));
static TIME_ELEMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".time, time, .date").expect("valid time selector"));

/// How many ancestors of an anchor are searched for its time element.
/// The climb also stops at the first ancestor that holds another link.
const TIME_SEARCH_DEPTH: usize = 3;

/// One step of the extraction cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DatePath,
    Heading,
    LongLink,
}

impl Strategy {
    /// Cascade order, most specific first.
    pub const CASCADE: [Strategy; 3] = [Strategy::DatePath, Strategy::Heading, Strategy::LongLink];

    /// Only the permissive fallback needs the near-duplicate guard.
    fn guards_prefix(self) -> bool {
        self == Strategy::LongLink
    }

    fn settings(self, config: &ExtractorConfig) -> &StrategyConfig {
        match self {
            Strategy::DatePath => &config.date_path,
            Strategy::Heading => &config.heading,
            Strategy::LongLink => &config.long_link,
        }
    }

    /// Candidates this strategy finds in `document`, in document order.
    pub fn candidates<'a>(self, document: &'a Html, config: &'a ExtractorConfig) -> Vec<Candidate> {
        let settings = self.settings(config);
        let anchors: Box<dyn Iterator<Item = ElementRef<'a>> + 'a> = match self {
            Strategy::DatePath => Box::new(
                document
                    .select(&ANCHOR_WITH_HREF)
                    .filter(|a| href_of(a).is_some_and(|h| h.contains(config.date_marker.as_str()))),
            ),
            Strategy::Heading => Box::new(document.select(&HEADING_ANCHOR)),
            Strategy::LongLink => Box::new(document.select(&ANY_ANCHOR)),
        };

        anchors
            .take(settings.scan_limit)
            .filter_map(|anchor| {
                let href = href_of(&anchor)?;
                if self == Strategy::LongLink && !looks_like_content_path(href, config) {
                    return None;
                }
                let title = clean_text(&element_text(&anchor));
                if !settings.bounds.admits(title_len(&title)) {
                    return None;
                }
                Some(Candidate {
                    title,
                    href: href.to_string(),
                    time: nearby_time(anchor),
                })
            })
            .collect()
    }
}

/// A provisional headline before link normalization and de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Cleaned title, already within the strategy's bounds.
    pub title: String,
    /// Raw href as found in the markup.
    pub href: String,
    /// Time text found next to the headline, if any.
    pub time: Option<String>,
}

/// Outcome of one extraction pass.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Accepted headlines truncated to `max_items`.
    pub items: Vec<NewsItem>,
    /// Headlines accepted before truncation.
    pub accepted: usize,
    /// Cascade strategies that actually ran, in order.
    pub applied: Vec<Strategy>,
}

/// Headline extractor bound to one configuration.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    origin: Url,
    combined_query: Selector,
}

impl Extractor {
    /// Validate `config` and prepare the selectors it implies.
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        let origin = config.origin_url()?;
        let combined_query = combined_selector(&config.date_marker)?;
        Ok(Self {
            config,
            origin,
            combined_query,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract headlines from `html` and report which strategies were needed.
    ///
    /// In cascade mode the strategies run in [`Strategy::CASCADE`] order until
    /// `min_items` headlines are collected; in combined mode a single unioned
    /// query runs instead. The result is truncated to `max_items`.
    ///
    /// # Arguments
    ///
    /// * `html` - Raw HTML of the front page
    ///
    /// # Returns
    ///
    /// An [`Extraction`] with the kept items, the count accepted before
    /// truncation and the strategies that ran. Empty `items` means the page
    /// structure no longer matches any strategy.
    #[instrument(level = "debug", skip_all, fields(html_len = html.len(), mode = ?self.config.mode))]
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        debug!(links = document.select(&ANCHOR_WITH_HREF).count(), "Parsed document");

        let now = self.config.default_time_to_now.then(clock_time);
        let mut collector = Collector::new(&self.origin, self.config.prefix_guard_len, now);
        let mut applied = Vec::new();

        match self.config.mode {
            ExtractMode::Cascade => {
                for strategy in Strategy::CASCADE {
                    if collector.len() >= self.config.min_items {
                        break;
                    }
                    let candidates = strategy.candidates(&document, &self.config);
                    let scanned = candidates.len();
                    let taken = collector.offer_all(candidates, strategy.guards_prefix());
                    debug!(?strategy, qualifying = scanned, accepted = taken, total = collector.len(), "Strategy finished");
                    applied.push(strategy);
                }
            }
            ExtractMode::Combined => {
                let candidates = self.combined_candidates(&document);
                let scanned = candidates.len();
                let taken = collector.offer_all(candidates, true);
                debug!(qualifying = scanned, accepted = taken, "Combined query finished");
            }
        }

        let mut items = collector.into_items();
        let accepted = items.len();
        items.truncate(self.config.max_items);
        info!(accepted, kept = items.len(), ?applied, "Extracted headlines");

        Extraction {
            items,
            accepted,
            applied,
        }
    }

    fn combined_candidates(&self, document: &Html) -> Vec<Candidate> {
        let settings = &self.config.combined;
        document
            .select(&self.combined_query)
            .take(settings.scan_limit)
            .filter_map(|node| {
                let title_node = if is_heading(&node) {
                    node
                } else {
                    node.select(&HEADING).next().unwrap_or(node)
                };
                let title = clean_text(&element_text(&title_node));
                if !settings.bounds.admits(title_len(&title)) {
                    return None;
                }
                let href = link_for(node)?;
                let time = node
                    .select(&TIME_ELEMENT)
                    .next()
                    .map(|t| clean_text(&element_text(&t)))
                    .filter(|t| !t.is_empty());
                Some(Candidate {
                    title,
                    href: href.to_string(),
                    time,
                })
            })
            .collect()
    }
}

/// Accepts candidates in order, normalizing links and, when asked, rejecting
/// near-duplicates of titles already accepted.
struct Collector<'a> {
    origin: &'a Url,
    guard_len: usize,
    default_time: Option<String>,
    items: Vec<NewsItem>,
}

impl<'a> Collector<'a> {
    fn new(origin: &'a Url, guard_len: usize, default_time: Option<String>) -> Self {
        Self {
            origin,
            guard_len,
            default_time,
            items: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn offer_all(&mut self, candidates: Vec<Candidate>, guarded: bool) -> usize {
        let mut taken = 0;
        for candidate in candidates {
            if self.offer(candidate, guarded) {
                taken += 1;
            }
        }
        taken
    }

    fn offer(&mut self, candidate: Candidate, guarded: bool) -> bool {
        if guarded && self.repeats_prefix(&candidate.title) {
            debug!(title = %candidate.title, "Near-duplicate headline skipped");
            return false;
        }
        let Some(link) = absolutize(self.origin, &candidate.href) else {
            debug!(href = %candidate.href, "Unusable link skipped");
            return false;
        };
        let time = candidate.time.or_else(|| self.default_time.clone());
        self.items.push(NewsItem::new(candidate.title, link, time));
        true
    }

    fn repeats_prefix(&self, title: &str) -> bool {
        let prefix = char_prefix(title, self.guard_len);
        self.items
            .iter()
            .any(|item| char_prefix(&item.title, self.guard_len) == prefix)
    }

    fn into_items(self) -> Vec<NewsItem> {
        self.items
    }
}

/// Resolve `href` to an absolute http(s) URL.
///
/// Links that already carry a scheme are kept as written; anything else is
/// joined onto `origin`. Fragment-only, empty and non-web links are rejected.
pub fn absolutize(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    match Url::parse(href) {
        Ok(url) if is_web(&url) => Some(href.to_string()),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => origin
            .join(href)
            .ok()
            .filter(is_web)
            .map(|url| url.to_string()),
        Err(_) => None,
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn combined_selector(date_marker: &str) -> Result<Selector, ConfigError> {
    let marker = date_marker.replace('\\', "\\\\").replace('"', "\\\"");
    let query = format!(
        "article, li a[href], .item a[href], .list-item a[href], [class*=\"news\"] a[href], \
         h1, h2, h3, a[href*=\"{marker}\"], a[href*=\"/news\"]"
    );
    Selector::parse(&query).map_err(|e| ConfigError::Selector {
        selector: query.clone(),
        reason: e.to_string(),
    })
}

fn href_of<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().attr("href")
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn is_heading(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h1" | "h2" | "h3")
}

fn looks_like_content_path(href: &str, config: &ExtractorConfig) -> bool {
    config
        .content_path_markers
        .iter()
        .any(|marker| href.contains(marker.as_str()))
}

/// The node's own href, else its first nested link, else its enclosing link.
fn link_for<'a>(node: ElementRef<'a>) -> Option<&'a str> {
    if node.value().name() == "a" {
        if let Some(href) = href_of(&node) {
            return Some(href);
        }
    }
    node.select(&ANCHOR_WITH_HREF)
        .next()
        .and_then(|a| href_of(&a))
        .or_else(|| {
            node.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "a")
                .and_then(|a| href_of(&a))
        })
}

/// First time element inside the anchor or the containers it has to itself.
///
/// Containers that also hold another link, and the page-level `body`/`html`,
/// belong to other headlines too and are never searched.
fn nearby_time(anchor: ElementRef<'_>) -> Option<String> {
    let own_containers = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(TIME_SEARCH_DEPTH)
        .take_while(|scope| {
            !matches!(scope.value().name(), "body" | "html")
                && scope.select(&ANCHOR_WITH_HREF).all(|a| a.id() == anchor.id())
        });
    std::iter::once(anchor)
        .chain(own_containers)
        .find_map(|scope| scope.select(&TIME_ELEMENT).next())
        .map(|el| clean_text(&element_text(&el)))
        .filter(|t| !t.is_empty())
}
