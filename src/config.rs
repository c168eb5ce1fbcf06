//! Extractor thresholds and their YAML overrides.
//!
//! Every heuristic number the extractor relies on lives in [`ExtractorConfig`].
//! The defaults reproduce the behaviour observed on the RIA.ru front page; a
//! YAML file can override any subset of them:
//!
//! ```yaml
//! mode: cascade
//! min_items: 6
//! max_items: 15
//! heading:
//!   scan_limit: 20
//!   bounds: { min: 10, max: 110 }
//! ```

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Origin used to absolutize relative links.
pub const DEFAULT_ORIGIN: &str = "https://ria.ru";

/// Errors raised while loading or validating extractor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`ExtractorConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `origin` is not an absolute http(s) URL.
    #[error("invalid origin {0:?}: must be an absolute http(s) URL")]
    InvalidOrigin(String),

    /// A selector built from configuration did not parse.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

/// Exclusive length window for cleaned titles: `min < len < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// `true` when `len` lies strictly between the bounds.
    pub fn admits(&self, len: usize) -> bool {
        len > self.min && len < self.max
    }
}

/// How many nodes a strategy may inspect and which titles it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Maximum number of matching nodes inspected.
    pub scan_limit: usize,
    /// Accepted cleaned-title lengths.
    pub bounds: LengthBounds,
}

impl StrategyConfig {
    pub const fn new(scan_limit: usize, min: usize, max: usize) -> Self {
        Self {
            scan_limit,
            bounds: LengthBounds::new(min, max),
        }
    }
}

/// Which extraction algorithm runs over the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    /// Date-path anchors, then heading anchors, then generic long links.
    #[default]
    Cascade,
    /// One unioned structural query over containers, headings and anchors.
    Combined,
}

/// Tunable thresholds for headline extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Scheme and host prepended to relative links.
    pub origin: String,
    pub mode: ExtractMode,
    /// Substring an href must contain to count as a dated article link.
    pub date_marker: String,
    /// The cascade stops escalating once this many items are collected.
    pub min_items: usize,
    /// Output is truncated to this many items.
    pub max_items: usize,
    /// Titles sharing this many leading characters are near-duplicates; checked
    /// by the long-link fallback and the combined query.
    pub prefix_guard_len: usize,
    pub date_path: StrategyConfig,
    pub heading: StrategyConfig,
    pub long_link: StrategyConfig,
    /// Href fragments that make a generic link look like a content page.
    pub content_path_markers: Vec<String>,
    pub combined: StrategyConfig,
    /// Stamp items without a time element with the extraction clock time.
    pub default_time_to_now: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            mode: ExtractMode::Cascade,
            date_marker: format!("/{}", Local::now().year()),
            min_items: 8,
            max_items: 12,
            prefix_guard_len: 20,
            date_path: StrategyConfig::new(20, 20, 120),
            heading: StrategyConfig::new(10, 15, 100),
            long_link: StrategyConfig::new(50, 25, 80),
            content_path_markers: vec!["/20".into(), "/news".into(), ".html".into()],
            combined: StrategyConfig::new(100, 20, 120),
            default_time_to_now: true,
        }
    }
}

impl ExtractorConfig {
    /// Load a config file, filling every missing field with its default.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(mode = ?config.mode, min_items = config.min_items, max_items = config.max_items, "Loaded extractor config");
        Ok(config)
    }

    /// Parse YAML text; an empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// The configured origin as a parsed base URL.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        match Url::parse(&self.origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
            _ => Err(ConfigError::InvalidOrigin(self.origin.clone())),
        }
    }
}
