//! Page download and headline extraction.
//!
//! The work is split in two phases:
//!
//! 1. **Fetching** ([`fetch`]): download the front page through a [`fetch::PageSource`]
//! 2. **Extracting** ([`ria`]): turn the HTML into [`crate::models::NewsItem`]s
//!
//! | Module | Role | Notes |
//! |--------|------|-------|
//! | [`fetch`] | HTTP GET | Browser user agent, gzip/deflate, 20 s timeout, no retries |
//! | [`ria`] | HTML heuristics | Strategy cascade or combined query; configurable thresholds |

pub mod fetch;
pub mod ria;
