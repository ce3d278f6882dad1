//! URL extraction from fetched HTML
//!
//! Extraction unions three sources into one deduplicated set:
//! - a raw-text scan for configured literal URL prefixes ([`scanner`])
//! - anchor hrefs and image srcs resolved against the base URL ([`html`])
//! - any other element attribute whose value is already an absolute http URL
//!
//! Malformed HTML never aborts extraction; the parser is permissive and the
//! worst case is an empty set.

mod html;
mod scanner;

pub use html::extract_from_document;
pub use scanner::scan;

use crate::config::PatternRule;
use std::collections::HashSet;
use url::Url;

/// Extracts every outbound URL from a page
///
/// # Arguments
///
/// * `body` - Raw HTML text as fetched
/// * `base_url` - The URL the page was fetched from, for relative resolution
/// * `rules` - Literal-prefix scan rules from the configuration
///
/// # Returns
///
/// A deduplicated set of absolute http(s) URLs
pub fn extract_urls(body: &str, base_url: &Url, rules: &[PatternRule]) -> HashSet<String> {
    let mut urls = scanner::scan(body, rules);
    urls.extend(html::extract_from_document(body, base_url));
    urls
}
