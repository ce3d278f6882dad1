//! Document-level URL extraction
//!
//! Parses the page with scraper (html5ever underneath, recovers from broken
//! markup) and collects:
//! - `<a href>` values, resolved against the base URL
//! - `<img src>` values, resolved against the base URL
//! - every other attribute value that is already an absolute http URL

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts URLs from parsed HTML
///
/// Relative hrefs and srcs are resolved against `base_url`; only results
/// starting with `http` pass the filter, which admits http and https and
/// nothing else.
pub fn extract_from_document(body: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(body);
    let mut urls = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve(href, base_url) {
                    urls.insert(resolved);
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("img[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                if let Some(resolved) = resolve(src, base_url) {
                    urls.insert(resolved);
                }
            }
        }
    }

    // Anything else carrying an absolute URL: data attributes, meta content,
    // link hrefs, video posters. Taken verbatim, no resolution.
    if let Ok(selector) = Selector::parse("*") {
        for element in document.select(&selector) {
            for (_name, value) in element.value().attrs() {
                if value.starts_with("http") {
                    urls.insert(value.to_string());
                }
            }
        }
    }

    urls
}

/// Resolves an href/src against the base URL and filters to http(s)
fn resolve(raw: &str, base_url: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match base_url.join(raw) {
        Ok(absolute) => {
            let absolute = absolute.to_string();
            if absolute.starts_with("http") {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
