//! Raw-text prefix scanner
//!
//! Some URLs never appear in an attribute the HTML parser can see (inline
//! script strings, CSS blobs, JSON islands). The scanner walks the raw text
//! for each configured literal prefix and takes the substring up to the next
//! quote delimiter as a candidate.

use crate::config::PatternRule;
use std::collections::HashSet;

/// Scans raw text for every configured pattern rule
///
/// # Arguments
///
/// * `text` - The raw page text
/// * `rules` - Scan rules; each contributes candidates independently
///
/// # Returns
///
/// The set of candidate URLs, suffix rewrites applied
pub fn scan(text: &str, rules: &[PatternRule]) -> HashSet<String> {
    let mut urls = HashSet::new();
    for rule in rules {
        scan_rule(text, rule, &mut urls);
    }
    urls
}

/// Scans for a single rule, pushing candidates into `urls`
///
/// A candidate runs from the prefix occurrence to the nearest `"` or `'`.
/// With no delimiter before end-of-text the scan stops; an unterminated
/// candidate is garbage, not a URL. When the rule carries a suffix marker and
/// a candidate ends with it, the rewritten form is recorded instead of the
/// original.
fn scan_rule(text: &str, rule: &PatternRule, urls: &mut HashSet<String>) {
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(rule.prefix.as_str()) {
        let start = cursor + found;
        let rest = &text[start..];

        let end = match rest.find(|c: char| c == '"' || c == '\'') {
            Some(end) => end,
            None => break,
        };

        let candidate = &rest[..end];
        urls.insert(apply_rewrite(candidate, rule));

        cursor = start + end;
    }
}

/// Applies the rule's suffix rewrite to a candidate, if configured and matching
fn apply_rewrite(candidate: &str, rule: &PatternRule) -> String {
    if let (Some(suffix), Some(rewrite)) = (&rule.suffix, &rule.rewrite) {
        if let Some(stem) = candidate.strip_suffix(suffix.as_str()) {
            return format!("{}{}", stem, rewrite);
        }
    }
    candidate.to_string()
}
