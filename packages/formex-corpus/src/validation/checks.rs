//! Deterministic checks comparing extracted items with the source index.

use crate::types::Article;

/// Length of `text` in non-whitespace characters.
///
/// Rendering only ever adds whitespace (list labels are copied verbatim,
/// blocks and table cells are separated by whitespace), so comparing
/// non-whitespace lengths keeps parsed text a strict reduction of raw text.
pub fn significant_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// `parsed_len / source_len`, with an empty source scoring 1.0 only when
/// nothing was parsed either.
pub fn coverage_ratio(parsed_len: usize, source_len: usize) -> f64 {
    if source_len == 0 {
        return if parsed_len == 0 { 1.0 } else { 0.0 };
    }
    parsed_len as f64 / source_len as f64
}

/// Round to four decimal places.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10_000.0).round() / 10_000.0
}

/// Gaps between consecutive integer article numbers.
///
/// Non-numeric numbers ("6a", "IV") are ignored for this check.
pub fn numbering_gaps(articles: &[Article]) -> Vec<String> {
    let mut numbers: Vec<i64> = articles
        .iter()
        .filter_map(|a| a.number.trim().parse().ok())
        .collect();
    numbers.sort_unstable();

    numbers
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > 1)
        .map(|pair| format!("gap between {} and {}", pair[0], pair[1]))
        .collect()
}

/// Articles without a title or without chapter context.
pub fn structural_issues(articles: &[Article]) -> Vec<String> {
    let mut issues = Vec::new();
    for article in articles {
        if article.title.is_empty() {
            issues.push(format!("article:{} missing title", article.number));
        }
        if article.chapter.is_empty() {
            issues.push(format!("article:{} missing chapter context", article.number));
        }
    }
    issues
}
