//! Identifier derivation shared by the extractor and the source index.
//!
//! Both sides must derive the same `{kind}:{id}` keys from the same headings,
//! otherwise the validator compares unrelated items.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{ANNEX_HEADING_TOKEN, ARTICLE_HEADING_PREFIX};

/// Captures the token following the annex heading word (e.g. "III" in "ANNEX III").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANNEX_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ANNEX_HEADING_TOKEN}\s*([^\s—–]*)")).expect("valid regex")
});

/// Derive the article number from its `TI.ART` heading.
///
/// # Examples
/// ```
/// use formex_corpus::address::article_number;
///
/// assert_eq!(article_number("Article 6"), "6");
/// assert_eq!(article_number("Article 101a"), "101a");
/// ```
pub fn article_number(heading: &str) -> String {
    let heading = heading.trim();
    heading
        .strip_prefix(ARTICLE_HEADING_PREFIX)
        .unwrap_or(heading)
        .trim()
        .to_string()
}

/// Derive the annex number from its heading.
///
/// Headings without the `ANNEX` token are returned verbatim.
///
/// # Examples
/// ```
/// use formex_corpus::address::annex_number;
///
/// assert_eq!(annex_number("ANNEX III — Technical Documentation"), "III");
/// assert_eq!(annex_number("Appendix"), "Appendix");
/// ```
pub fn annex_number(heading: &str) -> String {
    match ANNEX_NUMBER.captures(heading) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        None => heading.to_string(),
    }
}

/// Strip surrounding parentheses from an enumeration label ("(a)" → "a").
pub fn strip_label(label: &str) -> String {
    label
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .to_string()
}

/// Whether a list label is a bullet or dash rather than an addressable letter.
pub fn is_bullet_marker(label: &str) -> bool {
    matches!(label.trim(), "" | "•" | "–" | "-" | "—")
}

/// Letter recorded for a list entry: the stripped label, or empty for bullets.
///
/// # Examples
/// ```
/// use formex_corpus::address::item_letter;
///
/// assert_eq!(item_letter("(b)"), "b");
/// assert_eq!(item_letter("—"), "");
/// ```
pub fn item_letter(label: &str) -> String {
    if is_bullet_marker(label) {
        String::new()
    } else {
        strip_label(label)
    }
}

/// Strip the trailing period of a printed paragraph number ("1." → "1").
pub fn strip_paragraph_number(number: &str) -> String {
    number.trim().trim_end_matches('.').to_string()
}
