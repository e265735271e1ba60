//! Template resolution, normalization and wrapping for corpus files.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use textwrap::{fill, Options};
use unicode_normalization::UnicodeNormalization;

use crate::config::PostprocessConfig;

/// Regex matching a `{name}` template placeholder.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Replace `{name}` placeholders with their values.
///
/// Unknown placeholders are left untouched.
///
/// # Examples
/// ```
/// use formex_corpus::corpus::resolve_template;
///
/// let values = [("number", "6"), ("title", "Classification rules")];
/// assert_eq!(
///     resolve_template("Article {number} — {title}", &values),
///     "Article 6 — Classification rules"
/// );
/// assert_eq!(resolve_template("{unknown}", &values), "{unknown}");
/// ```
pub fn resolve_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Apply the configured literal find/replace rules, in order.
pub fn apply_postprocess(text: &str, config: &PostprocessConfig) -> String {
    let mut result = text.to_string();
    for rule in &config.normalize {
        if !rule.find.is_empty() {
            result = result.replace(&rule.find, &rule.replace);
        }
    }
    result
}

/// Unicode NFC normalization.
pub fn to_nfc(text: &str) -> String {
    text.nfc().collect()
}

/// Wrap blank-line separated paragraphs at `width`.
///
/// Headings and table blocks (tab separated) are kept as they are.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.split("\n\n")
        .map(|paragraph| {
            if paragraph.starts_with('#') || paragraph.contains('\t') {
                paragraph.to_string()
            } else {
                fill(paragraph, &options)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
