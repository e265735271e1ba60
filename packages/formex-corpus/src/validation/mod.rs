//! Coverage validation of an extracted document against its source files.
//!
//! Validation is advisory: it always produces a report and never fails the
//! build.

pub mod checks;
pub mod report;
pub mod source_index;

use std::path::Path;

pub use report::{
    report_path, utc_timestamp, DeterministicResult, ItemValidation, ValidationReport,
};
pub use source_index::{build_source_index, SourceIndex};

use checks::{
    coverage_ratio, numbering_gaps, round_ratio, significant_len, structural_issues,
};
use crate::config::ValidationConfig;
use crate::types::ParsedDocument;

/// Score `doc` against `index` and tally the results.
pub fn validate(
    doc: &ParsedDocument,
    index: &SourceIndex,
    config: &ValidationConfig,
    timestamp: &str,
) -> ValidationReport {
    let mut empty_items = Vec::new();
    let mut low_coverage = Vec::new();
    let mut self_check_failures = Vec::new();
    let mut items = Vec::new();

    for (kind, id, parsed_text) in doc.entries() {
        let key = kind.key(id);
        let source_text = index.get(&key).map(String::as_str).unwrap_or_default();
        let source_len = significant_len(source_text);
        let parsed_len = significant_len(&parsed_text);

        if parsed_text.trim().is_empty() && index.contains_key(&key) {
            empty_items.push(key.clone());
        }

        let ratio = coverage_ratio(parsed_len, source_len);
        let mut warnings = Vec::new();
        if ratio < config.coverage_ratio_threshold {
            low_coverage.push(format!("{key} ratio={ratio:.2}"));
            warnings.push(format!("Low coverage ratio: {ratio:.2}"));
        }
        if ratio > 1.0 {
            self_check_failures.push(format!("{key} ratio={ratio:.2}"));
            warnings.push(format!("Parsed text longer than source: {ratio:.2}"));
        }

        items.push(ItemValidation {
            item_type: kind,
            item_id: id.to_string(),
            source_len,
            parsed_len,
            coverage_ratio: round_ratio(ratio),
            warnings,
        });
    }

    let deterministic = DeterministicResult {
        article_count: doc.articles.len(),
        recital_count: doc.recitals.len(),
        annex_count: doc.annexes.len(),
        expected_articles: config.expected_articles,
        expected_recitals: config.expected_recitals,
        expected_annexes: config.expected_annexes,
        empty_items,
        numbering_gaps: numbering_gaps(&doc.articles),
        missing_structure: structural_issues(&doc.articles),
        low_coverage,
        self_check_failures,
    };

    ValidationReport::new(timestamp, deterministic, items)
}

/// Index `source_dir` and validate `doc` against it.
pub fn validate_source(
    doc: &ParsedDocument,
    source_dir: &Path,
    config: &ValidationConfig,
    timestamp: &str,
) -> ValidationReport {
    let index = build_source_index(source_dir);
    tracing::info!(entries = index.len(), "Extracted source text");
    validate(doc, &index, config, timestamp)
}
