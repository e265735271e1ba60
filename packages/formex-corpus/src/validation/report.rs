//! Validation report types, tallying and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::config::{REPORT_FILE_NAME, TIMESTAMP_FORMAT};
use crate::error::Result;
use crate::types::ItemKind;

/// Coverage score of one extracted item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemValidation {
    pub item_type: ItemKind,
    pub item_id: String,
    pub source_len: usize,
    pub parsed_len: usize,
    /// Rounded to four decimals.
    pub coverage_ratio: f64,
    pub warnings: Vec<String>,
}

/// Document-level check results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeterministicResult {
    pub article_count: usize,
    pub recital_count: usize,
    pub annex_count: usize,
    pub expected_articles: usize,
    pub expected_recitals: usize,
    pub expected_annexes: usize,
    /// Keys whose parsed text is blank although the source has an entry.
    pub empty_items: Vec<String>,
    pub numbering_gaps: Vec<String>,
    pub missing_structure: Vec<String>,
    pub low_coverage: Vec<String>,
    /// Keys whose parsed text is longer than their raw source text.
    pub self_check_failures: Vec<String>,
}

impl DeterministicResult {
    /// `(label, actual, expected)` for each count check.
    pub fn counts(&self) -> [(&'static str, usize, usize); 3] {
        [
            ("articles", self.article_count, self.expected_articles),
            ("recitals", self.recital_count, self.expected_recitals),
            ("annexes", self.annex_count, self.expected_annexes),
        ]
    }
}

/// Complete validation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub timestamp: String,
    pub deterministic: DeterministicResult,
    pub items: Vec<ItemValidation>,
    pub total_pass: usize,
    pub total_warn: usize,
    pub total_fail: usize,
}

impl ValidationReport {
    /// Assemble a report, tallying pass/warn/fail over all checks.
    pub fn new(
        timestamp: impl Into<String>,
        deterministic: DeterministicResult,
        items: Vec<ItemValidation>,
    ) -> Self {
        let mut total_pass = 0;
        let mut total_fail = 0;

        for (_, actual, expected) in deterministic.counts() {
            if actual == expected {
                total_pass += 1;
            } else {
                total_fail += 1;
            }
        }
        total_fail += deterministic.empty_items.len();
        total_fail += deterministic.self_check_failures.len();

        let total_warn = deterministic.numbering_gaps.len()
            + deterministic.missing_structure.len()
            + deterministic.low_coverage.len();

        Self {
            timestamp: timestamp.into(),
            deterministic,
            items,
            total_pass,
            total_warn,
            total_fail,
        }
    }

    /// Write the report as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Wrote validation report");
        Ok(())
    }

    /// Log a human-readable summary.
    pub fn log_summary(&self) {
        let det = &self.deterministic;
        for (label, actual, expected) in det.counts() {
            tracing::info!(actual, expected, "{label}");
        }

        if !det.empty_items.is_empty() {
            tracing::warn!(items = %det.empty_items.join(", "), "Empty items");
        }
        if !det.numbering_gaps.is_empty() {
            tracing::warn!(gaps = %det.numbering_gaps.join(", "), "Numbering gaps");
        }
        if !det.missing_structure.is_empty() {
            tracing::warn!(issues = %det.missing_structure.join(", "), "Missing structure");
        }
        if !det.low_coverage.is_empty() {
            tracing::warn!(items = %det.low_coverage.join(", "), "Low coverage");
        }
        if !det.self_check_failures.is_empty() {
            tracing::warn!(
                items = %det.self_check_failures.join(", "),
                "Parsed text longer than source"
            );
        }

        tracing::info!(
            pass = self.total_pass,
            warn = self.total_warn,
            fail = self.total_fail,
            "Validation result"
        );
    }
}

/// Report location for a corpus written to `output_dir`: next to it, not inside.
pub fn report_path(output_dir: &Path) -> PathBuf {
    output_dir
        .parent()
        .unwrap_or(output_dir)
        .join(REPORT_FILE_NAME)
}

/// Current UTC time in report format.
pub fn utc_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
