//! Configuration constants, naming conventions and the workflow YAML loader.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CorpusError, Result};

/// Heading word stripped from `TI.ART` to obtain the article number.
pub const ARTICLE_HEADING_PREFIX: &str = "Article";

/// Token in an annex heading that precedes the annex number.
pub const ANNEX_HEADING_TOKEN: &str = "ANNEX";

/// Keywords marking a `DIVISION` as chapter-level (matched case-insensitively).
///
/// Section-level divisions carry titles too but are intentionally not matched.
pub const CHAPTER_KEYWORDS: &[&str] = &["CHAPTER", "TITLE"];

/// File name marker of the table-of-contents file in a Formex package.
pub const TOC_FILE_MARKER: &str = ".toc.";

/// File name marker of the metadata-only file in a Formex package.
pub const METADATA_FILE_MARKER: &str = ".doc.";

/// Extension shared by all Formex files.
pub const XML_EXTENSION: &str = ".xml";

/// Coverage ratio below which an item is reported as low coverage.
pub const DEFAULT_COVERAGE_RATIO_THRESHOLD: f64 = 0.5;

/// File name of the validation report, written next to the corpus directory.
pub const REPORT_FILE_NAME: &str = "validation-report.json";

/// Timestamp format used in reports and frontmatter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Accepted naming conventions for the main enactment file.
///
/// Different instrument families number their main file differently.
/// Conventions are tried in [`MainFileConvention::PRIORITY`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainFileConvention {
    /// Act body as the first document of the package (`*.000101.fmx.xml`).
    ActBody,
    /// Act body in the pre-2023 Official Journal numbering (`*.01000101.xml`).
    LegacyActBody,
    /// Act body in packages without the `fmx` infix (`*.000101.xml`).
    PlainXmlActBody,
}

impl MainFileConvention {
    /// Search order when locating the main file.
    pub const PRIORITY: [Self; 3] = [Self::ActBody, Self::LegacyActBody, Self::PlainXmlActBody];

    /// File name suffix identifying this convention.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::ActBody => ".000101.fmx.xml",
            Self::LegacyActBody => ".01000101.xml",
            Self::PlainXmlActBody => ".000101.xml",
        }
    }

    /// Check if a file name follows this convention.
    ///
    /// # Examples
    /// ```
    /// use formex_corpus::config::MainFileConvention;
    ///
    /// assert!(MainFileConvention::ActBody.matches("L_202401689EN.000101.fmx.xml"));
    /// assert!(!MainFileConvention::ActBody.matches("L_202401689EN.011301.fmx.xml"));
    /// ```
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(self.suffix())
    }
}

/// Expected counts and thresholds for the coverage validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub expected_articles: usize,
    pub expected_recitals: usize,
    pub expected_annexes: usize,
    pub coverage_ratio_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_articles: 0,
            expected_recitals: 0,
            expected_annexes: 0,
            coverage_ratio_threshold: DEFAULT_COVERAGE_RATIO_THRESHOLD,
        }
    }
}

impl ValidationConfig {
    /// Reject thresholds outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        let t = self.coverage_ratio_threshold;
        if t.is_nan() || !(0.0..=1.0).contains(&t) {
            return Err(CorpusError::InvalidConfig(format!(
                "coverage_ratio_threshold must be between 0.0 and 1.0, got {t}"
            )));
        }
        Ok(())
    }
}

/// A literal find/replace rule applied to rendered corpus files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NormalizeRule {
    pub find: String,
    pub replace: String,
}

/// Text normalization applied after rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    pub normalize: Vec<NormalizeRule>,
}

/// Output layout for one kind of corpus file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionDef {
    /// Sub-directory of the corpus root.
    pub dir: String,
    /// File name template, e.g. `article-{number}.md`.
    pub filename: String,
    /// Heading template, e.g. `Article {number} — {title}`.
    pub heading: String,
    /// Frontmatter templates resolved per file.
    #[serde(default)]
    pub frontmatter: serde_yaml_ng::Mapping,
}

/// Section definitions per item kind. Absent sections are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub articles: Option<SectionDef>,
    pub recitals: Option<SectionDef>,
    pub annexes: Option<SectionDef>,
}

/// Corpus output configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Fields added to every file's frontmatter after the section fields.
    pub frontmatter_base: serde_yaml_ng::Mapping,
    /// Wrap body paragraphs at this width when set.
    pub wrap_width: Option<usize>,
    pub sections: Sections,
}

/// The act being processed.
///
/// `celex`, `language_code` and the run timestamp fill the `{{celex}}`,
/// `{{language_code}}` and `{{timestamp}}` placeholders of
/// `corpus.frontmatter_base`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CELEX number, e.g. `32024R1689`.
    pub celex: String,
    pub title: String,
    /// Language name, e.g. `English`.
    pub language: String,
    /// Two-letter language code, e.g. `en`.
    pub language_code: String,
}

/// Top-level workflow configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub source: SourceConfig,
    pub validation: ValidationConfig,
    pub postprocess: PostprocessConfig,
    pub corpus: Option<CorpusConfig>,
}

impl WorkflowConfig {
    /// Parse and validate a workflow configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validation.validate()?;
        if let Some(corpus) = &config.corpus {
            if corpus.wrap_width == Some(0) {
                return Err(CorpusError::InvalidConfig(
                    "corpus.wrap_width must be greater than 0".to_string(),
                ));
            }
        }
        Ok(config)
    }
}

/// Load a workflow configuration file.
///
/// # Arguments
/// * `path` - Path to the YAML file
///
/// # Returns
/// The validated configuration
pub fn load_config(path: &Path) -> Result<WorkflowConfig> {
    let yaml = fs::read_to_string(path)?;
    let config = WorkflowConfig::from_yaml(&yaml)?;
    tracing::debug!(path = %path.display(), "Loaded workflow configuration");
    Ok(config)
}
