//! Error types for the corpus builder.
//!
//! Only the main document is fatal. Annex failures are carried as
//! `AnnexParse` values so the assembler can log them and move on.

use std::path::PathBuf;

use thiserror::Error;

/// Why the contents of a file are not well-formed XML.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The bytes are not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The text is not well-formed XML.
    #[error(transparent)]
    Syntax(#[from] roxmltree::Error),
}

/// Main error type for the corpus builder library.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// No file in the source directory matches a main-document naming convention.
    #[error("No main document found in {}", .dir.display())]
    MissingMainDocument { dir: PathBuf },

    /// The main document is not well-formed XML.
    #[error("Failed to parse main document {}: {source}", .path.display())]
    MainDocumentParse {
        path: PathBuf,
        #[source]
        source: XmlError,
    },

    /// One annex file is not well-formed XML.
    #[error("Failed to parse annex {}: {source}", .path.display())]
    AnnexParse {
        path: PathBuf,
        #[source]
        source: XmlError,
    },

    /// Configuration values outside their accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    /// Whether this error aborts a document build.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::AnnexParse { .. })
    }
}

/// Result type alias for corpus builder operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
