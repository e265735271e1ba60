//! Assembly of a full document from a directory of Formex files.

use std::fs;
use std::path::{Path, PathBuf};

use super::builders::FormexParser;
use crate::error::{CorpusError, Result, XmlError};
use crate::source::SourceFiles;
use crate::types::ParsedDocument;
use crate::xml::parse_xml;

/// A parsed document together with the annex files that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct AssembledDocument {
    pub document: ParsedDocument,
    pub skipped_annexes: Vec<PathBuf>,
}

/// Parse the act stored in `source_dir`.
///
/// # Errors
/// Returns `MissingMainDocument` when no file follows a main-document
/// convention, and `MainDocumentParse` when the main file is not valid UTF-8
/// or not well-formed XML.
/// Annex failures never fail the build.
pub fn parse_document(source_dir: &Path) -> Result<ParsedDocument> {
    assemble_document(source_dir).map(|assembled| assembled.document)
}

/// Like [`parse_document`], additionally reporting skipped annexes.
pub fn assemble_document(source_dir: &Path) -> Result<AssembledDocument> {
    let files = SourceFiles::discover(source_dir)?;
    let main = files
        .main
        .ok_or_else(|| CorpusError::MissingMainDocument {
            dir: source_dir.to_path_buf(),
        })?;

    tracing::debug!(file = %main.display(), convention = ?files.convention, "Parsing main document");

    let malformed = |source: XmlError| CorpusError::MainDocumentParse {
        path: main.clone(),
        source,
    };
    let xml = String::from_utf8(fs::read(&main)?).map_err(|e| malformed(e.into()))?;
    let doc = parse_xml(&xml).map_err(|e| malformed(e.into()))?;

    let parser = FormexParser::new();
    let root = doc.root_element();

    let mut assembled = AssembledDocument {
        document: ParsedDocument {
            articles: parser.parse_articles(root),
            recitals: parser.parse_recitals(root),
            annexes: Vec::new(),
        },
        skipped_annexes: Vec::new(),
    };

    for path in files.annexes {
        match parser.parse_annex(&path) {
            Ok(annex) => assembled.document.annexes.push(annex),
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "Skipping annex");
                assembled.skipped_annexes.push(path);
            }
        }
    }

    tracing::info!(
        articles = assembled.document.articles.len(),
        recitals = assembled.document.recitals.len(),
        annexes = assembled.document.annexes.len(),
        skipped = assembled.skipped_annexes.len(),
        "Parsed document"
    );

    Ok(assembled)
}
