//! Builders for articles, recitals and annexes.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use super::chapter::find_chapter_context;
use super::paragraph::ParagraphAssembler;
use crate::address::{annex_number, article_number, strip_label};
use crate::error::{CorpusError, Result, XmlError};
use crate::registry::{create_content_registry, ParseContext, ParseEngine};
use crate::types::{Annex, Article, Recital};
use crate::xml::{content_text, find_by_path, find_child, find_descendants, has_tag, parse_xml};

/// Extracts the document model from parsed Formex trees.
pub struct FormexParser {
    paragraphs: ParagraphAssembler,
    content: ParseEngine,
}

impl FormexParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            paragraphs: ParagraphAssembler::new(),
            content: ParseEngine::new(create_content_registry()),
        }
    }

    /// Every `ARTICLE` below `root`, in document order.
    pub fn parse_articles(&self, root: Node<'_, '_>) -> Vec<Article> {
        find_descendants(root, "ARTICLE")
            .map(|article| self.parse_article(article))
            .collect()
    }

    /// Build one article.
    pub fn parse_article(&self, article: Node<'_, '_>) -> Article {
        let context = article
            .parent_element()
            .map(find_chapter_context)
            .unwrap_or_default();

        Article {
            number: article_number(&content_text(find_child(article, "TI.ART"))),
            title: content_text(find_child(article, "STI.ART")),
            chapter: context.chapter,
            chapter_title: context.chapter_title,
            paragraphs: self.paragraphs.parse_article_body(article),
        }
    }

    /// Every `CONSID` of the preamble that carries a numbered paragraph.
    pub fn parse_recitals(&self, root: Node<'_, '_>) -> Vec<Recital> {
        let Some(preamble) = find_descendants(root, "PREAMBLE").next() else {
            return Vec::new();
        };

        find_descendants(preamble, "CONSID")
            .filter_map(|consid| self.parse_recital(consid))
            .collect()
    }

    /// Build one recital; `None` when the `CONSID` has no `NP`.
    pub fn parse_recital(&self, consid: Node<'_, '_>) -> Option<Recital> {
        let np = find_child(consid, "NP")?;
        let number = strip_label(&content_text(find_child(np, "NO.P")));

        let text = match find_child(np, "TXT") {
            Some(txt) => content_text(Some(txt)),
            None => self.content.render_children(np, &mut ParseContext::new()),
        };

        Some(Recital { number, text })
    }

    /// Read and build an annex file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `AnnexParse` if it is not
    /// valid UTF-8 or not well-formed XML.
    pub fn parse_annex(&self, path: &Path) -> Result<Annex> {
        let malformed = |source: XmlError| CorpusError::AnnexParse {
            path: path.to_path_buf(),
            source,
        };
        let xml = String::from_utf8(fs::read(path)?).map_err(|e| malformed(e.into()))?;
        let doc = parse_xml(&xml).map_err(|e| malformed(e.into()))?;

        Ok(self.build_annex(doc.root_element()))
    }

    /// Build an annex from the root of an annex document.
    pub fn build_annex(&self, root: Node<'_, '_>) -> Annex {
        let annex = if has_tag(root, "ANNEX") {
            root
        } else {
            find_descendants(root, "ANNEX").next().unwrap_or(root)
        };

        let heading = content_text(find_by_path(annex, "TITLE/TI"));
        let subtitle = content_text(find_by_path(annex, "TITLE/STI"));
        let title = if subtitle.is_empty() {
            heading.clone()
        } else {
            format!("{heading} — {subtitle}")
        };

        let content = find_child(annex, "CONTENTS")
            .map(|contents| self.content.render_children(contents, &mut ParseContext::new()))
            .unwrap_or_default();

        Annex {
            number: annex_number(&heading),
            title,
            content,
        }
    }
}

impl Default for FormexParser {
    fn default() -> Self {
        Self::new()
    }
}
