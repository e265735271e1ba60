//! Core data types for the corpus builder.
//!
//! These types form the normalized document model extracted from Formex
//! XML. The whole tree is built once per run, handed to the validator and
//! the renderer, and then dropped.

use std::fmt;

use serde::Serialize;

/// One entry of an enumerated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Enumeration marker without parentheses (e.g. "a", "iv"), empty for bullets.
    pub letter: String,

    /// Item text, including any amendment quote attached to it.
    pub text: String,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub fn new(letter: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            text: text.into(),
        }
    }
}

/// One numbered paragraph of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Paragraph numeral as printed, trailing period stripped. Empty for
    /// articles without a paragraph wrapper.
    pub number: String,

    /// Linear prose of the paragraph, lists rendered inline with their labels.
    pub text: String,

    /// Structured list entries of the paragraph, in rendering order.
    pub items: Vec<Item>,
}

/// A single article of the enacting terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Article number (e.g. "1", "6a").
    pub number: String,

    /// Article subject line.
    pub title: String,

    /// Enclosing chapter code (e.g. "CHAPTER III"), empty when not found.
    pub chapter: String,

    /// Enclosing chapter label, empty when not found.
    pub chapter_title: String,

    pub paragraphs: Vec<Paragraph>,
}

impl Article {
    /// Paragraph texts joined by newlines, the text scored by the validator.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.paragraphs
            .iter()
            .filter(|p| !p.text.is_empty())
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All structured items of the article, paired with their paragraph number.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.items.iter().map(move |item| (p.number.as_str(), item)))
    }
}

/// One preamble consideration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recital {
    pub number: String,
    pub text: String,
}

/// An annex parsed from its own file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annex {
    /// Number derived from the heading (e.g. "III").
    pub number: String,

    /// Heading and subtitle, joined with an em dash.
    pub title: String,

    /// Rendered text of the annex contents.
    pub content: String,
}

/// Complete extraction result for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub articles: Vec<Article>,
    pub recitals: Vec<Recital>,
    pub annexes: Vec<Annex>,
}

impl ParsedDocument {
    /// Iterate over every item as `(kind, id, parsed text)`, in kind then document order.
    pub fn entries(&self) -> impl Iterator<Item = (ItemKind, &str, String)> {
        let articles = self
            .articles
            .iter()
            .map(|a| (ItemKind::Article, a.number.as_str(), a.body_text()));
        let recitals = self
            .recitals
            .iter()
            .map(|r| (ItemKind::Recital, r.number.as_str(), r.text.clone()));
        let annexes = self
            .annexes
            .iter()
            .map(|x| (ItemKind::Annex, x.number.as_str(), x.content.clone()));
        articles.chain(recitals).chain(annexes)
    }
}

/// Kind of addressable item, shared by the extractor output and the source index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Article,
    Recital,
    Annex,
}

impl ItemKind {
    /// Get the string value used in keys and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Recital => "recital",
            Self::Annex => "annex",
        }
    }

    /// Build the `{kind}:{id}` key for an item.
    ///
    /// # Examples
    /// ```
    /// use formex_corpus::types::ItemKind;
    ///
    /// assert_eq!(ItemKind::Annex.key("III"), "annex:III");
    /// ```
    #[must_use]
    pub fn key(&self, id: &str) -> String {
        format!("{}:{id}", self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
