//! Types for the element registry system.

use crate::types::Item;

/// Classification of element types for processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Elements rendered as their own text block (P, LIST, TBL).
    Block,
    /// Text-level elements merged into the surrounding sentence (HT, DATE).
    Inline,
    /// Elements that contribute nothing (NOTE).
    Skip,
}

/// Result from rendering an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// The rendered text content.
    pub text: String,

    /// Whether the text continues the surrounding inline run.
    ///
    /// Set by the engine from the handler's [`ElementType`].
    pub inline: bool,
}

impl ParseResult {
    /// Create a new parse result with text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            inline: false,
        }
    }

    /// Create an empty parse result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Context passed through rendering operations.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Structured list entries met while rendering, in document order.
    pub items: Vec<Item>,

    /// Number of footnotes dropped.
    pub notes_dropped: usize,
}

impl ParseContext {
    /// Create a new parse context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of the collected items.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
