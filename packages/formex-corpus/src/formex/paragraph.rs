//! Paragraph assembly for article bodies.

use roxmltree::Node;

use crate::address::strip_paragraph_number;
use crate::registry::{create_alinea_registry, ParseContext, ParseEngine};
use crate::types::{Item, Paragraph};
use crate::xml::{content_text, element_text, find_child, find_children};

/// Builds [`Paragraph`]s from `PARAG` elements and wrapper-less article bodies.
pub struct ParagraphAssembler {
    engine: ParseEngine,
}

impl ParagraphAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: ParseEngine::new(create_alinea_registry()),
        }
    }

    /// Parse one `PARAG`.
    ///
    /// A paragraph without `ALINEA` children keeps its raw text and has no items.
    pub fn parse_paragraph(&self, parag: Node<'_, '_>) -> Paragraph {
        let number = strip_paragraph_number(&content_text(find_child(parag, "NO.PARAG")));
        let alineas: Vec<_> = find_children(parag, "ALINEA").collect();

        if alineas.is_empty() {
            return Paragraph {
                number,
                text: element_text(Some(parag)),
                items: Vec::new(),
            };
        }

        let (text, items) = self.assemble(&alineas);
        Paragraph {
            number,
            text,
            items,
        }
    }

    /// Parse the `ALINEA` children placed directly under an `ARTICLE`.
    ///
    /// Returns `None` when there are none.
    pub fn parse_unwrapped(&self, article: Node<'_, '_>) -> Option<Paragraph> {
        let alineas: Vec<_> = find_children(article, "ALINEA").collect();
        if alineas.is_empty() {
            return None;
        }

        let (text, items) = self.assemble(&alineas);
        Some(Paragraph {
            number: String::new(),
            text,
            items,
        })
    }

    /// Every paragraph of an article, in document order.
    pub fn parse_article_body(&self, article: Node<'_, '_>) -> Vec<Paragraph> {
        let paragraphs: Vec<Paragraph> = find_children(article, "PARAG")
            .map(|parag| self.parse_paragraph(parag))
            .collect();

        if paragraphs.is_empty() {
            return self.parse_unwrapped(article).into_iter().collect();
        }
        paragraphs
    }

    fn assemble(&self, alineas: &[Node<'_, '_>]) -> (String, Vec<Item>) {
        let mut context = ParseContext::new();
        let mut blocks: Vec<String> = Vec::new();

        for alinea in alineas {
            let result = self.engine.render(*alinea, &mut context);
            if !result.text.is_empty() {
                blocks.push(result.text);
            }
        }

        if context.notes_dropped > 0 {
            tracing::trace!(notes = context.notes_dropped, "Dropped footnotes");
        }

        (blocks.join("\n\n"), context.into_items())
    }
}

impl Default for ParagraphAssembler {
    fn default() -> Self {
        Self::new()
    }
}
