//! Inline element handlers for text-level elements.
//!
//! These handlers process elements that appear inside running text, such
//! as highlighting (`HT`), dates (`DATE`) and OJ references (`REF.DOC.OJ`),
//! plus footnotes, which are dropped.

use roxmltree::Node;

use crate::registry::handler::{ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ParseContext, ParseResult};

/// Handler for inline elements.
///
/// Returns the raw text of the element and its children so the caller can
/// merge it into the surrounding sentence; whitespace is normalised once
/// the whole run is complete.
#[derive(Debug, Clone, Copy)]
pub struct InlineHandler;

impl ElementHandler for InlineHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Inline
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        let mut text = String::new();

        for child in node.children() {
            if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            } else if child.is_element() {
                text.push_str(&recurse(child, context).text);
            }
        }

        ParseResult::new(text)
    }
}

/// Handler for `<NOTE>` (footnote) elements.
///
/// Footnotes never reach the extracted text.
#[derive(Debug, Clone, Copy)]
pub struct NoteHandler;

impl ElementHandler for NoteHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Skip
    }

    fn handle<'a, 'input>(
        &self,
        _node: Node<'a, 'input>,
        context: &mut ParseContext,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        context.notes_dropped += 1;
        ParseResult::empty()
    }
}
