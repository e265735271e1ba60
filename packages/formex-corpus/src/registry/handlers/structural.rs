//! Structural element handlers for block-level elements.
//!
//! These handlers process elements that form their own text block, such as
//! alineas, lists, numbered paragraphs and tables.

use roxmltree::Node;

use crate::formex::list::{resolve_list, resolve_numbered_paragraph, ListOutput};
use crate::formex::table::render_table;
use crate::registry::handler::{render_mixed, ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ParseContext, ParseResult};
use crate::xml::content_text;

/// Handler for containers of mixed content (`ALINEA`, `P`, `QUOT.S`, ...).
///
/// Text and inline children are joined into runs; block children become
/// separate blocks.
#[derive(Debug, Clone, Copy)]
pub struct MixedContentHandler;

impl ElementHandler for MixedContentHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Block
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        ParseResult::new(render_mixed(node, context, recurse))
    }
}

/// Handler that renders the element's footnote-free text as one block.
///
/// Registry fallback for tags without a dedicated handler.
#[derive(Debug, Clone, Copy)]
pub struct BlockTextHandler;

impl ElementHandler for BlockTextHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Block
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        _context: &mut ParseContext,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        ParseResult::new(content_text(Some(node)))
    }
}

/// Handler for `<LIST>` elements.
///
/// Renders each entry as `"{label} {text}"` and records the structured
/// entries in the context.
#[derive(Debug, Clone, Copy)]
pub struct ListHandler;

impl ElementHandler for ListHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Block
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        let mut out = ListOutput::new();
        resolve_list(node, &mut out);
        let (text, items) = out.into_parts();
        context.items.extend(items);
        ParseResult::new(text)
    }
}

/// Handler for `<NP>` (numbered paragraph) elements outside list items.
///
/// Inside an alinea the label of an `NP` without text has already been
/// consumed by the enclosing structure, so `absorb_bare_labels` drops it.
#[derive(Debug, Clone, Copy)]
pub struct NumberedParagraphHandler {
    pub absorb_bare_labels: bool,
}

impl ElementHandler for NumberedParagraphHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Block
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        let mut out = ListOutput::new();
        resolve_numbered_paragraph(node, &mut out, !self.absorb_bare_labels);
        let (text, items) = out.into_parts();
        context.items.extend(items);
        ParseResult::new(text)
    }
}

/// Handler for `<TBL>` elements.
#[derive(Debug, Clone, Copy)]
pub struct TableHandler;

impl ElementHandler for TableHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Block
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        _context: &mut ParseContext,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult {
        ParseResult::new(render_table(node))
    }
}
