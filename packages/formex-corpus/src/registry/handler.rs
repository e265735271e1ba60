//! Element handler trait definition.

use roxmltree::Node;

use super::types::{ElementType, ParseContext, ParseResult};
use crate::xml::collapse_whitespace;

/// Function type for recursive processing of child elements.
pub type RecurseFn<'a, 'input> = dyn Fn(Node<'a, 'input>, &mut ParseContext) -> ParseResult + 'a;

/// Trait for element handlers.
///
/// Handlers are responsible for rendering a specific type of XML element
/// and returning its text content. They receive a `recurse` function to
/// render child elements.
pub trait ElementHandler: Send + Sync {
    /// Return the type classification of this element.
    fn element_type(&self) -> ElementType;

    /// Render the element.
    ///
    /// # Arguments
    /// * `node` - The XML element to process
    /// * `context` - Current rendering context
    /// * `recurse` - Function to call for recursive child processing
    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        recurse: &RecurseFn<'a, 'input>,
    ) -> ParseResult;
}

/// Render mixed content: text nodes and inline children form runs,
/// block children become blocks of their own.
///
/// Blocks are joined with a blank line, in document order.
pub fn render_mixed<'a, 'input>(
    node: Node<'a, 'input>,
    context: &mut ParseContext,
    recurse: &RecurseFn<'a, 'input>,
) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut run = String::new();

    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                run.push_str(text);
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let result = recurse(child, context);
        if result.inline {
            run.push_str(&result.text);
        } else {
            flush_run(&mut run, &mut blocks);
            if !result.text.is_empty() {
                blocks.push(result.text);
            }
        }
    }
    flush_run(&mut run, &mut blocks);

    blocks.join("\n\n")
}

fn flush_run(run: &mut String, blocks: &mut Vec<String>) {
    let text = collapse_whitespace(run);
    if !text.is_empty() {
        blocks.push(text);
    }
    run.clear();
}
