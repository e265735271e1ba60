//! Render engine that dispatches elements to the registry's handlers.

use roxmltree::Node;

use super::core::ElementRegistry;
use super::handler::render_mixed;
use super::types::{ElementType, ParseContext, ParseResult};
use crate::xml::get_tag_name;

/// Engine that walks an element tree and dispatches each element to its
/// registered handler.
///
/// Rendering never fails: skipped tags yield nothing and tags without a
/// handler go to the registry's fallback.
pub struct ParseEngine {
    registry: ElementRegistry,
}

impl ParseEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }

    /// Render an element tree recursively.
    pub fn render(&self, node: Node<'_, '_>, context: &mut ParseContext) -> ParseResult {
        let tag_name = get_tag_name(node);

        if self.registry.should_skip(tag_name) {
            return ParseResult {
                text: String::new(),
                inline: true,
            };
        }

        let handler = match self.registry.get_handler(node) {
            Some(handler) => handler,
            None => {
                tracing::trace!(tag = %tag_name, "No handler registered, using fallback");
                self.registry.fallback()
            }
        };

        let recurse =
            |child: Node<'_, '_>, ctx: &mut ParseContext| -> ParseResult { self.render(child, ctx) };

        let mut result = handler.handle(node, context, &recurse);
        result.inline = handler.element_type() != ElementType::Block;
        result
    }

    /// Render the children of an element as mixed content, without
    /// dispatching the element itself.
    pub fn render_children(&self, node: Node<'_, '_>, context: &mut ParseContext) -> String {
        let recurse =
            |child: Node<'_, '_>, ctx: &mut ParseContext| -> ParseResult { self.render(child, ctx) };
        render_mixed(node, context, &recurse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler::{ElementHandler, RecurseFn};
    use roxmltree::Document;

    struct TestHandler {
        output: String,
    }

    impl ElementHandler for TestHandler {
        fn element_type(&self) -> ElementType {
            ElementType::Inline
        }

        fn handle<'a, 'input>(
            &self,
            _node: Node<'a, 'input>,
            _context: &mut ParseContext,
            _recurse: &RecurseFn<'a, 'input>,
        ) -> ParseResult {
            ParseResult::new(&self.output)
        }
    }

    #[test]
    fn test_engine_render_with_handler() {
        let mut registry = ElementRegistry::new();
        registry.register(
            "HT",
            TestHandler {
                output: "hello".to_string(),
            },
        );
        let engine = ParseEngine::new(registry);

        let doc = Document::parse("<HT/>").unwrap();
        let mut context = ParseContext::new();

        let result = engine.render(doc.root_element(), &mut context);
        assert_eq!(result.text, "hello");
        assert!(result.inline);
    }

    #[test]
    fn test_engine_render_skip() {
        let mut registry = ElementRegistry::new();
        registry.skip(["NO.P"]);
        let engine = ParseEngine::new(registry);

        let doc = Document::parse("<NO.P>(a)</NO.P>").unwrap();
        let mut context = ParseContext::new();

        let result = engine.render(doc.root_element(), &mut context);
        assert_eq!(result.text, "");
        assert!(result.inline);
    }

    #[test]
    fn test_engine_render_unknown_uses_fallback() {
        let engine = ParseEngine::new(ElementRegistry::new());

        let doc = Document::parse("<UNKNOWN>some  text</UNKNOWN>").unwrap();
        let mut context = ParseContext::new();

        let result = engine.render(doc.root_element(), &mut context);
        assert_eq!(result.text, "some text");
        assert!(!result.inline);
    }

    #[test]
    fn test_engine_render_children() {
        let engine = ParseEngine::new(ElementRegistry::new());

        let doc = Document::parse("<NP><A>first</A><B>second</B></NP>").unwrap();
        let mut context = ParseContext::new();

        let text = engine.render_children(doc.root_element(), &mut context);
        assert_eq!(text, "first\n\nsecond");
    }
}
