//! Element registry for mapping tag names to handlers.

use std::collections::{HashMap, HashSet};

use roxmltree::Node;

use super::handler::ElementHandler;
use super::handlers::BlockTextHandler;
use crate::xml::get_tag_name;

/// Registry mapping element names to handlers.
///
/// The registry allows registering handlers for specific tag names and
/// marking tags to be skipped entirely. Tags nobody registered go to a
/// block text fallback.
pub struct ElementRegistry {
    handlers: HashMap<String, Box<dyn ElementHandler>>,
    skip_tags: HashSet<String>,
    fallback: Box<dyn ElementHandler>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    ///
    /// Unregistered tags render as their footnote-free text, as a block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            skip_tags: HashSet::new(),
            fallback: Box::new(BlockTextHandler),
        }
    }

    /// Register a handler for a specific tag name.
    pub fn register(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl ElementHandler + 'static,
    ) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Register the same handler type for several tag names.
    pub fn register_all<H>(&mut self, tag_names: &[&str], handler: H)
    where
        H: ElementHandler + Clone + 'static,
    {
        for tag in tag_names {
            self.register(*tag, handler.clone());
        }
    }

    /// Mark tags as skip (don't process, return empty).
    pub fn skip(&mut self, tag_names: impl IntoIterator<Item = impl Into<String>>) {
        for tag in tag_names {
            self.skip_tags.insert(tag.into());
        }
    }

    /// Get the appropriate handler for an element.
    ///
    /// Returns `None` if the element should be skipped or has no handler.
    pub fn get_handler(&self, node: Node<'_, '_>) -> Option<&dyn ElementHandler> {
        let tag_name = get_tag_name(node);

        if self.skip_tags.contains(tag_name) {
            return None;
        }

        self.handlers.get(tag_name).map(|h| h.as_ref())
    }

    /// The handler used when no registered handler applies.
    #[must_use]
    pub fn fallback(&self) -> &dyn ElementHandler {
        self.fallback.as_ref()
    }

    /// Check if a tag should be skipped.
    #[must_use]
    pub fn should_skip(&self, tag_name: &str) -> bool {
        self.skip_tags.contains(tag_name)
    }

    /// Check if a handler is registered for a tag.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(tag_name)
    }

    /// Return set of all registered tag names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
