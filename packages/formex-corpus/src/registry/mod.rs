//! Element registry system for rendering Formex content.
//!
//! Element handlers are registered for specific tag names; the engine walks
//! the tree and dispatches each element to its handler. Alineas and annex
//! contents use separately configured registries.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod types;

pub use config::{create_alinea_registry, create_content_registry};
pub use core::ElementRegistry;
pub use engine::ParseEngine;
pub use handler::{render_mixed, ElementHandler, RecurseFn};
pub use types::{ElementType, ParseContext, ParseResult};
