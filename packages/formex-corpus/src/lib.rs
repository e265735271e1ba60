//! Formex corpus builder - Extract EU legal acts from Formex XML.
//!
//! This crate reads a directory of Formex 4 files published on EUR-Lex,
//! extracts the articles, recitals and annexes of the act, checks the
//! extraction against the raw source text and renders a Markdown corpus
//! with YAML frontmatter.
//!
//! # Example
//!
//! ```
//! use formex_corpus::address;
//!
//! assert_eq!(address::article_number("Article 6"), "6");
//! assert_eq!(address::strip_label("(a)"), "a");
//! ```
//!
//! # Architecture
//!
//! The builder is organized into several modules:
//!
//! - [`config`]: Constants, naming conventions and the workflow YAML
//! - [`types`]: Core data types (Article, Recital, Annex, etc.)
//! - [`error`]: Error types and Result alias
//! - [`source`]: Discovery of the files making up one act
//! - [`address`]: Numbers, labels and validation keys
//! - [`xml`]: XML utilities
//! - [`registry`]: Extensible element handler system for mixed content
//! - [`formex`]: Article, recital and annex extraction
//! - [`validation`]: Coverage validation against the source text
//! - [`corpus`]: Markdown corpus output
//! - [`summary`]: Per-step success/failure counters
//! - [`cli`]: Command-line interface

pub mod address;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod formex;
pub mod registry;
pub mod source;
pub mod summary;
pub mod types;
pub mod validation;
pub mod xml;

// Re-export main functions
pub use corpus::render_corpus;
pub use formex::{assemble_document, parse_document};
pub use validation::{validate, validate_source};

// Re-export commonly used items
pub use config::{load_config, WorkflowConfig};
pub use error::{CorpusError, Result, XmlError};
pub use types::{Annex, Article, Item, ItemKind, Paragraph, ParsedDocument, Recital};
