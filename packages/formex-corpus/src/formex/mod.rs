//! Extraction of the document model from Formex 4 XML.
//!
//! The same construct is encoded in several ways across acts, so every
//! builder tries the known variants in a fixed order and falls back to raw
//! text rather than failing.

pub mod builders;
pub mod chapter;
pub mod document;
pub mod list;
pub mod paragraph;
pub mod table;

pub use builders::FormexParser;
pub use chapter::{find_chapter_context, is_chapter_heading, ChapterContext};
pub use document::{assemble_document, parse_document, AssembledDocument};
pub use list::{nested_lists, resolve_list, ListAttachment, ListOutput};
pub use paragraph::ParagraphAssembler;
pub use table::render_table;
