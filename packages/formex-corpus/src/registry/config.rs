//! Registry configurations for Formex content rendering.

use super::core::ElementRegistry;
use super::handlers::{
    InlineHandler, ListHandler, MixedContentHandler, NoteHandler, NumberedParagraphHandler,
    TableHandler,
};

/// Text-level Formex elements merged into the surrounding sentence.
///
/// - `HT`: highlighted text (italic, bold, small caps)
/// - `FT`: formatted text (codes, numbers)
/// - `DATE`, `IE`: dates and "i.e." markers
/// - `QUOT.START`/`QUOT.END`: quotation marks
/// - `REF.DOC.*`, `URL`: references
/// - `TXT`: text of a numbered fragment
const INLINE_TAGS: &[&str] = &[
    "HT",
    "FT",
    "DATE",
    "IE",
    "QUOT.START",
    "QUOT.END",
    "REF.DOC.OJ",
    "REF.DOC.ECR",
    "REF.DOC.SEC",
    "URL",
    "TXT",
];

/// Containers whose children are rendered as mixed content.
const MIXED_TAGS: &[&str] = &[
    "ALINEA", "P", "QUOT.S", "GR.SEQ", "CONTENTS", "TITLE", "TI", "STI", "DIVISION", "PARAG",
];

fn base_registry(absorb_bare_labels: bool) -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    registry.register_all(INLINE_TAGS, InlineHandler);
    registry.register_all(MIXED_TAGS, MixedContentHandler);

    registry.register("NOTE", NoteHandler);
    registry.register("LIST", ListHandler);
    registry.register("TBL", TableHandler);
    registry.register("NP", NumberedParagraphHandler { absorb_bare_labels });

    registry
}

/// Create the registry used for article alineas.
///
/// Numbered paragraphs holding only a label are absorbed.
#[must_use]
pub fn create_alinea_registry() -> ElementRegistry {
    let mut registry = base_registry(true);

    // Paragraph numbers are read by the paragraph assembler
    registry.skip(["NO.PARAG"]);

    registry
}

/// Create the registry used for annex contents and recital fallbacks.
#[must_use]
pub fn create_content_registry() -> ElementRegistry {
    let mut registry = base_registry(false);

    // Bare labels outside NP; an NP reads its own label
    registry.skip(["NO.P"]);

    registry
}
