//! Resolution of Formex `LIST` structures into text blocks and items.
//!
//! A list is flattened depth-first: each `ITEM` contributes one entry,
//! followed by the entries of any list nested under it.

use roxmltree::Node;

use crate::address::item_letter;
use crate::types::Item;
use crate::xml::{
    collapse_whitespace, content_text, element_children, find_child, find_children, get_tag_name,
    has_tag, NOTE_TAG,
};

const LIST_TAG: &str = "LIST";
const QUOTE_TAG: &str = "QUOT.S";

/// Places where a nested `LIST` can hang off an `ITEM`.
///
/// Tried in [`ListAttachment::PRIORITY`] order; the first place holding any
/// list wins and every list found there is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAttachment {
    /// `ITEM/NP/P/LIST`
    TextFragment,
    /// `ITEM/NP/LIST`
    NumberedFragment,
    /// `ITEM/ALINEA/LIST` or `ITEM/P/LIST`
    Alinea,
    /// `ITEM/LIST`
    Direct,
}

impl ListAttachment {
    pub const PRIORITY: [Self; 4] = [
        Self::TextFragment,
        Self::NumberedFragment,
        Self::Alinea,
        Self::Direct,
    ];

    /// Lists attached to `item` at this place, in document order.
    pub fn lists<'a, 'input>(self, item: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        match self {
            Self::TextFragment => find_children(item, "NP")
                .flat_map(|np| find_children(np, "P"))
                .flat_map(|p| find_children(p, LIST_TAG))
                .collect(),
            Self::NumberedFragment => find_children(item, "NP")
                .flat_map(|np| find_children(np, LIST_TAG))
                .collect(),
            Self::Alinea => element_children(item)
                .filter(|child| has_tag(*child, "ALINEA") || has_tag(*child, "P"))
                .flat_map(|child| find_children(child, LIST_TAG))
                .collect(),
            Self::Direct => find_children(item, LIST_TAG).collect(),
        }
    }
}

/// Lists nested under an item, taken from the first attachment place that has any.
pub fn nested_lists<'a, 'input>(item: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    ListAttachment::PRIORITY
        .iter()
        .map(|attachment| attachment.lists(item))
        .find(|lists| !lists.is_empty())
        .unwrap_or_default()
}

/// Flattened list content.
///
/// `blocks` and `items` are only ever extended together, so they always
/// have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOutput {
    blocks: Vec<String>,
    items: Vec<Item>,
}

impl ListOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, label: &str, text: String) {
        let block = match (label.is_empty(), text.is_empty()) {
            (true, _) => text.clone(),
            (false, true) => label.to_string(),
            (false, false) => format!("{label} {text}"),
        };
        self.blocks.push(block);
        self.items.push(Item::new(item_letter(label), text));
    }

    /// Rendered entries, e.g. `"(a) the provider"`.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Entries joined with blank lines.
    pub fn text(&self) -> String {
        self.blocks.join("\n\n")
    }

    pub fn into_parts(self) -> (String, Vec<Item>) {
        (self.blocks.join("\n\n"), self.items)
    }
}

/// Resolve every `ITEM` of a `LIST`, depth-first, into `out`.
pub fn resolve_list(list: Node<'_, '_>, out: &mut ListOutput) {
    for item in find_children(list, "ITEM") {
        resolve_item(item, out);
    }
}

/// A blank item still counts as an entry unless it only carries a nested list.
fn resolve_item(item: Node<'_, '_>, out: &mut ListOutput) {
    let nested = nested_lists(item);

    match find_child(item, "NP") {
        Some(np) => {
            let label = content_text(find_child(np, "NO.P"));
            let text = fragment_text(np);
            if !label.is_empty() || !text.is_empty() || nested.is_empty() {
                out.push(&label, text);
            }
            for quote in find_children(item, QUOTE_TAG) {
                let text = content_text(Some(quote));
                if !text.is_empty() {
                    out.push("", text);
                }
            }
        }
        None => {
            let text = own_text(item);
            if !text.is_empty() || nested.is_empty() {
                out.push("", text);
            }
        }
    }

    for list in nested {
        resolve_list(list, out);
    }
}

/// Resolve a numbered paragraph (`NP`) met outside a list item.
///
/// With `include_bare_label` unset, an `NP` holding only its label adds no
/// entry; its nested lists are resolved either way.
pub fn resolve_numbered_paragraph(np: Node<'_, '_>, out: &mut ListOutput, include_bare_label: bool) {
    let label = content_text(find_child(np, "NO.P"));
    let text = fragment_text(np);
    if !text.is_empty() || (include_bare_label && !label.is_empty()) {
        out.push(&label, text);
    }

    let under_text: Vec<_> = find_children(np, "P")
        .flat_map(|p| find_children(p, LIST_TAG))
        .collect();
    let lists = if under_text.is_empty() {
        find_children(np, LIST_TAG).collect()
    } else {
        under_text
    };
    for list in lists {
        resolve_list(list, out);
    }
}

/// Text of a numbered fragment: its `TXT`, any `P` prose, then quoted
/// structures after a blank line. Nested lists and footnotes are excluded.
fn fragment_text(np: Node<'_, '_>) -> String {
    let mut text = String::new();

    for child in element_children(np) {
        match get_tag_name(child) {
            "NO.P" | LIST_TAG | NOTE_TAG => {}
            QUOTE_TAG => append(&mut text, &content_text(Some(child)), "\n\n"),
            "P" => append(&mut text, &own_text(child), " "),
            _ => append(&mut text, &content_text(Some(child)), " "),
        }
    }

    text
}

fn append(text: &mut String, part: &str, separator: &str) {
    if part.is_empty() {
        return;
    }
    if !text.is_empty() {
        text.push_str(separator);
    }
    text.push_str(part);
}

/// Text of an element with nested lists and footnotes left out.
fn own_text(node: Node<'_, '_>) -> String {
    let mut raw = String::new();
    push_own_text(node, &mut raw);
    collapse_whitespace(&raw)
}

fn push_own_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                out.push_str(text);
            }
        } else if child.is_element() && !matches!(get_tag_name(child), LIST_TAG | NOTE_TAG) {
            push_own_text(child, out);
        }
    }
}
