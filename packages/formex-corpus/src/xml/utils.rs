//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Document, Node, ParsingOptions};

/// Tag of Formex footnotes, dropped from extracted content.
pub const NOTE_TAG: &str = "NOTE";

/// Parse XML text into a document.
///
/// Formex packages sometimes carry a DOCTYPE declaration, so DTDs are allowed.
pub fn parse_xml(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::xml::get_tag_name;
///
/// let xml = r#"<ACT><ARTICLE>text</ARTICLE></ACT>"#;
/// let doc = Document::parse(xml).unwrap();
/// let article = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(article), "ARTICLE");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::xml::find_child;
///
/// let xml = r#"<PARAG><NO.PARAG>1.</NO.PARAG><ALINEA/></PARAG>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "NO.PARAG").is_some());
/// assert!(find_child(root, "LIST").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find all descendant elements (including `node` itself) with the given tag name.
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(move |n| has_tag(*n, tag))
}

/// Find a descendant element matching a path of tag names.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::xml::find_by_path;
///
/// let xml = r#"<DIVISION><TITLE><TI><P>CHAPTER I</P></TI></TITLE></DIVISION>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let ti = find_by_path(doc.root_element(), "TITLE/TI");
/// assert!(ti.is_some());
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;

    for part in path.split('/') {
        current = find_child(current, part)?;
    }

    Some(current)
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Collapse whitespace runs to single spaces and trim.
///
/// # Examples
/// ```
/// use formex_corpus::xml::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Full descendant text of an element, whitespace collapsed.
///
/// Absent element yields an empty string.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::xml::element_text;
///
/// let xml = "<TXT>  the <HT>high-risk</HT>\n  system </TXT>";
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(element_text(Some(doc.root_element())), "the high-risk system");
/// assert_eq!(element_text(None), "");
/// ```
pub fn element_text(node: Option<Node<'_, '_>>) -> String {
    let Some(node) = node else {
        return String::new();
    };
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    collapse_whitespace(&raw)
}

/// Descendant text of an element with footnotes removed, whitespace collapsed.
pub fn content_text(node: Option<Node<'_, '_>>) -> String {
    let Some(node) = node else {
        return String::new();
    };
    let mut raw = String::new();
    push_content_text(node, &mut raw);
    collapse_whitespace(&raw)
}

fn push_content_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                out.push_str(text);
            }
        } else if child.is_element() && get_tag_name(child) != NOTE_TAG {
            push_content_text(child, out);
        }
    }
}
