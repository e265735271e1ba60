//! Plain-text rendering of Formex tables (`TBL`).

use roxmltree::Node;

use crate::xml::{content_text, find_by_path, find_children, find_descendants};

/// Render a table as text: an optional title line, then one line per row
/// with cells separated by tabs. Empty rows are dropped.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::formex::render_table;
///
/// let xml = "<TBL><CORPUS><ROW><CELL>Risk</CELL><CELL>Level</CELL></ROW></CORPUS></TBL>";
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(render_table(doc.root_element()), "Risk\tLevel");
/// ```
pub fn render_table(table: Node<'_, '_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    let title = content_text(find_by_path(table, "TITLE"));
    if !title.is_empty() {
        lines.push(title);
    }

    for row in find_descendants(table, "ROW") {
        let cells: Vec<String> = find_children(row, "CELL")
            .map(|cell| content_text(Some(cell)))
            .collect();
        if cells.iter().any(|cell| !cell.is_empty()) {
            lines.push(cells.join("\t"));
        }
    }

    lines.join("\n")
}
