//! Resolution of the chapter an article belongs to.

use roxmltree::Node;

use crate::config::CHAPTER_KEYWORDS;
use crate::xml::{content_text, find_by_path, has_tag};

/// Chapter heading and subtitle of the enclosing chapter-level division.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterContext {
    pub chapter: String,
    pub chapter_title: String,
}

/// Whether a division heading names a chapter (or a title) rather than a section.
pub fn is_chapter_heading(heading: &str) -> bool {
    let upper = heading.to_uppercase();
    CHAPTER_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
}

/// Walk `node` and its ancestors to the nearest chapter-level `DIVISION`.
///
/// Section divisions are passed over. Without a chapter-level division both
/// fields are empty.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_corpus::formex::find_chapter_context;
///
/// let xml = r#"<DIVISION>
///     <TITLE><TI><P>CHAPTER III</P></TI><STI><P>HIGH-RISK AI SYSTEMS</P></STI></TITLE>
///     <DIVISION>
///         <TITLE><TI><P>SECTION 1</P></TI></TITLE>
///         <ARTICLE/>
///     </DIVISION>
/// </DIVISION>"#;
/// let doc = Document::parse(xml).unwrap();
/// let article = doc.descendants().find(|n| n.has_tag_name("ARTICLE")).unwrap();
///
/// let context = find_chapter_context(article.parent_element().unwrap());
/// assert_eq!(context.chapter, "CHAPTER III");
/// assert_eq!(context.chapter_title, "HIGH-RISK AI SYSTEMS");
/// ```
pub fn find_chapter_context(node: Node<'_, '_>) -> ChapterContext {
    for ancestor in node.ancestors().filter(|n| has_tag(*n, "DIVISION")) {
        let heading = content_text(find_by_path(ancestor, "TITLE/TI"));
        if is_chapter_heading(&heading) {
            return ChapterContext {
                chapter: heading,
                chapter_title: content_text(find_by_path(ancestor, "TITLE/STI")),
            };
        }
    }

    ChapterContext::default()
}
