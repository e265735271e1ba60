//! XML helpers over `roxmltree` documents.

mod utils;

pub use utils::{
    collapse_whitespace, content_text, element_children, element_text, find_by_path, find_child,
    find_children, find_descendants, get_tag_name, has_tag, parse_xml, NOTE_TAG,
};
