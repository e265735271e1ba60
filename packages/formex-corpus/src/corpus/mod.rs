//! Markdown corpus output with YAML frontmatter.
//!
//! One file is written per article, recital and annex, laid out according
//! to the `corpus` section of the workflow configuration.

mod frontmatter;
mod text;
mod writer;

pub use frontmatter::{
    build_frontmatter, render_frontmatter, resolve_frontmatter_base, FrontmatterItem,
};
pub use text::{apply_postprocess, resolve_template, to_nfc, wrap_text};
pub use writer::{article_markdown, render_corpus, RenderStats};
