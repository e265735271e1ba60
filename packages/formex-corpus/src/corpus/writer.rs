//! Markdown corpus writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml_ng::Mapping;

use super::frontmatter::{
    build_frontmatter, render_frontmatter, resolve_frontmatter_base, FrontmatterItem,
};
use super::text::{apply_postprocess, resolve_template, to_nfc, wrap_text};
use crate::config::{CorpusConfig, PostprocessConfig, SectionDef, SourceConfig};
use crate::error::Result;
use crate::types::{Article, ParsedDocument};

/// Number of files written (and failed) per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub articles: usize,
    pub recitals: usize,
    pub annexes: usize,
    pub failed: usize,
}

impl RenderStats {
    pub fn written(&self) -> usize {
        self.articles + self.recitals + self.annexes
    }
}

/// One corpus file before it is written.
struct CorpusFile<'a> {
    filename: String,
    heading: String,
    frontmatter_values: Vec<(&'static str, &'a str)>,
    items: Vec<FrontmatterItem>,
    body: String,
}

struct CorpusWriter<'a> {
    corpus: &'a CorpusConfig,
    postprocess: &'a PostprocessConfig,
    /// `frontmatter_base` with the source placeholders filled.
    base: Mapping,
}

impl CorpusWriter<'_> {
    fn render(&self, section: &SectionDef, file: &CorpusFile<'_>) -> Result<String> {
        let frontmatter = build_frontmatter(
            section,
            &file.frontmatter_values,
            &self.base,
            &file.items,
        )?;

        let body = match self.corpus.wrap_width {
            Some(width) => wrap_text(&file.body, width),
            None => file.body.clone(),
        };

        let content = format!(
            "{}\n# {}\n\n{}\n",
            render_frontmatter(&frontmatter)?,
            file.heading,
            body.trim_end()
        );
        Ok(to_nfc(&apply_postprocess(&content, self.postprocess)))
    }

    /// Write every file of a section; returns `(written, failed)`.
    fn write_section(
        &self,
        section: &SectionDef,
        output_dir: &Path,
        files: Vec<CorpusFile<'_>>,
    ) -> Result<(usize, usize)> {
        let dir = output_dir.join(&section.dir);
        fs::create_dir_all(&dir)?;

        let mut written = 0;
        let mut failed = 0;
        for file in files {
            let path = dir.join(&file.filename);
            match self
                .render(section, &file)
                .and_then(|content| write_atomic(&path, &content))
            {
                Ok(()) => written += 1,
                Err(err) => {
                    tracing::warn!(file = %path.display(), error = %err, "Failed to write corpus file");
                    failed += 1;
                }
            }
        }

        tracing::debug!(dir = %dir.display(), written, failed, "Wrote section");
        Ok((written, failed))
    }
}

/// Render `doc` into one Markdown file per item for every configured section.
///
/// `source` and `timestamp` fill the placeholders of the base frontmatter,
/// see [`resolve_frontmatter_base`].
///
/// # Errors
/// Returns `Io` if a section directory cannot be created. Failures of single
/// files are logged and counted in [`RenderStats::failed`].
pub fn render_corpus(
    doc: &ParsedDocument,
    corpus: &CorpusConfig,
    postprocess: &PostprocessConfig,
    source: &SourceConfig,
    timestamp: &str,
    output_dir: &Path,
) -> Result<RenderStats> {
    let writer = CorpusWriter {
        corpus,
        postprocess,
        base: resolve_frontmatter_base(&corpus.frontmatter_base, source, timestamp),
    };
    let mut stats = RenderStats::default();

    if let Some(section) = &corpus.sections.articles {
        let files = doc
            .articles
            .iter()
            .map(|article| {
                let values = vec![
                    ("number", article.number.as_str()),
                    ("title", article.title.as_str()),
                    ("chapter", article.chapter.as_str()),
                    ("chapter_title", article.chapter_title.as_str()),
                ];
                CorpusFile {
                    filename: resolve_template(&section.filename, &values),
                    heading: resolve_template(&section.heading, &values),
                    items: FrontmatterItem::from_article(article),
                    body: article_markdown(article),
                    frontmatter_values: values,
                }
            })
            .collect();
        let (written, failed) = writer.write_section(section, output_dir, files)?;
        stats.articles = written;
        stats.failed += failed;
    }

    if let Some(section) = &corpus.sections.recitals {
        let files = doc
            .recitals
            .iter()
            .map(|recital| {
                let values = vec![("number", recital.number.as_str())];
                CorpusFile {
                    filename: resolve_template(&section.filename, &values),
                    heading: resolve_template(&section.heading, &values),
                    items: Vec::new(),
                    body: recital.text.clone(),
                    frontmatter_values: values,
                }
            })
            .collect();
        let (written, failed) = writer.write_section(section, output_dir, files)?;
        stats.recitals = written;
        stats.failed += failed;
    }

    if let Some(section) = &corpus.sections.annexes {
        let files = doc
            .annexes
            .iter()
            .map(|annex| {
                let values = vec![
                    ("number", annex.number.as_str()),
                    ("title", annex.title.as_str()),
                ];
                CorpusFile {
                    filename: resolve_template(&section.filename, &values),
                    heading: resolve_template(&section.heading, &values),
                    items: Vec::new(),
                    body: annex.content.clone(),
                    frontmatter_values: values,
                }
            })
            .collect();
        let (written, failed) = writer.write_section(section, output_dir, files)?;
        stats.annexes = written;
        stats.failed += failed;
    }

    tracing::info!(
        articles = stats.articles,
        recitals = stats.recitals,
        annexes = stats.annexes,
        failed = stats.failed,
        "Rendered corpus"
    );
    Ok(stats)
}

/// Markdown body of an article: a `## {number}.` heading per numbered
/// paragraph, followed by its text.
pub fn article_markdown(article: &Article) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for paragraph in &article.paragraphs {
        if !paragraph.number.is_empty() {
            blocks.push(format!("## {}.", paragraph.number));
        }
        if !paragraph.text.is_empty() {
            blocks.push(paragraph.text.clone());
        }
    }

    blocks.join("\n\n")
}

/// Write via a temp file in the same directory, then rename into place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file: PathBuf = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NormalizeRule, Sections};
    use crate::types::{Annex, Item, Paragraph, Recital};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn section(dir: &str, filename: &str, heading: &str, frontmatter: &str) -> SectionDef {
        SectionDef {
            dir: dir.to_string(),
            filename: filename.to_string(),
            heading: heading.to_string(),
            frontmatter: serde_yaml_ng::from_str(frontmatter).unwrap(),
        }
    }

    fn document() -> ParsedDocument {
        ParsedDocument {
            articles: vec![Article {
                number: "6".to_string(),
                title: "Classification rules".to_string(),
                chapter: "CHAPTER III".to_string(),
                chapter_title: "HIGH-RISK AI SYSTEMS".to_string(),
                paragraphs: vec![
                    Paragraph {
                        number: "1".to_string(),
                        text: "An AI system is high-risk where:\n\n(a) it is a safety component;"
                            .to_string(),
                        items: vec![Item::new("a", "it is a safety component;")],
                    },
                    Paragraph {
                        number: "2".to_string(),
                        text: "Second paragraph.".to_string(),
                        items: Vec::new(),
                    },
                ],
            }],
            recitals: vec![Recital {
                number: "1".to_string(),
                text: "Cafe\u{301} recital.".to_string(),
            }],
            annexes: vec![Annex {
                number: "III".to_string(),
                title: "ANNEX III — High-risk AI systems".to_string(),
                content: "Biometrics".to_string(),
            }],
        }
    }

    const TIMESTAMP: &str = "2024-07-12T00:00:00Z";

    fn render(doc: &ParsedDocument, config: &CorpusConfig, output_dir: &Path) -> RenderStats {
        render_corpus(
            doc,
            config,
            &PostprocessConfig::default(),
            &SourceConfig::default(),
            TIMESTAMP,
            output_dir,
        )
        .unwrap()
    }

    fn corpus() -> CorpusConfig {
        CorpusConfig {
            frontmatter_base: serde_yaml_ng::from_str("source: EUR-Lex").unwrap(),
            wrap_width: None,
            sections: Sections {
                articles: Some(section(
                    "articles",
                    "article-{number}.md",
                    "Article {number} — {title}",
                    "article: '{number}'\nchapter: '{chapter}'",
                )),
                recitals: Some(section("recitals", "recital-{number}.md", "Recital {number}", "{}")),
                annexes: None,
            },
        }
    }

    #[test]
    fn test_article_markdown() {
        let doc = document();
        assert_eq!(
            article_markdown(&doc.articles[0]),
            "## 1.\n\nAn AI system is high-risk where:\n\n(a) it is a safety component;\n\n## 2.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_article_markdown_unnumbered() {
        let article = Article {
            paragraphs: vec![Paragraph {
                text: "Entry into force.".to_string(),
                ..Paragraph::default()
            }],
            ..Article::default()
        };
        assert_eq!(article_markdown(&article), "Entry into force.");
    }

    #[test]
    fn test_render_corpus() {
        let dir = tempdir().unwrap();
        let postprocess = PostprocessConfig {
            normalize: vec![NormalizeRule {
                find: "high-risk".to_string(),
                replace: "high‑risk".to_string(),
            }],
        };

        let stats = render_corpus(
            &document(),
            &corpus(),
            &postprocess,
            &SourceConfig::default(),
            TIMESTAMP,
            dir.path(),
        ).unwrap();

        assert_eq!(
            stats,
            RenderStats {
                articles: 1,
                recitals: 1,
                annexes: 0,
                failed: 0,
            }
        );
        assert_eq!(stats.written(), 2);
        assert!(!dir.path().join("annexes").exists());

        let article = fs::read_to_string(dir.path().join("articles/article-6.md")).unwrap();
        assert!(article.starts_with("---\narticle: '6'\nchapter: CHAPTER III\nsource: EUR-Lex\nitems:\n"));
        assert!(article.contains("\n---\n\n# Article 6 — Classification rules\n\n## 1.\n\n"));
        assert!(article.contains("An AI system is high‑risk where:"));
        assert!(article.ends_with("Second paragraph.\n"));

        let recital = fs::read_to_string(dir.path().join("recitals/recital-1.md")).unwrap();
        assert_eq!(
            recital,
            "---\nsource: EUR-Lex\n---\n\n# Recital 1\n\nCaf\u{e9} recital.\n"
        );
    }

    #[test]
    fn test_render_corpus_overwrites_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let config = corpus();

        render(&document(), &config, dir.path());
        render(&document(), &config, dir.path());

        let names: Vec<_> = fs::read_dir(dir.path().join("recitals"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["recital-1.md"]);
    }

    #[test]
    fn test_render_corpus_wraps_body() {
        let dir = tempdir().unwrap();
        let mut config = corpus();
        config.wrap_width = Some(12);
        config.sections.articles = None;
        config.sections.recitals = None;
        config.sections.annexes = Some(section("annexes", "annex-{number}.md", "{title}", "{}"));

        let mut doc = document();
        doc.annexes[0].content = "one two three four".to_string();
        render(&doc, &config, dir.path());

        let annex = fs::read_to_string(dir.path().join("annexes/annex-III.md")).unwrap();
        assert!(annex.ends_with("# ANNEX III — High-risk AI systems\n\none two\nthree four\n"));
    }

    #[test]
    fn test_render_corpus_fills_base_placeholders() {
        let dir = tempdir().unwrap();
        let mut config = corpus();
        config.sections.articles = None;
        config.frontmatter_base = serde_yaml_ng::from_str(
            "celex: '{{celex}}'\nlanguage: '{{language_code}}'\ngenerated: '{{timestamp}}'",
        )
        .unwrap();
        let source = SourceConfig {
            celex: "32024R1689".to_string(),
            language_code: "en".to_string(),
            ..SourceConfig::default()
        };

        render_corpus(
            &document(),
            &config,
            &PostprocessConfig::default(),
            &source,
            TIMESTAMP,
            dir.path(),
        )
        .unwrap();

        let recital = fs::read_to_string(dir.path().join("recitals/recital-1.md")).unwrap();
        assert!(recital.contains("celex: 32024R1689\nlanguage: en\n"));
        assert!(recital.contains("generated: "));
        assert!(recital.contains("2024-07-12T00:00:00Z"));
        assert!(!recital.contains("{{"));
    }
}
