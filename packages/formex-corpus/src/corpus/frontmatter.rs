//! YAML frontmatter for corpus files.

use serde::Serialize;
use serde_yaml_ng::{Mapping, Value};

use super::text::resolve_template;
use crate::config::{SectionDef, SourceConfig};
use crate::error::Result;
use crate::types::Article;

/// One list entry of an article, as listed in its frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontmatterItem {
    pub paragraph: String,
    pub letter: String,
    pub text: String,
}

impl FrontmatterItem {
    /// All list entries of an article, in document order.
    pub fn from_article(article: &Article) -> Vec<Self> {
        article
            .items()
            .map(|(paragraph, item)| Self {
                paragraph: paragraph.to_string(),
                letter: item.letter.clone(),
                text: item.text.clone(),
            })
            .collect()
    }
}

/// Build the frontmatter mapping of one file.
///
/// Section fields come first with string templates resolved, then the base
/// fields (which win on conflicting keys), then `items` when non-empty.
pub fn build_frontmatter(
    section: &SectionDef,
    values: &[(&str, &str)],
    base: &Mapping,
    items: &[FrontmatterItem],
) -> Result<Mapping> {
    let mut frontmatter = Mapping::new();

    for (key, value) in &section.frontmatter {
        frontmatter.insert(key.clone(), resolve_value(value, values));
    }
    for (key, value) in base {
        frontmatter.insert(key.clone(), value.clone());
    }
    if !items.is_empty() {
        frontmatter.insert(
            Value::String("items".to_string()),
            serde_yaml_ng::to_value(items)?,
        );
    }

    Ok(frontmatter)
}

/// Fill the `{{celex}}`, `{{language_code}}` and `{{timestamp}}` placeholders
/// of the base frontmatter, in nested values too.
///
/// # Examples
/// ```
/// use formex_corpus::config::SourceConfig;
/// use formex_corpus::corpus::resolve_frontmatter_base;
/// use serde_yaml_ng::Mapping;
///
/// let base: Mapping = serde_yaml_ng::from_str("id: 'eu-{{celex}}-{{language_code}}'").unwrap();
/// let source = SourceConfig {
///     celex: "32024R1689".to_string(),
///     language_code: "en".to_string(),
///     ..SourceConfig::default()
/// };
///
/// let resolved = resolve_frontmatter_base(&base, &source, "2024-07-12T00:00:00Z");
/// assert_eq!(resolved["id"], "eu-32024R1689-en");
/// ```
pub fn resolve_frontmatter_base(base: &Mapping, source: &SourceConfig, timestamp: &str) -> Mapping {
    let fill = |text: &str| {
        text.replace("{{language_code}}", &source.language_code)
            .replace("{{celex}}", &source.celex)
            .replace("{{timestamp}}", timestamp)
    };
    base.iter()
        .map(|(key, value)| (key.clone(), map_strings(value, &fill)))
        .collect()
}

/// Serialize a frontmatter mapping as a `---` delimited block.
pub fn render_frontmatter(frontmatter: &Mapping) -> Result<String> {
    let yaml = if frontmatter.is_empty() {
        String::new()
    } else {
        serde_yaml_ng::to_string(frontmatter)?
    };
    Ok(format!("---\n{yaml}---\n"))
}

fn resolve_value(value: &Value, values: &[(&str, &str)]) -> Value {
    map_strings(value, &|template| resolve_template(template, values))
}

/// Apply `f` to every string inside `value`.
fn map_strings(value: &Value, f: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(f(text)),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(|v| map_strings(v, f)).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), map_strings(v, f)))
                .collect(),
        ),
        other => other.clone(),
    }
}
