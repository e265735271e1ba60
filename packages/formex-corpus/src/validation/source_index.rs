//! Raw text index of the source files, keyed like the extracted items.
//!
//! This walks the XML on its own instead of reusing the extractor, so a
//! traversal bug on either side shows up as a coverage difference. Only the
//! key derivation in [`crate::address`] is shared; keys are read from
//! footnote-free headings like the extractor does, while indexed bodies keep
//! everything.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use crate::address::{annex_number, article_number, strip_label};
use crate::config::{MainFileConvention, METADATA_FILE_MARKER, TOC_FILE_MARKER, XML_EXTENSION};
use crate::types::ItemKind;
use crate::xml::{content_text, element_text, find_by_path, find_child, parse_xml};

/// Raw text per `{kind}:{id}` key, ordered by key.
pub type SourceIndex = BTreeMap<String, String>;

/// Index the raw text of every article, recital and annex in `source_dir`.
///
/// Unreadable or malformed files contribute nothing; indexing never fails.
pub fn build_source_index(source_dir: &Path) -> SourceIndex {
    let mut index = SourceIndex::new();

    let files = list_xml_files(source_dir);
    let main = MainFileConvention::PRIORITY.iter().find_map(|convention| {
        files
            .iter()
            .find(|(_, name)| convention.matches(name))
            .map(|(path, _)| path.clone())
    });

    if let Some(main) = &main {
        with_document(main, |root| index_act(root, &mut index));
    }

    for (path, name) in &files {
        if Some(path) == main.as_ref()
            || name.contains(TOC_FILE_MARKER)
            || name.contains(METADATA_FILE_MARKER)
        {
            continue;
        }
        with_document(path, |root| index_annex(root, &mut index));
    }

    tracing::debug!(entries = index.len(), "Indexed source text");
    index
}

fn list_xml_files(dir: &Path) -> Vec<(PathBuf, String)> {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Cannot read source directory");
        return Vec::new();
    };

    let mut files: Vec<(PathBuf, String)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            name.ends_with(XML_EXTENSION).then_some((path, name))
        })
        .collect();
    files.sort();
    files
}

fn with_document(path: &Path, index: impl FnOnce(Node<'_, '_>)) {
    let Ok(xml) = fs::read_to_string(path) else {
        tracing::debug!(file = %path.display(), "Unreadable file left out of source index");
        return;
    };
    match parse_xml(&xml) {
        Ok(doc) => index(doc.root_element()),
        Err(err) => {
            tracing::debug!(file = %path.display(), error = %err, "Malformed file left out of source index");
        }
    }
}

fn index_act(root: Node<'_, '_>, index: &mut SourceIndex) {
    for node in root.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "ARTICLE" => {
                let number = article_number(&content_text(find_child(node, "TI.ART")));
                index.insert(ItemKind::Article.key(&number), element_text(Some(node)));
            }
            "CONSID" => {
                let Some(np) = find_child(node, "NP") else {
                    continue;
                };
                let number = strip_label(&content_text(find_child(np, "NO.P")));
                index.insert(ItemKind::Recital.key(&number), element_text(Some(node)));
            }
            _ => {}
        }
    }
}

fn index_annex(root: Node<'_, '_>, index: &mut SourceIndex) {
    let annex = root
        .descendants()
        .find(|n| n.has_tag_name("ANNEX"))
        .unwrap_or(root);
    let number = annex_number(&content_text(find_by_path(annex, "TITLE/TI")));
    index.insert(ItemKind::Annex.key(&number), element_text(Some(root)));
}
