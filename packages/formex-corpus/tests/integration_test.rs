//! End-to-end integration tests for the corpus builder.
//!
//! Tests the complete pipeline from Formex parsing to validation and corpus
//! rendering, using a trimmed-down package of Regulation (EU) 2024/1689.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use formex_corpus::config::load_config;
use formex_corpus::corpus::render_corpus;
use formex_corpus::formex::{assemble_document, parse_document};
use formex_corpus::types::{Item, ParsedDocument};
use formex_corpus::validation::{build_source_index, validate, validate_source};
use formex_corpus::CorpusError;

/// Directory of the fixture package.
fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("formex")
}

fn workflow_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("workflow.yaml")
}

/// Copy the fixture package into a temp dir so tests can add files to it.
fn copy_fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(fixture_dir()).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
    }
    dir
}

fn parse_fixture() -> ParsedDocument {
    parse_document(&fixture_dir()).unwrap_or_else(|e| panic!("Failed to parse fixture: {e}"))
}

#[test]
fn test_parse_document_counts_and_order() {
    let doc = parse_fixture();

    let articles: Vec<_> = doc.articles.iter().map(|a| a.number.as_str()).collect();
    assert_eq!(articles, vec!["1", "2", "3", "5"]);

    let recitals: Vec<_> = doc.recitals.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(recitals, vec!["1", "2", "3"]);

    // Table-of-contents and metadata files are not annexes
    let annexes: Vec<_> = doc.annexes.iter().map(|a| a.number.as_str()).collect();
    assert_eq!(annexes, vec!["III", "IV"]);
}

#[test]
fn test_article_metadata() {
    let doc = parse_fixture();

    let first = &doc.articles[0];
    assert_eq!(first.title, "Subject matter");
    assert_eq!(first.chapter, "CHAPTER I");
    assert_eq!(first.chapter_title, "GENERAL PROVISIONS");
    assert_eq!(first.paragraphs.len(), 2);
    assert_eq!(first.paragraphs[0].number, "1");
    assert_eq!(
        first.paragraphs[1].text,
        "This Regulation lays down:\n\n\
         (a) harmonised rules for the placing on the market of AI systems;\n\n\
         (b) prohibitions of certain AI practices."
    );

    // Wrapper-less body
    let scope = &doc.articles[1];
    assert_eq!(scope.paragraphs.len(), 1);
    assert_eq!(scope.paragraphs[0].number, "");
    assert!(scope.paragraphs[0].items.is_empty());
}

#[test]
fn test_chapter_context_skips_sections_and_falls_back_to_empty() {
    let doc = parse_fixture();

    let classification = &doc.articles[2];
    assert_eq!(classification.chapter, "CHAPTER III");
    assert_eq!(classification.chapter_title, "HIGH-RISK AI SYSTEMS");

    let final_article = &doc.articles[3];
    assert_eq!(final_article.chapter, "");
    assert_eq!(final_article.chapter_title, "");
    assert_eq!(final_article.title, "");
}

#[test]
fn test_nested_list_items() {
    let doc = parse_fixture();
    let paragraph = &doc.articles[2].paragraphs[0];

    assert_eq!(
        paragraph.items,
        vec![
            Item::new(
                "a",
                "the AI system is intended to be used as a safety component of a product that:"
            ),
            Item::new("i", "is covered by Union harmonisation legislation;"),
            Item::new("ii", "is required to undergo a third-party conformity assessment;"),
            Item::new("b", "the AI system is referred to in Annex III."),
        ]
    );
    assert!(paragraph
        .text
        .starts_with("An AI system shall be considered to be high-risk where:\n\n(a) "));
    assert!(paragraph
        .text
        .contains("\n\n(i) is covered by Union harmonisation legislation;\n\n(ii) "));
}

#[test]
fn test_recitals() {
    let doc = parse_fixture();

    // Footnote dropped
    assert_eq!(
        doc.recitals[0].text,
        "The purpose of this Regulation is to improve the functioning of the internal market."
    );
    assert_eq!(
        doc.recitals[1].text,
        "This Regulation should be applied in accordance with the values of the Union enshrined in the Charter."
    );
    // No TXT: rendered from the numbered paragraph
    assert_eq!(
        doc.recitals[2].text,
        "AI systems can be easily deployed in a large variety of sectors of the economy."
    );
}

#[test]
fn test_annexes() {
    let doc = parse_fixture();

    let biometrics = &doc.annexes[0];
    assert_eq!(
        biometrics.title,
        "ANNEX III — High-risk AI systems referred to in Article 6(2)"
    );
    assert!(biometrics.content.starts_with(
        "High-risk AI systems pursuant to Article 6(2) are the AI systems listed in any of the following areas:\n\n1. Biometrics"
    ));
    assert!(biometrics
        .content
        .contains("\n\n(a) remote biometric identification systems;\n\n"));
    assert!(biometrics.content.ends_with("2. Critical infrastructure."));

    let documentation = &doc.annexes[1];
    assert_eq!(documentation.number, "IV");
    assert!(documentation
        .content
        .ends_with("Element\tReference\nGeneral description\tSection 1"));
}

#[test]
fn test_corrupted_annex_is_skipped() {
    let dir = copy_fixtures();
    fs::write(
        dir.path().join("L_202401689EN.011501.fmx.xml"),
        "<ANNEX><TITLE><TI><P>ANNEX V</P></TI></TITLE>",
    )
    .unwrap();

    let assembled = assemble_document(dir.path()).unwrap();

    assert_eq!(assembled.document.annexes.len(), 2);
    assert_eq!(assembled.document.articles.len(), 4);
    assert_eq!(assembled.skipped_annexes.len(), 1);
    assert!(assembled.skipped_annexes[0].ends_with("L_202401689EN.011501.fmx.xml"));
}

#[test]
fn test_missing_main_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        fixture_dir().join("L_202401689EN.011301.fmx.xml"),
        dir.path().join("L_202401689EN.011301.fmx.xml"),
    )
    .unwrap();

    let result = parse_document(dir.path());
    assert!(matches!(
        result,
        Err(CorpusError::MissingMainDocument { .. })
    ));
}

#[test]
fn test_source_index_keys_and_idempotency() {
    let first = build_source_index(&fixture_dir());
    let second = build_source_index(&fixture_dir());

    let keys: Vec<_> = first.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "annex:III",
            "annex:IV",
            "article:1",
            "article:2",
            "article:3",
            "article:5",
            "recital:1",
            "recital:2",
            "recital:3",
        ]
    );
    assert_eq!(first, second);

    // Raw text keeps what the extractor drops
    assert!(first["recital:1"].contains("OJ C 517"));
}

#[test]
fn test_validation_report() {
    let config = load_config(&workflow_path()).unwrap();
    let doc = parse_fixture();

    let report = validate_source(
        &doc,
        &fixture_dir(),
        &config.validation,
        "2024-07-12T00:00:00Z",
    );
    let det = &report.deterministic;

    assert_eq!(det.article_count, 4);
    assert_eq!(det.recital_count, 3);
    assert_eq!(det.annex_count, 2);
    assert!(det.empty_items.is_empty());
    assert!(det.low_coverage.is_empty());
    assert!(det.self_check_failures.is_empty());
    assert_eq!(det.numbering_gaps, vec!["gap between 3 and 5"]);
    assert_eq!(
        det.missing_structure,
        vec!["article:5 missing title", "article:5 missing chapter context"]
    );

    assert_eq!(report.items.len(), 9);
    for item in &report.items {
        assert!(
            item.coverage_ratio > 0.5 && item.coverage_ratio <= 1.0,
            "{} {} has ratio {}",
            item.item_type,
            item.item_id,
            item.coverage_ratio
        );
    }

    assert_eq!(report.total_pass, 3);
    assert_eq!(report.total_warn, 3);
    assert_eq!(report.total_fail, 0);
}

#[test]
fn test_validation_flags_count_mismatch_and_empty_items() {
    let config = load_config(&workflow_path()).unwrap();
    let index = build_source_index(&fixture_dir());

    let mut doc = parse_fixture();
    doc.recitals[1].text.clear();
    doc.annexes.pop();

    let report = validate(&doc, &index, &config.validation, "2024-07-12T00:00:00Z");

    assert_eq!(report.deterministic.empty_items, vec!["recital:2"]);
    // Annex count mismatch plus the empty recital
    assert_eq!(report.total_fail, 2);
    assert_eq!(report.total_pass, 2);
}

#[test]
fn test_report_round_trip_to_json() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&workflow_path()).unwrap();
    let report = validate_source(
        &parse_fixture(),
        &fixture_dir(),
        &config.validation,
        "2024-07-12T00:00:00Z",
    );

    let path = dir.path().join("validation-report.json");
    report.save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["timestamp"], "2024-07-12T00:00:00Z");
    assert_eq!(json["deterministic"]["article_count"], 4);
    assert_eq!(json["items"][0]["item_type"], "article");
    assert_eq!(json["total_warn"], 3);
}

#[test]
fn test_render_corpus() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&workflow_path()).unwrap();
    let corpus = config.corpus.as_ref().unwrap();

    let stats = render_corpus(
        &parse_fixture(),
        corpus,
        &config.postprocess,
        &config.source,
        "2024-07-12T00:00:00Z",
        dir.path(),
    )
    .unwrap();

    assert_eq!(stats.articles, 4);
    assert_eq!(stats.recitals, 3);
    assert_eq!(stats.annexes, 2);
    assert_eq!(stats.failed, 0);

    let article = fs::read_to_string(dir.path().join("articles/article-3.md")).unwrap();
    assert!(article.starts_with("---\n"));
    assert!(article.contains("chapter: CHAPTER III\n"));
    assert!(article.contains("source: EUR-Lex\ncelex: 32024R1689\nlanguage: en\n"));
    assert!(article.contains("2024-07-12T00:00:00Z"));
    assert!(!article.contains("{{"));
    assert!(article.contains("  letter: ii\n"));
    assert!(article.contains(
        "\n---\n\n# Article 3 — Classification rules for high-risk AI systems\n\n## 1.\n\n"
    ));

    let annex = fs::read_to_string(dir.path().join("annexes/annex-IV.md")).unwrap();
    assert!(annex.contains("# ANNEX IV — Technical documentation referred to in Article 11(1)\n"));

    assert!(dir.path().join("recitals/recital-3.md").exists());
}
