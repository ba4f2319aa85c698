//! Edge case tests: degenerate inputs must not panic.

use seoscope::analyzer::AnalysisEngine;
use seoscope::{analyze, CheckId, ContentInput};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn analyze_path(path: &Path) -> Result<seoscope::AnalysisResult, anyhow::Error> {
    AnalysisEngine::new().analyze_file(path, None)
}

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn empty_file_no_panic() {
    let file = temp_file(".md", "");
    let r = analyze_path(file.path()).unwrap();
    assert_eq!(r.stats.words, 0);
    assert!(!r.title.is_empty(), "file stem is the last title fallback");
}

#[test]
fn only_markup_no_words() {
    let file = temp_file(".html", "<div><span></span><br/></div>");
    let r = analyze_path(file.path()).unwrap();
    assert_eq!(r.stats.words, 0);
    assert_eq!(r.stats.flesch_reading_ease, 0.0);
}

#[test]
fn front_matter_only() {
    let file = temp_file(".md", "---\ntitle: Nothing Else\nkeyword: nothing\n---\n");
    let r = analyze_path(file.path()).unwrap();
    assert_eq!(r.title, "Nothing Else");
    assert_eq!(r.stats.words, 0);
    assert_eq!(r.stats.keyword_density, 0.0);
}

#[test]
fn malformed_front_matter_is_error() {
    let file = temp_file(".md", "---\ntitle: [unclosed\n---\nBody text.");
    let err = analyze_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("front matter"), "{}", err);
}

#[test]
fn unterminated_front_matter_is_error() {
    let file = temp_file(".md", "---\ntitle: Open\nBody text without a closing fence.");
    let err = analyze_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("Unterminated"), "{}", err);
}

#[test]
fn missing_file_is_error() {
    let err = analyze_path(Path::new("tests/fixtures/does-not-exist.md")).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.md"));
}

#[test]
fn punctuation_only_body() {
    let r = analyze(&ContentInput::new("Dots", "... !!! ???").with_focus_keyword("dots"));
    assert_eq!(r.stats.sentences, 0);
    assert!(r.stats.keyword_density.is_finite());
    assert!(r.stats.flesch_reading_ease.is_finite());
    assert_eq!(r.breakdown.check(CheckId::Readability).score, 0);
}

#[test]
fn unicode_content_no_panic() {
    let body = "# Café crème\n\nLes croissants sont délicieux. ¿Qué tal? 日本語のテキスト。\n\n- ✓ done";
    let r = analyze(&ContentInput::new("Café, déjà vu", body).with_focus_keyword("café"));
    assert!(r.score.value <= 100);
    assert!(r.breakdown.check(CheckId::PrimaryKeyword).score > 0);
}

#[test]
fn huge_keyword_longer_than_body() {
    let keyword = "a very long focus keyword phrase that never appears anywhere";
    let r = analyze(&ContentInput::new("Short", "Tiny body.").with_focus_keyword(keyword));
    assert_eq!(r.stats.keyword_density, 0.0);
    assert!(!r.over_optimization);
}

#[test]
fn keyword_is_whole_body() {
    let r = analyze(&ContentInput::new("seo", "seo").with_focus_keyword("seo"));
    // title + body occurrences over one body word
    assert!((r.stats.keyword_density - 200.0).abs() < 1e-9);
    assert!(r.over_optimization);
    assert_eq!(r.breakdown.check(CheckId::KeywordNaturalness).score, 10);
}

#[test]
fn crlf_line_endings() {
    let file = temp_file(
        ".md",
        "---\r\ntitle: Windows Post\r\n---\r\n# Heading\r\n\r\nFirst paragraph.\r\n\r\nSecond paragraph.\r\n",
    );
    let r = analyze_path(file.path()).unwrap();
    assert_eq!(r.title, "Windows Post");
    assert_eq!(r.stats.paragraphs, 2);
    assert_eq!(r.stats.headings, 1);
}
