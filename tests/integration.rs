//! Integration tests: full analysis pipeline through the public API

use seoscope::analyzer::{AnalysisEngine, NoTrends, StaticTrendSource};
use seoscope::config::load_config;
use seoscope::{analyze, CheckId, ContentInput, RecommendationCategory};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

const BLOG: &str = "tests/fixtures/blog";

fn repeat_sentence(sentence: &str, times: usize) -> String {
    vec![sentence; times].join(" ")
}

/// 122 words: a two-word H1 and three 40-word paragraphs
fn guitar_body() -> String {
    format!(
        "<h1>Getting Started</h1>\n\n<p>Anyone can learn guitar with steady daily practice. {}</p>\n\n<p>{}</p>\n\n<p>{}</p>",
        repeat_sentence("Play slow chords daily.", 8),
        repeat_sentence("Play slow chords daily.", 10),
        repeat_sentence("Play slow chords daily.", 10),
    )
}

fn score_of(result: &seoscope::AnalysisResult, check: CheckId) -> u8 {
    result.breakdown.check(check).score
}

// --- Reference scenarios ---

#[test]
fn short_guitar_article_asks_for_more_content_first() {
    let input = ContentInput::new("How to Learn Guitar Fast", guitar_body())
        .with_focus_keyword("learn guitar");
    let result = analyze(&input);

    assert_eq!(result.stats.words, 122);
    assert_eq!(score_of(&result, CheckId::WordCount), 5);
    assert_eq!(score_of(&result, CheckId::HeadingStructure), 10);
    assert_eq!(score_of(&result, CheckId::Multimedia), 0);

    let top = &result.recommendations[0];
    assert_eq!(top.title, "Increase Content Length");
    assert_eq!(top.category, RecommendationCategory::Important);
    assert_eq!(top.check, CheckId::WordCount);
    assert_eq!(top.estimated_score_gain, 25);
}

#[test]
fn meta_description_in_band_with_keyword_scores_full() {
    let description = "Learn guitar with this practical guide to chords, strumming and daily practice routines that fit into a busy schedule for grown-up beginners";
    assert_eq!(description.chars().count(), 140);

    let input = ContentInput::new("How to Learn Guitar Fast", guitar_body())
        .with_focus_keyword("learn guitar")
        .with_meta_description(description);
    let result = analyze(&input);

    assert_eq!(score_of(&result, CheckId::MetaDescription), 25);
    assert!(result
        .recommendations
        .iter()
        .all(|r| r.check != CheckId::MetaDescription));
}

#[test]
fn keyword_stuffing_is_flagged() {
    let body: Vec<&str> = (0..300)
        .map(|i| if i % 20 == 0 { "react" } else { "component" })
        .collect();
    let input = ContentInput::new("Intro to Hooks", format!("{}.", body.join(" ")))
        .with_focus_keyword("react");
    let result = analyze(&input);

    assert_eq!(result.stats.words, 300);
    assert!((result.stats.keyword_density - 5.0).abs() < 1e-9);
    assert_eq!(score_of(&result, CheckId::KeywordNaturalness), 10);
    assert!(result.over_optimization);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.title == "Reduce Keyword Stuffing"));
}

// --- Degenerate input ---

#[test]
fn empty_body_is_well_defined() {
    let result = analyze(&ContentInput::new("", ""));

    assert_eq!(result.stats.words, 0);
    assert_eq!(result.stats.sentences, 0);
    assert_eq!(result.stats.paragraphs, 0);
    assert_eq!(result.stats.keyword_density, 0.0);
    assert_eq!(result.stats.flesch_reading_ease, 0.0);
    assert_eq!(score_of(&result, CheckId::Readability), 0);
    assert_eq!(result.score.value, 10);
    assert_eq!(result.categories.total(), result.score.value);
}

#[test]
fn missing_keyword_floors_keyword_checks() {
    let result = analyze(&ContentInput::new("How to Learn Guitar Fast", guitar_body()));

    assert_eq!(score_of(&result, CheckId::PrimaryKeyword), 0);
    assert_eq!(score_of(&result, CheckId::KeywordNaturalness), 0);
    assert_eq!(score_of(&result, CheckId::KeywordCoverage), 0);
    assert!(!result.over_optimization);

    let blank = analyze(
        &ContentInput::new("How to Learn Guitar Fast", guitar_body()).with_focus_keyword("   "),
    );
    assert_eq!(blank, result);
}

// --- Contract properties ---

#[test]
fn analysis_is_deterministic_and_leaves_input_untouched() {
    let input = ContentInput::new("How to Learn Guitar Fast", guitar_body())
        .with_focus_keyword("learn guitar")
        .with_existing_keywords(["chords", "strumming"]);
    let before = input.clone();

    let first = analyze(&input);
    let second = analyze(&input);
    assert_eq!(first, second);
    assert_eq!(input, before);
}

#[test]
fn recommendations_sorted_by_priority() {
    let result = analyze(&ContentInput::new("Hi", "Short."));
    assert!(result.recommendations.len() > 3);
    for pair in result.recommendations.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
}

#[test]
fn category_scores_sum_to_overall() {
    let result = analyze(
        &ContentInput::new("How to Learn Guitar Fast", guitar_body())
            .with_focus_keyword("learn guitar"),
    );
    assert_eq!(result.categories.total(), result.score.value);
    assert_eq!(result.breakdown.total_points(), result.score.value);
    for check in result.breakdown.checks() {
        assert!(check.score <= check.max, "{} over ceiling", check.check);
        assert!(check.points <= check.weight);
    }
}

#[test]
fn trending_opportunities_are_fixed() {
    let a = analyze(&ContentInput::new("A", "alpha"));
    let b = analyze(&guitar_input());
    assert_eq!(a.trending_opportunities, b.trending_opportunities);
    assert_eq!(a.trending_opportunities.len(), 5);
    assert!(a.trending_opportunities[0].contains("FAQ"));
}

fn guitar_input() -> ContentInput {
    ContentInput::new("How to Learn Guitar Fast", guitar_body()).with_focus_keyword("learn guitar")
}

// --- Trend source injection ---

#[test]
fn trend_source_changes_suggestions_not_scores() {
    let mut input = guitar_input().with_category("music");
    input.body.push_str("\n\n<p>Use a metronome.</p>");

    let plain = AnalysisEngine::new()
        .with_trend_source(Arc::new(NoTrends))
        .analyze(&input);

    let mut extra = BTreeMap::new();
    extra.insert("music".to_string(), vec!["metronome".to_string()]);
    let trending = AnalysisEngine::new()
        .with_trend_source(Arc::new(StaticTrendSource::new().extended(&extra)))
        .analyze(&input);

    assert_eq!(plain.score, trending.score);
    assert_eq!(plain.breakdown, trending.breakdown);
    assert!(!plain.suggested_keywords.contains(&"metronome".to_string()));
    assert!(trending.suggested_keywords.contains(&"metronome".to_string()));
}

// --- Files ---

#[test]
fn markdown_front_matter_feeds_the_analysis() {
    let path = Path::new(BLOG).join("sourdough-starter.md");
    let result = AnalysisEngine::new().analyze_file(&path, None).unwrap();

    assert_eq!(result.title, "How to Keep a Sourdough Starter Alive for Years");
    assert_eq!(result.source.as_deref(), Some(path.as_path()));
    assert!(result.stats.headings >= 4);
    assert_eq!(result.stats.images, 1);
    assert!(score_of(&result, CheckId::PrimaryKeyword) > 0);
    assert_eq!(score_of(&result, CheckId::UrlStructure), 20);
    assert!(score_of(&result, CheckId::Engagement) >= 15);
    assert!(score_of(&result, CheckId::SecondaryKeywords) >= 10);
}

#[test]
fn html_head_metadata_is_used() {
    let path = Path::new(BLOG).join("landing.html");
    let result = AnalysisEngine::new().analyze_file(&path, None).unwrap();

    assert_eq!(result.title, "Spring Garden Planning Checklist");
    assert!(score_of(&result, CheckId::MetaDescription) > 0);
    assert_eq!(result.stats.headings, 2);
}

#[test]
fn config_can_switch_recommendations_off() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".seoscoperc.json"),
        r#"{ "recommendations": { "word-count": "off", "schema-markup": "off" } }"#,
    )
    .unwrap();
    let post = dir.path().join("post.md");
    std::fs::write(&post, "# Short\n\nOnly a few words here.").unwrap();

    let config = load_config(dir.path(), None).unwrap();
    let result = AnalysisEngine::new().analyze_file(&post, Some(&config)).unwrap();

    assert!(result
        .recommendations
        .iter()
        .all(|r| r.check != CheckId::WordCount && r.check != CheckId::SchemaMarkup));
    // Scores are unaffected by switches
    assert_eq!(score_of(&result, CheckId::WordCount), 5);
}

#[test]
fn parallel_matches_sequential() {
    let paths = vec![
        Path::new(BLOG).join("sourdough-starter.md"),
        Path::new(BLOG).join("landing.html"),
        Path::new(BLOG).join("drafts/unfinished.md"),
    ];
    let engine = AnalysisEngine::new();

    let parallel: Vec<_> = engine
        .analyze_parallel(&paths, None)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    let sequential: Vec<_> = paths
        .iter()
        .map(|p| engine.analyze_file(p, None).unwrap())
        .collect();
    assert_eq!(parallel, sequential);

    let stats = AnalysisEngine::aggregate_stats(&parallel);
    assert_eq!(stats.files_analyzed, 3);
    assert_eq!(
        stats.total_words,
        parallel.iter().map(|r| r.stats.words).sum::<usize>()
    );
}
