//! Feature extraction: everything the scoring checks measure, computed once
//! per analysis call.

use super::markup::{self, Block};
use crate::ContentInput;
use std::collections::BTreeSet;

/// Measurements derived from a `ContentInput`. Lives for one analysis call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    /// Trimmed title
    pub title: String,
    /// Trimmed meta description (empty when absent)
    pub meta_description: String,
    /// Lowercased focus keyword, if any
    pub keyword: Option<String>,
    /// Explicit slug or slug derived from the title
    pub slug: String,
    /// Body reduced to prose
    pub body_text: String,

    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Words inside paragraph blocks (headings excluded)
    pub paragraph_word_count: usize,
    pub avg_sentence_length: f64,
    pub avg_words_per_paragraph: f64,
    pub first_paragraph: String,
    pub last_paragraph: String,

    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub heading_texts: Vec<String>,

    pub image_count: usize,
    pub video_count: usize,
    pub table_count: usize,
    pub has_links: bool,
    pub has_lists: bool,
    pub has_call_to_action: bool,
    pub has_question: bool,
    pub has_schema_markup: bool,
    pub has_fixed_width: bool,

    /// Occurrences of the keyword across title and body
    pub keyword_occurrences: usize,
    /// Occurrences per 100 words
    pub keyword_density: f64,
    pub keyword_in_title: bool,
    pub keyword_in_meta_description: bool,
    pub keyword_in_first_paragraph: bool,
    pub keyword_in_last_paragraph: bool,
    pub keyword_in_headings: bool,
    pub keyword_terms_total: usize,
    pub keyword_terms_found: usize,
    pub keyword_slug: String,

    /// Existing keywords (other than the focus keyword) present in the body
    pub secondary_found: Vec<String>,
    /// Existing keywords (other than the focus keyword) absent from the body
    pub secondary_missing: Vec<String>,
}

/// `n / d`, or 0 when `d` is zero
pub fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts a `FeatureSet` from content
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract(input: &ContentInput) -> FeatureSet {
        let body = input.body.as_str();
        let title = input.title.trim().to_string();
        let meta_description = input
            .meta_description
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_string();
        let keyword = input.keyword().map(|k| collapse_whitespace(k).to_lowercase());

        let body_text = markup::strip_markup(body);
        let word_count = body_text.split_whitespace().count();
        let sentence_count = body_text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();

        let blocks = markup::split_blocks(body);
        let paragraphs: Vec<&Block> = blocks.iter().filter(|b| !b.is_heading).collect();
        let paragraph_word_count: usize = paragraphs
            .iter()
            .map(|p| p.text.split_whitespace().count())
            .sum();
        let first_paragraph = paragraphs.first().map(|p| p.text.clone()).unwrap_or_default();
        let last_paragraph = paragraphs.last().map(|p| p.text.clone()).unwrap_or_default();

        let headings = markup::count_headings(body);
        let heading_texts = markup::heading_texts(body);

        let slug = input
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| markup::slugify(&title));

        let has_call_to_action = markup::has_call_to_action(&body_text);
        let has_question = body_text.contains('?');

        let mut features = FeatureSet {
            title,
            meta_description,
            slug,
            word_count,
            sentence_count,
            paragraph_count: paragraphs.len(),
            paragraph_word_count,
            avg_sentence_length: ratio(word_count, sentence_count),
            avg_words_per_paragraph: ratio(paragraph_word_count, paragraphs.len()),
            first_paragraph,
            last_paragraph,
            h1_count: headings.h1,
            h2_count: headings.h2,
            h3_count: headings.h3,
            heading_texts,
            image_count: markup::count_images(body),
            video_count: markup::count_videos(body),
            table_count: markup::count_tables(body),
            has_links: markup::has_links(body),
            has_lists: markup::has_lists(body),
            has_call_to_action,
            has_question,
            has_schema_markup: markup::has_schema_markup(body),
            has_fixed_width: markup::has_fixed_width(body),
            body_text,
            ..FeatureSet::default()
        };

        if let Some(ref kw) = keyword {
            Self::extract_keyword_features(&mut features, kw);
        }
        Self::extract_secondary_keywords(&mut features, input, keyword.as_deref());
        features.keyword = keyword;
        features
    }

    fn extract_keyword_features(features: &mut FeatureSet, keyword: &str) {
        let title_lower = collapse_whitespace(&features.title).to_lowercase();
        let body_lower = features.body_text_lower();

        // Multi-word keywords are matched as one phrase
        features.keyword_occurrences =
            title_lower.matches(keyword).count() + body_lower.matches(keyword).count();
        features.keyword_density = ratio(features.keyword_occurrences, features.word_count) * 100.0;
        features.keyword_in_title = title_lower.contains(keyword);
        features.keyword_in_meta_description =
            features.meta_description.to_lowercase().contains(keyword);
        features.keyword_in_first_paragraph =
            features.first_paragraph.to_lowercase().contains(keyword);
        features.keyword_in_last_paragraph =
            features.last_paragraph.to_lowercase().contains(keyword);
        features.keyword_in_headings = features
            .heading_texts
            .iter()
            .any(|h| h.to_lowercase().contains(keyword));

        let terms: Vec<&str> = keyword.split_whitespace().collect();
        features.keyword_terms_total = terms.len();
        features.keyword_terms_found = terms.iter().filter(|t| body_lower.contains(*t)).count();
        features.keyword_slug = markup::slugify(keyword);
    }

    fn extract_secondary_keywords(
        features: &mut FeatureSet,
        input: &ContentInput,
        focus: Option<&str>,
    ) {
        let body_lower = features.body_text_lower();
        let mut found = BTreeSet::new();
        let mut missing = BTreeSet::new();
        for existing in &input.existing_keywords {
            let candidate = existing.trim().to_lowercase();
            if candidate.is_empty() || Some(candidate.as_str()) == focus {
                continue;
            }
            if body_lower.contains(&candidate) {
                found.insert(candidate);
            } else {
                missing.insert(candidate);
            }
        }
        features.secondary_found = found.into_iter().collect();
        features.secondary_missing = missing.into_iter().collect();
    }
}

impl FeatureSet {
    /// Lowercased body with whitespace runs collapsed, so phrases match
    /// across line breaks
    fn body_text_lower(&self) -> String {
        collapse_whitespace(&self.body_text).to_lowercase()
    }

    pub fn heading_count(&self) -> usize {
        self.h1_count + self.h2_count + self.h3_count
    }
}
