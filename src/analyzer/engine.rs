//! Analysis engine - orchestrates extraction, scoring and recommendations

use crate::config::Config;
use crate::parser::{load_document, FeatureExtractor};
use crate::{AnalysisResult, CheckId, ContentInput, ContentStats, Score};
use anyhow::Result;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::checks::{KeywordNaturalnessCheck, ReadabilityCheck};
use super::keywords::{trending_opportunities, KeywordSuggester, StaticTrendSource, TrendSource};
use super::recommendations::RecommendationGenerator;
use super::rubric::Rubric;
use super::ScoreCalculator;

/// Main analysis engine. Holds no per-call state, so one engine can be
/// shared across threads.
pub struct AnalysisEngine {
    rubric: Rubric,
    trends: Arc<dyn TrendSource>,
    /// Replaces the content's own focus keyword when set
    focus_keyword: Option<String>,
}

impl AnalysisEngine {
    /// Create a new analysis engine with the default rubric and built-in trends
    pub fn new() -> Self {
        Self {
            rubric: Rubric::default(),
            trends: Arc::new(StaticTrendSource::with_defaults()),
            focus_keyword: None,
        }
    }

    pub fn with_rubric(mut self, rubric: Rubric) -> Self {
        self.rubric = rubric;
        self
    }

    pub fn with_trend_source(mut self, trends: Arc<dyn TrendSource>) -> Self {
        self.trends = trends;
        self
    }

    /// Analyze every input against this keyword instead of its own
    pub fn with_focus_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.focus_keyword = (!keyword.trim().is_empty()).then_some(keyword);
        self
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Analyze in-memory content. Pure: no I/O, input untouched.
    pub fn analyze(&self, input: &ContentInput) -> AnalysisResult {
        self.analyze_with(input, |_| true)
    }

    /// Analyze content loaded from `path`, applying the config that matches it
    pub fn analyze_document(
        &self,
        path: &Path,
        mut input: ContentInput,
        config: Option<&Config>,
    ) -> AnalysisResult {
        let effective = config
            .map(|c| c.effective_for_file(path))
            .unwrap_or_default();
        if input.category.is_none() {
            input.category = effective.category.clone();
        }

        let mut result = self.analyze_with(&input, |check| effective.is_enabled(check));
        result.source = Some(path.to_path_buf());
        result
    }

    /// Read, parse and analyze a content file
    pub fn analyze_file(&self, path: &Path, config: Option<&Config>) -> Result<AnalysisResult> {
        let input = load_document(path)?;
        Ok(self.analyze_document(path, input, config))
    }

    /// Analyze multiple files in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<AnalysisResult>> {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|p| self.analyze_file(p, config))
            .collect()
    }

    fn analyze_with(&self, input: &ContentInput, enabled: impl Fn(CheckId) -> bool) -> AnalysisResult {
        let input = match &self.focus_keyword {
            Some(keyword) => Cow::Owned(input.clone().with_focus_keyword(keyword.clone())),
            None => Cow::Borrowed(input),
        };

        let features = FeatureExtractor::extract(&input);
        let breakdown = ScoreCalculator::calculate_breakdown(&features, &self.rubric);
        let categories = ScoreCalculator::category_scores(&breakdown);
        let score = ScoreCalculator::calculate(&categories);
        let recommendations = RecommendationGenerator::new(&self.rubric).generate(&breakdown, enabled);
        let suggested_keywords = KeywordSuggester::new(self.trends.as_ref())
            .with_limit(self.rubric.max_suggested_keywords)
            .suggest(&input);

        let stats = ContentStats {
            words: features.word_count,
            sentences: features.sentence_count,
            paragraphs: features.paragraph_count,
            headings: features.heading_count(),
            images: features.image_count,
            videos: features.video_count,
            keyword_density: features.keyword_density,
            flesch_reading_ease: ReadabilityCheck::flesch(&features, &self.rubric).unwrap_or(0.0),
        };

        tracing::debug!(
            title = %input.title,
            score = score.value,
            words = stats.words,
            recommendations = recommendations.len(),
            "analyzed content"
        );

        AnalysisResult {
            source: None,
            title: input.title.clone(),
            score,
            categories,
            breakdown,
            recommendations,
            trending_opportunities: trending_opportunities(),
            suggested_keywords,
            over_optimization: KeywordNaturalnessCheck::is_over_optimized(&features, &self.rubric),
            stats,
        }
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[AnalysisResult]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let total_score: u32 = results.iter().map(|r| r.score.value as u32).sum();
        let avg_score = (total_score / results.len() as u32) as u8;

        let total_words: usize = results.iter().map(|r| r.stats.words).sum();
        let total_recommendations: usize = results.iter().map(|r| r.recommendations.len()).sum();

        AggregateStats {
            files_analyzed: results.len(),
            average_score: Score::new(avg_score),
            total_words,
            total_recommendations,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple analyses
#[derive(Debug, Default)]
pub struct AggregateStats {
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Average score across all files
    pub average_score: Score,
    /// Total words across all files
    pub total_words: usize,
    /// Total number of recommendations
    pub total_recommendations: usize,
}

impl Default for Score {
    fn default() -> Self {
        Score::new(0)
    }
}
