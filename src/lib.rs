//! Seoscope: Content SEO Analyzer
//!
//! This library scores articles (Markdown, HTML or plain text) against a fixed
//! SEO rubric and returns a category breakdown plus prioritized, actionable
//! recommendations for improvement.

pub mod analyzer;
pub mod batch;
pub mod config;
pub mod parser;
pub mod reporter;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Content handed to the analyzer. Never mutated by an analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    /// Headline, also used as the meta title
    pub title: String,
    /// Raw text or markup of the article
    pub body: String,
    /// Short summary shown in search results
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Target search phrase
    #[serde(default)]
    pub focus_keyword: Option<String>,
    /// Keywords already associated with the content
    #[serde(default)]
    pub existing_keywords: BTreeSet<String>,
    /// URL slug (derived from the title when absent)
    #[serde(default)]
    pub slug: Option<String>,
    /// Topical category, used to look up trending keywords
    #[serde(default)]
    pub category: Option<String>,
}

impl ContentInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn with_focus_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.focus_keyword = Some(keyword.into());
        self
    }

    pub fn with_existing_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Focus keyword, trimmed; `None` when missing or blank
    pub fn keyword(&self) -> Option<&str> {
        self.focus_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// The main result of analyzing one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// File the content was read from (None for in-memory content)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Title of the analyzed content
    pub title: String,
    /// Overall score (0-100)
    pub score: Score,
    /// Points earned per category
    pub categories: CategoryScores,
    /// Every leaf check with its raw measurement
    pub breakdown: ScoreBreakdown,
    /// Recommendations sorted by descending priority
    pub recommendations: Vec<Recommendation>,
    /// Generic content ideas, independent of the input
    pub trending_opportunities: Vec<String>,
    /// New keyword ideas not already used by the content
    pub suggested_keywords: Vec<String>,
    /// Keyword density above the over-optimization limit
    pub over_optimization: bool,
    /// Counts extracted from the content
    pub stats: ContentStats,
}

/// Overall score with grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Numeric score (0-100)
    pub value: u8,
    /// Letter grade (A-F)
    pub grade: Grade,
}

impl Score {
    pub fn new(value: u8) -> Self {
        let value = value.min(100);
        let grade = Grade::from_score(value);
        Self { value, grade }
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// The four weighted scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ContentQuality,
    TechnicalSeo,
    KeywordOptimization,
    UserExperience,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ContentQuality,
        Category::TechnicalSeo,
        Category::KeywordOptimization,
        Category::UserExperience,
    ];

    /// Points this category contributes to the overall score
    pub fn max_points(self) -> u8 {
        match self {
            Category::ContentQuality => 30,
            Category::TechnicalSeo => 25,
            Category::KeywordOptimization => 25,
            Category::UserExperience => 20,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::ContentQuality => write!(f, "Content Quality"),
            Category::TechnicalSeo => write!(f, "Technical SEO"),
            Category::KeywordOptimization => write!(f, "Keyword Optimization"),
            Category::UserExperience => write!(f, "User Experience"),
        }
    }
}

/// Leaf scoring checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    WordCount,
    HeadingStructure,
    ContentDepth,
    Multimedia,
    MetaTitle,
    MetaDescription,
    UrlStructure,
    SchemaMarkup,
    PrimaryKeyword,
    KeywordNaturalness,
    SecondaryKeywords,
    KeywordCoverage,
    Readability,
    Engagement,
    MobileOptimization,
    PageSpeed,
}

impl CheckId {
    /// All checks in canonical (generation) order
    pub const ALL: [CheckId; 16] = [
        CheckId::WordCount,
        CheckId::HeadingStructure,
        CheckId::ContentDepth,
        CheckId::Multimedia,
        CheckId::MetaTitle,
        CheckId::MetaDescription,
        CheckId::UrlStructure,
        CheckId::SchemaMarkup,
        CheckId::PrimaryKeyword,
        CheckId::KeywordNaturalness,
        CheckId::SecondaryKeywords,
        CheckId::KeywordCoverage,
        CheckId::Readability,
        CheckId::Engagement,
        CheckId::MobileOptimization,
        CheckId::PageSpeed,
    ];

    pub fn category(self) -> Category {
        use CheckId::*;
        match self {
            WordCount | HeadingStructure | ContentDepth | Multimedia => Category::ContentQuality,
            MetaTitle | MetaDescription | UrlStructure | SchemaMarkup => Category::TechnicalSeo,
            PrimaryKeyword | KeywordNaturalness | SecondaryKeywords | KeywordCoverage => {
                Category::KeywordOptimization
            }
            Readability | Engagement | MobileOptimization | PageSpeed => Category::UserExperience,
        }
    }

    /// Ceiling of the raw rubric score
    pub fn max_score(self) -> u8 {
        use CheckId::*;
        match self {
            WordCount => 30,
            HeadingStructure | ContentDepth => 25,
            Multimedia => 20,
            MetaTitle | MetaDescription => 25,
            UrlStructure | SchemaMarkup => 20,
            PrimaryKeyword | KeywordNaturalness => 25,
            SecondaryKeywords | KeywordCoverage => 20,
            Readability | Engagement | MobileOptimization | PageSpeed => 20,
        }
    }

    /// Points carried into the overall score. Weights of a category sum to
    /// its `max_points`, so all sixteen sum to 100.
    pub fn weight(self) -> u8 {
        use CheckId::*;
        match self {
            WordCount => 9,
            HeadingStructure | ContentDepth | Multimedia => 7,
            MetaTitle => 8,
            MetaDescription => 7,
            UrlStructure | SchemaMarkup => 5,
            PrimaryKeyword => 10,
            KeywordNaturalness | SecondaryKeywords | KeywordCoverage => 5,
            Readability | Engagement => 6,
            MobileOptimization | PageSpeed => 4,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        use CheckId::*;
        match self {
            WordCount => "Word Count",
            HeadingStructure => "Heading Structure",
            ContentDepth => "Content Depth",
            Multimedia => "Multimedia",
            MetaTitle => "Meta Title",
            MetaDescription => "Meta Description",
            UrlStructure => "URL Structure",
            SchemaMarkup => "Schema Markup",
            PrimaryKeyword => "Primary Keyword",
            KeywordNaturalness => "Keyword Naturalness",
            SecondaryKeywords => "Secondary Keywords",
            KeywordCoverage => "Keyword Coverage",
            Readability => "Readability",
            Engagement => "Engagement",
            MobileOptimization => "Mobile Optimization",
            PageSpeed => "Page Speed",
        }
    }

    /// Parse a kebab-case check name (as used in config files)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.to_string() == name)
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckId::WordCount => "word-count",
            CheckId::HeadingStructure => "heading-structure",
            CheckId::ContentDepth => "content-depth",
            CheckId::Multimedia => "multimedia",
            CheckId::MetaTitle => "meta-title",
            CheckId::MetaDescription => "meta-description",
            CheckId::UrlStructure => "url-structure",
            CheckId::SchemaMarkup => "schema-markup",
            CheckId::PrimaryKeyword => "primary-keyword",
            CheckId::KeywordNaturalness => "keyword-naturalness",
            CheckId::SecondaryKeywords => "secondary-keywords",
            CheckId::KeywordCoverage => "keyword-coverage",
            CheckId::Readability => "readability",
            CheckId::Engagement => "engagement",
            CheckId::MobileOptimization => "mobile-optimization",
            CheckId::PageSpeed => "page-speed",
        };
        write!(f, "{}", name)
    }
}

/// Score of a single leaf check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckScore {
    pub check: CheckId,
    /// Raw rubric score (0..=max)
    pub score: u8,
    /// Rubric ceiling
    pub max: u8,
    /// Weighted contribution to the overall score (0..=weight)
    pub points: u8,
    /// Maximum contribution to the overall score
    pub weight: u8,
    /// Raw values that produced the score
    pub measurement: Measurement,
}

impl CheckScore {
    /// Points still available on the raw rubric scale
    pub fn gap(&self) -> u8 {
        self.max.saturating_sub(self.score)
    }
}

/// Raw measurements backing each check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Measurement {
    WordCount {
        current: usize,
        target: usize,
    },
    Headings {
        h1: usize,
        h2: usize,
        h3: usize,
    },
    Depth {
        paragraphs: usize,
        avg_words_per_paragraph: f64,
    },
    Media {
        images: usize,
        videos: usize,
    },
    TextLength {
        length: usize,
        ideal_min: usize,
        ideal_max: usize,
        has_keyword: bool,
    },
    Slug {
        slug: String,
        length: usize,
        has_keyword: bool,
    },
    Schema {
        detected: bool,
    },
    KeywordUsage {
        keyword: Option<String>,
        occurrences: usize,
        density: f64,
        in_title: bool,
        in_first_paragraph: bool,
    },
    Naturalness {
        density: f64,
        over_optimized: bool,
    },
    SecondaryKeywords {
        found: Vec<String>,
        missing: Vec<String>,
    },
    Coverage {
        in_headings: bool,
        in_last_paragraph: bool,
        terms_found: usize,
        terms_total: usize,
    },
    Readability {
        flesch_reading_ease: f64,
        avg_sentence_length: f64,
    },
    Engagement {
        call_to_action: bool,
        links: bool,
        lists: bool,
        questions: bool,
    },
    Layout {
        tables: usize,
        fixed_width: bool,
    },
    MediaWeight {
        images: usize,
        videos: usize,
        weight: usize,
    },
}

/// Content quality checks (30 points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQualityChecks {
    pub word_count: CheckScore,
    pub heading_structure: CheckScore,
    pub content_depth: CheckScore,
    pub multimedia: CheckScore,
}

/// Technical SEO checks (25 points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSeoChecks {
    pub meta_title: CheckScore,
    pub meta_description: CheckScore,
    pub url_structure: CheckScore,
    pub schema_markup: CheckScore,
}

/// Keyword optimization checks (25 points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordOptimizationChecks {
    pub primary_keyword: CheckScore,
    pub keyword_naturalness: CheckScore,
    pub secondary_keywords: CheckScore,
    pub keyword_coverage: CheckScore,
}

/// User experience checks (20 points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExperienceChecks {
    pub readability: CheckScore,
    pub engagement: CheckScore,
    pub mobile_optimization: CheckScore,
    pub page_speed: CheckScore,
}

/// Full per-check breakdown, grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub content_quality: ContentQualityChecks,
    pub technical_seo: TechnicalSeoChecks,
    pub keyword_optimization: KeywordOptimizationChecks,
    pub user_experience: UserExperienceChecks,
}

impl ScoreBreakdown {
    /// All sixteen checks in canonical order
    pub fn checks(&self) -> [&CheckScore; 16] {
        [
            &self.content_quality.word_count,
            &self.content_quality.heading_structure,
            &self.content_quality.content_depth,
            &self.content_quality.multimedia,
            &self.technical_seo.meta_title,
            &self.technical_seo.meta_description,
            &self.technical_seo.url_structure,
            &self.technical_seo.schema_markup,
            &self.keyword_optimization.primary_keyword,
            &self.keyword_optimization.keyword_naturalness,
            &self.keyword_optimization.secondary_keywords,
            &self.keyword_optimization.keyword_coverage,
            &self.user_experience.readability,
            &self.user_experience.engagement,
            &self.user_experience.mobile_optimization,
            &self.user_experience.page_speed,
        ]
    }

    pub fn check(&self, id: CheckId) -> &CheckScore {
        let idx = CheckId::ALL.iter().position(|c| *c == id).unwrap_or(0);
        self.checks()[idx]
    }

    /// Sum of the weighted points of every check
    pub fn total_points(&self) -> u8 {
        let sum: u32 = self.checks().iter().map(|c| c.points as u32).sum();
        sum.min(100) as u8
    }
}

/// Points per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    /// Content quality (0-30)
    pub content_quality: u8,
    /// Technical SEO (0-25)
    pub technical_seo: u8,
    /// Keyword optimization (0-25)
    pub keyword_optimization: u8,
    /// User experience (0-20)
    pub user_experience: u8,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::ContentQuality => self.content_quality,
            Category::TechnicalSeo => self.technical_seo,
            Category::KeywordOptimization => self.keyword_optimization,
            Category::UserExperience => self.user_experience,
        }
    }

    pub fn total(&self) -> u8 {
        let sum = self.content_quality as u16
            + self.technical_seo as u16
            + self.keyword_optimization as u16
            + self.user_experience as u16;
        sum.min(100) as u8
    }
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Critical,
    Important,
    Minor,
    Enhancement,
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationCategory::Critical => write!(f, "critical"),
            RecommendationCategory::Important => write!(f, "important"),
            RecommendationCategory::Minor => write!(f, "minor"),
            RecommendationCategory::Enhancement => write!(f, "enhancement"),
        }
    }
}

/// Area a recommendation touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Content,
    Technical,
    Keywords,
    Ux,
    Performance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Easy,
    Moderate,
    Complex,
}

/// An actionable improvement derived from a score gap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Check that produced this recommendation
    pub check: CheckId,
    pub category: RecommendationCategory,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub effort: Effort,
    /// Raw rubric points recoverable by fixing the check
    pub estimated_score_gain: u8,
    pub action_items: Vec<String>,
    /// Higher is more urgent
    pub priority: u8,
}

/// Counts extracted from the content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub headings: usize,
    pub images: usize,
    pub videos: usize,
    /// Focus keyword density in percent
    pub keyword_density: f64,
    pub flesch_reading_ease: f64,
}

/// Public API: analyze one piece of content with the default rubric.
///
/// Pure and deterministic: the same input always yields the same result.
pub fn analyze(input: &ContentInput) -> AnalysisResult {
    analyzer::AnalysisEngine::new().analyze(input)
}

/// Public API: analyze a Markdown/HTML file.
///
/// * `path` - article to analyze
/// * `work_dir` - directory used to search for `.seoscoperc.json`
/// * `config_path` - optional explicit config path
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<AnalysisResult> {
    let config = crate::config::load_config(work_dir, config_path)?;
    let engine = analyzer::AnalysisEngine::new().with_trend_source(std::sync::Arc::new(
        analyzer::keywords::StaticTrendSource::with_defaults().extended(&config.trending),
    ));
    engine.analyze_file(path, Some(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_category_max() {
        for category in Category::ALL {
            let sum: u16 = CheckId::ALL
                .iter()
                .filter(|c| c.category() == category)
                .map(|c| c.weight() as u16)
                .sum();
            assert_eq!(sum, category.max_points() as u16, "{}", category);
        }
        let total: u16 = CheckId::ALL.iter().map(|c| c.weight() as u16).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_each_category_has_four_checks() {
        for category in Category::ALL {
            let n = CheckId::ALL.iter().filter(|c| c.category() == category).count();
            assert_eq!(n, 4);
        }
    }

    #[test]
    fn test_check_name_round_trip() {
        for check in CheckId::ALL {
            assert_eq!(CheckId::from_name(&check.to_string()), Some(check));
        }
        assert_eq!(CheckId::from_name("no-such-check"), None);
    }

    #[test]
    fn test_grade_from_score() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_score_new_clamps() {
        assert_eq!(Score::new(250).value, 100);
    }

    #[test]
    fn test_keyword_blank_is_none() {
        let input = ContentInput::new("t", "b").with_focus_keyword("   ");
        assert_eq!(input.keyword(), None);
        let input = ContentInput::new("t", "b").with_focus_keyword(" rust ");
        assert_eq!(input.keyword(), Some("rust"));
    }

    #[test]
    fn test_category_scores_total() {
        let scores = CategoryScores {
            content_quality: 30,
            technical_seo: 25,
            keyword_optimization: 25,
            user_experience: 20,
        };
        assert_eq!(scores.total(), 100);
        assert_eq!(scores.get(Category::TechnicalSeo), 25);
    }

    #[test]
    fn test_recommendation_type_serializes_as_type() {
        let rec = Recommendation {
            check: CheckId::WordCount,
            category: RecommendationCategory::Important,
            kind: RecommendationType::Content,
            title: "t".to_string(),
            description: "d".to_string(),
            impact: Impact::High,
            effort: Effort::Moderate,
            estimated_score_gain: 25,
            action_items: vec![],
            priority: 9,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["category"], "important");
        assert_eq!(json["check"], "word-count");
        assert_eq!(json["estimatedScoreGain"], 25);
    }
}
