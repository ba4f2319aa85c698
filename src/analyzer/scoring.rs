//! Score calculation: run every check and aggregate into categories

use crate::parser::FeatureSet;
use crate::{
    CategoryScores, ContentQualityChecks, Grade, KeywordOptimizationChecks, Score,
    ScoreBreakdown, TechnicalSeoChecks, UserExperienceChecks,
};

use super::checks::*;
use super::rubric::Rubric;

/// Calculator for SEO scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Run all sixteen checks against the features
    pub fn calculate_breakdown(features: &FeatureSet, rubric: &Rubric) -> ScoreBreakdown {
        ScoreBreakdown {
            content_quality: ContentQualityChecks {
                word_count: WordCountCheck.evaluate(features, rubric),
                heading_structure: HeadingStructureCheck.evaluate(features, rubric),
                content_depth: ContentDepthCheck.evaluate(features, rubric),
                multimedia: MultimediaCheck.evaluate(features, rubric),
            },
            technical_seo: TechnicalSeoChecks {
                meta_title: MetaTitleCheck.evaluate(features, rubric),
                meta_description: MetaDescriptionCheck.evaluate(features, rubric),
                url_structure: UrlStructureCheck.evaluate(features, rubric),
                schema_markup: SchemaMarkupCheck.evaluate(features, rubric),
            },
            keyword_optimization: KeywordOptimizationChecks {
                primary_keyword: PrimaryKeywordCheck.evaluate(features, rubric),
                keyword_naturalness: KeywordNaturalnessCheck.evaluate(features, rubric),
                secondary_keywords: SecondaryKeywordsCheck.evaluate(features, rubric),
                keyword_coverage: KeywordCoverageCheck.evaluate(features, rubric),
            },
            user_experience: UserExperienceChecks {
                readability: ReadabilityCheck.evaluate(features, rubric),
                engagement: EngagementCheck.evaluate(features, rubric),
                mobile_optimization: MobileOptimizationCheck.evaluate(features, rubric),
                page_speed: PageSpeedCheck.evaluate(features, rubric),
            },
        }
    }

    /// Weighted points per category
    pub fn category_scores(breakdown: &ScoreBreakdown) -> CategoryScores {
        let mut scores = CategoryScores::default();
        for check in breakdown.checks() {
            let slot = match check.check.category() {
                crate::Category::ContentQuality => &mut scores.content_quality,
                crate::Category::TechnicalSeo => &mut scores.technical_seo,
                crate::Category::KeywordOptimization => &mut scores.keyword_optimization,
                crate::Category::UserExperience => &mut scores.user_experience,
            };
            *slot += check.points;
        }
        scores
    }

    /// Overall score: the sum of the category scores
    pub fn calculate(categories: &CategoryScores) -> Score {
        Score::new(categories.total())
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - Content is well optimized for search",
            Grade::B => "Good - Solid SEO with a few gaps",
            Grade::C => "Fair - Reasonable foundation that needs strengthening",
            Grade::D => "Poor - Significant SEO problems",
            Grade::F => "Failing - Content needs major SEO work",
        }
    }
}
