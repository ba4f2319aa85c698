//! Keyword optimization checks.
//!
//! Without a focus keyword the primary, naturalness and coverage checks
//! score zero: there is nothing to optimize for.

use super::{check_score, ScoringCheck};
use crate::analyzer::rubric::{band_points, Rubric};
use crate::parser::FeatureSet;
use crate::{CheckId, CheckScore, Measurement};

/// Density, placement in the title and in the opening paragraph
pub struct PrimaryKeywordCheck;

impl ScoringCheck for PrimaryKeywordCheck {
    fn id(&self) -> CheckId {
        CheckId::PrimaryKeyword
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let density = features.keyword_density;
        let mut score = 0;
        if features.keyword.is_some() {
            if rubric.density_ideal.contains(density) {
                score += rubric.density_ideal_points;
            } else if density > 0.0 && density < rubric.density_tolerated_max {
                score += rubric.density_tolerated_points;
            }
            if features.keyword_in_title {
                score += rubric.keyword_in_title_points;
            }
            if features.keyword_in_first_paragraph {
                score += rubric.keyword_in_first_paragraph_points;
            }
        }
        check_score(
            self.id(),
            score,
            Measurement::KeywordUsage {
                keyword: features.keyword.clone(),
                occurrences: features.keyword_occurrences,
                density,
                in_title: features.keyword_in_title,
                in_first_paragraph: features.keyword_in_first_paragraph,
            },
        )
    }
}

/// Penalizes keyword stuffing
pub struct KeywordNaturalnessCheck;

impl KeywordNaturalnessCheck {
    pub fn is_over_optimized(features: &FeatureSet, rubric: &Rubric) -> bool {
        features.keyword.is_some() && features.keyword_density > rubric.over_optimization_density
    }
}

impl ScoringCheck for KeywordNaturalnessCheck {
    fn id(&self) -> CheckId {
        CheckId::KeywordNaturalness
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let over_optimized = Self::is_over_optimized(features, rubric);
        let score = match (&features.keyword, over_optimized) {
            (None, _) => 0,
            (Some(_), true) => rubric.over_optimized_points,
            (Some(_), false) => rubric.natural_points,
        };
        check_score(
            self.id(),
            score,
            Measurement::Naturalness {
                density: features.keyword_density,
                over_optimized,
            },
        )
    }
}

/// Existing keywords that actually appear in the body
pub struct SecondaryKeywordsCheck;

impl ScoringCheck for SecondaryKeywordsCheck {
    fn id(&self) -> CheckId {
        CheckId::SecondaryKeywords
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let score = band_points(&rubric.secondary_bands, features.secondary_found.len(), 0);
        check_score(
            self.id(),
            score,
            Measurement::SecondaryKeywords {
                found: features.secondary_found.clone(),
                missing: features.secondary_missing.clone(),
            },
        )
    }
}

/// Keyword spread through headings, the closing paragraph and its terms
pub struct KeywordCoverageCheck;

impl ScoringCheck for KeywordCoverageCheck {
    fn id(&self) -> CheckId {
        CheckId::KeywordCoverage
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let mut score = 0;
        if features.keyword.is_some() {
            if features.keyword_in_headings {
                score += rubric.coverage_heading_points;
            }
            if features.keyword_in_last_paragraph {
                score += rubric.coverage_last_paragraph_points;
            }
            if features.keyword_terms_total > 0
                && features.keyword_terms_found == features.keyword_terms_total
            {
                score += rubric.coverage_terms_points;
            }
        }
        check_score(
            self.id(),
            score,
            Measurement::Coverage {
                in_headings: features.keyword_in_headings,
                in_last_paragraph: features.keyword_in_last_paragraph,
                terms_found: features.keyword_terms_found,
                terms_total: features.keyword_terms_total,
            },
        )
    }
}
