//! Scoring checks, one per leaf of the score breakdown

pub mod content;
pub mod experience;
pub mod keywords;
pub mod technical;

pub use content::{ContentDepthCheck, HeadingStructureCheck, MultimediaCheck, WordCountCheck};
pub use experience::{EngagementCheck, MobileOptimizationCheck, PageSpeedCheck, ReadabilityCheck};
pub use keywords::{
    KeywordCoverageCheck, KeywordNaturalnessCheck, PrimaryKeywordCheck, SecondaryKeywordsCheck,
};
pub use technical::{MetaDescriptionCheck, MetaTitleCheck, SchemaMarkupCheck, UrlStructureCheck};

use super::rubric::Rubric;
use crate::parser::FeatureSet;
use crate::{CheckId, CheckScore, Measurement};

/// Trait for scoring checks
pub trait ScoringCheck: Send + Sync {
    /// Which leaf of the breakdown this check fills
    fn id(&self) -> CheckId;

    /// Score the features against the rubric. Never exceeds `id().max_score()`.
    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore;
}

/// Clamp a raw score to the check's ceiling and derive its weighted points
/// (rounded half up).
pub(crate) fn check_score(check: CheckId, score: u8, measurement: Measurement) -> CheckScore {
    let max = check.max_score();
    let weight = check.weight();
    let score = score.min(max);
    let points = (2 * score as u32 * weight as u32 + max as u32) / (2 * max as u32);
    CheckScore {
        check,
        score,
        max,
        points: points as u8,
        weight,
        measurement,
    }
}
