//! User experience checks

use super::{check_score, ScoringCheck};
use crate::analyzer::rubric::{band_points, Rubric};
use crate::parser::FeatureSet;
use crate::{CheckId, CheckScore, Measurement};

/// Flesch Reading Ease banding
pub struct ReadabilityCheck;

impl ReadabilityCheck {
    /// Flesch Reading Ease, or `None` when there is no prose to measure
    pub fn flesch(features: &FeatureSet, rubric: &Rubric) -> Option<f64> {
        if features.word_count == 0 || features.sentence_count == 0 {
            return None;
        }
        Some(rubric.flesch_reading_ease(features.avg_sentence_length))
    }
}

impl ScoringCheck for ReadabilityCheck {
    fn id(&self) -> CheckId {
        CheckId::Readability
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let flesch = Self::flesch(features, rubric);
        let score = flesch
            .map(|f| band_points(&rubric.flesch_bands, f, rubric.flesch_floor))
            .unwrap_or(0);
        check_score(
            self.id(),
            score,
            Measurement::Readability {
                flesch_reading_ease: flesch.unwrap_or(0.0),
                avg_sentence_length: features.avg_sentence_length,
            },
        )
    }
}

pub struct EngagementCheck;

impl ScoringCheck for EngagementCheck {
    fn id(&self) -> CheckId {
        CheckId::Engagement
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let signals = [
            features.has_call_to_action,
            features.has_links,
            features.has_lists,
            features.has_question,
        ];
        let present = signals.iter().filter(|s| **s).count() as u8;
        let score = (present * rubric.engagement_signal_points).min(rubric.engagement_max);
        check_score(
            self.id(),
            score,
            Measurement::Engagement {
                call_to_action: features.has_call_to_action,
                links: features.has_links,
                lists: features.has_lists,
                questions: features.has_question,
            },
        )
    }
}

/// Layout heuristics: fixed pixel widths and wide tables hurt small screens
pub struct MobileOptimizationCheck;

impl ScoringCheck for MobileOptimizationCheck {
    fn id(&self) -> CheckId {
        CheckId::MobileOptimization
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let score = if features.has_fixed_width {
            rubric.mobile_fixed_width_points
        } else if features.table_count > 0 {
            rubric.mobile_tables_points
        } else {
            rubric.mobile_clean_points
        };
        check_score(
            self.id(),
            score,
            Measurement::Layout {
                tables: features.table_count,
                fixed_width: features.has_fixed_width,
            },
        )
    }
}

/// Media weight as a proxy for load time
pub struct PageSpeedCheck;

impl ScoringCheck for PageSpeedCheck {
    fn id(&self) -> CheckId {
        CheckId::PageSpeed
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let weight = features.image_count + features.video_count * rubric.video_media_weight;
        check_score(
            self.id(),
            rubric.media_weight_points(weight),
            Measurement::MediaWeight {
                images: features.image_count,
                videos: features.video_count,
                weight,
            },
        )
    }
}
