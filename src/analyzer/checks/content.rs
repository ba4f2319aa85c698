//! Content quality checks: length, headings, depth and media

use super::{check_score, ScoringCheck};
use crate::analyzer::rubric::{band_points, Rubric};
use crate::parser::FeatureSet;
use crate::{CheckId, CheckScore, Measurement};

/// Longer articles rank better, up to the top band
pub struct WordCountCheck;

impl ScoringCheck for WordCountCheck {
    fn id(&self) -> CheckId {
        CheckId::WordCount
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let score = band_points(
            &rubric.word_count_bands,
            features.word_count,
            rubric.word_count_floor,
        );
        check_score(
            self.id(),
            score,
            Measurement::WordCount {
                current: features.word_count,
                target: rubric.word_count_target,
            },
        )
    }
}

pub struct HeadingStructureCheck;

impl ScoringCheck for HeadingStructureCheck {
    fn id(&self) -> CheckId {
        CheckId::HeadingStructure
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let mut score = 0;
        if features.h1_count >= 1 {
            score += rubric.h1_points;
        }
        if features.h2_count >= rubric.h2_min {
            score += rubric.h2_points;
        }
        if features.h3_count >= 1 {
            score += rubric.h3_points;
        }
        check_score(
            self.id(),
            score,
            Measurement::Headings {
                h1: features.h1_count,
                h2: features.h2_count,
                h3: features.h3_count,
            },
        )
    }
}

/// Enough paragraphs, each with real substance
pub struct ContentDepthCheck;

impl ScoringCheck for ContentDepthCheck {
    fn id(&self) -> CheckId {
        CheckId::ContentDepth
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let mut score = 0;
        if features.paragraph_count >= rubric.depth_min_paragraphs {
            score += rubric.depth_paragraph_points;
        }
        if features.avg_words_per_paragraph >= rubric.depth_avg_words {
            score += rubric.depth_avg_words_points;
        }
        if features.paragraph_count >= rubric.depth_many_paragraphs {
            score += rubric.depth_many_paragraphs_points;
        }
        check_score(
            self.id(),
            score,
            Measurement::Depth {
                paragraphs: features.paragraph_count,
                avg_words_per_paragraph: features.avg_words_per_paragraph,
            },
        )
    }
}

pub struct MultimediaCheck;

impl ScoringCheck for MultimediaCheck {
    fn id(&self) -> CheckId {
        CheckId::Multimedia
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let mut score = 0;
        if features.image_count >= 1 {
            score += rubric.image_points;
            if features.image_count >= rubric.many_images {
                score += rubric.many_images_points;
            }
        }
        if features.video_count >= 1 {
            score += rubric.video_points;
        }
        check_score(
            self.id(),
            score,
            Measurement::Media {
                images: features.image_count,
                videos: features.video_count,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eval(check: &dyn ScoringCheck, features: &FeatureSet) -> u8 {
        check.evaluate(features, &Rubric::default()).score
    }

    #[test]
    fn test_word_count_bands() {
        let mut f = FeatureSet::default();
        for (words, expected) in [(0, 5), (120, 5), (300, 10), (750, 15), (1200, 20), (1600, 25), (5000, 30)] {
            f.word_count = words;
            assert_eq!(eval(&WordCountCheck, &f), expected, "words = {}", words);
        }
    }

    #[test]
    fn test_word_count_measurement_has_target() {
        let f = FeatureSet {
            word_count: 420,
            ..FeatureSet::default()
        };
        let s = WordCountCheck.evaluate(&f, &Rubric::default());
        assert_eq!(
            s.measurement,
            Measurement::WordCount {
                current: 420,
                target: 2000
            }
        );
    }

    #[test]
    fn test_heading_structure() {
        let mut f = FeatureSet::default();
        assert_eq!(eval(&HeadingStructureCheck, &f), 0);
        f.h1_count = 1;
        assert_eq!(eval(&HeadingStructureCheck, &f), 10);
        f.h2_count = 1;
        assert_eq!(eval(&HeadingStructureCheck, &f), 10);
        f.h2_count = 2;
        assert_eq!(eval(&HeadingStructureCheck, &f), 20);
        f.h3_count = 4;
        assert_eq!(eval(&HeadingStructureCheck, &f), 25);
    }

    #[test]
    fn test_content_depth() {
        let mut f = FeatureSet {
            paragraph_count: 4,
            avg_words_per_paragraph: 99.9,
            ..FeatureSet::default()
        };
        assert_eq!(eval(&ContentDepthCheck, &f), 0);
        f.paragraph_count = 5;
        assert_eq!(eval(&ContentDepthCheck, &f), 10);
        f.avg_words_per_paragraph = 100.0;
        assert_eq!(eval(&ContentDepthCheck, &f), 20);
        f.paragraph_count = 8;
        assert_eq!(eval(&ContentDepthCheck, &f), 25);
    }

    #[test]
    fn test_multimedia() {
        let mut f = FeatureSet::default();
        assert_eq!(eval(&MultimediaCheck, &f), 0);
        f.image_count = 1;
        assert_eq!(eval(&MultimediaCheck, &f), 10);
        f.image_count = 3;
        assert_eq!(eval(&MultimediaCheck, &f), 15);
        f.video_count = 1;
        assert_eq!(eval(&MultimediaCheck, &f), 20);
        f.image_count = 0;
        assert_eq!(eval(&MultimediaCheck, &f), 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn word_count_score_is_monotonic(a in 0usize..5000, extra in 0usize..5000) {
            let short = FeatureSet { word_count: a, ..FeatureSet::default() };
            let long = FeatureSet { word_count: a + extra, ..FeatureSet::default() };
            prop_assert!(eval(&WordCountCheck, &long) >= eval(&WordCountCheck, &short));
        }
    }
}
