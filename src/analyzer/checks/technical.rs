//! Technical SEO checks: meta title, meta description, slug and schema

use super::{check_score, ScoringCheck};
use crate::analyzer::rubric::{Range, Rubric};
use crate::parser::FeatureSet;
use crate::{CheckId, CheckScore, Measurement};

/// Length points for a non-empty text: ideal, acceptable or fallback
fn length_points(
    length: usize,
    ideal: Range<usize>,
    ideal_points: u8,
    acceptable: Range<usize>,
    acceptable_points: u8,
    fallback_points: u8,
) -> u8 {
    if ideal.contains(length) {
        ideal_points
    } else if acceptable.contains(length) {
        acceptable_points
    } else {
        fallback_points
    }
}

/// The title doubles as the meta title
pub struct MetaTitleCheck;

impl ScoringCheck for MetaTitleCheck {
    fn id(&self) -> CheckId {
        CheckId::MetaTitle
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let length = features.title.chars().count();
        let mut score = 0;
        if length > 0 {
            score += length_points(
                length,
                rubric.title_ideal,
                rubric.title_ideal_points,
                rubric.title_acceptable,
                rubric.title_acceptable_points,
                rubric.title_fallback_points,
            );
            if features.keyword_in_title {
                score += rubric.title_keyword_points;
            }
        }
        check_score(
            self.id(),
            score,
            Measurement::TextLength {
                length,
                ideal_min: rubric.title_ideal.min,
                ideal_max: rubric.title_ideal.max,
                has_keyword: features.keyword_in_title,
            },
        )
    }
}

pub struct MetaDescriptionCheck;

impl ScoringCheck for MetaDescriptionCheck {
    fn id(&self) -> CheckId {
        CheckId::MetaDescription
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let length = features.meta_description.chars().count();
        let mut score = 0;
        if length > 0 {
            score += length_points(
                length,
                rubric.description_ideal,
                rubric.description_ideal_points,
                rubric.description_acceptable,
                rubric.description_acceptable_points,
                rubric.description_fallback_points,
            );
            if features.keyword_in_meta_description {
                score += rubric.description_keyword_points;
            }
        }
        check_score(
            self.id(),
            score,
            Measurement::TextLength {
                length,
                ideal_min: rubric.description_ideal.min,
                ideal_max: rubric.description_ideal.max,
                has_keyword: features.keyword_in_meta_description,
            },
        )
    }
}

/// Short slugs that carry the keyword
pub struct UrlStructureCheck;

impl ScoringCheck for UrlStructureCheck {
    fn id(&self) -> CheckId {
        CheckId::UrlStructure
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let length = features.slug.chars().count();
        let has_keyword =
            !features.keyword_slug.is_empty() && features.slug.contains(&features.keyword_slug);

        let mut score = 0;
        if length > 0 && length <= rubric.slug_max_length {
            score += rubric.slug_length_points;
        }
        if has_keyword {
            score += rubric.slug_keyword_points;
        }
        check_score(
            self.id(),
            score,
            Measurement::Slug {
                slug: features.slug.clone(),
                length,
                has_keyword,
            },
        )
    }
}

/// Structured data markers in the body (JSON-LD, microdata)
pub struct SchemaMarkupCheck;

impl ScoringCheck for SchemaMarkupCheck {
    fn id(&self) -> CheckId {
        CheckId::SchemaMarkup
    }

    fn evaluate(&self, features: &FeatureSet, rubric: &Rubric) -> CheckScore {
        let score = if features.has_schema_markup {
            rubric.schema_points
        } else {
            0
        };
        check_score(
            self.id(),
            score,
            Measurement::Schema {
                detected: features.has_schema_markup,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(check: &dyn ScoringCheck, features: &FeatureSet) -> u8 {
        check.evaluate(features, &Rubric::default()).score
    }

    fn with_title(title: &str, keyword_in_title: bool) -> FeatureSet {
        FeatureSet {
            title: title.to_string(),
            keyword_in_title,
            ..FeatureSet::default()
        }
    }

    #[test]
    fn test_meta_title_empty_scores_zero() {
        assert_eq!(eval(&MetaTitleCheck, &FeatureSet::default()), 0);
    }

    #[test]
    fn test_meta_title_length_bands() {
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(45), false)), 15);
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(30), false)), 15);
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(60), false)), 15);
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(24), false)), 10);
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(70), false)), 10);
        assert_eq!(eval(&MetaTitleCheck, &with_title(&"a".repeat(71), false)), 5);
        assert_eq!(eval(&MetaTitleCheck, &with_title("Short", false)), 5);
    }

    #[test]
    fn test_meta_title_keyword_bonus() {
        // "How to Learn Guitar Fast" is 24 characters
        let f = with_title("How to Learn Guitar Fast", true);
        assert_eq!(eval(&MetaTitleCheck, &f), 20);
        let f = with_title(&"a".repeat(50), true);
        assert_eq!(eval(&MetaTitleCheck, &f), 25);
    }

    #[test]
    fn test_meta_title_counts_characters_not_bytes() {
        // 30 characters, 60 bytes
        let f = with_title(&"é".repeat(30), false);
        let s = MetaTitleCheck.evaluate(&f, &Rubric::default());
        assert_eq!(s.score, 15);
        assert!(matches!(s.measurement, Measurement::TextLength { length: 30, .. }));
    }

    #[test]
    fn test_meta_description() {
        let mut f = FeatureSet::default();
        assert_eq!(eval(&MetaDescriptionCheck, &f), 0);
        f.meta_description = "x".repeat(140);
        assert_eq!(eval(&MetaDescriptionCheck, &f), 15);
        f.keyword_in_meta_description = true;
        assert_eq!(eval(&MetaDescriptionCheck, &f), 25);
        f.meta_description = "x".repeat(110);
        assert_eq!(eval(&MetaDescriptionCheck, &f), 20);
        f.meta_description = "x".repeat(40);
        assert_eq!(eval(&MetaDescriptionCheck, &f), 15);
    }

    #[test]
    fn test_url_structure() {
        let mut f = FeatureSet::default();
        assert_eq!(eval(&UrlStructureCheck, &f), 0);
        f.slug = "how-to-learn-guitar-fast".to_string();
        assert_eq!(eval(&UrlStructureCheck, &f), 10);
        f.keyword_slug = "learn-guitar".to_string();
        assert_eq!(eval(&UrlStructureCheck, &f), 20);
        f.slug = "a".repeat(80);
        assert_eq!(eval(&UrlStructureCheck, &f), 0);
    }

    #[test]
    fn test_schema_markup() {
        let mut f = FeatureSet::default();
        assert_eq!(eval(&SchemaMarkupCheck, &f), 0);
        f.has_schema_markup = true;
        assert_eq!(eval(&SchemaMarkupCheck, &f), 20);
    }
}
