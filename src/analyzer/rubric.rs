//! Point tables and bands for every scoring check.
//!
//! All constants the checks use live here so the rubric can be audited and
//! tested apart from the aggregation logic. `Rubric::default()` is the
//! canonical table.

use serde::Serialize;

/// Award `points` when a measured value is at least `min`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band<T> {
    pub min: T,
    pub points: u8,
}

/// Inclusive range of acceptable values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

/// First band (highest first) the value reaches, else `floor`
pub fn band_points<T: PartialOrd + Copy>(bands: &[Band<T>], value: T, floor: u8) -> u8 {
    bands
        .iter()
        .find(|b| value >= b.min)
        .map(|b| b.points)
        .unwrap_or(floor)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    // Content quality
    pub word_count_bands: Vec<Band<usize>>,
    pub word_count_floor: u8,
    pub word_count_target: usize,

    pub h1_points: u8,
    pub h2_min: usize,
    pub h2_points: u8,
    pub h3_points: u8,

    pub depth_min_paragraphs: usize,
    pub depth_paragraph_points: u8,
    pub depth_avg_words: f64,
    pub depth_avg_words_points: u8,
    pub depth_many_paragraphs: usize,
    pub depth_many_paragraphs_points: u8,

    pub image_points: u8,
    pub many_images: usize,
    pub many_images_points: u8,
    pub video_points: u8,

    // Technical SEO
    pub title_ideal: Range<usize>,
    pub title_ideal_points: u8,
    pub title_acceptable: Range<usize>,
    pub title_acceptable_points: u8,
    pub title_fallback_points: u8,
    pub title_keyword_points: u8,

    pub description_ideal: Range<usize>,
    pub description_ideal_points: u8,
    pub description_acceptable: Range<usize>,
    pub description_acceptable_points: u8,
    pub description_fallback_points: u8,
    pub description_keyword_points: u8,

    pub slug_max_length: usize,
    pub slug_length_points: u8,
    pub slug_keyword_points: u8,
    pub schema_points: u8,

    // Keyword optimization
    pub density_ideal: Range<f64>,
    pub density_ideal_points: u8,
    /// Densities above zero and below this limit still earn partial credit
    pub density_tolerated_max: f64,
    pub density_tolerated_points: u8,
    pub keyword_in_title_points: u8,
    pub keyword_in_first_paragraph_points: u8,

    pub over_optimization_density: f64,
    pub natural_points: u8,
    pub over_optimized_points: u8,

    pub secondary_bands: Vec<Band<usize>>,

    pub coverage_heading_points: u8,
    pub coverage_last_paragraph_points: u8,
    pub coverage_terms_points: u8,

    // User experience
    pub syllables_per_word: f64,
    pub flesch_bands: Vec<Band<f64>>,
    pub flesch_floor: u8,

    pub engagement_signal_points: u8,
    pub engagement_max: u8,

    pub mobile_clean_points: u8,
    pub mobile_tables_points: u8,
    pub mobile_fixed_width_points: u8,

    /// Weight of one video relative to one image
    pub video_media_weight: usize,
    pub light_media_max: usize,
    pub light_media_points: u8,
    pub moderate_media_max: usize,
    pub moderate_media_points: u8,
    pub heavy_media_points: u8,

    // Recommendations
    /// A check fires a recommendation when its score is below this
    /// percentage of its ceiling
    pub recommendation_threshold_pct: u8,
    pub max_suggested_keywords: usize,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            word_count_bands: vec![
                Band { min: 2000, points: 30 },
                Band { min: 1500, points: 25 },
                Band { min: 1000, points: 20 },
                Band { min: 500, points: 15 },
                Band { min: 300, points: 10 },
            ],
            word_count_floor: 5,
            word_count_target: 2000,

            h1_points: 10,
            h2_min: 2,
            h2_points: 10,
            h3_points: 5,

            depth_min_paragraphs: 5,
            depth_paragraph_points: 10,
            depth_avg_words: 100.0,
            depth_avg_words_points: 10,
            depth_many_paragraphs: 8,
            depth_many_paragraphs_points: 5,

            image_points: 10,
            many_images: 3,
            many_images_points: 5,
            video_points: 5,

            title_ideal: Range { min: 30, max: 60 },
            title_ideal_points: 15,
            title_acceptable: Range { min: 20, max: 70 },
            title_acceptable_points: 10,
            title_fallback_points: 5,
            title_keyword_points: 10,

            description_ideal: Range { min: 120, max: 160 },
            description_ideal_points: 15,
            description_acceptable: Range { min: 100, max: 180 },
            description_acceptable_points: 10,
            description_fallback_points: 5,
            description_keyword_points: 10,

            slug_max_length: 75,
            slug_length_points: 10,
            slug_keyword_points: 10,
            schema_points: 20,

            density_ideal: Range { min: 0.5, max: 2.5 },
            density_ideal_points: 15,
            density_tolerated_max: 4.0,
            density_tolerated_points: 10,
            keyword_in_title_points: 5,
            keyword_in_first_paragraph_points: 5,

            over_optimization_density: 3.0,
            natural_points: 25,
            over_optimized_points: 10,

            secondary_bands: vec![Band { min: 3, points: 20 }, Band { min: 1, points: 10 }],

            coverage_heading_points: 10,
            coverage_last_paragraph_points: 5,
            coverage_terms_points: 5,

            syllables_per_word: 1.5,
            flesch_bands: vec![
                Band { min: 60.0, points: 20 },
                Band { min: 40.0, points: 15 },
                Band { min: 20.0, points: 10 },
            ],
            flesch_floor: 5,

            engagement_signal_points: 5,
            engagement_max: 20,

            mobile_clean_points: 20,
            mobile_tables_points: 15,
            mobile_fixed_width_points: 10,

            video_media_weight: 3,
            light_media_max: 10,
            light_media_points: 20,
            moderate_media_max: 20,
            moderate_media_points: 15,
            heavy_media_points: 10,

            recommendation_threshold_pct: 80,
            max_suggested_keywords: 10,
        }
    }
}

impl Rubric {
    /// Flesch Reading Ease from average sentence length and the fixed
    /// syllables-per-word estimate
    pub fn flesch_reading_ease(&self, avg_sentence_length: f64) -> f64 {
        206.835 - 1.015 * avg_sentence_length - 84.6 * self.syllables_per_word
    }

    /// Page-speed points for a media weight (lower weight is better)
    pub fn media_weight_points(&self, weight: usize) -> u8 {
        if weight <= self.light_media_max {
            self.light_media_points
        } else if weight <= self.moderate_media_max {
            self.moderate_media_points
        } else {
            self.heavy_media_points
        }
    }

    /// Whether a check scoring `score` out of `max` warrants a recommendation
    pub fn is_materially_below(&self, score: u8, max: u8) -> bool {
        (score as u32) * 100 < (max as u32) * self.recommendation_threshold_pct as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_points_word_count() {
        let r = Rubric::default();
        let pts = |n| band_points(&r.word_count_bands, n, r.word_count_floor);
        assert_eq!(pts(2500), 30);
        assert_eq!(pts(2000), 30);
        assert_eq!(pts(1999), 25);
        assert_eq!(pts(1500), 25);
        assert_eq!(pts(1000), 20);
        assert_eq!(pts(500), 15);
        assert_eq!(pts(300), 10);
        assert_eq!(pts(299), 5);
        assert_eq!(pts(0), 5);
    }

    #[test]
    fn test_range_inclusive() {
        let r = Range { min: 30, max: 60 };
        assert!(r.contains(30));
        assert!(r.contains(60));
        assert!(!r.contains(29));
        assert!(!r.contains(61));
    }

    #[test]
    fn test_flesch_constant_syllables() {
        let r = Rubric::default();
        assert!((r.flesch_reading_ease(0.0) - 79.935).abs() < 1e-9);
        assert!((r.flesch_reading_ease(20.0) - 59.635).abs() < 1e-9);
    }

    #[test]
    fn test_materially_below_threshold() {
        let r = Rubric::default();
        assert!(!r.is_materially_below(20, 25));
        assert!(r.is_materially_below(19, 25));
        assert!(r.is_materially_below(0, 20));
        assert!(!r.is_materially_below(16, 20));
        assert!(r.is_materially_below(15, 20));
    }

    #[test]
    fn test_media_weight_points() {
        let r = Rubric::default();
        assert_eq!(r.media_weight_points(0), 20);
        assert_eq!(r.media_weight_points(10), 20);
        assert_eq!(r.media_weight_points(11), 15);
        assert_eq!(r.media_weight_points(21), 10);
    }
}
