//! Recommendations generated from score gaps.
//!
//! Each check has one fixed template. A template fires when its check scores
//! materially below the ceiling; the output is stably sorted so that equal
//! priorities keep canonical check order.

use crate::{
    CheckId, Effort, Impact, Recommendation, RecommendationCategory, RecommendationType,
    ScoreBreakdown,
};

use super::rubric::Rubric;

/// Fixed text and ranking for one check's recommendation
pub struct Template {
    pub category: RecommendationCategory,
    pub kind: RecommendationType,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub effort: Effort,
    pub priority: u8,
    pub action_items: &'static [&'static str],
}

pub fn template(check: CheckId) -> Template {
    use Effort::*;
    use Impact::*;
    use RecommendationCategory::*;
    use RecommendationType as T;

    match check {
        CheckId::MetaTitle => Template {
            category: Critical,
            kind: T::Technical,
            title: "Optimize Meta Title",
            description: "The title is what searchers see first. Keep it between 30 and 60 characters and lead with the focus keyword.",
            impact: High,
            effort: Easy,
            priority: 10,
            action_items: &[
                "Keep the title between 30 and 60 characters",
                "Include the focus keyword, ideally near the start",
                "Make the title specific and compelling",
            ],
        },
        CheckId::PrimaryKeyword => Template {
            category: Critical,
            kind: T::Keywords,
            title: "Strengthen Primary Keyword Usage",
            description: "Search engines need clear signals about the topic. Use the focus keyword at a natural density and in prominent places.",
            impact: High,
            effort: Easy,
            priority: 10,
            action_items: &[
                "Set a focus keyword for this content",
                "Aim for a keyword density between 0.5% and 2.5%",
                "Use the keyword in the title",
                "Mention the keyword in the first paragraph",
            ],
        },
        CheckId::WordCount => Template {
            category: Important,
            kind: T::Content,
            title: "Increase Content Length",
            description: "Longer, comprehensive articles tend to rank better. Expand the content toward 2000 words with useful detail.",
            impact: High,
            effort: Moderate,
            priority: 9,
            action_items: &[
                "Expand the article to at least 1000 words",
                "Cover related subtopics readers ask about",
                "Add examples, data or case studies",
            ],
        },
        CheckId::MetaDescription => Template {
            category: Important,
            kind: T::Technical,
            title: "Improve Meta Description",
            description: "A good meta description raises click-through rate. Write 120 to 160 characters that summarize the page and include the keyword.",
            impact: High,
            effort: Easy,
            priority: 8,
            action_items: &[
                "Write a meta description between 120 and 160 characters",
                "Include the focus keyword",
                "End with a reason to click",
            ],
        },
        CheckId::HeadingStructure => Template {
            category: Important,
            kind: T::Content,
            title: "Improve Heading Structure",
            description: "Clear headings help readers scan and help search engines understand the outline of the page.",
            impact: Medium,
            effort: Easy,
            priority: 7,
            action_items: &[
                "Use exactly one H1 for the main title",
                "Break the article into sections with at least two H2 headings",
                "Use H3 headings for subsections",
            ],
        },
        CheckId::KeywordNaturalness => Template {
            category: Important,
            kind: T::Keywords,
            title: "Reduce Keyword Stuffing",
            description: "The focus keyword appears too often. Over-optimized content reads poorly and can be penalized.",
            impact: Medium,
            effort: Moderate,
            priority: 7,
            action_items: &[
                "Keep keyword density below 3%",
                "Replace some repetitions with synonyms or related phrases",
                "Read the text aloud and remove forced mentions",
            ],
        },
        CheckId::Readability => Template {
            category: Important,
            kind: T::Ux,
            title: "Improve Readability",
            description: "Long sentences make content harder to follow. Aim for a Flesch Reading Ease of 60 or higher.",
            impact: Medium,
            effort: Moderate,
            priority: 6,
            action_items: &[
                "Shorten sentences to 20 words or fewer",
                "Prefer simple words over jargon",
                "Split long paragraphs",
            ],
        },
        CheckId::ContentDepth => Template {
            category: Minor,
            kind: T::Content,
            title: "Add Content Depth",
            description: "Thin sections leave questions unanswered. Develop the topic over more paragraphs with substantive detail.",
            impact: Medium,
            effort: Complex,
            priority: 5,
            action_items: &[
                "Write at least five substantial paragraphs",
                "Develop each paragraph with supporting detail",
                "Answer follow-up questions a reader would have",
            ],
        },
        CheckId::Multimedia => Template {
            category: Minor,
            kind: T::Content,
            title: "Add Visual Content",
            description: "Images and video keep readers engaged and can rank in image and video search.",
            impact: Medium,
            effort: Moderate,
            priority: 5,
            action_items: &[
                "Add at least three relevant images",
                "Write descriptive alt text for every image",
                "Embed a video where it helps explain the topic",
            ],
        },
        CheckId::KeywordCoverage => Template {
            category: Minor,
            kind: T::Keywords,
            title: "Broaden Keyword Coverage",
            description: "Spread the focus keyword through the structure of the article, not only the opening.",
            impact: Low,
            effort: Easy,
            priority: 4,
            action_items: &[
                "Use the focus keyword in at least one subheading",
                "Mention the keyword in the conclusion",
                "Make sure every term of the keyword appears in the body",
            ],
        },
        CheckId::UrlStructure => Template {
            category: Minor,
            kind: T::Technical,
            title: "Clean Up URL Slug",
            description: "Short, descriptive URLs are easier to share and reinforce the topic.",
            impact: Low,
            effort: Easy,
            priority: 4,
            action_items: &[
                "Keep the slug under 75 characters",
                "Include the focus keyword in the slug",
                "Use hyphens between words",
            ],
        },
        CheckId::Engagement => Template {
            category: Enhancement,
            kind: T::Ux,
            title: "Boost Reader Engagement",
            description: "Interactive elements keep readers on the page and lead them to the next step.",
            impact: Low,
            effort: Easy,
            priority: 3,
            action_items: &[
                "Add a clear call to action",
                "Link to related resources",
                "Use lists for steps and key points",
                "Ask the reader a question",
            ],
        },
        CheckId::SecondaryKeywords => Template {
            category: Enhancement,
            kind: T::Keywords,
            title: "Add Secondary Keywords",
            description: "Related terms help search engines understand context and capture long-tail queries.",
            impact: Low,
            effort: Easy,
            priority: 3,
            action_items: &[
                "Work at least three related keywords into the body",
                "Use the suggested keywords where they fit naturally",
            ],
        },
        CheckId::SchemaMarkup => Template {
            category: Enhancement,
            kind: T::Technical,
            title: "Add Structured Data",
            description: "Schema markup makes the page eligible for rich results in search.",
            impact: Medium,
            effort: Moderate,
            priority: 3,
            action_items: &[
                "Add Article schema as JSON-LD",
                "Add FAQ schema for question sections",
                "Validate the markup with a structured data testing tool",
            ],
        },
        CheckId::MobileOptimization => Template {
            category: Enhancement,
            kind: T::Ux,
            title: "Optimize for Mobile",
            description: "Fixed widths and wide tables break layouts on small screens.",
            impact: Low,
            effort: Moderate,
            priority: 2,
            action_items: &[
                "Remove fixed pixel widths",
                "Make tables responsive or replace them with lists",
            ],
        },
        CheckId::PageSpeed => Template {
            category: Enhancement,
            kind: T::Performance,
            title: "Improve Page Speed",
            description: "Heavy media slows the page down, especially on mobile connections.",
            impact: Medium,
            effort: Complex,
            priority: 2,
            action_items: &[
                "Compress and resize images",
                "Lazy-load images and embedded videos",
                "Limit the number of embedded videos",
            ],
        },
    }
}

/// Generates recommendations from a score breakdown
pub struct RecommendationGenerator<'a> {
    rubric: &'a Rubric,
}

impl<'a> RecommendationGenerator<'a> {
    pub fn new(rubric: &'a Rubric) -> Self {
        Self { rubric }
    }

    /// One recommendation per enabled check that falls materially short,
    /// highest priority first
    pub fn generate(
        &self,
        breakdown: &ScoreBreakdown,
        enabled: impl Fn(CheckId) -> bool,
    ) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = breakdown
            .checks()
            .into_iter()
            .filter(|c| enabled(c.check))
            .filter(|c| self.rubric.is_materially_below(c.score, c.max))
            .map(|c| {
                let t = template(c.check);
                Recommendation {
                    check: c.check,
                    category: t.category,
                    kind: t.kind,
                    title: t.title.to_string(),
                    description: t.description.to_string(),
                    impact: t.impact,
                    effort: t.effort,
                    estimated_score_gain: c.gap(),
                    action_items: t.action_items.iter().map(|s| s.to_string()).collect(),
                    priority: t.priority,
                }
            })
            .collect();

        // sort_by is stable
        recs.sort_by(|a, b| b.priority.cmp(&a.priority));
        recs
    }
}
