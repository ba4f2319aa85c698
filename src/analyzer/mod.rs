//! Analyzer module - SEO scoring engine

pub mod checks;
pub mod engine;
pub mod keywords;
pub mod recommendations;
pub mod rubric;
pub mod scoring;

pub use engine::{AggregateStats, AnalysisEngine};
pub use keywords::{KeywordSuggester, NoTrends, StaticTrendSource, TrendSource};
pub use rubric::Rubric;
pub use scoring::ScoreCalculator;
