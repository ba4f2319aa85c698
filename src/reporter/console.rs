//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{AnalysisResult, Category, Grade, Recommendation, RecommendationCategory};
use colored::Colorize;

/// Recommendations shown without --verbose
const TOP_RECOMMENDATIONS: usize = 3;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &AnalysisResult) {
        self.print_header(result);
        self.print_score(result);
        self.print_breakdown(result);

        if self.verbose {
            self.print_checks(result);
        }

        if result.over_optimization {
            println!(
                "   {} Keyword density {:.2}% looks over-optimized",
                "⚠".yellow(),
                result.stats.keyword_density
            );
            println!();
        }

        self.print_recommendations(result);

        if self.verbose {
            self.print_keywords(result);
            self.print_opportunities(result);
        }
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[AnalysisResult], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, result: &AnalysisResult) {
        let grade_colored = self.colorize_grade(&result.score.grade);
        println!(
            "{}: {} ({})",
            display_name(result),
            result.score.value,
            grade_colored
        );
    }

    fn print_header(&self, result: &AnalysisResult) {
        println!();
        println!(
            "{}",
            format!("📊 SEO Analysis: {}", display_name(result)).bold()
        );
        if result.source.is_some() && !result.title.is_empty() {
            println!("   Title: {}", result.title);
        }
        println!(
            "   Words: {} | Headings: {} | Images: {} | Keyword density: {:.2}%",
            result.stats.words,
            result.stats.headings,
            result.stats.images,
            result.stats.keyword_density
        );
        println!();
    }

    fn print_score(&self, result: &AnalysisResult) {
        let grade_str = self.colorize_grade(&result.score.grade);
        let score_bar = self.create_score_bar(result.score.value);

        println!("   Score: {} {}", score_bar, grade_str.bold());
        println!(
            "   {}",
            ScoreCalculator::grade_description(result.score.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, result: &AnalysisResult) {
        println!("   {}", "Score Breakdown:".bold());
        for category in Category::ALL {
            let score = result.categories.get(category);
            let max = category.max_points();
            let bar = self.create_mini_bar(score, max);
            let score_str = format!("{:>2}/{}", score, max);
            println!("   {} {} {}", bar, self.colorize_ratio(score_str, score, max), category);
        }
        println!();
    }

    fn print_checks(&self, result: &AnalysisResult) {
        println!("   {}", "Checks:".bold());
        for check in result.breakdown.checks() {
            let score_str = format!("{:>2}/{}", check.score, check.max);
            println!(
                "   {:<22} {} {}",
                check.check.label(),
                self.colorize_ratio(score_str, check.score, check.max),
                format!("(+{}/{} pts)", check.points, check.weight).dimmed()
            );
        }
        println!();
    }

    fn print_recommendations(&self, result: &AnalysisResult) {
        if result.recommendations.is_empty() {
            println!("   {} No recommendations, content is in good shape", "✓".green());
            return;
        }

        println!("   {}", "Recommendations:".bold());
        let shown = if self.verbose {
            result.recommendations.len()
        } else {
            TOP_RECOMMENDATIONS
        };
        for rec in result.recommendations.iter().take(shown) {
            self.print_recommendation(rec);
        }

        let hidden = result.recommendations.len().saturating_sub(shown);
        if hidden > 0 {
            println!(
                "   {} {} more recommendations (use --verbose to show)",
                "ℹ".blue(),
                hidden
            );
        }
    }

    fn print_recommendation(&self, rec: &Recommendation) {
        let tag = format!("[{}]", rec.category);
        let tag = match rec.category {
            RecommendationCategory::Critical => tag.red().bold(),
            RecommendationCategory::Important => tag.yellow(),
            RecommendationCategory::Minor => tag.blue(),
            RecommendationCategory::Enhancement => tag.dimmed(),
        };
        println!(
            "   {} {} {} {}",
            "→".cyan(),
            tag,
            rec.title,
            format!("(+{})", rec.estimated_score_gain).dimmed()
        );
        if self.verbose {
            println!("       {}", rec.description.italic());
            for item in &rec.action_items {
                println!("       {} {}", "•".dimmed(), item);
            }
        }
    }

    fn print_keywords(&self, result: &AnalysisResult) {
        if result.suggested_keywords.is_empty() {
            return;
        }
        println!();
        println!("   {}", "Suggested Keywords:".bold());
        println!("   {}", result.suggested_keywords.join(", "));
    }

    fn print_opportunities(&self, result: &AnalysisResult) {
        println!();
        println!("   {}", "Trending Opportunities:".bold());
        for idea in &result.trending_opportunities {
            println!("   {} {}", "•".dimmed(), idea);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Files analyzed:  {}",
            stats.files_analyzed.to_string().bold()
        );
        println!(
            "   Average score:   {} ({})",
            stats.average_score.value.to_string().bold(),
            self.colorize_grade(&stats.average_score.grade)
        );
        println!("   Total words:     {}", stats.total_words);
        println!("   Recommendations: {}", stats.total_recommendations);
        println!();
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn colorize_ratio(&self, text: String, score: u8, max: u8) -> colored::ColoredString {
        let pct = if max == 0 { 0 } else { score as u32 * 100 / max as u32 };
        if pct >= 80 {
            text.green()
        } else if pct >= 60 {
            text.yellow()
        } else {
            text.red()
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 80 {
                bar.green().to_string()
            } else if score >= 60 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: u8, max: u8) -> String {
        let filled = if max == 0 {
            0
        } else {
            (score.min(max) as usize * 10) / max as usize
        };
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source path for files, title for in-memory content
fn display_name(result: &AnalysisResult) -> String {
    match &result.source {
        Some(path) => path.display().to_string(),
        None => result.title.clone(),
    }
}
