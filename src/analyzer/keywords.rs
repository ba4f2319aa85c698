//! Keyword suggestions, trend lookups and meta description drafts

use crate::parser::markup;
use crate::ContentInput;
use std::collections::{BTreeMap, BTreeSet};

/// Supplies trending keywords for a topical category.
///
/// The analyzer only reads this list to boost keyword candidates; it never
/// fetches anything itself.
pub trait TrendSource: Send + Sync {
    fn trending(&self, category: &str) -> Vec<String>;
}

/// No trend data at all
pub struct NoTrends;

impl TrendSource for NoTrends {
    fn trending(&self, _category: &str) -> Vec<String> {
        Vec::new()
    }
}

/// In-memory category table
#[derive(Debug, Clone, Default)]
pub struct StaticTrendSource {
    table: BTreeMap<String, Vec<String>>,
}

impl StaticTrendSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in stub table
    pub fn with_defaults() -> Self {
        let defaults: [(&str, &[&str]); 5] = [
            (
                "technology",
                &["artificial intelligence", "machine learning", "cloud", "cybersecurity", "automation"],
            ),
            (
                "marketing",
                &["content marketing", "seo", "social media", "email marketing", "personalization"],
            ),
            ("business", &["remote work", "productivity", "leadership", "startup", "growth"]),
            ("health", &["nutrition", "mental health", "fitness", "sleep", "wellness"]),
            ("finance", &["investing", "budgeting", "retirement", "cryptocurrency", "savings"]),
        ];
        let table = defaults
            .iter()
            .map(|(category, keywords)| {
                (
                    category.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();
        Self { table }
    }

    /// Append extra keywords per category (e.g. from a config file)
    pub fn extended(mut self, extra: &BTreeMap<String, Vec<String>>) -> Self {
        for (category, keywords) in extra {
            let entry = self.table.entry(normalize(category)).or_default();
            for keyword in keywords {
                let keyword = normalize(keyword);
                if !keyword.is_empty() && !entry.contains(&keyword) {
                    entry.push(keyword);
                }
            }
        }
        self
    }
}

impl TrendSource for StaticTrendSource {
    fn trending(&self, category: &str) -> Vec<String> {
        self.table
            .get(&normalize(category))
            .cloned()
            .unwrap_or_default()
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Generic content ideas, returned as-is for every analysis
pub fn trending_opportunities() -> Vec<String> {
    [
        "Add an FAQ section to capture voice search queries",
        "Include recent statistics and data points",
        "Structure answers to target featured snippets",
        "Embed a short video summary",
        "Add social proof such as testimonials or case studies",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "even", "every", "few", "for", "from", "further", "get",
    "gets", "had", "has", "have", "having", "her", "here", "hers", "him", "his", "how", "into",
    "its", "itself", "just", "like", "make", "many", "more", "most", "much", "must", "not", "now",
    "off", "once", "one", "only", "other", "our", "ours", "out", "over", "own", "same", "she",
    "should", "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
    "these", "they", "this", "those", "through", "too", "under", "until", "use", "used", "very",
    "was", "way", "well", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Lowercase word tokens; stop words, short words and numbers become `None`
/// so bigrams never span them
fn tokens(text: &str) -> Vec<Option<String>> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .map(|w| w.trim_matches('-'))
        .filter(|w| !w.is_empty())
        .map(|w| {
            let keep = w.chars().count() >= 3
                && !is_stop_word(w)
                && !w.chars().all(|c| c.is_ascii_digit());
            keep.then(|| w.to_string())
        })
        .collect()
}

fn count_phrases(text: &str, counts: &mut BTreeMap<String, usize>) {
    let toks = tokens(text);
    for tok in toks.iter().flatten() {
        *counts.entry(tok.clone()).or_default() += 1;
    }
    for pair in toks.windows(2) {
        if let (Some(a), Some(b)) = (&pair[0], &pair[1]) {
            *counts.entry(format!("{} {}", a, b)).or_default() += 1;
        }
    }
}

fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", phrase))
}

/// Suggests new keywords drawn from the content itself
pub struct KeywordSuggester<'a> {
    trends: &'a dyn TrendSource,
    limit: usize,
}

impl<'a> KeywordSuggester<'a> {
    pub fn new(trends: &'a dyn TrendSource) -> Self {
        Self { trends, limit: 10 }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Candidates ranked by score descending, then alphabetically.
    ///
    /// Score is the occurrence count (doubled for two-word phrases), plus 3
    /// when the phrase is in the title and 5 when it is trending for the
    /// content's category. Phrases seen once only qualify when trending.
    pub fn suggest(&self, input: &ContentInput) -> Vec<String> {
        let title = normalize(&input.title);
        let body = markup::strip_markup(&input.body);

        let mut counts = BTreeMap::new();
        count_phrases(&title, &mut counts);
        count_phrases(&body, &mut counts);

        let mut excluded: BTreeSet<String> =
            input.existing_keywords.iter().map(|k| normalize(k)).collect();
        if let Some(keyword) = input.keyword() {
            excluded.insert(normalize(keyword));
        }

        let trending: Vec<String> = input
            .category
            .as_deref()
            .map(|c| self.trends.trending(c))
            .unwrap_or_default()
            .iter()
            .map(|t| normalize(t))
            .collect();
        let title_phrases = tokens(&title)
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let mut scored: Vec<(usize, String)> = counts
            .into_iter()
            .filter(|(phrase, _)| !excluded.contains(phrase))
            .filter_map(|(phrase, count)| {
                let is_trending = trending.iter().any(|t| contains_phrase(t, &phrase));
                if count < 2 && !is_trending {
                    return None;
                }
                let mut score = if phrase.contains(' ') { count * 2 } else { count };
                if contains_phrase(&title_phrases, &phrase) {
                    score += 3;
                }
                if is_trending {
                    score += 5;
                }
                Some((score, phrase))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, phrase)| phrase)
            .collect()
    }
}

/// Draft a meta description: the leading sentences that fit in `max_len`
/// characters, otherwise the first words cut at a word boundary with "...".
/// Budgets too small for the ellipsis get a hard cut instead.
pub fn suggest_meta_description(text: &str, max_len: usize) -> String {
    let plain = normalize_spacing(&markup::strip_markup(text));
    if plain.chars().count() <= max_len {
        return plain;
    }

    let mut out = String::new();
    for sentence in sentences(&plain) {
        let candidate = if out.is_empty() {
            sentence.to_string()
        } else {
            format!("{} {}", out, sentence)
        };
        if candidate.chars().count() > max_len {
            break;
        }
        out = candidate;
    }
    if !out.is_empty() {
        return out;
    }
    if max_len < 3 {
        return plain.chars().take(max_len).collect();
    }

    let budget = max_len - 3;
    let mut out = String::new();
    for word in plain.split(' ') {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = plain.chars().take(budget).collect();
    }
    format!("{}...", out)
}

fn normalize_spacing(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split after `.`, `!` or `?` followed by a space, keeping the terminator
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;
    for (i, c) in text.char_indices() {
        if c == ' ' && prev_terminal {
            out.push(&text[start..i]);
            start = i + 1;
        }
        prev_terminal = matches!(c, '.' | '!' | '?');
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}
