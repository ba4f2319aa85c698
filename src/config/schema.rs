//! Config schema and deserialization

use crate::CheckId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Turn a check's recommendation on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSwitch {
    On,
    Off,
}

/// Per-path override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional threshold override for matched files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Recommendation switches for matched files
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub recommendations: HashMap<String, RecommendationSwitch>,

    /// Category for matched files without one in their front matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Root config structure for .seoscoperc.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum score threshold (exit 1 if below). Default: 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Recommendation switches. Key is the check name in kebab-case.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub recommendations: HashMap<String, RecommendationSwitch>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// File suffixes treated as content (default: .md, .markdown, .mdx, .html, .htm)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_patterns: Vec<String>,

    /// Default topical category for trend lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Extra trending keywords per category
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trending: BTreeMap<String, Vec<String>>,

    /// Per-path configuration overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            recommendations: self.recommendations.clone(),
            category: self.category.clone(),
        };

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                for (check, switch) in &override_cfg.recommendations {
                    effective.recommendations.insert(check.clone(), *switch);
                }
                if override_cfg.category.is_some() {
                    effective.category = override_cfg.category.clone();
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.category.is_none() {
            self.category = base.category;
        }

        for (check, switch) in base.recommendations {
            self.recommendations.entry(check).or_insert(switch);
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.content_patterns.is_empty() {
            self.content_patterns = base.content_patterns;
        }

        for (category, mut keywords) in base.trending {
            let entry = self.trending.entry(category).or_default();
            keywords.append(entry);
            *entry = keywords;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Get content file suffixes
    pub fn get_content_patterns(&self) -> Vec<&str> {
        if self.content_patterns.is_empty() {
            vec![".md", ".markdown", ".mdx", ".html", ".htm"]
        } else {
            self.content_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Recommendation keys that do not name a known check
    pub fn unknown_checks(&self) -> Vec<&str> {
        self.recommendations
            .keys()
            .chain(self.overrides.iter().flat_map(|o| o.recommendations.keys()))
            .map(String::as_str)
            .filter(|name| CheckId::from_name(name).is_none())
            .collect()
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, Default)]
pub struct EffectiveConfig {
    pub threshold: Option<u8>,
    pub recommendations: HashMap<String, RecommendationSwitch>,
    pub category: Option<String>,
}

impl EffectiveConfig {
    /// Recommendations are on unless switched off
    pub fn is_enabled(&self, check: CheckId) -> bool {
        self.recommendations.get(&check.to_string()) != Some(&RecommendationSwitch::Off)
    }
}
