//! Configuration loading for Seoscope

mod schema;

pub use schema::{Config, ConfigOverride, EffectiveConfig, RecommendationSwitch};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".seoscoperc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    let Some(path) = path else {
        tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
        return Ok(Config::default());
    };

    let config = load_config_with_extends(&path, &mut HashSet::new())?;
    for name in config.unknown_checks() {
        tracing::warn!(check = name, "unknown check in recommendations config");
    }
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if visited.contains(&canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }
    visited.insert(canonical);

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Resolve an extends reference (relative to the referencing file, or absolute)
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = if Path::new(extends).is_absolute() {
        PathBuf::from(extends)
    } else {
        config_dir.join(extends)
    };

    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .seoscoperc.json in directory and its parents
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckId;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_config_found_in_parent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), CONFIG_FILENAME, r#"{ "threshold": 65 }"#);
        let nested = dir.path().join("content/posts");
        fs::create_dir_all(&nested).unwrap();
        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.threshold, Some(65));
    }

    #[test]
    fn test_is_ignored_drafts() {
        let set = build_ignore_set(&["**/drafts/**".to_string()]).unwrap();
        assert!(is_ignored(Path::new("content/drafts/post.md"), &set));
        assert!(!is_ignored(Path::new("content/posts/post.md"), &set));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = build_ignore_set(&["[unclosed".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid ignore pattern"));
    }

    #[test]
    fn test_config_extends() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "base.json",
            r#"{
                "threshold": 70,
                "recommendations": { "schema-markup": "off" },
                "ignore": ["**/drafts/**"],
                "category": "marketing"
            }"#,
        );
        write(
            dir.path(),
            CONFIG_FILENAME,
            r#"{
                "extends": "./base",
                "threshold": 80,
                "recommendations": { "page-speed": "off" }
            }"#,
        );

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.threshold, Some(80));
        assert_eq!(config.category.as_deref(), Some("marketing"));
        assert!(config.ignore.contains(&"**/drafts/**".to_string()));
        let effective = config.effective_for_file(Path::new("post.md"));
        assert!(!effective.is_enabled(CheckId::SchemaMarkup));
        assert!(!effective.is_enabled(CheckId::PageSpeed));
    }

    #[test]
    fn test_circular_extends() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", r#"{ "extends": "./b.json" }"#);
        let b = write(dir.path(), "b.json", r#"{ "extends": "./a.json" }"#);
        let err = load_config(dir.path(), Some(&b)).unwrap_err();
        assert!(format!("{:#}", err).contains("Circular extends"));
    }

    #[test]
    fn test_invalid_json_has_context() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "bad.json", "{ not json");
        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON in config"));
    }

    #[test]
    fn test_config_overrides() {
        let config: Config = serde_json::from_str(
            r#"{
                "threshold": 70,
                "category": "business",
                "overrides": [
                    {
                        "files": ["**/legacy/**"],
                        "threshold": 50,
                        "recommendations": { "word-count": "off" }
                    },
                    {
                        "files": ["blog/health/**"],
                        "category": "health"
                    }
                ]
            }"#,
        )
        .unwrap();

        let effective = config.effective_for_file(Path::new("blog/post.md"));
        assert_eq!(effective.threshold, Some(70));
        assert_eq!(effective.category.as_deref(), Some("business"));
        assert!(effective.is_enabled(CheckId::WordCount));

        let effective = config.effective_for_file(Path::new("blog/legacy/old.md"));
        assert_eq!(effective.threshold, Some(50));
        assert!(!effective.is_enabled(CheckId::WordCount));

        let effective = config.effective_for_file(Path::new("blog/health/sleep.md"));
        assert_eq!(effective.category.as_deref(), Some("health"));
    }
}
