//! Loading articles from disk: YAML front matter, HTML head metadata and
//! title fallbacks.

use super::markup;
use crate::ContentInput;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static HTML_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").unwrap());
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta\s+name\s*=\s*["']description["']\s+content\s*=\s*["']([^"']*)["']"#)
        .unwrap()
});
static META_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta\s+name\s*=\s*["']keywords["']\s+content\s*=\s*["']([^"']*)["']"#)
        .unwrap()
});

/// Errors raised while turning a file into `ContentInput`
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Unterminated front matter in {} (missing closing ---)", path.display())]
    UnterminatedFrontMatter { path: PathBuf },
}

/// Recognised front matter keys. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "description")]
    meta_description: Option<String>,
    #[serde(default, alias = "keyword")]
    focus_keyword: Option<String>,
    #[serde(default, alias = "tags")]
    keywords: Vec<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Read and parse an article
pub fn load_document(path: &Path) -> Result<ContentInput, DocumentError> {
    let source = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&source, path)
}

/// Parse article text. `path` is used for error messages and as the last
/// title fallback (file stem).
pub fn parse_document(source: &str, path: &Path) -> Result<ContentInput, DocumentError> {
    let source = source.trim_start_matches('\u{feff}');
    let (front, body) = split_front_matter(source, path)?;

    let mut input = ContentInput {
        body: body.to_string(),
        ..ContentInput::default()
    };

    if let Some(fm) = front {
        input.title = fm.title.unwrap_or_default();
        input.meta_description = fm.meta_description;
        input.focus_keyword = fm.focus_keyword;
        input.existing_keywords = fm.keywords.into_iter().collect();
        input.slug = fm.slug;
        input.category = fm.category;
    }

    if input.title.trim().is_empty() {
        input.title = fallback_title(body, path);
    }
    if input.meta_description.is_none() {
        input.meta_description = capture(&META_DESCRIPTION, body);
    }
    if input.existing_keywords.is_empty() {
        if let Some(keywords) = capture(&META_KEYWORDS, body) {
            input.existing_keywords = keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    Ok(input)
}

fn split_front_matter<'a>(
    source: &'a str,
    path: &Path,
) -> Result<(Option<FrontMatter>, &'a str), DocumentError> {
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let fm = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml).map_err(|source| DocumentError::FrontMatter {
                    path: path.to_path_buf(),
                    source,
                })?
            };
            return Ok((Some(fm), body));
        }
        offset += line.len();
    }

    Err(DocumentError::UnterminatedFrontMatter {
        path: path.to_path_buf(),
    })
}

fn fallback_title(body: &str, path: &Path) -> String {
    if let Some(title) = capture(&HTML_TITLE, body) {
        return title;
    }
    if let Some(heading) = markup::heading_texts(body).into_iter().next() {
        return heading;
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_default()
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| markup::strip_markup(m.as_str()).trim().to_string())
        .filter(|s| !s.is_empty())
}
