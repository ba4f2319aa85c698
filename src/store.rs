//! Content store - articles in, SEO results back

use crate::ContentInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read content store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid content store {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write content store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown content item: {0}")]
    UnknownItem(String),
}

/// One article as the content store holds it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub keywords: BTreeSet<String>,
    /// Last SEO result written back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoUpdate>,
}

impl ContentItem {
    pub fn to_input(&self) -> ContentInput {
        ContentInput {
            title: self.title.clone(),
            body: self.body.clone(),
            meta_description: self.meta_description.clone(),
            focus_keyword: self.focus_keyword.clone(),
            existing_keywords: self.keywords.clone(),
            slug: None,
            category: self.category.clone(),
        }
    }
}

/// Fields written back after analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoUpdate {
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
    #[serde(default)]
    pub suggested_keywords: Vec<String>,
    pub score: u8,
    pub last_updated: DateTime<Utc>,
}

/// Where content comes from and where results go
pub trait ContentStore {
    /// Snapshot of every item
    fn items(&self) -> Vec<ContentItem>;

    /// Persist an update for one item
    fn write_back(&mut self, id: &str, update: SeoUpdate) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ContentFile {
    items: Vec<ContentItem>,
}

/// Content store backed by a JSON file of the form `{ "items": [...] }`
#[derive(Debug)]
pub struct JsonContentStore {
    path: PathBuf,
    file: ContentFile,
}

impl JsonContentStore {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all items back to the file
    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let content = serde_json::to_string_pretty(&self.file)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, content).map_err(write_err)
    }
}

impl ContentStore for JsonContentStore {
    fn items(&self) -> Vec<ContentItem> {
        self.file.items.clone()
    }

    fn write_back(&mut self, id: &str, update: SeoUpdate) -> Result<(), StoreError> {
        let item = self
            .file
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))?;
        item.meta_description = update.meta_description.clone();
        item.focus_keyword = update.focus_keyword.clone();
        item.seo = Some(update);
        Ok(())
    }
}
