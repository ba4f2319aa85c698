//! Batch driver - analyze every item in a content store and write results back

use crate::analyzer::keywords::suggest_meta_description;
use crate::analyzer::AnalysisEngine;
use crate::store::{ContentItem, ContentStore, SeoUpdate};
use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;

/// Longest generated meta description, in characters
pub const META_DESCRIPTION_MAX: usize = 160;

/// One item whose result could not be written back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Items analyzed
    pub processed: usize,
    /// Items whose update was written back
    pub updated: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct BatchDriver<'a> {
    engine: &'a AnalysisEngine,
    /// Replace existing meta descriptions and focus keywords
    overwrite: bool,
    /// Analyze without writing anything back
    dry_run: bool,
}

impl<'a> BatchDriver<'a> {
    pub fn new(engine: &'a AnalysisEngine) -> Self {
        Self {
            engine,
            overwrite: false,
            dry_run: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Analyze all items in parallel, then write back one at a time.
    /// A failed write is recorded and the batch moves on.
    pub fn run(&self, store: &mut dyn ContentStore) -> BatchSummary {
        let items = store.items();
        let planned: Vec<(String, SeoUpdate)> = items
            .par_iter()
            .map(|item| (item.id.clone(), self.plan(item)))
            .collect();

        let mut summary = BatchSummary::default();
        for (id, update) in planned {
            summary.processed += 1;
            if self.dry_run {
                tracing::info!(id = %id, score = update.score, "dry run, not writing");
                continue;
            }
            match store.write_back(&id, update) {
                Ok(()) => summary.updated += 1,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "write back failed");
                    summary.failures.push(BatchFailure {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            updated = summary.updated,
            failed = summary.failures.len(),
            "batch finished"
        );
        summary
    }

    /// Fill missing metadata from suggestions and score the result
    pub fn plan(&self, item: &ContentItem) -> SeoUpdate {
        let mut input = item.to_input();
        let first = self.engine.analyze(&input);

        if self.overwrite || input.keyword().is_none() {
            if let Some(keyword) = first.suggested_keywords.first() {
                input.focus_keyword = Some(keyword.clone());
            }
        }
        let has_description = input
            .meta_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        if self.overwrite || !has_description {
            let draft = suggest_meta_description(&input.body, META_DESCRIPTION_MAX);
            if !draft.is_empty() {
                input.meta_description = Some(draft);
            }
        }

        let result = self.engine.analyze(&input);
        SeoUpdate {
            meta_description: input.meta_description,
            focus_keyword: input.focus_keyword,
            suggested_keywords: first.suggested_keywords,
            score: result.score.value,
            last_updated: Utc::now(),
        }
    }
}
