//! Article processing pipeline: extract, parse, persist.
//!
//! All rows produced by one submission (article, source, interactions, and
//! any new plant/compound/model rows) are written in a single transaction;
//! a failure at any step leaves the store untouched.

use crate::db::Repository;
use crate::db::entities::interaction;
use crate::errors::{AppError, Result};
use crate::llm::{parse_extractions, Extractor};
use std::sync::Arc;
use std::time::Instant;

pub struct ProcessService {
    repo: Repository,
    extractor: Arc<dyn Extractor>,
}

impl ProcessService {
    pub fn new(repo: Repository, extractor: Arc<dyn Extractor>) -> Self {
        Self { repo, extractor }
    }

    /// Run the pipeline for one article submission.
    ///
    /// Returns the persisted interactions in the order the extraction
    /// records were produced.
    pub async fn process_article(
        &self,
        url: &str,
        title: &str,
        abstract_text: &str,
    ) -> Result<Vec<interaction::Model>> {
        if url.trim().is_empty() {
            return Err(AppError::Validation("url is required".to_string()));
        }
        if title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if abstract_text.trim().is_empty() {
            return Err(AppError::Validation("abstract is required".to_string()));
        }

        let started = Instant::now();

        // 1-2. Extraction and parsing happen before any write
        let raw = self.extractor.extract(abstract_text).await?;
        let records = parse_extractions(&raw)?;

        // 3-6. One transaction for the whole row set
        let txn = self.repo.begin().await?;

        let model = self
            .repo
            .get_or_create_model(
                &txn,
                self.extractor.model_name(),
                Some(self.extractor.model_description()),
            )
            .await?;

        let article = self
            .repo
            .insert_article(&txn, url, title, Some(abstract_text))
            .await?;

        let source = self
            .repo
            .insert_source(&txn, article.id, model.id, &raw)
            .await?;

        let mut saved = Vec::with_capacity(records.len());
        for record in &records {
            let plant = self.repo.get_or_create_plant(&txn, &record.plant).await?;
            let compound = self.repo.get_or_create_compound(&txn, &record.compound).await?;
            let row = self
                .repo
                .insert_interaction(
                    &txn,
                    plant.id,
                    compound.id,
                    source.id,
                    &record.effects,
                    record.part.as_deref(),
                )
                .await?;
            saved.push(row);
        }

        txn.commit().await?;

        tracing::info!(
            article_id = article.id,
            source_id = source.id,
            interactions = saved.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "article processed"
        );

        Ok(saved)
    }
}
