//! Read-only catalog queries. Never mutates the store.

use crate::db::entities::article;
use crate::db::{InteractionFilter, InteractionRecord, Paged, Repository, SourceRecord};
use crate::errors::Result;
use crate::services::export;

pub struct CatalogService {
    repo: Repository,
}

impl CatalogService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn articles(&self, page: u64, size: u64) -> Result<Paged<article::Model>> {
        self.repo.list_articles(page, size).await
    }

    pub async fn interactions(
        &self,
        filter: &InteractionFilter,
        page: u64,
        size: u64,
    ) -> Result<Paged<InteractionRecord>> {
        self.repo.list_interactions(filter, page, size).await
    }

    pub async fn sources_for_article(&self, article_id: i64) -> Result<Vec<SourceRecord>> {
        self.repo.sources_for_article(article_id).await
    }

    pub async fn source_by_id(&self, id: i64) -> Result<SourceRecord> {
        self.repo.source_by_id(id).await
    }

    /// Filtered, unpaginated interaction set rendered as CSV.
    pub async fn export_csv(&self, filter: &InteractionFilter) -> Result<String> {
        let records = self.repo.all_interactions(filter).await?;
        export::interactions_to_csv(&records)
    }
}
