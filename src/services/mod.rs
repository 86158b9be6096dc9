//! Service layer: pipeline, catalog reads, CSV export.

pub mod catalog;
pub mod export;
pub mod process;

use crate::db::Repository;
use crate::llm::Extractor;
use crate::pubmed::PubMedClient;
use std::sync::Arc;

/// Container for all services, injected into route handlers.
#[derive(Clone)]
pub struct AppState {
    pub process: Arc<process::ProcessService>,
    pub catalog: Arc<catalog::CatalogService>,
    pub pubmed: Arc<PubMedClient>,
}

impl AppState {
    pub fn new(repo: Repository, extractor: Arc<dyn Extractor>, pubmed: PubMedClient) -> Self {
        Self {
            process: Arc::new(process::ProcessService::new(repo.clone(), extractor)),
            catalog: Arc::new(catalog::CatalogService::new(repo)),
            pubmed: Arc::new(pubmed),
        }
    }
}
