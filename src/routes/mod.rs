//! Router assembly and shared request/response shapes.

pub mod articles;
pub mod interactions;
pub mod pubmed;

use crate::services::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Hard cap on requested page sizes.
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageParams {
    /// Zero-based page plus a clamped page size (defaults 0 / 10).
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }
}

/// Standard pagination envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub size: u64,
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/articles/process", post(articles::process_article))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{article_id}/sources", get(articles::article_sources))
        .route("/sources/{source_id}", get(articles::source_by_id))
        .route("/interactions", get(interactions::list_interactions))
        .route("/interactions/csv", get(interactions::export_csv))
        .route("/pubmed/search", get(pubmed::search))
        .route("/pubmed/article/abstract", get(pubmed::article_abstract))
        .route("/pubmed/article/process", post(pubmed::process_article))
        .with_state(state);

    Router::new().nest("/api/v1", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_defaults_and_caps() {
        let params = PageParams { page: None, size: None };
        assert_eq!(params.resolve(), (0, 10));

        let params = PageParams { page: Some(3), size: Some(500) };
        assert_eq!(params.resolve(), (3, MAX_PAGE_SIZE));

        let params = PageParams { page: Some(0), size: Some(0) };
        assert_eq!(params.resolve(), (0, 1));
    }
}
