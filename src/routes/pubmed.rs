//! PubMed search and scrape-then-process handlers.
//!
//! Search and abstract lookups are best-effort passthroughs over the
//! scraping client; they degrade to empty results rather than failing.

use crate::errors::AppError;
use crate::pubmed::SearchHit;
use crate::services::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub articles: Vec<SearchHit>,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct AbstractParams {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ProcessForm {
    pub url: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let articles = state.pubmed.search(&params.query, page).await;
    let total_pages = state.pubmed.get_total_pages(&params.query).await;

    Ok(Json(SearchResponse {
        articles,
        total_pages,
        current_page: page,
        has_more: page < total_pages,
    }))
}

pub async fn article_abstract(
    State(state): State<AppState>,
    Query(params): Query<AbstractParams>,
) -> Result<impl IntoResponse, AppError> {
    let abstract_text = state.pubmed.fetch_abstract(&params.url).await;

    // Title is not re-fetched for abstract-only lookups
    Ok(Json(json!({
        "title": "",
        "url": params.url,
        "abstract": abstract_text,
    })))
}

pub async fn process_article(
    State(state): State<AppState>,
    Form(form): Form<ProcessForm>,
) -> Result<impl IntoResponse, AppError> {
    let interactions = state
        .process
        .process_article(&form.url, &form.title, &form.abstract_text)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Article processed successfully",
        "interactionsCount": interactions.len(),
    })))
}
