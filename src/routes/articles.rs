//! Article submission, listing, and source provenance handlers.

use crate::db::entities::article;
use crate::db::SourceRecord;
use crate::errors::AppError;
use crate::routes::{PageParams, PageResponse};
use crate::services::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ProcessArticleRequest {
    pub url: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleDto {
    pub id: i64,
    pub url: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl From<article::Model> for ArticleDto {
    fn from(article: article::Model) -> Self {
        Self {
            id: article.id,
            url: article.url,
            title: article.title,
            abstract_text: article.abstract_text,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDto {
    pub id: i64,
    pub model_name: String,
    pub raw_response: Option<String>,
}

impl From<SourceRecord> for SourceDto {
    fn from(source: SourceRecord) -> Self {
        Self {
            id: source.id,
            model_name: source.model_name,
            raw_response: source.raw_response,
        }
    }
}

pub async fn process_article(
    State(state): State<AppState>,
    Json(payload): Json<ProcessArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let interactions = state
        .process
        .process_article(&payload.url, &payload.title, &payload.abstract_text)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Article processed successfully",
        "interactionsCount": interactions.len(),
    })))
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, size) = params.resolve();
    let result = state.catalog.articles(page, size).await?;

    Ok(Json(PageResponse {
        content: result.items.into_iter().map(ArticleDto::from).collect::<Vec<_>>(),
        total_elements: result.total_elements,
        total_pages: result.total_pages,
        current_page: page,
        size,
    }))
}

pub async fn article_sources(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sources = state.catalog.sources_for_article(article_id).await?;
    let dtos: Vec<SourceDto> = sources.into_iter().map(SourceDto::from).collect();
    Ok(Json(dtos))
}

pub async fn source_by_id(
    State(state): State<AppState>,
    Path(source_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let source = state.catalog.source_by_id(source_id).await?;
    Ok(Json(SourceDto::from(source)))
}
