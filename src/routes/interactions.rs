//! Interaction listing and CSV export handlers.

use crate::db::entities::decode_list;
use crate::db::{InteractionFilter, InteractionRecord};
use crate::errors::AppError;
use crate::routes::{PageParams, PageResponse};
use crate::services::AppState;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionParams {
    pub plant_name: Option<String>,
    pub compound_name: Option<String>,
    pub effect: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl InteractionParams {
    fn filter(&self) -> InteractionFilter {
        InteractionFilter::from_params(
            self.plant_name.clone(),
            self.compound_name.clone(),
            self.effect.clone(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionDto {
    pub id: i64,
    pub plant: String,
    pub compound: String,
    pub effects: Vec<String>,
    pub plant_parts: Option<Vec<String>>,
    pub model: String,
    pub article_title: String,
}

impl From<InteractionRecord> for InteractionDto {
    fn from(record: InteractionRecord) -> Self {
        Self {
            id: record.id,
            plant: record.plant_name,
            compound: record.compound_name.unwrap_or_default(),
            effects: decode_list(&record.effects),
            plant_parts: record.plant_parts.as_deref().map(decode_list),
            model: record.model_name,
            article_title: record.article_title,
        }
    }
}

pub async fn list_interactions(
    State(state): State<AppState>,
    Query(params): Query<InteractionParams>,
) -> Result<impl IntoResponse, AppError> {
    let page_params = PageParams { page: params.page, size: params.size };
    let (page, size) = page_params.resolve();
    let result = state.catalog.interactions(&params.filter(), page, size).await?;

    Ok(Json(PageResponse {
        content: result.items.into_iter().map(InteractionDto::from).collect::<Vec<_>>(),
        total_elements: result.total_elements,
        total_pages: result.total_pages,
        current_page: page,
        size,
    }))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<InteractionParams>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.catalog.export_csv(&params.filter()).await?;

    let filename = format!("interactions_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
