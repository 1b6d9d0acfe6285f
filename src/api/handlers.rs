use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use greenbook_store::{CatalogCounts, CatalogError};
use greenbook_types::{ChatResponse, SearchResponse};
use std::sync::Arc;

use super::dto::*;
use super::error::ApiError;
use super::state::AppState;

/// Businesses shown on the home page feed
const HOME_FEED_SIZE: usize = 4;

const SEARCH_FAILED: &str = "Failed to process search request";
const CHAT_FAILED: &str = "Failed to process chat request";
const ADMIN_FAILED: &str = "Internal server error";

/// POST /ai/yellow-books/search - AI-assisted one-shot search
pub async fn ai_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected search body");
        ApiError::BadRequest("Query is required".into())
    })?;

    let response = state
        .assistant
        .search(&req.query)
        .await
        .map_err(|e| ApiError::from_engine(e, SEARCH_FAILED))?;

    Ok(Json(response))
}

/// POST /ai/yellow-books/chat - Conversation with business recommendations
pub async fn ai_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected chat body");
        ApiError::BadRequest("Messages array is required".into())
    })?;

    let response = state
        .assistant
        .chat(&req.messages)
        .await
        .map_err(|e| ApiError::from_engine(e, CHAT_FAILED))?;

    Ok(Json(response))
}

/// GET / - Categories plus the home page feed
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Json<DirectoryResponse>, ApiError> {
    directory(&state, Some(HOME_FEED_SIZE)).await.map(Json)
}

/// GET /search - Categories plus every business
pub async fn listing(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DirectoryResponse>, ApiError> {
    directory(&state, None).await.map(Json)
}

async fn directory(state: &AppState, limit: Option<usize>) -> Result<DirectoryResponse, ApiError> {
    let fetched = async {
        let categories = state.catalog.list_categories().await?;
        let businesses = match limit {
            Some(n) => state.catalog.list_first(n).await?,
            None => state.catalog.list_with_category().await?,
        };
        Ok::<_, CatalogError>(DirectoryResponse {
            categories,
            businesses,
        })
    };

    fetched.await.map_err(|e| {
        tracing::error!(error = %e, "failed to fetch directory data");
        ApiError::Internal("Failed to fetch data".into())
    })
}

/// GET /admin/dashboard - Business and category totals
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogCounts>, ApiError> {
    let counts = state.catalog.counts().await.map_err(admin_error)?;
    Ok(Json(counts))
}

/// GET /admin/businesses - Every business
pub async fn admin_businesses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BusinessListResponse>, ApiError> {
    let businesses = state
        .catalog
        .list_with_category()
        .await
        .map_err(admin_error)?;
    Ok(Json(BusinessListResponse { businesses }))
}

/// GET /admin/businesses/{id} - One business with its category
pub async fn admin_business(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BusinessResponse>, ApiError> {
    match state.catalog.get(&id).await.map_err(admin_error)? {
        Some(business) => Ok(Json(BusinessResponse { business })),
        None => Err(ApiError::NotFound("Business not found".into())),
    }
}

fn admin_error(err: CatalogError) -> ApiError {
    tracing::error!(error = %err, "admin query failed");
    ApiError::Internal(ADMIN_FAILED.into())
}

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
