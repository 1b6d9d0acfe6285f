mod dto;
mod error;
mod handlers;
mod state;

pub use dto::{
    BusinessListResponse, BusinessResponse, ChatRequest, DirectoryResponse, HealthResponse,
    SearchRequest,
};
pub use error::ApiError;
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/search", get(handlers::listing))
        .route("/ai/yellow-books/search", post(handlers::ai_search))
        .route("/ai/yellow-books/chat", post(handlers::ai_chat))
        .route("/admin/dashboard", get(handlers::admin_dashboard))
        .route("/admin/businesses", get(handlers::admin_businesses))
        .route("/admin/businesses/{id}", get(handlers::admin_business))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
