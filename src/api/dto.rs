use greenbook_types::{Business, Category, ChatMessage};
use serde::{Deserialize, Serialize};

/// POST /ai/yellow-books/search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /ai/yellow-books/chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// GET / and GET /search response
#[derive(Debug, Serialize)]
pub struct DirectoryResponse {
    pub categories: Vec<Category>,
    pub businesses: Vec<Business>,
}

/// GET /admin/businesses response
#[derive(Debug, Serialize)]
pub struct BusinessListResponse {
    pub businesses: Vec<Business>,
}

/// GET /admin/businesses/{id} response
#[derive(Debug, Serialize)]
pub struct BusinessResponse {
    pub business: Business,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
