// src/handlers/health.rs
use crate::models::{HealthResponse, PromptsResponse};
use crate::state::AppContext;
use axum::{extract::Extension, response::Json, routing::get, Router};
use std::sync::Arc;

/// Example questions offered to dashboard users
pub const SAMPLE_PROMPTS: [&str; 5] = [
    "What is the total revenue?",
    "Which product generates the most revenue?",
    "Show me sales by region",
    "What's the average revenue per sale?",
    "How is our North region performing?",
];

/// GET / - Health check
pub async fn root(Extension(context): Extension<Arc<AppContext>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "FinBot API is running".to_string(),
        status: "healthy".to_string(),
        llm_available: context.llm_available(),
    })
}

/// GET /prompts - Sample prompts users can try
pub async fn get_sample_prompts() -> Json<PromptsResponse> {
    Json(PromptsResponse {
        prompts: SAMPLE_PROMPTS.iter().map(|p| p.to_string()).collect(),
    })
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/prompts", get(get_sample_prompts))
}
