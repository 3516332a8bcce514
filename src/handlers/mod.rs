// src/handlers/mod.rs
pub mod assistant;
pub mod health;
pub mod sales;

use crate::middleware::logging::request_logging_middleware;
use crate::state::AppContext;
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Full application router with logging, CORS and the shared context
pub fn app_router(context: Arc<AppContext>) -> Router {
    Router::new()
        .merge(health::health_routes())
        .merge(sales::sales_routes())
        .merge(assistant::assistant_routes())
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(context))
}
