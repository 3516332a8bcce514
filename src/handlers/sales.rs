// src/handlers/sales.rs
//! Read-only dataset endpoints

use crate::models::SalesDataResponse;
use crate::state::AppContext;
use crate::types::Summary;
use axum::{extract::Extension, response::Json, routing::get, Router};
use std::sync::Arc;

/// GET /sales-data - All records plus the summary
pub async fn get_sales_data(Extension(context): Extension<Arc<AppContext>>) -> Json<SalesDataResponse> {
    Json(SalesDataResponse {
        data: context.records.clone(),
        summary: context.summary.clone(),
    })
}

/// GET /summary - Summary statistics only
pub async fn get_summary(Extension(context): Extension<Arc<AppContext>>) -> Json<Summary> {
    Json(context.summary.clone())
}

pub fn sales_routes() -> Router {
    Router::new()
        .route("/sales-data", get(get_sales_data))
        .route("/summary", get(get_summary))
}
