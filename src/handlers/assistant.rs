// src/handlers/assistant.rs
//! Question answering endpoints - free-form questions and predefined queries

use crate::error::ApiError;
use crate::models::{AnswerResponse, PredefinedQueryRequest, QueryAnswerResponse, QuestionRequest};
use crate::quick_query::QueryKind;
use crate::state::AppContext;
use axum::{
    extract::Extension,
    response::Json,
    routing::post,
    Router,
};
use std::sync::Arc;

/// POST /ask - Ask FinBot a question
pub async fn ask_question(
    Extension(context): Extension<Arc<AppContext>>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let finbot = context.finbot.as_ref().ok_or(ApiError::ConfigurationMissing)?;

    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("Question cannot be empty".to_string()));
    }

    tracing::info!("🤖 FinBot question: {}", question);
    let answer = finbot
        .answer(question, &context.summary, Some(context.records.as_slice()))
        .await?;

    Ok(Json(AnswerResponse {
        question: request.question,
        answer,
        source: "llm".to_string(),
    }))
}

/// POST /quick-query - Predefined query answered by the LLM
pub async fn quick_query(
    Extension(context): Extension<Arc<AppContext>>,
    Json(request): Json<PredefinedQueryRequest>,
) -> Result<Json<QueryAnswerResponse>, ApiError> {
    let finbot = context.finbot.as_ref().ok_or(ApiError::ConfigurationMissing)?;
    let kind: QueryKind = request.query_type.parse()?;

    tracing::info!("🎯 Quick query via LLM: {}", kind.id());
    let answer = finbot
        .answer(kind.question(), &context.summary, Some(context.records.as_slice()))
        .await?;

    Ok(Json(QueryAnswerResponse {
        query_type: request.query_type,
        answer,
        source: "llm_predefined".to_string(),
    }))
}

/// POST /quick-answer - Predefined query computed from the data, no LLM involved
pub async fn quick_answer(
    Extension(context): Extension<Arc<AppContext>>,
    Json(request): Json<PredefinedQueryRequest>,
) -> Result<Json<QueryAnswerResponse>, ApiError> {
    let kind: QueryKind = request.query_type.parse()?;
    let answer = kind.answer(&context.summary, Some(context.records.as_slice()));

    Ok(Json(QueryAnswerResponse {
        query_type: request.query_type,
        answer,
        source: "computed".to_string(),
    }))
}

pub fn assistant_routes() -> Router {
    Router::new()
        .route("/ask", post(ask_question))
        .route("/quick-query", post(quick_query))
        .route("/quick-answer", post(quick_answer))
}
