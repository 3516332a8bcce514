// src/models/chat.rs
use crate::types::{Sale, Summary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredefinedQueryRequest {
    pub query_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryAnswerResponse {
    pub query_type: String,
    pub answer: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub llm_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesDataResponse {
    pub data: Vec<Sale>,
    pub summary: Summary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptsResponse {
    pub prompts: Vec<String>,
}
