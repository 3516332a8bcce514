// error.rs - Request-level errors and their HTTP mapping
use crate::completion::CompletionError;
use crate::quick_query::UnknownQuery;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("LLM service unavailable. Please set GROQ_API_KEY.")]
    ConfigurationMissing,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Upstream(#[from] CompletionError),
    #[error("{0}")]
    NotFound(#[from] UnknownQuery),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // unknown predefined queries are the client's fault
            ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = %status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::ConfigurationMissing.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::BadRequest("Question cannot be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CompletionError::EmptyResponse).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(UnknownQuery("nope".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_detail_message() {
        assert_eq!(
            ApiError::from(UnknownQuery("nope".into())).to_string(),
            "Invalid query type: nope"
        );
    }
}
