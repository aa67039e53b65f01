use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use graph_flow::GraphError;
use serde_json::json;
use thiserror::Error;

pub const MISSING_SYMPTOM: &str = "Please provide a symptom.";
pub const LLM_NOT_INITIALIZED: &str = "LLM not initialized. Please provide API key.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected before any external call
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    /// The request body could not be read
    #[error("{0}")]
    Request(String),

    /// The LLM call itself failed
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Workflow(GraphError),
}

impl ServiceError {
    pub fn missing_symptom() -> Self {
        ServiceError::Validation(MISSING_SYMPTOM.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GraphError> for ServiceError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::TaskExecutionFailed(message) => ServiceError::Upstream(message),
            other => ServiceError::Workflow(other),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServiceError::Validation(message) => json!({ "error": message }),
            other => json!({
                "error": other.to_string(),
                "status": "failed"
            }),
        };
        (status, Json(body)).into_response()
    }
}
