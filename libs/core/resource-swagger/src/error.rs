//! Error types for resource-swagger

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type for resource-swagger operations
pub type Result<T> = std::result::Result<T, SwaggerError>;

/// Errors that can occur while building or serving API declarations
#[derive(Debug, Error)]
pub enum SwaggerError {
    /// Parameter location is not one of path, body, query or header
    #[error("invalid param_type: {0:?}")]
    InvalidParamType(String),

    /// No group registered under the requested name
    #[error("API group not found: {0}")]
    GroupNotFound(String),

    /// Path segment is not `{document_name}.{format}`
    #[error("API document not found: {0}")]
    DocumentNotFound(String),
}

/// Body returned for error responses
#[derive(Debug, Serialize, ToSchema)]
pub struct SwaggerErrorResponse {
    pub error: String,
    pub message: String,
}

impl SwaggerErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for SwaggerError {
    fn into_response(self) -> Response {
        match self {
            SwaggerError::GroupNotFound(_) | SwaggerError::DocumentNotFound(_) => {
                tracing::debug!("{}", self);
                (
                    StatusCode::NOT_FOUND,
                    Json(SwaggerErrorResponse::not_found(self.to_string())),
                )
                    .into_response()
            }
            // Raised while registering; only reaches a response if a handler
            // builds parameters on the fly
            SwaggerError::InvalidParamType(_) => {
                tracing::error!("Failed to render API declaration: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SwaggerErrorResponse {
                        error: "internal".to_string(),
                        message: self.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
