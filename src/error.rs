//! Application error taxonomy and HTTP mapping.
//!
//! Every error is handled at the boundary of the request that produced it.
//! Nothing is retried internally.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Serialized error payload returned by JSON endpoints.
///
/// ```json
/// { "ok": false, "error": "Missing required params", "code": "validation_error" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed required input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No visible ad for the requested slug.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Datastore or object-storage call failed.
    #[error("{message}")]
    Upstream { message: String, details: Value },

    /// Malformed expiration string.
    #[error("{message}")]
    Parse { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }

    pub fn parse(message: impl Into<String>, details: Value) -> Self {
        Self::Parse {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    ///
    /// Parse failures surface like upstream failures.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::Parse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Parse { .. } => "parse_error",
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Upstream { message, details }
            | AppError::Parse { message, details } => (message.clone(), details.clone()),
        };

        ErrorBody {
            ok: false,
            error: message,
            code: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::upstream("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut fields: Vec<&str> = field_errors.keys().map(|field| field.as_ref()).collect();
        fields.sort_unstable();

        let message = fields
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .flat_map(|list| list.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::bad_request(message, json!({ "fields": fields }))
    }
}
