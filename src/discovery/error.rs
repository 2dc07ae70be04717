use crate::catalog::store::StoreError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A request parameter failed to parse or is out of range. Raised before
    /// storage is touched.
    #[error("invalid value for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{0}")]
    NotFound(String),

    #[error("no user is currently logged in")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(StoreError),
}

impl DiscoveryError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DiscoveryError::Validation { .. } => StatusCode::BAD_REQUEST,
            DiscoveryError::NotFound(_) => StatusCode::NOT_FOUND,
            DiscoveryError::Unauthorized => StatusCode::UNAUTHORIZED,
            DiscoveryError::Forbidden(_) => StatusCode::FORBIDDEN,
            DiscoveryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DiscoveryError::Validation { .. } => "Validation Failed",
            DiscoveryError::NotFound(_) => "Not Found",
            DiscoveryError::Unauthorized => "Unauthorized Access",
            DiscoveryError::Forbidden(_) => "Forbidden",
            DiscoveryError::Store(_) => "Internal Server Error",
        }
    }
}

impl From<StoreError> for DiscoveryError {
    fn from(err: StoreError) -> Self {
        match err {
            // the recipe vanished between lookup and write
            StoreError::MissingRecipe(id) => Self::NotFound(format!("recipe {id} not found")),
            other => Self::Store(other),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            DiscoveryError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                "internal server error".to_string()
            }
            other => {
                tracing::warn!("Rejected request: {}", other);
                other.to_string()
            }
        };

        let body = ErrorBody {
            error: self.kind(),
            message,
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
