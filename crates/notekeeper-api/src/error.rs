use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notekeeper_core::Error as StoreError;
use thiserror::Error;

/// Transport-level failure; renders as a status code with a plain-text body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Map a store error, using `failure_message` as the body for I/O failures.
    pub fn from_store(error: StoreError, failure_message: &str) -> Self {
        match error {
            StoreError::NotFound(_) => Self::NotFound("Not found".to_string()),
            StoreError::AlreadyExists(_) => Self::bad_request("Note already exists"),
            StoreError::InvalidInput(message) => Self::BadRequest(message),
            StoreError::Io(error) => {
                tracing::error!(error = %error, kind = ?error.kind(), "Note storage failure");
                Self::internal(failure_message)
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        Self::from_store(error, "Storage error")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
