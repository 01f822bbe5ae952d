use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use std::fmt::Display;

use crate::chain::ChainError;
use crate::profile::ProfileError;

/// Error leaving a handler, rendered as `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Logs `cause`; the client only sees `message`.
    pub fn internal(message: &str, cause: impl Display) -> Self {
        error!("{}: {}", message, cause);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

pub trait IntoApiError {
    /// `failure` is the message used when the error is a server fault.
    fn into_api_error(self, failure: &str) -> ApiError;
}

impl IntoApiError for ProfileError {
    fn into_api_error(self, failure: &str) -> ApiError {
        match self {
            ProfileError::NotFound => ApiError::not_found(self.to_string()),
            ProfileError::OutfitNotOwned(_) => ApiError::new(StatusCode::FORBIDDEN, self.to_string()),
            ProfileError::InvalidAddress(_)
            | ProfileError::UsernameTooLong
            | ProfileError::InvalidXp
            | ProfileError::NotPurchasable(_)
            | ProfileError::AlreadyOwned(_) => ApiError::bad_request(self.to_string()),
            ProfileError::Store(e) => ApiError::internal(failure, e),
        }
    }
}

impl IntoApiError for ChainError {
    fn into_api_error(self, failure: &str) -> ApiError {
        match self {
            ChainError::TransactionNotFound => ApiError::not_found(self.to_string()),
            ChainError::NotConfirmed | ChainError::TransactionFailed | ChainError::InvalidBlock(_) => {
                ApiError::bad_request(self.to_string())
            }
            e => ApiError::internal(failure, e),
        }
    }
}

pub trait ApiResultExt<T> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError>;
}

impl<T, E: IntoApiError> ApiResultExt<T> for Result<T, E> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError> {
        self.map_err(|e| e.into_api_error(failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::StoreError;

    #[test]
    fn test_profile_error_statuses() {
        let status = |e: ProfileError| e.into_api_error("Failed").status;
        assert_eq!(status(ProfileError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(ProfileError::OutfitNotOwned(3)), StatusCode::FORBIDDEN);
        assert_eq!(status(ProfileError::AlreadyOwned(3)), StatusCode::BAD_REQUEST);
        assert_eq!(status(ProfileError::InvalidXp), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_errors_are_hidden() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = ProfileError::Store(StoreError::Io(io)).into_api_error("Failed to add XP");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to add XP");
    }

    #[test]
    fn test_chain_error_statuses() {
        assert_eq!(
            ChainError::TransactionNotFound.into_api_error("x").status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ChainError::NotConfirmed.into_api_error("x").message,
            "Transaction not yet confirmed"
        );
    }
}
