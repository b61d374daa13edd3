//! HTTP Error Mapping
//!
//! Every failure is rendered as a plain-text body.

use axum::extract::rejection::{BytesRejection, FormRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use userq_core::error::AppError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::App(AppError::Validation(_)) | ApiError::App(AppError::Domain(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { status, .. } => *status,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!(
            "Failed to parse the request body as JSON: {}",
            err
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userq_core::domain::DomainError;

    #[test]
    fn test_status_mapping() {
        let queue_down = ApiError::from(AppError::Queue("down".to_string()));
        assert_eq!(queue_down.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::from(AppError::Validation("user_id is required".to_string()));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let composite = ApiError::from(AppError::from(DomainError::UnsupportedUserId(
            "array".to_string(),
        )));
        assert_eq!(composite.status(), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            ApiError::bad_request("nope").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
