//! Mapping from domain errors to HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::common::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Admin authorization required")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::InvalidTransition { .. } | DomainError::DuplicateSubmission(_) => {
                    StatusCode::CONFLICT
                }
                DomainError::Upstream(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.kind(),
            ApiError::Unauthorized => "unauthorized",
            ApiError::BadRequest(_) => "bad_request",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Domain(DomainError::Upstream(ref err)) = self {
            error!(error = %err, "Database call failed");
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Parse a path segment into a typed id, answering 400 on garbage.
pub fn parse_id<T>(raw: &str) -> ApiResult<crate::common::Id<T>> {
    crate::common::Id::parse(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}
