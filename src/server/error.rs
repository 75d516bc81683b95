use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_typed_multipart::TypedMultipartError;
use serde::Serialize;
use thiserror::Error;

use crate::pagination::InvalidPage;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no questions on this page")]
    EmptyPage,

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{entity} {id} not found")]
    EntityNotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyPage | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::EntityNotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error_code: u16,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = ErrorBody {
            success: false,
            error_code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Error"),
        };
        (status, Json(body)).into_response()
    }
}

/// Turns `RowNotFound` from a by-id lookup into [`ApiError::EntityNotFound`].
pub trait OrNotFound<T> {
    fn or_not_found(self, entity: &'static str, id: i64) -> ApiResponse<T>;
}

impl<T> OrNotFound<T> for sqlx::Result<T> {
    fn or_not_found(self, entity: &'static str, id: i64) -> ApiResponse<T> {
        match self {
            Err(sqlx::Error::RowNotFound) => Err(ApiError::EntityNotFound { entity, id }),
            other => other.map_err(ApiError::from),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::RouteNotFound
    }
}

impl From<TypedMultipartError> for ApiError {
    fn from(error: TypedMultipartError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<InvalidPage> for ApiError {
    fn from(error: InvalidPage) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}
