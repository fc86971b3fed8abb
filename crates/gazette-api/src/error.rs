use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gazette_db::{DbError, ErrorKind};
use gazette_types::api::ErrorResponse;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Db(e) if e.is_constraint_violation() => StatusCode::BAD_REQUEST,
            ApiError::Db(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Storage details stay in the log.
            error!("Request failed: {}", self);
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            status: status.as_u16(),
        });
        (status, body).into_response()
    }
}
