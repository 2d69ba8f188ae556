use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyReviewed(String),
    #[error("mark must be between 0 and 10, got {0}")]
    InvalidMark(i32),
    #[error("incorrect login or password")]
    AuthFailed,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AlreadyExists(_)
            | AppError::NotFound(_)
            | AppError::AlreadyReviewed(_)
            | AppError::InvalidMark(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": self.to_string() })))
                    .into_response()
            }
            AppError::AuthFailed => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic")],
                Json(json!({ "detail": self.to_string() })),
            )
                .into_response(),
            AppError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
