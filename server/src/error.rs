use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("checkout session not paid")]
    PaymentNotCompleted,

    #[error("sign in failed")]
    SignInFailed,

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("store io error: {0}")]
    StoreIo(#[from] std::io::Error),

    #[error("store data error: {0}")]
    StoreData(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

/// The error body every handler answers with, mirroring the response status.
#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PaymentNotCompleted => StatusCode::PAYMENT_REQUIRED,
            AppError::SignInFailed => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::StoreIo { .. } | AppError::StoreData { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
