use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("could not assign a unique booking id after {attempts} attempts")]
    IdentifierExhausted { attempts: usize },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("notifier error: {0}")]
    Notifier(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::IdentifierExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Notifier(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
