use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failure of a song request. Only the display message reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    InvalidInput(#[source] serde_json::Error),

    #[error("Song not found")]
    NotFound,

    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Wraps a storage failure under a generic client-facing `message`.
    pub fn storage(message: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| ApiError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { message, source } = &self {
            error!("{}: {}", message, source);
        }

        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
