use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::store::SongStore;

pub struct RootController;

impl RootController {
    pub async fn root() -> Response {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
            .into_response()
    }

    /// Reports 503 when the store does not answer.
    pub async fn health_check(store: &dyn SongStore) -> Response {
        match store.ping().await {
            Ok(()) => (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response(),
            Err(e) => {
                error!("Health check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({"status": "unavailable"})),
                )
                    .into_response()
            }
        }
    }
}
