use axum::{extract::State, response::IntoResponse};

use crate::AppState;
use crate::controllers::RootController;

pub async fn root_route() -> impl IntoResponse {
    RootController::root().await
}

pub async fn health_check_route(State(state): State<AppState>) -> impl IntoResponse {
    RootController::health_check(state.store()).await
}
