pub mod root;
pub mod song;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
pub use root::{health_check_route, root_route};
pub use song::song_routes;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .merge(song_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
