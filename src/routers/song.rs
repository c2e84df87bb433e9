use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
    routing::{get, post},
};
use tracing::debug;

use crate::{
    AppState, controllers::SongController, error::ApiError, models::song::Song,
    query::first_values,
};

pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs_route))
        .route("/song", post(add_song_route))
        .route(
            "/song/{id}",
            get(get_song_route)
                .put(update_song_route)
                .delete(delete_song_route),
        )
}

/// An id segment axum cannot decode (e.g. invalid UTF-8) becomes an empty id, which matches no row.
fn raw_id(path: Result<Path<String>, PathRejection>) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(rejection) => {
            debug!("Undecodable song id: {}", rejection);
            String::new()
        }
    }
}

pub async fn list_songs_route(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Song>>, ApiError> {
    SongController::new(state.store())
        .list_songs(&first_values(pairs))
        .await
        .map(Json)
}

pub async fn get_song_route(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Song>, ApiError> {
    SongController::new(state.store())
        .get_song(&raw_id(path))
        .await
        .map(Json)
}

// Bodies are taken raw so that decoding failures map to 400 and happen after the
// existence check on update.
pub async fn add_song_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let song = SongController::new(state.store()).add_song(&body).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

pub async fn update_song_route(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Song>, ApiError> {
    SongController::new(state.store())
        .update_song(&raw_id(path), &body)
        .await
        .map(Json)
}

pub async fn delete_song_route(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    SongController::new(state.store())
        .delete_song(&raw_id(path))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
