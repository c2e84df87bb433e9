use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::{
    error::ApiError,
    models::song::{NewSong, Song, SongPayload},
    query::SongQuery,
    store::SongStore,
};

/// Song CRUD over an injected [`SongStore`]. Holds no state of its own.
pub struct SongController<'a> {
    store: &'a dyn SongStore,
}

impl<'a> SongController<'a> {
    pub fn new(store: &'a dyn SongStore) -> Self {
        SongController { store }
    }

    pub async fn list_songs(&self, params: &HashMap<String, String>) -> Result<Vec<Song>, ApiError> {
        let query = SongQuery::from_params(params);
        info!(
            offset = query.offset,
            limit = query.limit,
            filters = query.filters.len(),
            "Listing songs"
        );

        let songs = self
            .store
            .find_many(&query)
            .await
            .map_err(ApiError::storage("Failed to retrieve songs"))?;

        info!("Found {} songs", songs.len());
        Ok(songs)
    }

    /// Malformed ids are reported as not found, same as a missing row.
    pub async fn get_song(&self, raw_id: &str) -> Result<Song, ApiError> {
        info!("Fetching song {}", raw_id);
        let song = self
            .lookup(raw_id, "Failed to retrieve song")
            .await?
            .ok_or_else(|| not_found(raw_id))?;

        info!("Song {} found", raw_id);
        Ok(song)
    }

    pub async fn add_song(&self, body: &[u8]) -> Result<Song, ApiError> {
        info!("Adding a new song");
        let new_song = NewSong::from(decode(body)?);
        debug!(?new_song, "inserting song");

        let song = self
            .store
            .insert(&new_song)
            .await
            .map_err(ApiError::storage("Failed to save song"))?;

        info!("Song {} added", song.id);
        Ok(song)
    }

    /// Full replace of an existing song.
    ///
    /// The row is looked up before the body is decoded, so an unknown id answers 404 even when
    /// the body is malformed. The stored id is copied onto the replacement explicitly; the body
    /// has no say in which row is written.
    pub async fn update_song(&self, raw_id: &str, body: &[u8]) -> Result<Song, ApiError> {
        info!("Updating song {}", raw_id);
        let existing = self
            .lookup(raw_id, "Failed to retrieve song")
            .await?
            .ok_or_else(|| not_found(raw_id))?;

        let replacement = NewSong::from(decode(body)?).with_id(existing.id);
        debug!(?replacement, "replacing song");

        let song = self
            .store
            .update(&replacement)
            .await
            .map_err(ApiError::storage("Failed to update song"))?
            .ok_or_else(|| not_found(raw_id))?;

        info!("Song {} updated", song.id);
        Ok(song)
    }

    /// Deleting an id with no matching row is not an error.
    pub async fn delete_song(&self, raw_id: &str) -> Result<(), ApiError> {
        info!("Deleting song {}", raw_id);
        let Some(id) = parse_id(raw_id) else {
            debug!("Song id {:?} matches no row, nothing to delete", raw_id);
            return Ok(());
        };

        let removed = self
            .store
            .delete(id)
            .await
            .map_err(ApiError::storage("Failed to delete song"))?;

        info!("Song {} deleted ({} rows)", id, removed);
        Ok(())
    }

    async fn lookup(&self, raw_id: &str, message: &'static str) -> Result<Option<Song>, ApiError> {
        match parse_id(raw_id) {
            Some(id) => self.store.find(id).await.map_err(ApiError::storage(message)),
            None => Ok(None),
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn decode(body: &[u8]) -> Result<SongPayload, ApiError> {
    SongPayload::from_slice(body).map_err(|e| {
        warn!("Invalid song payload: {}", e);
        ApiError::InvalidInput(e)
    })
}

fn not_found(raw_id: &str) -> ApiError {
    warn!("Song {} not found", raw_id);
    ApiError::NotFound
}
