//! Storage gateway for songs.
//!
//! Handlers only see [`SongStore`]; the Postgres implementation lives in [`crate::db`].

use async_trait::async_trait;

use crate::models::song::{NewSong, Song};
use crate::query::SongQuery;

#[cfg(test)]
pub(crate) mod memory;

#[async_trait]
pub trait SongStore: Send + Sync {
    /// Inserts a song and returns it with its store-assigned id.
    async fn insert(&self, song: &NewSong) -> Result<Song, sqlx::Error>;

    async fn find(&self, id: i64) -> Result<Option<Song>, sqlx::Error>;

    async fn find_many(&self, query: &SongQuery) -> Result<Vec<Song>, sqlx::Error>;

    /// Overwrites every field of the row with `song.id`. Returns `None` when no such row exists.
    async fn update(&self, song: &Song) -> Result<Option<Song>, sqlx::Error>;

    /// Deletes the row with `id`, returning the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}
