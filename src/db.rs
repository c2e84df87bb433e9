use async_trait::async_trait;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use tracing::debug;

use crate::models::song::{NewSong, Song};
use crate::query::SongQuery;
use crate::store::SongStore;

/// Postgres-backed [`SongStore`]. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `songs` table if it is missing.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl SongStore for Database {
    async fn insert(&self, song: &NewSong) -> Result<Song, sqlx::Error> {
        sqlx::query_as::<_, Song>(
            "INSERT INTO songs (\"group\", song, release_date, text, link) VALUES ($1, $2, $3, $4, $5)
             RETURNING id, \"group\", song, release_date, text, link",
        )
        .bind(&song.group)
        .bind(&song.song)
        .bind(&song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .fetch_one(&self.pool)
        .await
    }

    async fn find(&self, id: i64) -> Result<Option<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(
            "SELECT id, \"group\", song, release_date, text, link FROM songs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_many(&self, query: &SongQuery) -> Result<Vec<Song>, sqlx::Error> {
        let mut builder = query.to_sql();
        debug!(sql = builder.sql(), "listing songs");
        builder.build_query_as::<Song>().fetch_all(&self.pool).await
    }

    async fn update(&self, song: &Song) -> Result<Option<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(
            "UPDATE songs SET \"group\" = $1, song = $2, release_date = $3, text = $4, link = $5
             WHERE id = $6
             RETURNING id, \"group\", song, release_date, text, link",
        )
        .bind(&song.group)
        .bind(&song.song)
        .bind(&song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .bind(song.id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
