use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::song::{NewSong, Song};
use crate::query::{SongColumn, SongQuery};
use crate::store::SongStore;

/// In-memory [`SongStore`] with the same id sequence, ordering and filtering as Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    failing: bool,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Song>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the pool had been closed.
    pub fn failing() -> Self {
        MemoryStore {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing {
            Err(sqlx::Error::PoolClosed)
        } else {
            Ok(())
        }
    }
}

fn value_of(column: SongColumn, song: &Song) -> &str {
    match column {
        SongColumn::Group => &song.group,
        SongColumn::Song => &song.song,
        SongColumn::ReleaseDate => &song.release_date,
    }
}

/// Mirrors the SQL `WHERE`: every filter is an exact, case-sensitive equality.
fn matches(query: &SongQuery, song: &Song) -> bool {
    query
        .filters
        .iter()
        .all(|filter| value_of(filter.column, song) == filter.value)
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn insert(&self, song: &NewSong) -> Result<Song, sqlx::Error> {
        self.check()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let song = song.clone().with_id(inner.last_id);
        inner.rows.insert(song.id, song.clone());
        Ok(song)
    }

    async fn find(&self, id: i64) -> Result<Option<Song>, sqlx::Error> {
        self.check()?;
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_many(&self, query: &SongQuery) -> Result<Vec<Song>, sqlx::Error> {
        self.check()?;
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|song| matches(query, song))
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn update(&self, song: &Song) -> Result<Option<Song>, sqlx::Error> {
        self.check()?;
        let mut inner = self.inner.write().await;
        Ok(inner.rows.get_mut(&song.id).map(|row| {
            *row = song.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.check()?;
        Ok(self.inner.write().await.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SongFilter;

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let query = SongQuery {
            filters: vec![SongFilter {
                column: SongColumn::Group,
                value: "Muse".into(),
            }],
            ..SongQuery::default()
        };
        let mut song = NewSong {
            group: "Muse".into(),
            ..Default::default()
        }
        .with_id(1);
        assert!(matches(&query, &song));
        song.group = "muse".into();
        assert!(!matches(&query, &song));
        song.group = "Muse ".into();
        assert!(!matches(&query, &song));
    }
}
