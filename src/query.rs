//! Pagination and filtering for song listings.
//!
//! Request parameters are parsed into a plain [`SongQuery`] value. Parsing never fails:
//! unusable `page`/`limit` values fall back to their defaults and empty filters are dropped.

use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Columns a listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongColumn {
    Group,
    Song,
    ReleaseDate,
}

impl SongColumn {
    pub const ALL: [SongColumn; 3] = [SongColumn::Group, SongColumn::Song, SongColumn::ReleaseDate];

    /// Name of the query-string parameter.
    pub const fn param(self) -> &'static str {
        match self {
            SongColumn::Group => "group",
            SongColumn::Song => "song",
            SongColumn::ReleaseDate => "releaseDate",
        }
    }

    /// SQL identifier of the column. `group` is a reserved word and stays quoted.
    pub const fn column(self) -> &'static str {
        match self {
            SongColumn::Group => "\"group\"",
            SongColumn::Song => "song",
            SongColumn::ReleaseDate => "release_date",
        }
    }
}

/// Exact, case-sensitive match on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFilter {
    pub column: SongColumn,
    pub value: String,
}

/// A bounded, optionally filtered read over the song collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub offset: i64,
    pub limit: i64,
    pub filters: Vec<SongFilter>,
}

impl Default for SongQuery {
    fn default() -> Self {
        SongQuery {
            offset: 0,
            limit: DEFAULT_LIMIT,
            filters: Vec::new(),
        }
    }
}

impl SongQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let page = parse_positive(params.get("page"), DEFAULT_PAGE);
        // No upper bound.
        let limit = parse_positive(params.get("limit"), DEFAULT_LIMIT);

        let filters = SongColumn::ALL
            .into_iter()
            .filter_map(|column| {
                params
                    .get(column.param())
                    .filter(|value| !value.is_empty())
                    .map(|value| SongFilter {
                        column,
                        value: value.clone(),
                    })
            })
            .collect();

        SongQuery {
            offset: (page - 1).saturating_mul(limit),
            limit,
            filters,
        }
    }

    /// Renders the query as a parameterised `SELECT`, ordered by id.
    pub fn to_sql(&self) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new(
            "SELECT id, \"group\", song, release_date, text, link FROM songs",
        );

        for (i, filter) in self.filters.iter().enumerate() {
            builder
                .push(if i == 0 { " WHERE " } else { " AND " })
                .push(filter.column.column())
                .push(" = ")
                .push_bind(filter.value.as_str());
        }

        builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.offset);

        builder
    }
}

/// Collapses repeated query keys, keeping the first value of each.
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

fn parse_positive(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}
