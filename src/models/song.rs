use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry as stored in the `songs` table.
#[derive(Deserialize, Serialize, FromRow, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub group: String,
    pub song: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Field set of a song without its identity, used for inserts and full replacements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl NewSong {
    pub fn with_id(self, id: i64) -> Song {
        Song {
            id,
            group: self.group,
            song: self.song,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Inbound song representation.
///
/// Deliberately has no `id` field: any `id` sent by a client is skipped during decoding, so the
/// identity of a record always comes from the store (create) or the request path (update).
/// Absent and `null` fields both decode to `None` and are stored as empty strings.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPayload {
    /// Only a JSON object is accepted; arrays would otherwise fill the fields positionally.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)?;
        serde_json::from_value(serde_json::Value::Object(object))
    }
}

impl From<SongPayload> for NewSong {
    fn from(payload: SongPayload) -> Self {
        NewSong {
            group: payload.group.unwrap_or_default(),
            song: payload.song.unwrap_or_default(),
            release_date: payload.release_date.unwrap_or_default(),
            text: payload.text.unwrap_or_default(),
            link: payload.link.unwrap_or_default(),
        }
    }
}
