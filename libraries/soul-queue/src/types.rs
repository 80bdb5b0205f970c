//! Core types for queue state
//!
//! Field names serialize in camelCase because the state is consumed as-is
//! by the web client's player widget.

use crate::ids::EntryId;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Raw track record as delivered by the library views
///
/// Only the fields the queue needs are typed; everything else is kept in
/// `extra` so the record can be handed back to the UI untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Record identifier (a playlist-track id for playlist entries)
    pub id: String,

    /// Underlying media file, set when the record comes from a playlist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_file_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,

    /// Last modification timestamp, used to bust cover art caches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Any other fields of the record
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Track {
    /// Create a bare record with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_file_id: None,
            title: None,
            artist: None,
            duration: None,
            album_id: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Identifier of the playable media file
    ///
    /// Playlist records point at their media file through `media_file_id`;
    /// plain song records are the media file themselves.
    pub fn track_id(&self) -> &str {
        match self.media_file_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.id,
        }
    }
}

/// Ordered collection of keyed track records
///
/// Commands carry tracks as a key -> record mapping. The order of the pairs
/// is the play order, so this keeps them in a `Vec` and deserializes JSON
/// objects in document order. A JSON array is accepted too, keyed by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList(Vec<(String, Track)>);

impl TrackList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, track: Track) {
        self.0.push((key.into(), track));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, record)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Track)> {
        self.0.iter().map(|(key, track)| (key.as_str(), track))
    }

    /// Iterate over records in order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.0.iter().map(|(_, track)| track)
    }

    /// Position of the pair with the given key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>> FromIterator<(K, Track)> for TrackList {
    fn from_iter<I: IntoIterator<Item = (K, Track)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }
}

impl Serialize for TrackList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, track) in &self.0 {
            map.serialize_entry(key, track)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TrackList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TrackListVisitor;

        impl<'de> Visitor<'de> for TrackListVisitor {
            type Value = TrackList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of track records or an array of track records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TrackList, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, track)) = access.next_entry::<String, Track>()? {
                    pairs.push((key, track));
                }
                Ok(TrackList(pairs))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<TrackList, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(track) = access.next_element::<Track>()? {
                    pairs.push((pairs.len().to_string(), track));
                }
                Ok(TrackList(pairs))
            }
        }

        deserializer.deserialize_any(TrackListVisitor)
    }
}

/// A track decorated for the player widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub track_id: String,

    /// Unique per entry, so the same track can be queued twice
    pub uuid: EntryId,

    /// Original record, untouched
    pub song: Track,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Streaming URL
    pub music_src: String,

    /// Cover art URL
    pub cover: String,

    /// Fields the player widget attaches to its list items
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Entry the player is currently positioned on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTrack {
    /// Index reported by the player widget
    #[serde(default)]
    pub idx: usize,

    #[serde(default)]
    pub track_id: String,

    #[serde(default)]
    pub paused: bool,

    pub uuid: EntryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<Track>,
}

/// Complete queue state handed to the player widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Entries in play order
    pub queue: Vec<QueueEntry>,

    /// `None` when nothing is playing; serialized as `{}`
    #[serde(default, with = "empty_object")]
    pub current: Option<CurrentTrack>,

    /// Tells the widget to drop its cached queue identity
    pub clear: bool,

    pub volume: f64,

    /// Position of `current` within `queue`, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_index: Option<usize>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    /// Initial state: empty queue, nothing playing, full volume
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            clear: false,
            volume: 1.0,
            play_index: None,
        }
    }

    /// Initial state flagged as a reset
    pub fn cleared() -> Self {
        Self {
            clear: true,
            ..Self::new()
        }
    }

    /// Position of the entry with the given uuid
    pub fn position_of(&self, uuid: &EntryId) -> Option<usize> {
        self.queue.iter().position(|entry| &entry.uuid == uuid)
    }

    /// Uuid of the current entry, if any
    pub fn current_uuid(&self) -> Option<&EntryId> {
        self.current.as_ref().map(|current| &current.uuid)
    }

    /// Queue entry at `play_index`
    pub fn current_entry(&self) -> Option<&QueueEntry> {
        self.play_index.and_then(|idx| self.queue.get(idx))
    }

    /// Serialize to the JSON shape the web client consumes
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `Option<CurrentTrack>` as `{}` when absent
///
/// Only `{}` and `null` read back as `None`; any other shape must be a
/// well-formed current track.
mod empty_object {
    use super::CurrentTrack;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Empty {}

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Track(CurrentTrack),
        Empty(Empty),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<CurrentTrack>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(current) => current.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<CurrentTrack>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Track(current)) => Ok(Some(current)),
            Some(Repr::Empty(_)) | None => Ok(None),
        }
    }
}
