//! Queue commands
//!
//! One variant per player action the web client dispatches. On the wire a
//! command is a JSON object with a `type` tag, e.g.
//! `{"type": "PLAYER_SET_VOLUME", "data": {"volume": 0.5}}`.

use crate::error::{QueueError, Result};
use crate::ids::EntryId;
use crate::types::{CurrentTrack, QueueEntry, Track, TrackList};
use serde::{Deserialize, Serialize};

/// A single state transition request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Empty the queue and reset to the initial state
    #[serde(rename = "PLAYER_CLEAR_QUEUE")]
    Clear,

    /// Replace the queue and start playing the track keyed by `id`
    #[serde(rename = "PLAYER_PLAY_TRACKS")]
    PlayTracks {
        data: TrackList,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Replace the queue with a single track
    #[serde(rename = "PLAYER_SET_TRACK")]
    SetTrack { data: Track },

    /// Append tracks to the end of the queue
    #[serde(rename = "PLAYER_ADD_TRACKS")]
    AddTracks { data: TrackList },

    /// Insert tracks right after the current one
    #[serde(rename = "PLAYER_PLAY_NEXT")]
    PlayNext { data: TrackList },

    /// Adopt the queue as reordered/edited by the player widget
    #[serde(rename = "PLAYER_SYNC_QUEUE")]
    SyncQueue { data: Vec<QueueEntry> },

    #[serde(rename = "PLAYER_SET_VOLUME")]
    SetVolume { data: VolumeChange },

    /// Progress report from the player widget
    #[serde(rename = "PLAYER_CURRENT")]
    Current { data: CurrentUpdate },

    /// Any action this reducer does not handle
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Decode a command from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QueueError::InvalidCommand(e.to_string()))
    }

    /// Decode a command from an already parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| QueueError::InvalidCommand(e.to_string()))
    }

    /// Action tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Clear => "PLAYER_CLEAR_QUEUE",
            Command::PlayTracks { .. } => "PLAYER_PLAY_TRACKS",
            Command::SetTrack { .. } => "PLAYER_SET_TRACK",
            Command::AddTracks { .. } => "PLAYER_ADD_TRACKS",
            Command::PlayNext { .. } => "PLAYER_PLAY_NEXT",
            Command::SyncQueue { .. } => "PLAYER_SYNC_QUEUE",
            Command::SetVolume { .. } => "PLAYER_SET_VOLUME",
            Command::Current { .. } => "PLAYER_CURRENT",
            Command::Unknown => "UNKNOWN",
        }
    }
}

/// Payload of [`Command::SetVolume`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeChange {
    pub volume: f64,
}

/// Payload of [`Command::Current`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUpdate {
    /// Playback reached the end of the queue
    #[serde(default)]
    pub ended: bool,

    #[serde(default)]
    pub idx: usize,

    #[serde(default)]
    pub track_id: String,

    #[serde(default)]
    pub paused: bool,

    #[serde(default)]
    pub uuid: Option<EntryId>,

    #[serde(default)]
    pub song: Option<Track>,

    /// Volume the widget is playing at
    pub volume: f64,
}

impl CurrentUpdate {
    /// The current-track descriptor this update describes
    ///
    /// `None` once playback has ended, or when the widget reports no entry.
    pub fn to_current(&self) -> Option<CurrentTrack> {
        if self.ended {
            return None;
        }

        self.uuid.clone().map(|uuid| CurrentTrack {
            idx: self.idx,
            track_id: self.track_id.clone(),
            paused: self.paused,
            uuid,
            song: self.song.clone(),
        })
    }
}
