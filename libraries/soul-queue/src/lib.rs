//! Soul Player - Queue State
//!
//! Playback queue state for the Soul Player web client.
//!
//! This crate provides:
//! - Queue state model (entries, current track, volume, play index)
//! - Track decoration (display fields, stream and cover art URLs, entry ids)
//! - A pure reducer over the player's command set
//! - JSON command decoding matching the web client's action format
//! - WASM bindings (feature `wasm`)
//!
//! # Architecture
//!
//! `soul-queue` does no I/O. URL construction and id generation are
//! provided via traits ([`UrlBuilder`], [`IdGenerator`]); configuration is
//! passed in explicitly as a [`QueueConfig`].
//!
//! # Example
//!
//! ```rust
//! use soul_queue::{
//!     Command, CoverArtRequest, PlaybackState, QueueConfig, QueueReducer, Track, TrackList,
//!     UrlBuilder,
//! };
//!
//! struct Urls;
//!
//! impl UrlBuilder for Urls {
//!     fn stream_url(&self, track_id: &str) -> String {
//!         format!("/rest/stream?id={track_id}")
//!     }
//!
//!     fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String {
//!         format!("/rest/getCoverArt?id={}&size={size}", request.cover_art_id)
//!     }
//! }
//!
//! let reducer = QueueReducer::with_uuids(Urls, QueueConfig::default());
//!
//! let mut data = TrackList::new();
//! data.push("a", Track::new("a"));
//! data.push("b", Track::new("b"));
//!
//! let state = reducer.reduce(
//!     &PlaybackState::new(),
//!     &Command::PlayTracks { data, id: Some("b".to_string()) },
//! );
//!
//! assert_eq!(state.queue.len(), 2);
//! assert_eq!(state.play_index, Some(1));
//! assert_eq!(state.queue[1].music_src, "/rest/stream?id=b");
//! ```

mod command;
mod config;
mod decorate;
mod error;
mod ids;
mod reducer;
mod store;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use command::{Command, CurrentUpdate, VolumeChange};
pub use config::QueueConfig;
pub use decorate::{decorate_track, CoverArtRequest, UrlBuilder};
pub use error::{QueueError, Result};
pub use ids::{EntryId, IdGenerator, UuidGenerator};
pub use reducer::QueueReducer;
pub use store::QueueStore;
pub use types::{CurrentTrack, PlaybackState, QueueEntry, Track, TrackList};
