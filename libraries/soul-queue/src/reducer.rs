//! Queue state reducer
//!
//! `reduce(previous, command) -> next`. The previous state is only borrowed;
//! every transition builds a fresh [`PlaybackState`].

use crate::command::{Command, CurrentUpdate};
use crate::config::QueueConfig;
use crate::decorate::{decorate_track, UrlBuilder};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::types::{PlaybackState, QueueEntry, Track, TrackList};
use tracing::{debug, trace, warn};

/// Applies commands to playback state
///
/// Holds the collaborators used to decorate incoming tracks. Apart from the
/// ids it hands out, output depends only on the previous state and the
/// command.
#[derive(Debug, Clone)]
pub struct QueueReducer<U, G = UuidGenerator> {
    urls: U,
    ids: G,
    config: QueueConfig,
}

impl<U: UrlBuilder> QueueReducer<U, UuidGenerator> {
    /// Create a reducer that tags entries with random UUIDs
    pub fn with_uuids(urls: U, config: QueueConfig) -> Self {
        Self::new(urls, UuidGenerator, config)
    }
}

impl<U: UrlBuilder, G: IdGenerator> QueueReducer<U, G> {
    pub fn new(urls: U, ids: G, config: QueueConfig) -> Self {
        Self { urls, ids, config }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Compute the state that follows `previous` under `command`
    pub fn reduce(&self, previous: &PlaybackState, command: &Command) -> PlaybackState {
        match command {
            Command::Clear => Self::reduce_clear_queue(),
            Command::PlayTracks { data, id } => self.reduce_play_tracks(previous, data, id.as_deref()),
            Command::SetTrack { data } => self.reduce_set_track(previous, data),
            Command::AddTracks { data } => self.reduce_add_tracks(previous, data),
            Command::PlayNext { data } => self.reduce_play_next(previous, data),
            Command::SyncQueue { data } => Self::reduce_sync_queue(previous, data),
            Command::SetVolume { data } => Self::reduce_set_volume(previous, data.volume),
            Command::Current { data } => Self::reduce_current(previous, data),
            Command::Unknown => {
                trace!("Ignoring unhandled command");
                previous.clone()
            }
        }
    }

    fn decorate(&self, track: &Track) -> QueueEntry {
        decorate_track(track, &self.urls, &self.ids, &self.config)
    }

    fn decorate_all<'a>(&'a self, data: &'a TrackList) -> impl Iterator<Item = QueueEntry> + 'a {
        data.tracks().map(|track| self.decorate(track))
    }

    fn reduce_clear_queue() -> PlaybackState {
        debug!("Clearing queue");
        PlaybackState::cleared()
    }

    fn reduce_play_tracks(
        &self,
        previous: &PlaybackState,
        data: &TrackList,
        id: Option<&str>,
    ) -> PlaybackState {
        let queue: Vec<QueueEntry> = self.decorate_all(data).collect();

        // Unknown or missing start key plays from the top
        let play_index = id.and_then(|id| data.position(id)).unwrap_or(0);

        debug!(tracks = queue.len(), play_index, "Playing tracks");

        PlaybackState {
            queue,
            play_index: Some(play_index),
            clear: true,
            ..previous.clone()
        }
    }

    fn reduce_set_track(&self, previous: &PlaybackState, data: &Track) -> PlaybackState {
        debug!(track_id = data.track_id(), "Setting single track");

        PlaybackState {
            queue: vec![self.decorate(data)],
            play_index: Some(0),
            clear: true,
            ..previous.clone()
        }
    }

    fn reduce_add_tracks(&self, previous: &PlaybackState, data: &TrackList) -> PlaybackState {
        let mut queue = Vec::with_capacity(previous.queue.len() + data.len());
        queue.extend(previous.queue.iter().cloned());
        queue.extend(self.decorate_all(data));

        debug!(added = data.len(), queue_len = queue.len(), "Added tracks");

        PlaybackState {
            queue,
            clear: false,
            ..previous.clone()
        }
    }

    fn reduce_play_next(&self, previous: &PlaybackState, data: &TrackList) -> PlaybackState {
        // Position in the queue as it was before insertion. New entries go
        // after the current one, so this is also its position afterwards.
        let position = previous
            .current_uuid()
            .and_then(|uuid| previous.position_of(uuid));

        let mut queue = Vec::with_capacity(previous.queue.len() + data.len());
        match position {
            Some(pos) => {
                queue.extend_from_slice(&previous.queue[..=pos]);
                queue.extend(self.decorate_all(data));
                queue.extend_from_slice(&previous.queue[pos + 1..]);
            }
            None => {
                warn!("No current entry in queue, appending play-next tracks");
                queue.extend(previous.queue.iter().cloned());
                queue.extend(self.decorate_all(data));
            }
        }

        debug!(added = data.len(), play_index = position, "Queued tracks to play next");

        PlaybackState {
            queue,
            play_index: position,
            clear: true,
            ..previous.clone()
        }
    }

    fn reduce_sync_queue(previous: &PlaybackState, data: &[QueueEntry]) -> PlaybackState {
        let current = if data.is_empty() {
            None
        } else {
            previous.current.clone()
        };

        debug!(queue_len = data.len(), "Synced queue from player");

        PlaybackState {
            queue: data.to_vec(),
            current,
            ..previous.clone()
        }
    }

    fn reduce_set_volume(previous: &PlaybackState, volume: f64) -> PlaybackState {
        debug!(volume, "Volume changed");

        PlaybackState {
            volume,
            ..previous.clone()
        }
    }

    fn reduce_current(previous: &PlaybackState, data: &CurrentUpdate) -> PlaybackState {
        let current = data.to_current();
        let play_index = current
            .as_ref()
            .and_then(|current| previous.position_of(&current.uuid));

        trace!(
            ended = data.ended,
            paused = data.paused,
            play_index,
            "Current track update"
        );

        PlaybackState {
            current,
            play_index,
            volume: data.volume,
            ..previous.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::VolumeChange;
    use crate::decorate::CoverArtRequest;
    use crate::ids::EntryId;
    use crate::types::CurrentTrack;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeUrls;

    impl UrlBuilder for FakeUrls {
        fn stream_url(&self, track_id: &str) -> String {
            format!("stream:{track_id}")
        }

        fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String {
            format!("cover:{}:{size}", request.cover_art_id)
        }
    }

    #[derive(Default)]
    struct SequentialIds(AtomicUsize);

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> EntryId {
            EntryId::new(format!("u{}", self.0.fetch_add(1, Ordering::Relaxed)))
        }
    }

    fn reducer() -> QueueReducer<FakeUrls, SequentialIds> {
        QueueReducer::new(FakeUrls, SequentialIds::default(), QueueConfig::default())
    }

    fn tracks(ids: &[&str]) -> TrackList {
        ids.iter().map(|id| (*id, Track::new(*id))).collect()
    }

    fn current(uuid: &str) -> CurrentTrack {
        CurrentTrack {
            idx: 0,
            track_id: String::new(),
            paused: false,
            uuid: EntryId::new(uuid),
            song: None,
        }
    }

    #[test]
    fn clear_resets_everything() {
        let r = reducer();
        let mut state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["a"]) },
        );
        state.volume = 0.3;
        state.current = Some(current("u0"));

        let cleared = r.reduce(&state, &Command::Clear);
        assert_eq!(cleared, PlaybackState::cleared());
    }

    #[test]
    fn play_tracks_starts_at_key() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::PlayTracks {
                data: tracks(&["a", "b", "c"]),
                id: Some("c".to_string()),
            },
        );

        assert_eq!(state.queue.len(), 3);
        assert_eq!(state.play_index, Some(2));
        assert!(state.clear);
        assert_eq!(state.queue[2].music_src, "stream:c");
    }

    #[test]
    fn play_tracks_defaults_to_first() {
        let r = reducer();
        let missing = r.reduce(
            &PlaybackState::new(),
            &Command::PlayTracks {
                data: tracks(&["a", "b"]),
                id: Some("zz".to_string()),
            },
        );
        assert_eq!(missing.play_index, Some(0));

        let absent = r.reduce(
            &PlaybackState::new(),
            &Command::PlayTracks {
                data: tracks(&["a", "b"]),
                id: None,
            },
        );
        assert_eq!(absent.play_index, Some(0));
    }

    #[test]
    fn set_track_decorates_the_record() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::SetTrack {
                data: Track::new("solo"),
            },
        );

        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.queue[0].track_id, "solo");
        assert_eq!(state.play_index, Some(0));
        assert!(state.clear);
    }

    #[test]
    fn add_tracks_appends_and_unsets_clear() {
        let r = reducer();
        let first = r.reduce(
            &PlaybackState::new(),
            &Command::PlayTracks {
                data: tracks(&["a"]),
                id: None,
            },
        );
        let second = r.reduce(&first, &Command::AddTracks { data: tracks(&["b", "c"]) });

        let ids: Vec<&str> = second.queue.iter().map(|e| e.track_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(!second.clear);
        assert_eq!(second.play_index, Some(0));
        // previous state untouched
        assert_eq!(first.queue.len(), 1);
    }

    #[test]
    fn play_next_inserts_after_current() {
        let r = reducer();
        let mut state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x", "y"]) },
        );
        state.current = Some(current("u0"));

        let next = r.reduce(&state, &Command::PlayNext { data: tracks(&["z"]) });

        let ids: Vec<&str> = next.queue.iter().map(|e| e.track_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "z", "y"]);
        assert_eq!(next.play_index, Some(0));
        assert!(next.clear);
    }

    #[test]
    fn play_next_without_current_appends() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x", "y"]) },
        );

        let next = r.reduce(&state, &Command::PlayNext { data: tracks(&["z"]) });

        let ids: Vec<&str> = next.queue.iter().map(|e| e.track_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(next.play_index, None);
    }

    #[test]
    fn sync_queue_keeps_current_only_when_non_empty() {
        let r = reducer();
        let mut state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x", "y"]) },
        );
        state.current = Some(current("u1"));

        let reversed: Vec<QueueEntry> = state.queue.iter().rev().cloned().collect();
        let synced = r.reduce(&state, &Command::SyncQueue { data: reversed.clone() });
        assert_eq!(synced.queue, reversed);
        assert_eq!(synced.current, state.current);

        let emptied = r.reduce(&state, &Command::SyncQueue { data: Vec::new() });
        assert!(emptied.queue.is_empty());
        assert!(emptied.current.is_none());
        assert_eq!(emptied.volume, state.volume);
        assert_eq!(emptied.clear, state.clear);
    }

    #[test]
    fn set_volume_changes_only_volume() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x"]) },
        );

        let next = r.reduce(
            &state,
            &Command::SetVolume {
                data: VolumeChange { volume: 0.5 },
            },
        );
        assert_eq!(next, PlaybackState { volume: 0.5, ..state });
    }

    #[test]
    fn current_update_tracks_play_index() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x", "y"]) },
        );

        let update = CurrentUpdate {
            ended: false,
            idx: 1,
            track_id: "y".to_string(),
            paused: true,
            uuid: Some(EntryId::new("u1")),
            song: None,
            volume: 0.8,
        };
        let playing = r.reduce(&state, &Command::Current { data: update.clone() });
        assert_eq!(playing.play_index, Some(1));
        assert_eq!(playing.current.as_ref().map(|c| c.paused), Some(true));
        assert_eq!(playing.volume, 0.8);

        let ended = r.reduce(
            &playing,
            &Command::Current {
                data: CurrentUpdate {
                    ended: true,
                    volume: 0.6,
                    ..update
                },
            },
        );
        assert!(ended.current.is_none());
        assert_eq!(ended.play_index, None);
        assert_eq!(ended.volume, 0.6);
    }

    #[test]
    fn current_update_with_unknown_uuid_has_no_index() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x"]) },
        );

        let next = r.reduce(
            &state,
            &Command::Current {
                data: CurrentUpdate {
                    ended: false,
                    idx: 0,
                    track_id: "gone".to_string(),
                    paused: false,
                    uuid: Some(EntryId::new("stale")),
                    song: None,
                    volume: 1.0,
                },
            },
        );
        assert!(next.current.is_some());
        assert_eq!(next.play_index, None);
    }

    #[test]
    fn unknown_command_is_a_no_op() {
        let r = reducer();
        let state = r.reduce(
            &PlaybackState::new(),
            &Command::AddTracks { data: tracks(&["x"]) },
        );
        assert_eq!(r.reduce(&state, &Command::Unknown), state);
    }
}
