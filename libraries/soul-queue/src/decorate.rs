//! Track decoration
//!
//! Turns a raw track record into a [`QueueEntry`] the player widget can use:
//! display fields, a streaming URL, a cover art URL and a fresh entry id.
//! URL construction is platform-specific and provided via [`UrlBuilder`].

use crate::config::QueueConfig;
use crate::ids::IdGenerator;
use crate::types::{QueueEntry, Track};
use serde::Serialize;

/// Parameters for a cover art URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverArtRequest<'a> {
    /// Id the artwork is looked up (and cached) by
    pub cover_art_id: &'a str,

    /// Cache-busting timestamp of the source record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<&'a str>,
}

/// Builds the URLs a queue entry points at
pub trait UrlBuilder {
    /// Streaming URL for a media file
    fn stream_url(&self, track_id: &str) -> String;

    /// Cover art URL at the given thumbnail size
    fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String;
}

impl<U: UrlBuilder + ?Sized> UrlBuilder for &U {
    fn stream_url(&self, track_id: &str) -> String {
        (**self).stream_url(track_id)
    }

    fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String {
        (**self).cover_art_url(request, size)
    }
}

/// Decorate a single track record
///
/// With `fast_access_cover_art` enabled the cover is keyed by album, so every
/// track of an album shares one cached image. Records without an album id
/// fall back to their own track id.
pub fn decorate_track<U, G>(track: &Track, urls: &U, ids: &G, config: &QueueConfig) -> QueueEntry
where
    U: UrlBuilder + ?Sized,
    G: IdGenerator + ?Sized,
{
    let track_id = track.track_id();

    let cover_art_id = if config.fast_access_cover_art {
        track.album_id.as_deref().unwrap_or(track_id)
    } else {
        track_id
    };

    let cover = urls.cover_art_url(
        &CoverArtRequest {
            cover_art_id,
            updated_at: track.updated_at.as_deref(),
        },
        config.cover_art_size,
    );

    QueueEntry {
        track_id: track_id.to_string(),
        uuid: ids.generate(),
        song: track.clone(),
        name: track.title.clone(),
        singer: track.artist.clone(),
        duration: track.duration,
        music_src: urls.stream_url(track_id),
        cover,
        extra: serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EntryId, UuidGenerator};

    struct FakeUrls;

    impl UrlBuilder for FakeUrls {
        fn stream_url(&self, track_id: &str) -> String {
            format!("/stream/{track_id}")
        }

        fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String {
            format!(
                "/cover/{}?size={size}&t={}",
                request.cover_art_id,
                request.updated_at.unwrap_or("")
            )
        }
    }

    struct FixedId;

    impl IdGenerator for FixedId {
        fn generate(&self) -> EntryId {
            EntryId::new("fixed")
        }
    }

    fn song() -> Track {
        Track {
            title: Some("Blue in Green".to_string()),
            artist: Some("Miles Davis".to_string()),
            duration: Some(337.0),
            album_id: Some("al-1".to_string()),
            updated_at: Some("2024-01-01".to_string()),
            ..Track::new("tr-1")
        }
    }

    #[test]
    fn copies_display_fields_and_builds_urls() {
        let entry = decorate_track(&song(), &FakeUrls, &FixedId, &QueueConfig::default());

        assert_eq!(entry.track_id, "tr-1");
        assert_eq!(entry.uuid, EntryId::new("fixed"));
        assert_eq!(entry.name.as_deref(), Some("Blue in Green"));
        assert_eq!(entry.singer.as_deref(), Some("Miles Davis"));
        assert_eq!(entry.duration, Some(337.0));
        assert_eq!(entry.music_src, "/stream/tr-1");
        assert_eq!(entry.cover, "/cover/tr-1?size=300&t=2024-01-01");
        assert_eq!(entry.song, song());
    }

    #[test]
    fn playlist_records_use_media_file_id() {
        let track = Track {
            media_file_id: Some("mf-7".to_string()),
            ..Track::new("pl-track-3")
        };

        let entry = decorate_track(&track, &FakeUrls, &FixedId, &QueueConfig::default());
        assert_eq!(entry.track_id, "mf-7");
        assert_eq!(entry.music_src, "/stream/mf-7");
        assert_eq!(entry.song.id, "pl-track-3");
    }

    #[test]
    fn fast_access_cover_art_uses_album_id() {
        let config = QueueConfig {
            fast_access_cover_art: true,
            cover_art_size: 64,
        };

        let entry = decorate_track(&song(), &FakeUrls, &FixedId, &config);
        assert_eq!(entry.cover, "/cover/al-1?size=64&t=2024-01-01");

        let no_album = Track::new("tr-2");
        let entry = decorate_track(&no_album, &FakeUrls, &FixedId, &config);
        assert_eq!(entry.cover, "/cover/tr-2?size=64&t=");
    }

    #[test]
    fn each_decoration_gets_a_new_uuid() {
        let a = decorate_track(&song(), &FakeUrls, &UuidGenerator, &QueueConfig::default());
        let b = decorate_track(&song(), &FakeUrls, &UuidGenerator, &QueueConfig::default());
        assert_ne!(a.uuid, b.uuid);
        assert_eq!(a.track_id, b.track_id);
    }
}
