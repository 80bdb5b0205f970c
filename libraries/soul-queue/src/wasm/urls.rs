//! URL builders backed by JavaScript callbacks

use crate::decorate::{CoverArtRequest, UrlBuilder};
use js_sys::Function;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// [`UrlBuilder`] delegating to two JS functions
///
/// - `streamUrl(trackId) -> string`
/// - `coverArtUrl({ coverArtId, updatedAt }, size) -> string`
///
/// A callback that throws or returns a non-string yields an empty URL and a
/// warning.
#[derive(Debug, Clone)]
pub struct JsUrlBuilder {
    stream_url: Function,
    cover_art_url: Function,
}

impl JsUrlBuilder {
    pub fn new(stream_url: Function, cover_art_url: Function) -> Self {
        Self {
            stream_url,
            cover_art_url,
        }
    }
}

impl UrlBuilder for JsUrlBuilder {
    fn stream_url(&self, track_id: &str) -> String {
        let url = self
            .stream_url
            .call1(&JsValue::NULL, &JsValue::from_str(track_id))
            .ok()
            .and_then(|url| url.as_string());

        url_or_empty("streamUrl", track_id, url)
    }

    fn cover_art_url(&self, request: &CoverArtRequest<'_>, size: u32) -> String {
        let url = serde_wasm_bindgen::to_value(request).ok().and_then(|js_request| {
            self.cover_art_url
                .call2(&JsValue::NULL, &js_request, &JsValue::from(size))
                .ok()
                .and_then(|url| url.as_string())
        });

        url_or_empty("coverArtUrl", request.cover_art_id, url)
    }
}

fn url_or_empty(callback: &str, id: &str, url: Option<String>) -> String {
    url.unwrap_or_else(|| {
        warn!(callback, id, "URL callback failed or returned a non-string");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_falls_back_to_empty() {
        assert_eq!(url_or_empty("streamUrl", "t1", None), "");
        assert_eq!(
            url_or_empty("streamUrl", "t1", Some("/rest/stream?id=t1".to_string())),
            "/rest/stream?id=t1"
        );
    }
}
