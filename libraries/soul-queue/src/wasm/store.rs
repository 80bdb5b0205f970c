//! WASM-compatible queue store wrapper

use super::urls::JsUrlBuilder;
use crate::{Command, QueueConfig, QueueError, QueueReducer, QueueStore};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// WASM-compatible queue store
///
/// Wraps [`QueueStore`] with a JavaScript-friendly API. Commands are plain
/// JS objects in the player's action format (`{ type, data, ... }`).
#[wasm_bindgen]
pub struct WasmQueueStore {
    inner: QueueStore<JsUrlBuilder>,

    // Event callbacks
    on_change: Option<Function>,
}

#[wasm_bindgen]
impl WasmQueueStore {
    /// Create a new store
    ///
    /// `config` may be `undefined` to use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        stream_url: Function,
        cover_art_url: Function,
        config: JsValue,
    ) -> Result<WasmQueueStore, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            QueueConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| to_js_error(&QueueError::Config(e.to_string())))?
        };
        config.validate().map_err(|e| to_js_error(&e))?;

        let urls = JsUrlBuilder::new(stream_url, cover_art_url);

        Ok(Self {
            inner: QueueStore::new(QueueReducer::with_uuids(urls, config)),
            on_change: None,
        })
    }

    /// Apply a command and return the new state
    pub fn dispatch(&mut self, command: JsValue) -> Result<JsValue, JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)
            .map_err(|e| to_js_error(&QueueError::InvalidCommand(e.to_string())))?;

        self.inner.dispatch(&command);
        self.emit_change();
        self.get_state()
    }

    /// Current state as a plain JS object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        self.inner
            .state()
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Queue length
    #[wasm_bindgen(js_name = queueLength)]
    pub fn queue_length(&self) -> usize {
        self.inner.state().queue.len()
    }

    /// Register state change callback
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: Function) {
        self.on_change = Some(callback);
    }

    fn emit_change(&self) {
        if let Some(ref cb) = self.on_change {
            if let Ok(state) = self.get_state() {
                cb.call1(&JsValue::NULL, &state).ok();
            }
        }
    }
}

fn to_js_error(error: &QueueError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
