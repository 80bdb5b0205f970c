//! WASM bindings for soul-queue
//!
//! This module exposes the queue reducer to the web client, so the player
//! widget can drive queue state from JavaScript.

pub mod store;
pub mod urls;

pub use store::WasmQueueStore;
pub use urls::JsUrlBuilder;
