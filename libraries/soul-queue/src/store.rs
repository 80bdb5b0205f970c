//! Owning state holder
//!
//! Keeps the latest [`PlaybackState`] next to the reducer that produces it.
//! Commands are applied one at a time through `&mut self`.

use crate::command::Command;
use crate::decorate::UrlBuilder;
use crate::error::Result;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::reducer::QueueReducer;
use crate::types::PlaybackState;

#[derive(Debug, Clone)]
pub struct QueueStore<U, G = UuidGenerator> {
    reducer: QueueReducer<U, G>,
    state: PlaybackState,
}

impl<U: UrlBuilder, G: IdGenerator> QueueStore<U, G> {
    /// Create a store starting from the initial state
    pub fn new(reducer: QueueReducer<U, G>) -> Self {
        Self::with_state(reducer, PlaybackState::new())
    }

    /// Create a store starting from a known state
    pub fn with_state(reducer: QueueReducer<U, G>, state: PlaybackState) -> Self {
        Self { reducer, state }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn reducer(&self) -> &QueueReducer<U, G> {
        &self.reducer
    }

    /// Apply a command and return the new state
    pub fn dispatch(&mut self, command: &Command) -> &PlaybackState {
        self.state = self.reducer.reduce(&self.state, command);
        &self.state
    }

    /// Decode and apply a JSON command
    ///
    /// State is left untouched when the command cannot be decoded.
    pub fn dispatch_json(&mut self, json: &str) -> Result<&PlaybackState> {
        let command = Command::from_json(json)?;
        Ok(self.dispatch(&command))
    }

    pub fn into_state(self) -> PlaybackState {
        self.state
    }
}
