/// Queue entry identifiers
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a single entry in the queue
///
/// The same track can appear several times in one queue; each appearance
/// gets its own `EntryId`, which lives exactly as long as the entry does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create an entry ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random entry ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh entry identifiers
///
/// Every call must return an ID not handed out before, within practical
/// collision bounds.
pub trait IdGenerator {
    fn generate(&self) -> EntryId;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> EntryId {
        EntryId::generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> EntryId {
        (**self).generate()
    }
}
