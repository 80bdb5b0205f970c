//! Queue configuration
//!
//! Settings that affect how tracks are decorated when they enter the queue.
//! Values come from an optional TOML file and `SOUL_QUEUE_*` environment
//! variables, in that order of precedence (environment wins).

use crate::error::{QueueError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the queue reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Key cover art by album id instead of track id (default: false)
    ///
    /// Album-keyed covers hit the browser cache far more often, at the cost
    /// of showing the album art for tracks that carry their own picture.
    #[serde(default)]
    pub fast_access_cover_art: bool,

    /// Thumbnail size requested from the cover art builder (default: 300)
    #[serde(default = "default_cover_art_size")]
    pub cover_art_size: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            fast_access_cover_art: false,
            cover_art_size: default_cover_art_size(),
        }
    }
}

impl QueueConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        // Override with environment variables (prefixed with SOUL_QUEUE_)
        settings = settings.add_source(
            config::Environment::with_prefix("SOUL_QUEUE")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| QueueError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| QueueError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.cover_art_size == 0 {
            return Err(QueueError::Config(
                "cover_art_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_cover_art_size() -> u32 {
    300
}
