//! Config struct and serde defaults.

use serde::{Deserialize, Serialize};

/// Project configuration loaded from `.kerf.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Revision the working tree is diffed against.
    #[serde(default = "default_base")]
    pub base: String,

    /// Glob patterns selecting files to classify. Empty means every file.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns excluding files from classification. Applied after
    /// `include`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Poll interval for `kerf watch`, in milliseconds.
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: default_base(),
            include: Vec::new(),
            exclude: Vec::new(),
            watch_interval_ms: default_watch_interval_ms(),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_base() -> String {
    "HEAD".to_string()
}

pub(crate) fn default_watch_interval_ms() -> u64 {
    1000
}
