//! Error types for the settings boundary.
//!
//! The rules engine itself has no failure path: illegal player actions are
//! ignored, and broken internal state is caught by
//! [`crate::game::invariants`].

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or parse a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("cannot read settings from {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The contents are not valid settings JSON.
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
