//! Error types for the settings crate.
//!
//! Path and unit errors come from `slacer-core`; this module adds the
//! failures of decoding typed sections and of snapshot persistence.

use slacer_core::{StoreError, UnitError};
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A path lookup or write failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// User input could not be converted.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A subtree does not have the shape of the requested section.
    #[error("Invalid setting '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// A snapshot is not a mapping at its root.
    #[error("Invalid settings snapshot: {0}")]
    InvalidSnapshot(String),

    /// A persistence error occurred.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors related to settings persistence operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// The platform has no configuration directory.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during persistence.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error during persistence.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
