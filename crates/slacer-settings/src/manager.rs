//! Settings Manager
//!
//! Resolves where settings are stored on this platform.

use crate::error::{PersistenceError, PersistenceResult};
use std::path::PathBuf;

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "slacer";

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Platform-specific settings locations
pub struct SettingsManager;

impl SettingsManager {
    /// Platform config directory for SLAcer
    pub fn config_dir() -> PersistenceResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                PersistenceError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Default settings file path
    pub fn config_file_path() -> PersistenceResult<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Create the config directory if needed
    pub fn ensure_config_dir() -> PersistenceResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
