//! Settings Persistence
//!
//! Loads and saves settings snapshots. The file extension selects the
//! format: `.json` or `.toml`. Loading overlays the snapshot onto the
//! default tree, so keys added to the defaults after the snapshot was
//! written still appear.

use crate::error::{PersistenceError, PersistenceResult, SettingsResult};
use crate::model::SettingsModel;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Snapshot file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> PersistenceResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(PersistenceError::UnsupportedFormat(format!(
                "{} (expected .json or .toml)",
                path.display()
            ))),
        }
    }

    /// Parse snapshot text
    pub fn parse(&self, content: &str) -> PersistenceResult<Value> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }

    /// Render snapshot text
    pub fn render(&self, snapshot: &Value) -> PersistenceResult<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(snapshot)?,
            Self::Toml => toml::to_string_pretty(snapshot)?,
        })
    }
}

/// Settings persistence layer
pub struct SettingsPersistence;

impl SettingsPersistence {
    /// Load settings from `path`, overlaid onto defaults
    pub fn load_from_file(path: &Path) -> SettingsResult<SettingsModel> {
        let format = SnapshotFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(PersistenceError::from)?;
        let snapshot = format.parse(&content)?;
        let model = SettingsModel::from_snapshot(snapshot)?;
        info!("Loaded settings from {}", path.display());
        Ok(model)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<SettingsModel> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No settings at {}, using defaults", path.display());
            Ok(SettingsModel::new())
        }
    }

    /// Save the full settings tree to `path`
    pub fn save_to_file(settings: &SettingsModel, path: &Path) -> SettingsResult<()> {
        let format = SnapshotFormat::from_path(path)?;
        let content = format.render(&settings.snapshot())?;
        std::fs::write(path, content).map_err(PersistenceError::from)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SnapshotFormat::from_path(&PathBuf::from("a/settings.json")).unwrap(),
            SnapshotFormat::Json
        );
        assert_eq!(
            SnapshotFormat::from_path(&PathBuf::from("settings.TOML")).unwrap(),
            SnapshotFormat::Toml
        );
        assert!(matches!(
            SnapshotFormat::from_path(&PathBuf::from("settings.yaml")),
            Err(PersistenceError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_toml_text_parses_to_tree() {
        let value = SnapshotFormat::Toml
            .parse("[resin]\nprice = 60\n")
            .unwrap();
        assert_eq!(value["resin"]["price"], serde_json::json!(60));
    }
}
