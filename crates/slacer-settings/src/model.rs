//! Settings Model
//!
//! Domain wrapper over [`PathStore`]: owns the default configuration tree,
//! camel-cases incoming paths, decodes typed sections, and binds measurement
//! fields to their display units.
//!
//! The application root constructs one `SettingsModel` and passes it by
//! reference to every component that needs it.

use crate::case::normalize_path;
use crate::defaults::default_tree;
use crate::error::{SettingsError, SettingsResult};
use crate::path_store::PathStore;
use crate::sections::{
    BuildVolumeSettings, MeshSettings, ResinSettings, ScreenSettings, ViewerSettings,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use slacer_core::units::{self, LengthUnit};
use slacer_core::{StoreError, UnitError};
use std::fmt;
use tracing::debug;

/// Callback notified with the normalized path after every successful write
pub type ChangeListener = Box<dyn Fn(&str) + Send + Sync>;

/// Settings backing every UI control
pub struct SettingsModel {
    pub(crate) store: PathStore,
    listeners: Vec<ChangeListener>,
}

impl SettingsModel {
    /// Create a model holding the default configuration tree
    pub fn new() -> Self {
        Self {
            store: PathStore::with_defaults(default_tree()),
            listeners: Vec::new(),
        }
    }

    /// Create a model from defaults overlaid with a persisted snapshot
    pub fn from_snapshot(snapshot: Value) -> SettingsResult<Self> {
        let Value::Object(map) = snapshot else {
            return Err(SettingsError::InvalidSnapshot(
                "root must be a mapping".to_string(),
            ));
        };
        let mut model = Self::new();
        model.store.merge(map);
        debug!("Settings restored from snapshot");
        Ok(model)
    }

    /// Produce a snapshot of the whole tree for persistence
    pub fn snapshot(&self) -> Value {
        self.store.to_value()
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    /// Get the subtree or leaf at `path`
    pub fn get(&self, path: &str) -> Result<&Value, StoreError> {
        self.store.get(&normalize_path(path))
    }

    /// Decode the value at `path` into `T`
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> SettingsResult<T> {
        let value = self.get(path)?;
        T::deserialize(value).map_err(|e| SettingsError::Decode {
            path: normalize_path(path),
            reason: e.to_string(),
        })
    }

    /// Write `value` at `path` with the store's merge semantics
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = normalize_path(path);
        self.store.set(&path, value)?;
        debug!("Setting {} updated", path);
        self.notify(&path);
        Ok(())
    }

    /// Write a numeric text input at `path`
    ///
    /// Integer text is stored as an integer, anything else numeric as a float.
    pub fn set_from_input(&mut self, path: &str, input: &str) -> SettingsResult<()> {
        let value = parse_input_number(input)?;
        self.set(path, value)?;
        Ok(())
    }

    /// Register a callback for setting changes
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    fn notify(&self, path: &str) {
        for listener in &self.listeners {
            listener(path);
        }
    }

    /// Display unit stored at `unit_path`
    pub fn display_unit(&self, unit_path: &str) -> SettingsResult<LengthUnit> {
        self.get_as(unit_path)
    }

    /// Select a new display unit; stored values are untouched
    pub fn set_display_unit(&mut self, unit_path: &str, unit: LengthUnit) -> Result<(), StoreError> {
        self.set(unit_path, json!(unit.label()))
    }

    /// Value at `value_path` converted to the display unit at `unit_path`
    pub fn display_value(&self, value_path: &str, unit_path: &str) -> SettingsResult<f64> {
        let unit = self.display_unit(unit_path)?;
        let value_mm: f64 = self.get_as(value_path)?;
        Ok(units::to_display(value_mm, unit)?)
    }

    /// Store user input typed in the display unit as canonical mm
    ///
    /// A whole number of millimeters is stored as an integer, like
    /// [`set_from_input`](Self::set_from_input) does.
    pub fn set_from_display(
        &mut self,
        value_path: &str,
        unit_path: &str,
        input: &str,
    ) -> SettingsResult<()> {
        let unit = self.display_unit(unit_path)?;
        let value_mm = units::parse_display(input, unit)?;
        self.set(value_path, number_value(value_mm))?;
        Ok(())
    }

    /// Build volume section
    pub fn build_volume(&self) -> SettingsResult<BuildVolumeSettings> {
        self.get_as("buildVolume")
    }

    /// Resin section
    pub fn resin(&self) -> SettingsResult<ResinSettings> {
        self.get_as("resin")
    }

    /// Mesh section
    pub fn mesh(&self) -> SettingsResult<MeshSettings> {
        self.get_as("mesh")
    }

    /// Screen section
    pub fn screen(&self) -> SettingsResult<ScreenSettings> {
        self.get_as("screen")
    }

    /// 3D viewer section
    pub fn viewer(&self) -> SettingsResult<ViewerSettings> {
        self.get_as("viewer3d")
    }

    /// Color new meshes are drawn with
    pub fn mesh_color(&self) -> SettingsResult<u32> {
        self.get_as("mesh.color")
    }
}

fn parse_input_number(input: &str) -> Result<Value, UnitError> {
    let trimmed = input.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(json!(int));
    }
    units::parse_number(trimmed).map(|f| json!(f))
}

fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SettingsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsModel")
            .field("store", &self.store)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_resin_defaults_and_update() {
        let mut settings = SettingsModel::new();
        assert_eq!(settings.get("resin.price").unwrap(), &json!(50));

        settings.set("resin.price", json!(75)).unwrap();
        assert_eq!(settings.get("resin.price").unwrap(), &json!(75));
        assert_eq!(settings.get("resin.density").unwrap(), &json!(1.1));
    }

    #[test]
    fn test_kebab_paths_are_normalized() {
        let mut settings = SettingsModel::new();
        settings.set("build-volume.size.x", json!(150)).unwrap();
        assert_eq!(settings.get("buildVolume.size.x").unwrap(), &json!(150));
    }

    #[test]
    fn test_set_from_input() {
        let mut settings = SettingsModel::new();
        settings.set_from_input("screen.width", " 2560 ").unwrap();
        settings.set_from_input("resin.density", "1.25").unwrap();
        assert_eq!(settings.screen().unwrap().width, 2560);
        assert_eq!(settings.resin().unwrap().density, 1.25);

        let err = settings.set_from_input("resin.price", "cheap").unwrap_err();
        assert!(matches!(err, SettingsError::Unit(UnitError::InvalidNumber { .. })));
        assert_eq!(settings.get("resin.price").unwrap(), &json!(50));
    }

    #[test]
    fn test_measurement_display_conversion() {
        let mut settings = SettingsModel::new();
        assert_eq!(
            settings
                .display_value("buildVolume.size.x", "buildVolume.unit")
                .unwrap(),
            100.0
        );

        settings
            .set_display_unit("buildVolume.unit", LengthUnit::Inch)
            .unwrap();
        let shown = settings
            .display_value("buildVolume.size.x", "buildVolume.unit")
            .unwrap();
        assert!((shown - 100.0 / 25.4).abs() < 1e-12);
        // storage stays canonical
        assert_eq!(settings.get("buildVolume.size.x").unwrap(), &json!(100));

        settings
            .set_from_display("buildVolume.size.x", "buildVolume.unit", "2")
            .unwrap();
        assert_eq!(settings.build_volume().unwrap().size.x, 50.8);
    }

    #[test]
    fn test_display_input_keeps_integers_like_plain_input() {
        let mut settings = SettingsModel::new();
        settings
            .set_from_display("buildVolume.size.x", "buildVolume.unit", "120")
            .unwrap();
        settings.set_from_input("buildVolume.size.y", "120").unwrap();
        assert_eq!(settings.get("buildVolume.size.x").unwrap(), &json!(120));
        assert_eq!(
            settings.get("buildVolume.size.x").unwrap(),
            settings.get("buildVolume.size.y").unwrap()
        );

        settings
            .set_display_unit("buildVolume.unit", LengthUnit::Inch)
            .unwrap();
        settings
            .set_from_display("buildVolume.size.z", "buildVolume.unit", "10")
            .unwrap();
        assert_eq!(settings.get("buildVolume.size.z").unwrap(), &json!(254));
        settings
            .set_from_display("buildVolume.size.z", "buildVolume.unit", "1")
            .unwrap();
        assert_eq!(settings.get("buildVolume.size.z").unwrap(), &json!(25.4));
    }

    #[test]
    fn test_screen_diagonal_defaults_to_inches() {
        let settings = SettingsModel::new();
        let shown = settings
            .display_value("screen.diagonal.size", "screen.diagonal.unit")
            .unwrap();
        assert!((shown - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_typed_sections() {
        let settings = SettingsModel::new();
        assert_eq!(settings.mesh_color().unwrap(), 0x333333);
        assert_eq!(settings.viewer().unwrap().color, 0xffffff);
        assert_eq!(settings.build_volume().unwrap().unit, LengthUnit::Millimeter);
        assert_eq!(settings.screen().unwrap().height, 1050);
    }

    #[test]
    fn test_decode_error_names_path() {
        let mut settings = SettingsModel::new();
        settings.set("resin.density", json!("thick")).unwrap();
        let err = settings.resin().unwrap_err();
        assert!(matches!(err, SettingsError::Decode { ref path, .. } if path == "resin"));
    }

    #[test]
    fn test_change_listeners() {
        let mut settings = SettingsModel::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        settings.on_change(move |path| {
            assert_eq!(path, "buildVolume.unit");
            seen.fetch_add(1, Ordering::SeqCst);
        });
        settings.set("build-volume.unit", json!("in")).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // failed writes do not notify
        assert!(settings.set("buildVolume.unit.value", json!(1)).is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut settings = SettingsModel::new();
        settings.set("resin.price", json!(99)).unwrap();
        let restored = SettingsModel::from_snapshot(settings.snapshot()).unwrap();
        assert_eq!(restored.get("resin.price").unwrap(), &json!(99));

        assert!(matches!(
            SettingsModel::from_snapshot(json!([1, 2])),
            Err(SettingsError::InvalidSnapshot(_))
        ));
    }
}
