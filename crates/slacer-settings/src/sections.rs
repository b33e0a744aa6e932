//! Typed views over settings namespaces
//!
//! Each struct mirrors one subtree of the configuration tree and is decoded
//! on demand with `serde`. Length fields hold canonical millimeters; the
//! accompanying unit only records the display unit.

use serde::{Deserialize, Serialize};
use slacer_core::LengthUnit;

/// Sidebar panel state persisted inside a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub collapsed: bool,
    pub position: i64,
}

/// Three-axis size in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A length value and the unit it is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Canonical value in mm
    pub size: f64,
    /// Last selected display unit
    pub unit: LengthUnit,
}

/// Printer build volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildVolumeSettings {
    pub size: Size3,
    pub unit: LengthUnit,
    pub color: u32,
    pub opacity: f64,
    #[serde(default)]
    pub panel: Option<PanelState>,
}

/// Resin properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResinSettings {
    /// g/cm3
    pub density: f64,
    /// Price per liter
    pub price: f64,
    #[serde(default)]
    pub panel: Option<PanelState>,
}

/// Mesh display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSettings {
    /// RGB color, `0xRRGGBB`
    pub color: u32,
    #[serde(default)]
    pub panel: Option<PanelState>,
}

/// Exposure screen geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSettings {
    /// Horizontal resolution in pixels
    pub width: u32,
    /// Vertical resolution in pixels
    pub height: u32,
    pub diagonal: Measurement,
    #[serde(default)]
    pub panel: Option<PanelState>,
}

impl ScreenSettings {
    /// Physical pixel pitch in mm, from the diagonal and aspect ratio
    pub fn pixel_pitch_mm(&self) -> Option<f64> {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let pixels_diagonal = (w * w + h * h).sqrt();
        (pixels_diagonal > 0.0).then(|| self.diagonal.size / pixels_diagonal)
    }
}

/// 3D viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Background color, `0xRRGGBB`
    pub color: u32,
}
