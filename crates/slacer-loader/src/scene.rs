//! In-memory 3D scene
//!
//! Keeps the objects a renderer would draw along with the viewport size,
//! background color and build volume outline. Rendering only counts frames.

use crate::collaborators::{ViewSize, Viewer};
use crate::mesh::DisplayMesh;
use anyhow::bail;
use slacer_settings::{BuildVolumeSettings, Size3};
use std::sync::Arc;
use tracing::{debug, trace};

/// Translucent box showing the printable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildVolumeBox {
    /// Edge lengths in mm
    pub size: Size3,
    pub color: u32,
    pub opacity: f64,
}

impl From<&BuildVolumeSettings> for BuildVolumeBox {
    fn from(settings: &BuildVolumeSettings) -> Self {
        Self {
            size: settings.size,
            color: settings.color,
            opacity: settings.opacity,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Arc<DisplayMesh>>,
    size: ViewSize,
    background: u32,
    build_volume: Option<BuildVolumeBox>,
    frames: u64,
}

impl Scene {
    pub fn new(background: u32) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }

    pub fn with_build_volume(mut self, build_volume: BuildVolumeBox) -> Self {
        self.build_volume = Some(build_volume);
        self
    }

    pub fn build_volume(&self) -> Option<&BuildVolumeBox> {
        self.build_volume.as_ref()
    }

    pub fn set_build_volume(&mut self, build_volume: BuildVolumeBox) {
        self.build_volume = Some(build_volume);
    }

    pub fn objects(&self) -> &[Arc<DisplayMesh>] {
        &self.objects
    }

    pub fn size(&self) -> ViewSize {
        self.size
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn set_background(&mut self, color: u32) {
        self.background = color;
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Viewer for Scene {
    fn add_object(&mut self, mesh: Arc<DisplayMesh>) -> anyhow::Result<()> {
        if self.objects.iter().any(|o| o.id() == mesh.id()) {
            bail!("mesh {} is already in the scene", mesh.id());
        }
        debug!("Scene: added mesh {}", mesh.id());
        self.objects.push(mesh);
        Ok(())
    }

    fn remove_object(&mut self, mesh: &Arc<DisplayMesh>) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id() != mesh.id());
        before != self.objects.len()
    }

    fn set_size(&mut self, size: ViewSize) {
        self.size = size;
    }

    fn render(&mut self) {
        self.frames += 1;
        trace!(
            "Scene: frame {} ({}x{}, {} objects)",
            self.frames,
            self.size.width,
            self.size.height,
            self.objects.len()
        );
    }
}
