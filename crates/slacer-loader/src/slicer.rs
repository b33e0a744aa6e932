//! Slicer holding the active mesh
//!
//! Layer generation is not implemented; the slicer tracks which mesh is
//! active and how many layers it would produce.

use crate::collaborators::Slicer;
use crate::mesh::DisplayMesh;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MeshSlicer {
    mesh: Option<Arc<DisplayMesh>>,
}

impl MeshSlicer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers needed to cover the mesh height at `layer_height_mm`
    ///
    /// `None` without a mesh or for a non-positive layer height.
    pub fn layer_count(&self, layer_height_mm: f64) -> Option<usize> {
        if layer_height_mm.is_nan() || layer_height_mm <= 0.0 {
            return None;
        }
        let mesh = self.mesh.as_ref()?;
        let height = f64::from(mesh.geometry().size().z);
        Some((height / layer_height_mm).ceil() as usize)
    }
}

impl Slicer for MeshSlicer {
    fn load_mesh(&mut self, mesh: Arc<DisplayMesh>) -> anyhow::Result<()> {
        debug!("Slicer: loaded mesh {}", mesh.id());
        self.mesh = Some(mesh);
        Ok(())
    }

    fn unload_mesh(&mut self) -> Option<Arc<DisplayMesh>> {
        self.mesh.take()
    }

    fn mesh(&self) -> Option<Arc<DisplayMesh>> {
        self.mesh.clone()
    }
}
