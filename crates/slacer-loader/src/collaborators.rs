//! Collaborator traits
//!
//! The load pipeline drives a viewer, a slicer and an error sink without
//! knowing their implementations. Hosts provide their own; [`Scene`],
//! [`MeshSlicer`] and the sinks below are the in-process ones.
//!
//! [`Scene`]: crate::scene::Scene
//! [`MeshSlicer`]: crate::slicer::MeshSlicer

use crate::mesh::DisplayMesh;
use parking_lot::Mutex;
use slacer_core::LoadError;
use std::sync::Arc;
use tracing::error;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

impl ViewSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 3D view showing the active mesh
pub trait Viewer {
    /// Add a mesh object to the scene
    fn add_object(&mut self, mesh: Arc<DisplayMesh>) -> anyhow::Result<()>;

    /// Remove a mesh object; returns whether it was present
    fn remove_object(&mut self, mesh: &Arc<DisplayMesh>) -> bool;

    fn set_size(&mut self, size: ViewSize);

    fn render(&mut self);
}

/// Slicer holding the mesh that will be cut into layers
pub trait Slicer {
    /// Replace the active mesh
    fn load_mesh(&mut self, mesh: Arc<DisplayMesh>) -> anyhow::Result<()>;

    /// Drop the active mesh, returning it
    fn unload_mesh(&mut self) -> Option<Arc<DisplayMesh>>;

    /// Currently active mesh
    fn mesh(&self) -> Option<Arc<DisplayMesh>>;
}

/// Receiver of user-visible load errors
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &LoadError);
}

/// Sink that logs errors
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, err: &LoadError) {
        error!("{}", err);
    }
}

/// Sink that keeps error messages for later display
///
/// Clones share the same message list.
#[derive(Debug, Default, Clone)]
pub struct CollectingErrorSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report(&self, err: &LoadError) {
        self.messages.lock().push(err.to_string());
    }
}
