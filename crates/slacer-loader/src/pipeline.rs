//! # Load Pipeline
//!
//! Turns acquired bytes into the active mesh of the viewer and slicer.
//!
//! ```text
//! Idle -> Fetching -> Parsing -> Swapping -> Rendered
//!            \           \          \
//!             +-----------+----------+--> Failed -> Idle
//! ```
//!
//! Every request gets a [`LoadTicket`] with a monotonically increasing
//! sequence number. A completion whose sequence is lower than that of the
//! last swapped mesh is stale and is discarded, so overlapping loads resolve
//! last-writer-wins by completion order without replacing a newer mesh with
//! an older one.
//!
//! Failures never escape: they are forwarded to the [`ErrorSink`], published
//! as [`PipelineEvent::Failed`], and leave the previous mesh installed.

use crate::collaborators::{ErrorSink, Slicer, ViewSize, Viewer};
use crate::mesh::{DisplayMesh, Geometry, MeshInfo};
use slacer_core::{EventDispatcher, LoadError};
use slacer_settings::SettingsModel;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Fetching,
    Parsing,
    Swapping,
    Rendered,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Swapping => "swapping",
            Self::Rendered => "rendered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Handle for one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket {
    pub seq: u64,
}

/// Result of completing a request
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The new mesh is installed and rendered
    Installed(MeshInfo),
    /// The request failed; the previous mesh is untouched
    Failed(LoadError),
    /// A newer mesh was already swapped in, or the ticket was unknown
    Discarded { seq: u64 },
}

impl LoadOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }
}

/// Notifications for UI display
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Started { seq: u64, source: String },
    Installed { seq: u64, info: MeshInfo },
    Failed { seq: u64, message: String },
    Discarded { seq: u64 },
}

/// Mesh load orchestration over a viewer and a slicer
pub struct LoadPipeline<V: Viewer, S: Slicer> {
    viewer: V,
    slicer: S,
    errors: Box<dyn ErrorSink>,
    events: EventDispatcher<PipelineEvent>,
    state: LoadState,
    next_seq: u64,
    last_swapped: u64,
    pending: BTreeSet<u64>,
    info: Option<MeshInfo>,
}

impl<V: Viewer, S: Slicer> LoadPipeline<V, S> {
    pub fn new(viewer: V, slicer: S, errors: Box<dyn ErrorSink>) -> Self {
        Self {
            viewer,
            slicer,
            errors,
            events: EventDispatcher::default(),
            state: LoadState::Idle,
            next_seq: 1,
            last_swapped: 0,
            pending: BTreeSet::new(),
            info: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn slicer(&self) -> &S {
        &self.slicer
    }

    /// Mesh currently installed
    pub fn active_mesh(&self) -> Option<Arc<DisplayMesh>> {
        self.slicer.mesh()
    }

    /// Figures of the installed mesh
    pub fn info(&self) -> Option<MeshInfo> {
        self.info
    }

    /// Number of requests begun but not completed
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Start a request; acquisition of the bytes happens outside the pipeline
    pub fn begin(&mut self, source_name: &str) -> LoadTicket {
        let ticket = LoadTicket { seq: self.next_seq };
        self.next_seq += 1;
        self.pending.insert(ticket.seq);
        self.state = LoadState::Fetching;

        debug!("Load #{} started: {}", ticket.seq, source_name);
        self.events.publish(PipelineEvent::Started {
            seq: ticket.seq,
            source: source_name.to_string(),
        });
        ticket
    }

    /// Abandon a request that has not completed
    ///
    /// A later `complete` for the ticket is discarded. Returns `false` if the
    /// ticket was not pending.
    pub fn cancel(&mut self, ticket: LoadTicket) -> bool {
        if !self.pending.remove(&ticket.seq) {
            return false;
        }
        debug!("Load #{} cancelled", ticket.seq);
        self.events.publish(PipelineEvent::Discarded { seq: ticket.seq });
        let resting = if self.info.is_some() {
            LoadState::Rendered
        } else {
            LoadState::Idle
        };
        self.settle(resting);
        true
    }

    /// Finish a request with the acquired bytes or the acquisition error
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        acquired: Result<Vec<u8>, LoadError>,
        settings: &SettingsModel,
    ) -> LoadOutcome {
        if !self.pending.remove(&ticket.seq) {
            warn!("Load #{}: unknown or already completed ticket", ticket.seq);
            return LoadOutcome::Discarded { seq: ticket.seq };
        }

        if ticket.seq < self.last_swapped {
            warn!(
                "Load #{} discarded: #{} is newer and already installed",
                ticket.seq, self.last_swapped
            );
            self.events.publish(PipelineEvent::Discarded { seq: ticket.seq });
            self.settle(LoadState::Rendered);
            return LoadOutcome::Discarded { seq: ticket.seq };
        }

        let bytes = match acquired {
            Ok(bytes) => bytes,
            Err(err) => return self.fail(ticket, err),
        };

        self.state = LoadState::Parsing;
        let geometry = match Geometry::from_stl_bytes(&bytes) {
            Ok(geometry) => geometry,
            Err(err) => return self.fail(ticket, err),
        };

        self.state = LoadState::Swapping;
        let mesh = match self.swap(geometry, settings) {
            Ok(mesh) => mesh,
            Err(err) => return self.fail(ticket, err),
        };
        self.last_swapped = ticket.seq;

        self.viewer.render();
        let info = mesh.info();
        self.info = Some(info);
        self.warn_if_oversized(&mesh, settings);

        info!(
            "Load #{} installed: {} faces, {} cm³",
            ticket.seq, info.faces, info.volume_cm3
        );
        self.events.publish(PipelineEvent::Installed {
            seq: ticket.seq,
            info,
        });
        self.settle(LoadState::Rendered);
        LoadOutcome::Installed(info)
    }

    /// Load a buffer that is already in memory (drag and drop)
    pub fn load_bytes(
        &mut self,
        name: &str,
        bytes: Vec<u8>,
        settings: &SettingsModel,
    ) -> LoadOutcome {
        let ticket = self.begin(name);
        self.complete(ticket, Ok(bytes), settings)
    }

    /// Window resize: propagate the new size and redraw
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewer.set_size(ViewSize::new(width, height));
        self.viewer.render();
    }

    /// Replace the active mesh
    ///
    /// The new mesh is constructed before anything is removed. If either
    /// install fails, the previous mesh is put back in both collaborators.
    fn swap(
        &mut self,
        geometry: Geometry,
        settings: &SettingsModel,
    ) -> Result<Arc<DisplayMesh>, LoadError> {
        let color = settings.mesh_color().map_err(|e| LoadError::InstallFailed {
            reason: e.to_string(),
        })?;
        let mesh = Arc::new(DisplayMesh::new(geometry, color));
        let previous = self.slicer.mesh();

        if let Some(old) = &previous {
            self.viewer.remove_object(old);
        }

        if let Err(e) = self.slicer.load_mesh(mesh.clone()) {
            self.restore(previous, false);
            return Err(LoadError::InstallFailed {
                reason: e.to_string(),
            });
        }

        if let Err(e) = self.viewer.add_object(mesh.clone()) {
            self.restore(previous, true);
            return Err(LoadError::InstallFailed {
                reason: e.to_string(),
            });
        }

        debug!("Swapped in mesh {}", mesh.id());
        Ok(mesh)
    }

    fn restore(&mut self, previous: Option<Arc<DisplayMesh>>, slicer_changed: bool) {
        if slicer_changed {
            let restored = match &previous {
                Some(old) => self.slicer.load_mesh(old.clone()),
                None => {
                    self.slicer.unload_mesh();
                    Ok(())
                }
            };
            if let Err(e) = restored {
                warn!("Could not restore previous mesh in slicer: {}", e);
            }
        }
        if let Some(old) = previous {
            if let Err(e) = self.viewer.add_object(old) {
                warn!("Could not restore previous mesh in viewer: {}", e);
            }
        }
    }

    fn fail(&mut self, ticket: LoadTicket, err: LoadError) -> LoadOutcome {
        self.state = LoadState::Failed;
        warn!("Load #{} failed: {}", ticket.seq, err);
        self.errors.report(&err);
        self.events.publish(PipelineEvent::Failed {
            seq: ticket.seq,
            message: err.to_string(),
        });
        self.settle(LoadState::Idle);
        LoadOutcome::Failed(err)
    }

    /// Resting state after a completion; other requests keep it fetching
    fn settle(&mut self, resting: LoadState) {
        self.state = if self.pending.is_empty() {
            resting
        } else {
            LoadState::Fetching
        };
    }

    fn warn_if_oversized(&self, mesh: &DisplayMesh, settings: &SettingsModel) {
        match settings.build_volume() {
            Ok(volume) if !mesh.geometry().fits_in(&volume.size) => {
                let size = mesh.geometry().size();
                warn!(
                    "Mesh {:.1} x {:.1} x {:.1} mm exceeds build volume {} x {} x {} mm",
                    size.x, size.y, size.z, volume.size.x, volume.size.y, volume.size.z
                );
            }
            Ok(_) => {}
            Err(e) => debug!("Build volume unavailable: {}", e),
        }
    }
}

impl<V: Viewer + fmt::Debug, S: Slicer + fmt::Debug> fmt::Debug for LoadPipeline<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadPipeline")
            .field("viewer", &self.viewer)
            .field("slicer", &self.slicer)
            .field("state", &self.state)
            .field("last_swapped", &self.last_swapped)
            .field("pending", &self.pending)
            .finish()
    }
}
