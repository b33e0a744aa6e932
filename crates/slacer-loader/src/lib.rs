//! # SLAcer Loader
//!
//! Mesh acquisition and installation: STL decoding, the load pipeline state
//! machine, the viewer/slicer collaborator seams and the async driver that
//! overlaps fetches.

pub mod collaborators;
pub mod driver;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod slicer;
pub mod source;

pub use collaborators::{
    CollectingErrorSink, ErrorSink, Slicer, TracingErrorSink, ViewSize, Viewer,
};
pub use driver::{Completion, LoadDriver};
pub use mesh::{DisplayMesh, Geometry, MeshInfo, Triangle};
pub use pipeline::{LoadOutcome, LoadPipeline, LoadState, LoadTicket, PipelineEvent};
pub use scene::{BuildVolumeBox, Scene};
pub use slicer::MeshSlicer;
pub use source::{Fetcher, HttpFetcher, MeshSource};
