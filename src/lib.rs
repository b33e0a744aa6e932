//! # SLAcer
//!
//! Front end of an SLA resin slicer: loads STL meshes into a viewer and a
//! slicer, and keeps the settings behind every sidebar control.
//!
//! ## Architecture
//!
//! 1. **slacer-core** - Errors, unit conversion, shared-state aliases, events
//! 2. **slacer-settings** - Path store, settings model, panel layout, persistence
//! 3. **slacer-loader** - STL decoding, load pipeline, viewer/slicer seams
//! 4. **slacer** - Binary that wires them together

pub mod app;

pub use app::Session;

pub use slacer_core::{
    shared, Error, EventDispatcher, LengthUnit, LoadError, Result, Shared, StoreError, UnitError,
};

pub use slacer_settings::{
    PanelState, SettingsManager, SettingsModel, SettingsPersistence, SnapshotFormat,
};

pub use slacer_loader::{
    DisplayMesh, Fetcher, Geometry, HttpFetcher, LoadDriver, LoadOutcome, LoadPipeline,
    LoadState, MeshInfo, MeshSlicer, MeshSource, PipelineEvent, Scene, TracingErrorSink,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
