//! Application session
//!
//! Owns the settings model and the load driver for one run, and writes the
//! settings back when asked. Components receive the settings explicitly from
//! here; nothing reaches for a global.

use anyhow::Context;
use slacer_core::{shared, Shared};
use slacer_loader::{
    BuildVolumeBox, Fetcher, HttpFetcher, LoadDriver, LoadOutcome, LoadPipeline, MeshSlicer,
    MeshSource, Scene, TracingErrorSink,
};
use slacer_settings::{panel_element_id, SettingsModel, SettingsPersistence};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Viewer background used when the setting cannot be read
const DEFAULT_BACKGROUND: u32 = 0xffffff;

pub struct Session {
    settings: Shared<SettingsModel>,
    settings_path: PathBuf,
    driver: LoadDriver<Scene, MeshSlicer>,
}

impl Session {
    /// Open a session backed by the settings file at `settings_path`
    ///
    /// A missing file means defaults; it is created on [`save`](Self::save).
    pub fn open(settings_path: PathBuf) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
        Self::with_fetcher(settings_path, Arc::new(fetcher))
    }

    pub fn with_fetcher(settings_path: PathBuf, fetcher: Arc<dyn Fetcher>) -> anyhow::Result<Self> {
        let settings = SettingsPersistence::load_or_default(&settings_path).with_context(|| {
            format!("Failed to load settings from {}", settings_path.display())
        })?;

        let background = settings
            .viewer()
            .map(|viewer| viewer.color)
            .unwrap_or(DEFAULT_BACKGROUND);
        let mut scene = Scene::new(background);
        match settings.build_volume() {
            Ok(volume) => scene.set_build_volume(BuildVolumeBox::from(&volume)),
            Err(e) => warn!("Build volume not shown: {}", e),
        }
        let pipeline = LoadPipeline::new(
            scene,
            MeshSlicer::new(),
            Box::new(TracingErrorSink),
        );

        Ok(Self {
            settings: shared(settings),
            settings_path,
            driver: LoadDriver::new(pipeline, fetcher),
        })
    }

    pub fn settings(&self) -> &Shared<SettingsModel> {
        &self.settings
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn pipeline(&self) -> &LoadPipeline<Scene, MeshSlicer> {
        self.driver.pipeline()
    }

    pub fn pipeline_mut(&mut self) -> &mut LoadPipeline<Scene, MeshSlicer> {
        self.driver.pipeline_mut()
    }

    /// Load each source in turn; the last one that installs stays active
    pub async fn load_sources(&mut self, sources: &[String]) -> Vec<(String, LoadOutcome)> {
        let mut outcomes = Vec::with_capacity(sources.len());
        for input in sources {
            let source = MeshSource::parse(input);
            let name = source.name();
            let outcome = self.driver.load(source, &self.settings).await;
            outcomes.push((name, outcome));
        }
        outcomes
    }

    /// One line per sidebar panel, in display order
    pub fn panel_summary(&self) -> Vec<String> {
        let settings = self.settings.borrow();
        let lines = settings
            .panels_by_position()
            .map(|namespace| {
                let collapsed = settings
                    .panel(namespace)
                    .map(|panel| panel.collapsed)
                    .unwrap_or(false);
                format!(
                    "panel #{}{}",
                    panel_element_id(namespace),
                    if collapsed { " (collapsed)" } else { "" }
                )
            })
            .collect();
        lines
    }

    /// Write the settings tree to the session's settings file
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let path = &self.settings_path;
        SettingsPersistence::save_to_file(&self.settings.borrow(), path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        debug!("Session settings saved");
        Ok(())
    }
}
