//! Async load driver
//!
//! Acquisition is the only suspension point of a load. The driver spawns each
//! fetch on the tokio runtime and joins them through one `JoinSet`, so every
//! pipeline transition still runs on the caller's task while several fetches
//! overlap. A fetch that panics or is aborted still completes its ticket, as
//! an acquisition failure.

use crate::collaborators::{Slicer, Viewer};
use crate::pipeline::{LoadOutcome, LoadPipeline, LoadTicket};
use crate::source::{Fetcher, MeshSource};
use slacer_core::{LoadError, Shared};
use slacer_settings::SettingsModel;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinError, JoinSet};
use tracing::{debug, warn};

/// Acquisition result of one request
#[derive(Debug)]
pub struct Completion {
    pub ticket: LoadTicket,
    pub result: Result<Vec<u8>, LoadError>,
}

pub struct LoadDriver<V: Viewer, S: Slicer> {
    pipeline: LoadPipeline<V, S>,
    fetcher: Arc<dyn Fetcher>,
    completions: JoinSet<Completion>,
    fetches: HashMap<u64, AbortHandle>,
}

impl<V: Viewer, S: Slicer> LoadDriver<V, S> {
    pub fn new(pipeline: LoadPipeline<V, S>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            pipeline,
            fetcher,
            completions: JoinSet::new(),
            fetches: HashMap::new(),
        }
    }

    pub fn pipeline(&self) -> &LoadPipeline<V, S> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut LoadPipeline<V, S> {
        &mut self.pipeline
    }

    /// Requests whose bytes have not been processed yet
    pub fn outstanding(&self) -> usize {
        self.completions.len()
    }

    /// Begin a request and spawn its acquisition
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, source: MeshSource) -> LoadTicket {
        let name = source.name();
        let ticket = self.pipeline.begin(&name);
        let fetcher = Arc::clone(&self.fetcher);

        let fetch = tokio::spawn(async move { fetcher.fetch(&source).await });
        self.fetches.insert(ticket.seq, fetch.abort_handle());

        self.completions.spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(err) => Err(task_failure(&name, err)),
            };
            Completion { ticket, result }
        });
        ticket
    }

    /// Abandon a request and abort its acquisition
    ///
    /// The ticket still comes back once from [`next_outcome`](Self::next_outcome),
    /// as discarded.
    pub fn cancel(&mut self, ticket: LoadTicket) -> bool {
        if let Some(fetch) = self.fetches.remove(&ticket.seq) {
            fetch.abort();
        }
        self.pipeline.cancel(ticket)
    }

    /// Wait for the next acquisition and run it through the pipeline
    ///
    /// Returns `None` when nothing is outstanding. Settings are borrowed only
    /// while the completion is processed, never across the wait.
    pub async fn next_outcome(
        &mut self,
        settings: &Shared<SettingsModel>,
    ) -> Option<(LoadTicket, LoadOutcome)> {
        let completion = loop {
            match self.completions.join_next().await? {
                Ok(completion) => break completion,
                Err(err) => warn!("Load completion task lost: {}", err),
            }
        };
        self.fetches.remove(&completion.ticket.seq);

        let settings = settings.borrow();
        let outcome = self
            .pipeline
            .complete(completion.ticket, completion.result, &settings);
        Some((completion.ticket, outcome))
    }

    /// Load one source and wait for its outcome
    ///
    /// Other outstanding requests that finish first are processed on the way.
    pub async fn load(
        &mut self,
        source: MeshSource,
        settings: &Shared<SettingsModel>,
    ) -> LoadOutcome {
        let ticket = self.request(source);
        while let Some((done, outcome)) = self.next_outcome(settings).await {
            if done == ticket {
                return outcome;
            }
        }
        LoadOutcome::Discarded { seq: ticket.seq }
    }

    /// Start every source at once and process them in completion order
    pub async fn load_all<I>(
        &mut self,
        sources: I,
        settings: &Shared<SettingsModel>,
    ) -> Vec<(LoadTicket, LoadOutcome)>
    where
        I: IntoIterator<Item = MeshSource>,
    {
        for source in sources {
            self.request(source);
        }
        self.drain(settings).await
    }

    /// Process every outstanding request
    pub async fn drain(
        &mut self,
        settings: &Shared<SettingsModel>,
    ) -> Vec<(LoadTicket, LoadOutcome)> {
        let mut outcomes = Vec::with_capacity(self.outstanding());
        while let Some(done) = self.next_outcome(settings).await {
            outcomes.push(done);
        }
        outcomes
    }
}

impl<V: Viewer, S: Slicer> Drop for LoadDriver<V, S> {
    fn drop(&mut self) {
        for (seq, fetch) in self.fetches.drain() {
            debug!("Load #{}: aborting fetch on shutdown", seq);
            fetch.abort();
        }
    }
}

fn task_failure(name: &str, err: JoinError) -> LoadError {
    let reason = if err.is_cancelled() {
        "cancelled".to_string()
    } else {
        "fetch task panicked".to_string()
    };
    LoadError::AcquisitionFailed {
        source_name: name.to_string(),
        reason,
    }
}
