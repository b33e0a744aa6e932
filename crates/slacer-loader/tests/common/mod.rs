//! Shared fixtures for loader integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use slacer_core::LoadError;
use slacer_loader::{
    CollectingErrorSink, DisplayMesh, Fetcher, LoadPipeline, MeshSlicer, MeshSource, Scene,
    ViewSize, Viewer,
};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

type Face = [[f32; 3]; 3];

/// Axis-aligned cube from the origin with outward winding
pub fn cube_faces(s: f32) -> Vec<Face> {
    vec![
        [[0., 0., 0.], [0., s, 0.], [s, s, 0.]],
        [[0., 0., 0.], [s, s, 0.], [s, 0., 0.]],
        [[0., 0., s], [s, 0., s], [s, s, s]],
        [[0., 0., s], [s, s, s], [0., s, s]],
        [[0., 0., 0.], [s, 0., 0.], [s, 0., s]],
        [[0., 0., 0.], [s, 0., s], [0., 0., s]],
        [[0., s, 0.], [0., s, s], [s, s, s]],
        [[0., s, 0.], [s, s, s], [s, s, 0.]],
        [[0., 0., 0.], [0., 0., s], [0., s, s]],
        [[0., 0., 0.], [0., s, s], [0., s, 0.]],
        [[s, 0., 0.], [s, s, 0.], [s, s, s]],
        [[s, 0., 0.], [s, s, s], [s, 0., s]],
    ]
}

/// ASCII STL of a cube with edge `s` mm
pub fn cube_ascii(s: f32) -> Vec<u8> {
    let mut out = String::from("solid cube\n");
    for face in cube_faces(s) {
        out.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in face {
            let _ = writeln!(out, "      vertex {} {} {}", x, y, z);
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    out.push_str("endsolid cube\n");
    out.into_bytes()
}

/// Binary STL of a cube with edge `s` mm
pub fn cube_binary(s: f32) -> Vec<u8> {
    let faces = cube_faces(s);
    let mut out = vec![0u8; 80];
    out[..6].copy_from_slice(b"binary");
    out.extend_from_slice(&(faces.len() as u32).to_le_bytes());
    for face in faces {
        for _ in 0..3 {
            out.extend_from_slice(&0f32.to_le_bytes());
        }
        for vertex in face {
            for coord in vertex {
                out.extend_from_slice(&coord.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

pub fn pipeline() -> (LoadPipeline<Scene, MeshSlicer>, CollectingErrorSink) {
    let sink = CollectingErrorSink::new();
    let pipeline = LoadPipeline::new(
        Scene::new(0xffffff),
        MeshSlicer::new(),
        Box::new(sink.clone()),
    );
    (pipeline, sink)
}

/// Viewer that rejects the next `add_object` call when armed
#[derive(Debug, Default)]
pub struct FlakyViewer {
    pub scene: Scene,
    pub reject_next_add: bool,
}

impl Viewer for FlakyViewer {
    fn add_object(&mut self, mesh: Arc<DisplayMesh>) -> anyhow::Result<()> {
        if std::mem::take(&mut self.reject_next_add) {
            anyhow::bail!("GPU buffer allocation failed");
        }
        self.scene.add_object(mesh)
    }

    fn remove_object(&mut self, mesh: &Arc<DisplayMesh>) -> bool {
        self.scene.remove_object(mesh)
    }

    fn set_size(&mut self, size: ViewSize) {
        self.scene.set_size(size);
    }

    fn render(&mut self) {
        self.scene.render();
    }
}

/// Fetcher serving fixed bytes after a per-source delay
#[derive(Debug, Default)]
pub struct DelayedFetcher {
    entries: HashMap<String, (Duration, Result<Vec<u8>, LoadError>)>,
}

impl DelayedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, name: &str, delay_ms: u64, bytes: Vec<u8>) -> Self {
        self.entries
            .insert(name.to_string(), (Duration::from_millis(delay_ms), Ok(bytes)));
        self
    }

    pub fn fail(mut self, name: &str, delay_ms: u64) -> Self {
        let err = LoadError::AcquisitionFailed {
            source_name: name.to_string(),
            reason: "connection reset".to_string(),
        };
        self.entries
            .insert(name.to_string(), (Duration::from_millis(delay_ms), Err(err)));
        self
    }
}

#[async_trait]
impl Fetcher for DelayedFetcher {
    async fn fetch(&self, source: &MeshSource) -> Result<Vec<u8>, LoadError> {
        let name = source.name();
        let Some((delay, result)) = self.entries.get(&name) else {
            return Err(LoadError::AcquisitionFailed {
                source_name: name,
                reason: "not served".to_string(),
            });
        };
        tokio::time::sleep(*delay).await;
        result.clone()
    }
}

pub fn url(name: &str) -> MeshSource {
    MeshSource::Url(name.to_string())
}
