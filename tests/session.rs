//! End-to-end session tests: settings file, mesh loading, save

use serde_json::json;
use slacer::{LoadOutcome, LoadState, Session};
use std::fmt::Write as _;
use tempfile::TempDir;

fn cube_stl(s: f32) -> String {
    let corners = |[x, y, z]: [f32; 3]| format!("vertex {} {} {}", x * s, y * s, z * s);
    let faces: [[[f32; 3]; 3]; 12] = [
        [[0., 0., 0.], [0., 1., 0.], [1., 1., 0.]],
        [[0., 0., 0.], [1., 1., 0.], [1., 0., 0.]],
        [[0., 0., 1.], [1., 0., 1.], [1., 1., 1.]],
        [[0., 0., 1.], [1., 1., 1.], [0., 1., 1.]],
        [[0., 0., 0.], [1., 0., 0.], [1., 0., 1.]],
        [[0., 0., 0.], [1., 0., 1.], [0., 0., 1.]],
        [[0., 1., 0.], [0., 1., 1.], [1., 1., 1.]],
        [[0., 1., 0.], [1., 1., 1.], [1., 1., 0.]],
        [[0., 0., 0.], [0., 0., 1.], [0., 1., 1.]],
        [[0., 0., 0.], [0., 1., 1.], [0., 1., 0.]],
        [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.]],
        [[1., 0., 0.], [1., 1., 1.], [1., 0., 1.]],
    ];

    let mut out = String::from("solid cube\n");
    for face in faces {
        out.push_str("facet normal 0 0 0\nouter loop\n");
        for corner in face {
            let _ = writeln!(out, "{}", corners(corner));
        }
        out.push_str("endloop\nendfacet\n");
    }
    out.push_str("endsolid cube\n");
    out
}

#[tokio::test]
async fn test_load_file_and_persist_settings() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("config").join("settings.json");
    let mesh_path = dir.path().join("cube.stl");
    std::fs::write(&mesh_path, cube_stl(20.0)).unwrap();

    let mut session = Session::open(settings_path.clone()).unwrap();
    let outcomes = session
        .load_sources(&[mesh_path.display().to_string()])
        .await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, "cube.stl");
    match &outcomes[0].1 {
        LoadOutcome::Installed(info) => {
            assert_eq!(info.faces, 12);
            assert_eq!(info.volume_cm3, 8);
        }
        other => panic!("expected install, got {:?}", other),
    }
    assert_eq!(session.pipeline().state(), LoadState::Rendered);

    session
        .settings()
        .borrow_mut()
        .set("resin.price", json!(75))
        .unwrap();
    session.save().unwrap();
    assert!(settings_path.exists());

    let reopened = Session::open(settings_path).unwrap();
    let settings = reopened.settings().borrow();
    assert_eq!(settings.get("resin.price").unwrap(), &json!(75));
    assert_eq!(settings.get("resin.density").unwrap(), &json!(1.1));
}

#[tokio::test]
async fn test_failed_source_does_not_abort_the_rest() {
    let dir = TempDir::new().unwrap();
    let mesh_path = dir.path().join("cube.stl");
    std::fs::write(&mesh_path, cube_stl(10.0)).unwrap();

    let mut session = Session::open(dir.path().join("settings.toml")).unwrap();
    let sources = vec![
        dir.path().join("missing.stl").display().to_string(),
        format!("file://{}", mesh_path.display()),
    ];
    let outcomes = session.load_sources(&sources).await;

    assert!(matches!(outcomes[0].1, LoadOutcome::Failed(_)));
    assert!(outcomes[1].1.is_installed());
    assert_eq!(session.pipeline().viewer().objects().len(), 1);
}

#[test]
fn test_panel_summary_follows_saved_order() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.toml");

    let session = Session::open(settings_path.clone()).unwrap();
    {
        let mut settings = session.settings().borrow_mut();
        settings
            .record_panel_order(&["screen", "resin", "buildVolume", "file", "mesh"][..])
            .unwrap();
        settings.record_panel_collapse("resin", true).unwrap();
    }
    session.save().unwrap();

    let reopened = Session::open(settings_path).unwrap();
    assert_eq!(
        reopened.panel_summary(),
        vec![
            "panel #screen",
            "panel #resin (collapsed)",
            "panel #build-volume",
            "panel #file",
            "panel #mesh",
        ]
    );
}

#[test]
fn test_scene_shows_saved_build_volume() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");

    let session = Session::open(settings_path.clone()).unwrap();
    {
        let mut settings = session.settings().borrow_mut();
        settings.set("buildVolume.size.z", json!(150)).unwrap();
        settings.set("buildVolume.color", json!(0x00ff00)).unwrap();
    }
    session.save().unwrap();

    let reopened = Session::open(settings_path).unwrap();
    let drawn = reopened.pipeline().viewer().build_volume().unwrap();
    assert_eq!(drawn.size.x, 100.0);
    assert_eq!(drawn.size.z, 150.0);
    assert_eq!(drawn.color, 0x00ff00);
    assert_eq!(drawn.opacity, 0.1);
}
