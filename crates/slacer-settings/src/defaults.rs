//! Default configuration tree
//!
//! Every namespace with a `panel` record owns one sidebar panel. Default
//! positions are contiguous from 0: file, mesh, buildVolume, resin, screen.
//! `viewer3d` has no panel.

use serde_json::{json, Map, Value};
use slacer_core::MM_PER_INCH;

/// Default build volume edge length (mm)
pub const DEFAULT_BUILD_VOLUME_MM: u32 = 100;

/// Default screen diagonal, stored in mm but shown in inches
pub const DEFAULT_SCREEN_DIAGONAL_IN: f64 = 22.0;

/// Build the default configuration tree
pub fn default_tree() -> Map<String, Value> {
    let tree = json!({
        "buildVolume": {
            "size": {
                "x": DEFAULT_BUILD_VOLUME_MM,
                "y": DEFAULT_BUILD_VOLUME_MM,
                "z": DEFAULT_BUILD_VOLUME_MM
            },
            "unit": "mm",
            "color": 0xcccccc,
            "opacity": 0.1,
            "panel": { "collapsed": false, "position": 2 }
        },
        "resin": {
            "density": 1.1,
            "price": 50,
            "panel": { "collapsed": false, "position": 3 }
        },
        "mesh": {
            "color": 0x333333,
            "panel": { "collapsed": false, "position": 1 }
        },
        "screen": {
            "width": 1680,
            "height": 1050,
            "diagonal": {
                "size": DEFAULT_SCREEN_DIAGONAL_IN * MM_PER_INCH,
                "unit": "in"
            },
            "panel": { "collapsed": false, "position": 4 }
        },
        "file": {
            "panel": { "collapsed": false, "position": 0 }
        },
        "viewer3d": {
            "color": 0xffffff
        }
    });

    match tree {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
