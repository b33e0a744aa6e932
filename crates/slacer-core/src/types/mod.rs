//! Shared-state type aliases used across SLAcer crates.

pub mod aliases;

pub use aliases::*;
