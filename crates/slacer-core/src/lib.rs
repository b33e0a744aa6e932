//! # SLAcer Core
//!
//! Core types, errors, and utilities shared by the SLAcer crates:
//! error kinds, millimeter/inch conversion, shared-state aliases, and a
//! broadcast event dispatcher.

pub mod error;
pub mod event;
pub mod types;
pub mod units;

pub use error::{Error, LoadError, Result, StoreError, UnitError};
pub use event::EventDispatcher;
pub use types::{shared, thread_safe, Shared, ThreadSafe};
pub use units::{LengthUnit, MM_PER_INCH};
