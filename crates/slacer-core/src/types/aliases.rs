//! Type aliases for shared state.
//!
//! Settings and the load pipeline are mutated from one logical thread, so the
//! application root normally hands components a [`Shared`] handle. Hosts that
//! drive them from several threads must go through a [`ThreadSafe`] handle
//! instead, which serializes every access behind one mutex.
//!
//! ```rust,ignore
//! use slacer_core::types::*;
//!
//! let settings: Shared<SettingsModel> = shared(SettingsModel::new());
//! settings.borrow_mut().set("resin.price", json!(75))?;
//! ```

use parking_lot::Mutex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Wrap a value for single-threaded sharing
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Wrap a value for cross-thread sharing
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
