//! Thread-safe key state tracking.
//!
//! [`KeyStateTable`] is the single piece of mutable state shared between the
//! caller's thread and the background capture loop. Exactly one writer (the
//! capture loop) and any number of readers go through the same mutex, so a
//! reader always observes the most recent completed update and never a torn
//! one.
//!
//! Entries are keyed by raw canonical code (`u16`) rather than by
//! [`crate::KeyCode`]: the translation layer passes unmapped native codes
//! through unchanged, and those raw values must be storable too.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared pressed/released table, keyed by raw canonical code.
///
/// Cloning is cheap and hands out another handle to the same underlying
/// table; the capture loop and the controller each hold one.
#[derive(Clone, Debug, Default)]
pub struct KeyStateTable {
    inner: Arc<Mutex<HashMap<u16, bool>>>,
}

impl KeyStateTable {
    /// Creates an empty table. Every key starts out released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pressed/released transition for `code`.
    ///
    /// Entries are inserted lazily on the first observed transition.
    pub fn set(&self, code: u16, pressed: bool) {
        let mut map = self.inner.lock().expect("lock poisoned");
        map.insert(code, pressed);
    }

    /// Returns the current pressed state for `code`.
    ///
    /// A key that has never been observed reads as released.
    pub fn is_pressed(&self, code: u16) -> bool {
        let map = self.inner.lock().expect("lock poisoned");
        map.get(&code).copied().unwrap_or(false)
    }

    /// Discards every recorded entry, returning the table to its initial
    /// all-released state. Called at teardown.
    pub fn clear(&self) {
        let mut map = self.inner.lock().expect("lock poisoned");
        map.clear();
    }
}
