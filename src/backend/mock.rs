//! Mock backend for unit testing.
//!
//! # Why a mock backend?
//!
//! The real backends (`EvdevBackend`, `HookBackend`) make OS calls that:
//!
//! - Require device-node privileges or a desktop session to run.
//! - Actually press keys and move the cursor on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `MockBackend` replaces all OS calls with in-memory recording. Each
//! emitted event is pushed into a shared `Vec` so test assertions can
//! inspect exactly what was emitted and in what order.
//!
//! Because the controller takes ownership of its backend as a
//! `Box<dyn PlatformBackend>`, the records live behind `Arc` handles that
//! tests clone off before handing the mock over.
//!
//! # Simulated capture
//!
//! `start` spawns a real thread, just like the platform backends. Tests
//! feed it device-level key codes through the sender returned by
//! [`MockBackend::injector`]; the thread translates them to canonical codes
//! and updates the shared state table, which is the same path a physical
//! keystroke takes on Linux.
//!
//! # `fail_start` flag
//!
//! Set `fail_start = true` before handing the mock to a controller to
//! simulate a failed hook install. This lets you test error-handling paths
//! in callers without needing a broken OS.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{BackendError, PlatformBackend};
use crate::keymap::{evdev_to_vk, KeyCode};
use crate::state::KeyStateTable;

/// One recorded emission call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEvent {
    /// A key transition passed to `emit_key`, in canonical code form.
    Key { code: u16, pressed: bool },
    /// A relative displacement passed to `emit_mouse_move`.
    MouseMove { dx: i32, dy: i32 },
}

/// A backend that records all calls without performing OS API calls.
pub struct MockBackend {
    /// Records every `emit_key` and `emit_mouse_move` call, in order.
    pub events: Arc<Mutex<Vec<MockEvent>>>,
    /// Counts `start` calls that got as far as spawning the thread.
    pub starts: Arc<Mutex<usize>>,
    /// Counts `shutdown` calls.
    pub shutdowns: Arc<Mutex<usize>>,
    /// When `true`, `start` fails with a hook-install error. Use this to
    /// test error-handling paths in callers.
    pub fail_start: bool,
    /// When `Some`, `query_pressed` answers with this value instead of
    /// deferring to the state table.
    pub query_override: Option<bool>,
    source_tx: mpsc::Sender<(u16, bool)>,
    // The capture thread borrows the receiver for its lifetime and parks it
    // back here on exit, so a stopped mock can be started again.
    source_rx: Arc<Mutex<Option<mpsc::Receiver<(u16, bool)>>>>,
}

impl MockBackend {
    /// Creates a new `MockBackend` with empty records and `fail_start = false`.
    pub fn new() -> Self {
        let (source_tx, source_rx) = mpsc::channel();
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            starts: Arc::new(Mutex::new(0)),
            shutdowns: Arc::new(Mutex::new(0)),
            fail_start: false,
            query_override: None,
            source_tx,
            source_rx: Arc::new(Mutex::new(Some(source_rx))),
        }
    }

    /// Returns a sender for feeding device-level key events to the capture
    /// thread, standing in for a physical keyboard.
    pub fn injector(&self) -> mpsc::Sender<(u16, bool)> {
        self.source_tx.clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBackend for MockBackend {
    fn start(
        &mut self,
        states: KeyStateTable,
        running: Arc<AtomicBool>,
    ) -> Result<thread::JoinHandle<()>, BackendError> {
        if self.fail_start {
            return Err(BackendError::HookInstall("mock failure".to_string()));
        }
        let slot = Arc::clone(&self.source_rx);
        let source_rx = slot
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| BackendError::HookInstall("mock already started".to_string()))?;

        *self.starts.lock().unwrap() += 1;
        thread::Builder::new()
            .name("input-capture".to_string())
            .spawn(move || {
                while running.load(Ordering::SeqCst) {
                    match source_rx.recv_timeout(Duration::from_millis(1)) {
                        Ok((code, pressed)) => states.set(evdev_to_vk(code), pressed),
                        Err(mpsc::RecvTimeoutError::Timeout) => {}
                        Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    }
                }
                *slot.lock().unwrap() = Some(source_rx);
            })
            .map_err(BackendError::ThreadSpawn)
    }

    fn emit_key(&mut self, key: KeyCode, pressed: bool) {
        self.events.lock().unwrap().push(MockEvent::Key {
            code: key.as_u16(),
            pressed,
        });
    }

    fn emit_mouse_move(&mut self, dx: i32, dy: i32) {
        self.events
            .lock()
            .unwrap()
            .push(MockEvent::MouseMove { dx, dy });
    }

    fn query_pressed(&self, _key: KeyCode) -> Option<bool> {
        self.query_override
    }

    fn shutdown(&mut self) {
        *self.shutdowns.lock().unwrap() += 1;
    }
}
