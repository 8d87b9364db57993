//! InputController: the public facade over capture and emission.
//!
//! The controller owns a [`PlatformBackend`] trait object, the shared key
//! state table the capture thread writes into, and the stop flag that tells
//! that thread to wind down. Platform-specific work lives entirely behind
//! the backend trait; this type only sequences it.
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut input = InputController::new();
//! input.init()?;
//! input.press_key(KeyCode::Space);
//! input.cleanup();
//! ```
//!
//! `init` and `cleanup` are both idempotent, and `cleanup` also runs on
//! drop, so a controller can never leak its capture thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::backend::{BackendError, PlatformBackend};
#[cfg(any(target_os = "linux", target_os = "windows"))]
use crate::backend::NativeBackend;
use crate::config::InputConfig;
use crate::keymap::{key_name, KeyCode};
use crate::state::KeyStateTable;

/// Captures real input in the background and synthesizes input on demand.
///
/// All key parameters are canonical [`KeyCode`]s; translation to whatever
/// the OS speaks happens inside the backend.
pub struct InputController {
    backend: Box<dyn PlatformBackend>,
    states: KeyStateTable,
    running: Arc<AtomicBool>,
    listener: Option<thread::JoinHandle<()>>,
    hold: Duration,
}

impl InputController {
    /// Creates a controller over the native backend for this OS, with
    /// default configuration.
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Creates a controller over the native backend for this OS.
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    pub fn with_config(config: InputConfig) -> Self {
        let backend = Box::new(NativeBackend::new(&config));
        Self::with_backend(backend, config)
    }

    /// Creates a controller over an arbitrary backend.
    ///
    /// This is how tests substitute a recording backend; see
    /// [`crate::backend::mock::MockBackend`].
    pub fn with_backend(backend: Box<dyn PlatformBackend>, config: InputConfig) -> Self {
        Self {
            backend,
            states: KeyStateTable::new(),
            running: Arc::new(AtomicBool::new(false)),
            listener: None,
            hold: config.default_hold(),
        }
    }

    /// Starts the backend and its capture thread.
    ///
    /// Calling `init` on an already-initialized controller is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend cannot come up, for
    /// example because the virtual device node or the keyboard hook was
    /// refused. The controller is left uninitialized and `init` may be
    /// retried.
    pub fn init(&mut self) -> Result<(), BackendError> {
        if self.listener.is_some() {
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);
        match self
            .backend
            .start(self.states.clone(), Arc::clone(&self.running))
        {
            Ok(handle) => {
                self.listener = Some(handle);
                info!("input controller initialized");
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                error!(error = %e, "input controller failed to initialize");
                Err(e)
            }
        }
    }

    /// Stops the capture thread, releases backend resources and forgets all
    /// observed key state.
    ///
    /// Safe to call repeatedly and before `init`; extra calls do nothing.
    pub fn cleanup(&mut self) {
        let Some(handle) = self.listener.take() else {
            return;
        };
        self.running.store(false, Ordering::SeqCst);
        if handle.join().is_err() {
            warn!("capture thread panicked during shutdown");
        }
        self.backend.shutdown();
        self.states.clear();
        info!("input controller shut down");
    }

    /// Returns whether `key` is currently held down.
    ///
    /// Backends that can ask the OS directly answer from there; otherwise
    /// the answer comes from the capture thread's state table, where a key
    /// never observed counts as released.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.backend
            .query_pressed(key)
            .unwrap_or_else(|| self.states.is_pressed(key.as_u16()))
    }

    /// Synthesizes a key-down for `key` and returns immediately.
    ///
    /// The key stays logically held until [`release_key`](Self::release_key)
    /// is called for it.
    pub fn hold_key(&mut self, key: KeyCode) {
        self.backend.emit_key(key, true);
    }

    /// Synthesizes a key-up for `key`.
    pub fn release_key(&mut self, key: KeyCode) {
        self.backend.emit_key(key, false);
    }

    /// Presses and releases `key`, blocking the caller for the configured
    /// default hold duration in between.
    pub fn press_key(&mut self, key: KeyCode) {
        self.press_key_for(key, self.hold);
    }

    /// Presses and releases `key`, blocking the caller for `hold` in
    /// between so the target application registers the press.
    pub fn press_key_for(&mut self, key: KeyCode, hold: Duration) {
        self.backend.emit_key(key, true);
        thread::sleep(hold);
        self.backend.emit_key(key, false);
    }

    /// Synthesizes a relative cursor motion of (`dx`, `dy`) pixels.
    ///
    /// Positive `dx` moves right, positive `dy` moves down.
    pub fn move_mouse(&mut self, dx: i32, dy: i32) {
        self.backend.emit_mouse_move(dx, dy);
    }

    /// Returns a human-readable name for `key`, `"Unknown"` when the key
    /// has no display name.
    pub fn key_name(&self, key: KeyCode) -> &'static str {
        key_name(key)
    }
}

impl Drop for InputController {
    fn drop(&mut self) {
        self.cleanup();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
