//! Platform input backends.
//!
//! A backend owns both sides of the OS boundary: the capture loop that
//! observes real key transitions, and the command emitter that synthesizes
//! presses and pointer motion. The two share OS resources (the virtual
//! device on Linux, the hook and `SendInput` rights on Windows), so they
//! live behind one seam.
//!
//! # Testability
//!
//! The [`PlatformBackend`] trait allows the controller and its tests to run
//! against [`mock::MockBackend`] without touching OS input APIs. Production
//! code selects the native implementation at compile time via
//! [`NativeBackend`].

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use crate::keymap::KeyCode;
use crate::state::KeyStateTable;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

/// The backend compiled for the current target.
#[cfg(target_os = "linux")]
pub use linux::EvdevBackend as NativeBackend;

/// The backend compiled for the current target.
#[cfg(target_os = "windows")]
pub use windows::HookBackend as NativeBackend;

/// Error type for backend startup.
///
/// Startup failures are the loud half of the error contract: they surface
/// synchronously from `init()` and abort the capture loop before it begins.
/// Steady-state emission failures are deliberately not represented here
/// (they are logged and dropped, never returned).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The synthetic output device could not be created. On Linux this means
    /// `/dev/uinput` was missing or not writable.
    #[error("failed to create virtual input device: {0}")]
    VirtualDevice(#[source] std::io::Error),
    /// The OS rejected the low-level keyboard hook.
    #[error("failed to install keyboard hook: {0}")]
    HookInstall(String),
    /// Another instance already has the process-wide keyboard hook.
    #[error("another capture hook is already active in this process")]
    HookAlreadyActive,
    /// The capture loop thread could not be spawned.
    #[error("failed to spawn capture thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),
}

/// One platform's capture loop plus command emitter.
///
/// The production implementations are [`linux::EvdevBackend`] and
/// [`windows::HookBackend`]; tests use [`mock::MockBackend`].
pub trait PlatformBackend: Send {
    /// Acquires OS resources and starts the capture loop on a background
    /// thread.
    ///
    /// The loop writes observed transitions into `states` (translated to
    /// canonical codes) and exits promptly after `running` is cleared. The
    /// returned handle is joined by the caller at teardown.
    ///
    /// # Errors
    ///
    /// Fails synchronously when the native resources cannot be acquired; the
    /// capture loop is then never started and no retry is attempted.
    fn start(
        &mut self,
        states: KeyStateTable,
        running: Arc<AtomicBool>,
    ) -> Result<thread::JoinHandle<()>, BackendError>;

    /// Synthesizes a key press or release.
    ///
    /// Best effort: emission failures after a successful start are logged at
    /// trace level and never surfaced to the caller.
    fn emit_key(&mut self, key: KeyCode, pressed: bool);

    /// Synthesizes a relative pointer motion of (`dx`, `dy`).
    ///
    /// Best effort, like [`PlatformBackend::emit_key`].
    fn emit_mouse_move(&mut self, dx: i32, dy: i32);

    /// Reads the authoritative pressed state directly from the OS, where the
    /// platform offers one.
    ///
    /// Returns `Some` on Windows (`GetAsyncKeyState` is already globally
    /// synchronized) and `None` on Linux, where the caller falls back to the
    /// shared state table.
    fn query_pressed(&self, key: KeyCode) -> Option<bool>;

    /// Releases OS resources that are not owned by the capture thread.
    ///
    /// Called after the capture loop has been stopped and joined. Must be
    /// idempotent.
    fn shutdown(&mut self);
}
