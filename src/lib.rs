//! # macro-input
//!
//! Cross-platform keyboard and mouse control for automation tools: observe
//! which keys are physically held and synthesize key presses and cursor
//! motion of your own, through one API on Windows and Linux.
//!
//! # How it works (for beginners)
//!
//! An automation tool needs two abilities. It must *watch* real input, so a
//! trigger key like F5 can start a routine, and it must *generate* input, so
//! the routine can type and move the mouse into some target application.
//! Both sides differ completely per OS, so this crate pins one canonical key
//! numbering (Windows virtual-key codes, see [`KeyCode`]) and hides the OS
//! differences behind a backend trait:
//!
//! - **`controller`** – The [`InputController`] facade. Owns the backend and
//!   the capture thread; every public operation (`is_key_pressed`,
//!   `hold_key`, `press_key`, `move_mouse`, ...) lives here.
//!
//! - **`keymap`** – The canonical [`KeyCode`] enum plus the translation
//!   tables between canonical codes and Linux evdev codes.  Untranslatable
//!   codes pass through numerically unchanged.
//!
//! - **`backend`** – One implementation per OS.  Windows installs a
//!   low-level keyboard hook and emits through `SendInput`; Linux reads the
//!   `/dev/input/event*` nodes and emits through a `/dev/uinput` virtual
//!   device.  A recording mock backs the test suite.
//!
//! - **`state`** – The mutex-guarded pressed-key table the capture thread
//!   writes and `is_key_pressed` falls back to.
//!
//! - **`config`** – Optional TOML settings: virtual device name, capture
//!   poll interval, default press hold time.
//!
//! # Quick start
//!
//! ```ignore
//! use macro_input::{InputController, KeyCode};
//!
//! let mut input = InputController::new();
//! input.init()?;
//!
//! if input.is_key_pressed(KeyCode::F5) {
//!     input.press_key(KeyCode::Space);
//!     input.move_mouse(100, 0);
//! }
//!
//! input.cleanup();
//! ```
//!
//! # Privileges
//!
//! On Linux the process needs read access to `/dev/input/event*` and write
//! access to `/dev/uinput` (root, or the `input`/`uinput` groups plus a
//! udev rule).  On Windows no elevation is needed, but UIPI silently drops
//! events aimed at higher-integrity windows.

pub mod backend;
pub mod config;
pub mod controller;
pub mod keymap;
pub mod state;

// Re-export the most-used types at the crate root so callers can write
// `macro_input::InputController` instead of spelling out the module path.
pub use backend::BackendError;
pub use config::{ConfigError, InputConfig};
pub use controller::InputController;
pub use keymap::{key_name, KeyCode};
pub use state::KeyStateTable;
