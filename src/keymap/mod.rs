//! Key code translation for cross-platform input control.
//!
//! The canonical representation is the Windows Virtual Key space (see
//! [`vk::KeyCode`]). On Windows translation is therefore the identity; on
//! Linux the [`evdev`] tables convert to and from kernel key codes at the
//! capture and emission boundaries.

pub mod evdev;
pub mod vk;

pub use evdev::{evdev_to_vk, vk_to_evdev};
pub use vk::KeyCode;

/// Returns the fixed display name for `key`, or `"Unknown"` for keys outside
/// the (deliberately partial) display table.
pub fn key_name(key: KeyCode) -> &'static str {
    key.name()
}
