//! TOML-based configuration for the input controller.
//!
//! All fields are optional in the file; anything absent falls back to its
//! default, so an empty or missing config file yields a fully working
//! controller.
//!
//! ```toml
//! device_name = "macro-input virtual device"
//! poll_interval_ms = 1
//! default_hold_ms = 50
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file. This keeps old
//! config files working when newer fields are added.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Controller configuration.
///
/// The capture cadence doubles as the shutdown latency bound: the capture
/// loop checks its stop flag once per interval, so keep `poll_interval_ms`
/// small.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Name the synthetic output device registers under (visible in
    /// `/proc/bus/input/devices` on Linux).
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Capture loop polling interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// How long `press_key` holds a key before releasing it, in milliseconds.
    #[serde(default = "default_hold_ms")]
    pub default_hold_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device_name() -> String {
    "macro-input virtual device".to_string()
}
fn default_poll_interval_ms() -> u64 {
    1
}
fn default_hold_ms() -> u64 {
    50
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            poll_interval_ms: default_poll_interval_ms(),
            default_hold_ms: default_hold_ms(),
        }
    }
}

impl InputConfig {
    /// Loads the configuration from `path`, returning `InputConfig::default()`
    /// if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than
    /// "not found", and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: InputConfig = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// The capture loop polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The default `press_key` hold time as a [`Duration`].
    pub fn default_hold(&self) -> Duration {
        Duration::from_millis(self.default_hold_ms)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
