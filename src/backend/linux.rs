//! Linux backend: evdev capture plus a uinput virtual device for emission.
//!
//! Capture reads key-class events from every `/dev/input/event*` node;
//! emission goes through a synthetic uinput device registered with key and
//! relative-axis capabilities. Both require elevated access: read permission
//! on the event nodes (the `input` group, typically) and write permission on
//! `/dev/uinput` (`modprobe uinput` if the node is missing).
//!
//! # Known limitations
//!
//! - Devices are enumerated once when the capture loop starts. Keyboards
//!   plugged in afterwards are invisible for the session.
//! - The loop does not filter out this crate's own virtual device, so
//!   synthetic presses are observed back into the state table. That still
//!   reflects the system-wide truth (the key *is* logically down), unlike
//!   Windows where injected events are skipped.

use std::io;
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, Device, EventType, InputEvent, InputId, Key, RelativeAxisType};
use tracing::{info, trace, warn};

use super::{BackendError, PlatformBackend};
use crate::config::InputConfig;
use crate::keymap::{evdev_to_vk, vk_to_evdev, KeyCode};
use crate::state::KeyStateTable;

/// The evdev/uinput backend.
///
/// The virtual device handle lives on the caller's thread (emission side);
/// the capture loop opens and owns its own set of event-node descriptors,
/// which close when the loop exits.
pub struct EvdevBackend {
    device: Option<VirtualDevice>,
    device_name: String,
    poll_interval: Duration,
}

impl EvdevBackend {
    /// Creates an unstarted backend configured from `config`.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            device: None,
            device_name: config.device_name.clone(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Writes `events` to the virtual device, best effort.
    ///
    /// The device appends one `SYN_REPORT` per call, so every batch handed
    /// here is applied by the kernel as a unit.
    fn write_events(&mut self, events: &[InputEvent]) {
        let Some(device) = self.device.as_mut() else {
            trace!("emission dropped, no virtual device");
            return;
        };
        if let Err(e) = device.emit(events) {
            trace!(error = %e, "emission dropped");
        }
    }
}

impl PlatformBackend for EvdevBackend {
    fn start(
        &mut self,
        states: KeyStateTable,
        running: Arc<AtomicBool>,
    ) -> Result<thread::JoinHandle<()>, BackendError> {
        let device =
            build_virtual_device(&self.device_name).map_err(BackendError::VirtualDevice)?;
        info!(name = %self.device_name, "virtual input device created");
        self.device = Some(device);

        let poll_interval = self.poll_interval;
        match thread::Builder::new()
            .name("input-capture".to_string())
            .spawn(move || capture_loop(states, running, poll_interval))
        {
            Ok(handle) => Ok(handle),
            Err(e) => {
                self.device = None;
                Err(BackendError::ThreadSpawn(e))
            }
        }
    }

    fn emit_key(&mut self, key: KeyCode, pressed: bool) {
        let code = vk_to_evdev(key.as_u16());
        self.write_events(&[InputEvent::new(EventType::KEY, code, i32::from(pressed))]);
    }

    fn emit_mouse_move(&mut self, dx: i32, dy: i32) {
        // Two separate writes so each axis carries its own SYN_REPORT.
        self.write_events(&[InputEvent::new(
            EventType::RELATIVE,
            RelativeAxisType::REL_X.0,
            dx,
        )]);
        self.write_events(&[InputEvent::new(
            EventType::RELATIVE,
            RelativeAxisType::REL_Y.0,
            dy,
        )]);
    }

    fn query_pressed(&self, _key: KeyCode) -> Option<bool> {
        // No authoritative OS-side read on Linux; reads go to the table.
        None
    }

    fn shutdown(&mut self) {
        if self.device.take().is_some() {
            info!("virtual input device released");
        }
    }
}

/// Builds the uinput device with the capability set the capture side expects:
/// every key code below 256, plus relative X/Y motion.
fn build_virtual_device(name: &str) -> io::Result<VirtualDevice> {
    let mut keys = AttributeSet::<Key>::new();
    for code in 0..256u16 {
        keys.insert(Key::new(code));
    }

    let mut axes = AttributeSet::<RelativeAxisType>::new();
    axes.insert(RelativeAxisType::REL_X);
    axes.insert(RelativeAxisType::REL_Y);

    VirtualDeviceBuilder::new()?
        .name(name)
        .input_id(InputId::new(BusType::BUS_USB, 0x1234, 0x5678, 0x0001))
        .with_keys(&keys)?
        .with_relative_axes(&axes)?
        .build()
}

/// The capture loop body. Runs until `running` is cleared.
fn capture_loop(states: KeyStateTable, running: Arc<AtomicBool>, poll_interval: Duration) {
    let mut devices = open_event_devices();
    if devices.is_empty() {
        warn!("no readable devices under /dev/input; key states will stay empty");
    }
    info!(devices = devices.len(), "capture loop started");

    while running.load(Ordering::SeqCst) {
        for device in &mut devices {
            match device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        if event.event_type() != EventType::KEY {
                            continue;
                        }
                        // Autorepeat (value 2) still means the key is down.
                        let canonical = evdev_to_vk(event.code());
                        states.set(canonical, event.value() != 0);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                // Unplugged devices keep their slot and keep failing; the
                // session-long device list is fixed at loop start.
                Err(_) => {}
            }
        }
        thread::sleep(poll_interval);
    }

    info!("capture loop stopped");
}

/// Opens every `/dev/input/event*` node present right now, non-blocking.
fn open_event_devices() -> Vec<Device> {
    let mut devices = Vec::new();

    let entries = match std::fs::read_dir("/dev/input") {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "cannot enumerate /dev/input");
            return devices;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_event_node = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("event"));
        if !is_event_node {
            continue;
        }

        match Device::open(&path) {
            Ok(device) => {
                set_nonblocking(&device);
                trace!(
                    path = %path.display(),
                    name = device.name().unwrap_or("?"),
                    "opened input device"
                );
                devices.push(device);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "cannot open input device"),
        }
    }

    devices
}

/// Switches the device descriptor to non-blocking reads.
///
/// One thread polls every device in turn, so a blocking read on an idle
/// keyboard would starve the rest and the stop flag.
fn set_nonblocking(device: &Device) {
    let fd = device.as_raw_fd();
    // SAFETY: `fd` is owned by `device`, which outlives both calls; fcntl on
    // a valid descriptor has no memory-safety concerns.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags >= 0 {
            libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
        }
    }
}
