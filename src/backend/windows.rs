//! Windows backend: WH_KEYBOARD_LL hook capture plus SendInput emission.
//!
//! The hook is installed on the capture thread itself and kept alive by a
//! `PeekMessageW` pump running at the configured poll cadence, so the stop
//! flag is observed between pump passes. Reads do not go through the hook at
//! all: `GetAsyncKeyState` already exposes globally synchronized key state,
//! so [`HookBackend::query_pressed`] answers directly from the OS and the
//! hook exists only to observe hardware transitions.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.
//!
//! # One instance per process
//!
//! The Win32 hook API takes a free-function callback, which forces a
//! process-wide back-reference to the active state table. Only one backend
//! may capture at a time; a second concurrent `start` fails with
//! [`BackendError::HookAlreadyActive`]. The slot is reclaimed by `shutdown`,
//! so stop-then-start sequences work.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{info, trace};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT,
    KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MOUSEEVENTF_MOVE, MOUSEINPUT, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, PeekMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, KBDLLHOOKSTRUCT_FLAGS,
    LLKHF_INJECTED, MSG, PM_REMOVE, WH_KEYBOARD_LL, WM_KEYDOWN, WM_SYSKEYDOWN,
};

use super::{BackendError, PlatformBackend};
use crate::config::InputConfig;
use crate::keymap::KeyCode;
use crate::state::KeyStateTable;

/// Back-reference for the hook callback. Holds the active instance's state
/// table while a capture loop is running, `None` otherwise.
static ACTIVE_STATES: Mutex<Option<KeyStateTable>> = Mutex::new(None);

/// The low-level-hook backend.
pub struct HookBackend {
    poll_interval: Duration,
}

impl HookBackend {
    /// Creates an unstarted backend configured from `config`.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
        }
    }
}

impl PlatformBackend for HookBackend {
    fn start(
        &mut self,
        states: KeyStateTable,
        running: Arc<AtomicBool>,
    ) -> Result<thread::JoinHandle<()>, BackendError> {
        // Claim the process-wide hook slot before anything observable
        // happens.
        {
            let mut slot = ACTIVE_STATES.lock().expect("lock poisoned");
            if slot.is_some() {
                return Err(BackendError::HookAlreadyActive);
            }
            *slot = Some(states);
        }

        let (install_tx, install_rx) = mpsc::channel();
        let poll_interval = self.poll_interval;
        let handle = match thread::Builder::new()
            .name("input-capture".to_string())
            .spawn(move || hook_message_pump(install_tx, running, poll_interval))
        {
            Ok(handle) => handle,
            Err(e) => {
                clear_active_states();
                return Err(BackendError::ThreadSpawn(e));
            }
        };

        // The hook must be installed on the pump thread; wait for its
        // verdict so a rejected install surfaces here, synchronously.
        match install_rx.recv() {
            Ok(Ok(())) => {
                info!("keyboard hook installed");
                Ok(handle)
            }
            Ok(Err(message)) => {
                let _ = handle.join();
                clear_active_states();
                Err(BackendError::HookInstall(message))
            }
            Err(_) => {
                let _ = handle.join();
                clear_active_states();
                Err(BackendError::HookInstall(
                    "capture thread exited before installing the hook".to_string(),
                ))
            }
        }
    }

    fn emit_key(&mut self, key: KeyCode, pressed: bool) {
        let flags = if pressed {
            KEYBD_EVENT_FLAGS(0)
        } else {
            KEYEVENTF_KEYUP
        };
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(key.as_u16()),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        // SAFETY: input is a valid INPUT structure on the stack.
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            trace!(key = ?key, "emission dropped");
        }
    }

    fn emit_mouse_move(&mut self, dx: i32, dy: i32) {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    mouseData: 0,
                    dwFlags: MOUSEEVENTF_MOVE,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        // SAFETY: input is a valid INPUT structure on the stack.
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            trace!(dx, dy, "emission dropped");
        }
    }

    fn query_pressed(&self, key: KeyCode) -> Option<bool> {
        // SAFETY: GetAsyncKeyState is always safe to call.
        let state = unsafe { GetAsyncKeyState(i32::from(key.as_u16())) };
        Some((state as u16 & 0x8000) != 0)
    }

    fn shutdown(&mut self) {
        // The hook itself is released by the pump thread on exit; only the
        // process-wide slot remains to reclaim.
        clear_active_states();
    }
}

fn clear_active_states() {
    *ACTIVE_STATES.lock().expect("lock poisoned") = None;
}

/// Entry point for the capture thread: installs the hook, reports the
/// result, then pumps messages until `running` is cleared.
fn hook_message_pump(
    install_tx: mpsc::Sender<Result<(), String>>,
    running: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    // SAFETY: WH_KEYBOARD_LL callbacks are dispatched through the installing
    // thread's message queue, so the hook must be installed here.
    let hook: HHOOK = match unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0)
    } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = install_tx.send(Err(e.to_string()));
            return;
        }
    };
    let _ = install_tx.send(Ok(()));
    info!("capture loop started");

    let mut msg = MSG::default();
    while running.load(Ordering::SeqCst) {
        // SAFETY: standard PeekMessage/TranslateMessage/DispatchMessage pump.
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        thread::sleep(poll_interval);
    }

    // SAFETY: the handle came from SetWindowsHookExW above.
    unsafe {
        UnhookWindowsHookEx(hook).ok();
    }
    info!("capture loop stopped");
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows from the pump thread. It must return quickly (< ~300ms)
/// or the OS removes the hook.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
    let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);

    // Injected events are skipped so the listener never reacts to this
    // crate's own synthesized presses. Canonical codes are VK codes on
    // Windows, so the raw value is stored as-is.
    if (kbs.flags & LLKHF_INJECTED) == KBDLLHOOKSTRUCT_FLAGS(0) {
        let pressed = matches!(w_param.0 as u32, WM_KEYDOWN | WM_SYSKEYDOWN);
        if let Some(states) = ACTIVE_STATES.lock().expect("lock poisoned").as_ref() {
            states.set(kbs.vkCode as u16, pressed);
        }
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
