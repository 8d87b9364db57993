//! Integration tests for the controller lifecycle.
//!
//! These tests exercise the public API end-to-end over the mock backend:
//! `InputController` + the capture thread + the shared state table. The mock
//! stands in for a physical keyboard through its injector channel, feeding
//! device-level codes through the same translation path a real Linux
//! keystroke takes.

use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use macro_input::backend::mock::{MockBackend, MockEvent};
use macro_input::{InputConfig, InputController, KeyCode};

/// Cloned-out views into the mock, kept on this side after the backend
/// itself moves into the controller.
struct MockHandles {
    events: Arc<Mutex<Vec<MockEvent>>>,
    starts: Arc<Mutex<usize>>,
    injector: mpsc::Sender<(u16, bool)>,
}

fn make_controller() -> (InputController, MockHandles) {
    let mock = MockBackend::new();
    let handles = MockHandles {
        events: Arc::clone(&mock.events),
        starts: Arc::clone(&mock.starts),
        injector: mock.injector(),
    };
    let controller = InputController::with_backend(Box::new(mock), InputConfig::default());
    (controller, handles)
}

/// Polls `cond` every few milliseconds until it holds or `deadline` passes.
fn wait_until(deadline: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_injected_device_events_become_observable_key_state() {
    let (mut input, handles) = make_controller();
    input.init().expect("init must succeed");

    // Device code 17 is the W key on an event device.
    handles.injector.send((17, true)).expect("capture thread must be alive");
    assert!(
        wait_until(Duration::from_secs(1), || input.is_key_pressed(KeyCode::KeyW)),
        "an injected key-down must become visible through is_key_pressed"
    );

    handles.injector.send((17, false)).expect("capture thread must be alive");
    assert!(
        wait_until(Duration::from_secs(1), || !input.is_key_pressed(KeyCode::KeyW)),
        "an injected key-up must read as released"
    );

    input.cleanup();
}

#[test]
fn test_capture_translates_device_codes_to_canonical_codes() {
    let (mut input, handles) = make_controller();
    input.init().expect("init must succeed");

    // Device code 57 is the space bar; canonically that is 0x20.
    handles.injector.send((57, true)).expect("capture thread must be alive");
    assert!(
        wait_until(Duration::from_secs(1), || input.is_key_pressed(KeyCode::Space)),
        "space must be queried by its canonical code, not the device code"
    );

    input.cleanup();
}

#[test]
fn test_emission_order_is_preserved_across_kinds() {
    let (mut input, handles) = make_controller();
    input.init().expect("init must succeed");

    input.hold_key(KeyCode::KeyW);
    input.move_mouse(10, -5);
    input.release_key(KeyCode::KeyW);
    input.cleanup();

    assert_eq!(
        *handles.events.lock().unwrap(),
        vec![
            MockEvent::Key { code: 0x57, pressed: true },
            MockEvent::MouseMove { dx: 10, dy: -5 },
            MockEvent::Key { code: 0x57, pressed: false },
        ],
        "emissions must reach the backend in call order"
    );
}

#[test]
fn test_cleanup_stops_capture_and_forgets_state() {
    let (mut input, handles) = make_controller();
    input.init().expect("init must succeed");

    handles.injector.send((17, true)).expect("capture thread must be alive");
    assert!(wait_until(Duration::from_secs(1), || {
        input.is_key_pressed(KeyCode::KeyW)
    }));

    input.cleanup();
    assert!(
        !input.is_key_pressed(KeyCode::KeyW),
        "cleanup must clear remembered key state"
    );

    // Events sent after cleanup land in a parked channel; nothing drains
    // them into the table.
    let _ = handles.injector.send((17, true));
    thread::sleep(Duration::from_millis(50));
    assert!(
        !input.is_key_pressed(KeyCode::KeyW),
        "no capture may happen after cleanup"
    );
}

#[test]
fn test_controller_can_be_reinitialized_after_cleanup() {
    let (mut input, handles) = make_controller();

    input.init().expect("first init must succeed");
    input.cleanup();
    input.init().expect("init after cleanup must succeed");

    // The restarted capture thread must drain injected events again.
    handles.injector.send((17, true)).expect("capture thread must be alive");
    assert!(
        wait_until(Duration::from_secs(1), || input.is_key_pressed(KeyCode::KeyW)),
        "capture must work again after a restart"
    );

    input.cleanup();
    assert_eq!(
        *handles.starts.lock().unwrap(),
        2,
        "each init after cleanup must start the backend anew"
    );
}

#[test]
fn test_press_key_during_capture_blocks_then_releases() {
    let (mut input, handles) = make_controller();
    input.init().expect("init must succeed");

    let started = Instant::now();
    input.press_key(KeyCode::KeyX);
    let elapsed = started.elapsed();

    input.cleanup();

    assert!(
        elapsed >= Duration::from_millis(50),
        "press_key must block for the default 50ms hold, returned after {elapsed:?}"
    );
    assert_eq!(
        *handles.events.lock().unwrap(),
        vec![
            MockEvent::Key { code: 0x58, pressed: true },
            MockEvent::Key { code: 0x58, pressed: false },
        ]
    );
}
