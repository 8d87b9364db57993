//! macro-input demo application entry point.
//!
//! An interactive exerciser for the input controller: it watches the
//! function keys and runs a synthesis routine when one is tapped, while
//! continuously reporting which monitored keys are physically held.
//!
//! # Layout
//!
//! ```text
//! main()
//!  └─ InputController::with_config()   -- native backend for this OS
//!  └─ init()                           -- capture thread + virtual device
//!  └─ monitor_loop()                   -- ~10ms poll, dispatches routines
//!       ├─ F5  single Space press          ├─ F8  rapid X presses
//!       ├─ F6  hold W for three seconds    ├─ F9  Shift+W combo
//!       ├─ F7  mouse square                └─ ESC exit
//! ```

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;
use tracing_subscriber::EnvFilter;

use macro_input::{InputConfig, InputController, KeyCode};

/// Keys whose held state is reported every half second.
const MONITORED_KEYS: [KeyCode; 7] = [
    KeyCode::KeyW,
    KeyCode::KeyA,
    KeyCode::KeyS,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::ControlLeft,
];

/// Keys that trigger a demo routine on their rising edge.
const TRIGGER_KEYS: [KeyCode; 5] = [
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
];

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional config file path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => InputConfig::load_or_default(&path)?,
        None => InputConfig::default(),
    };

    info!("macro-input demo starting");
    println!("Initializing input system...");

    let mut input = InputController::with_config(config);
    if let Err(e) = input.init() {
        #[cfg(target_os = "linux")]
        eprintln!(
            "On Linux the process needs read access to /dev/input/event* and \
             write access to /dev/uinput (sudo, or the input/uinput groups)."
        );
        return Err(e.into());
    }

    println!("Input system initialized successfully!");
    print_menu();

    // Give the user time to read the menu before key watching begins.
    thread::sleep(Duration::from_secs(2));

    monitor_loop(&mut input);

    println!("\nCleaning up...");
    input.cleanup();
    println!("Demo finished. Goodbye!");
    Ok(())
}

fn print_menu() {
    println!("\n========================================");
    println!("       macro-input demo");
    println!("========================================");
    println!("Press keys to run the routines:");
    println!("  F5  - Single key press (Space)");
    println!("  F6  - Key hold and release (W)");
    println!("  F7  - Mouse movement (100px square)");
    println!("  F8  - Rapid key presses (X)");
    println!("  F9  - Multiple keys combo (Shift+W)");
    println!("  ESC - Exit");
    println!("========================================\n");
}

/// Polls key state every ~10ms, firing routines on trigger-key rising edges
/// and printing the held monitored keys every 500ms, until ESC is pressed.
fn monitor_loop(input: &mut InputController) {
    println!("Monitoring key states (press keys to see detection)...");

    let mut previous: HashMap<KeyCode, bool> = HashMap::new();
    let mut last_report = Instant::now();

    loop {
        if input.is_key_pressed(KeyCode::Escape) {
            println!("\nESC pressed, leaving monitor mode...");
            break;
        }

        for &key in &TRIGGER_KEYS {
            if input.is_key_pressed(key) && !previous.get(&key).copied().unwrap_or(false) {
                run_routine(input, key);
            }
        }
        // Latch trigger states after the routines so a key still held when a
        // long routine returns does not re-fire it.
        for &key in &TRIGGER_KEYS {
            let pressed = input.is_key_pressed(key);
            previous.insert(key, pressed);
        }

        if last_report.elapsed() >= Duration::from_millis(500) {
            let held: Vec<&str> = MONITORED_KEYS
                .iter()
                .filter(|&&key| input.is_key_pressed(key))
                .map(|&key| input.key_name(key))
                .collect();
            if !held.is_empty() {
                println!("Currently pressed: {}", held.join(" "));
            }
            last_report = Instant::now();
        }

        thread::sleep(Duration::from_millis(10));
    }
}

fn run_routine(input: &mut InputController, trigger: KeyCode) {
    match trigger {
        KeyCode::F5 => single_press(input),
        KeyCode::F6 => hold_and_release(input),
        KeyCode::F7 => mouse_square(input),
        KeyCode::F8 => rapid_presses(input),
        KeyCode::F9 => key_combo(input),
        _ => {}
    }
}

fn single_press(input: &mut InputController) {
    println!("[F5] Pressing Space in 2 seconds...");
    thread::sleep(Duration::from_secs(2));

    print!("Pressing Space... ");
    input.press_key(KeyCode::Space);
    println!("Done!");
}

fn hold_and_release(input: &mut InputController) {
    println!("[F6] Holding W for 3 seconds...");
    thread::sleep(Duration::from_secs(1));

    print!("Holding W... ");
    input.hold_key(KeyCode::KeyW);
    thread::sleep(Duration::from_secs(3));
    input.release_key(KeyCode::KeyW);
    println!("Released!");
}

fn mouse_square(input: &mut InputController) {
    println!("[F7] Moving mouse in a square pattern...");
    thread::sleep(Duration::from_secs(1));

    let distance = 100;
    let steps = 20;
    let step_size = distance / steps;
    let sides: [(i32, i32, &str); 4] = [
        (step_size, 0, "right"),
        (0, step_size, "down"),
        (-step_size, 0, "left"),
        (0, -step_size, "up"),
    ];

    for (dx, dy, direction) in sides {
        print!("{direction}... ");
        for _ in 0..steps {
            input.move_mouse(dx, dy);
            thread::sleep(Duration::from_millis(20));
        }
    }
    println!("Done!");
}

fn rapid_presses(input: &mut InputController) {
    println!("[F8] Rapid fire key presses (X, 10 times)...");
    thread::sleep(Duration::from_secs(1));

    for i in 0..10 {
        print!("Press {}/10... ", i + 1);
        input.press_key_for(KeyCode::KeyX, Duration::from_millis(30));
        thread::sleep(Duration::from_millis(100));
    }
    println!("Done!");
}

fn key_combo(input: &mut InputController) {
    println!("[F9] Key combination (Shift + W)...");
    thread::sleep(Duration::from_secs(1));

    print!("Holding LShift... ");
    input.hold_key(KeyCode::ShiftLeft);
    thread::sleep(Duration::from_millis(100));

    print!("Pressing W 5 times... ");
    for _ in 0..5 {
        input.press_key(KeyCode::KeyW);
        thread::sleep(Duration::from_millis(200));
    }

    input.release_key(KeyCode::ShiftLeft);
    println!("Releasing LShift... Done!");
}
