//! Canonical key identifiers and their numeric encoding.
//!
//! The canonical representation reuses Windows Virtual Key (VK) values, so on
//! Windows no translation is needed at all and on Linux a single table maps
//! to/from evdev codes. All public APIs of this crate speak [`KeyCode`];
//! platform codes never leak past the backend boundary.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # What is a Virtual Key code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code",
//! defined in `<winuser.h>` and named `VK_*` (e.g., `VK_RETURN = 0x0D`,
//! `VK_SPACE = 0x20`). They are "virtual" because they represent *logical*
//! keys rather than hardware scan codes: pressing the letter A always
//! produces `VK_A = 0x41` no matter which physical keyboard generated it.
//!
//! A few examples of the canonical encoding:
//!
//! | Key          | Canonical value |
//! |--------------|-----------------|
//! | Letter A     | 0x41            |
//! | Space        | 0x20            |
//! | F1           | 0x70            |
//! | Left Shift   | 0xA0            |
//! | Left mouse   | 0x01            |
//!
//! Note that mouse buttons live in the same namespace (VK_LBUTTON = 0x01 and
//! friends); the canonical space covers both keyboard keys and a small set of
//! mouse buttons.
//!
//! # The `Unknown` sentinel
//!
//! [`KeyCode::Unknown`] (value 0x0000, which Windows leaves unassigned) is
//! the placeholder for any raw value outside the published set. Display-name
//! lookups are deliberately partial: only the subset listed in
//! [`KeyCode::name`] has a fixed string, everything else reports `"Unknown"`.

use serde::{Deserialize, Serialize};

/// A platform-independent key or mouse-button identifier.
///
/// The numeric value of each variant is its Windows Virtual Key code, which
/// doubles as the canonical cross-platform encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum KeyCode {
    // Mouse buttons (VK_LBUTTON=0x01 … VK_XBUTTON2=0x06)
    MouseLeft = 0x01,
    MouseRight = 0x02,
    MouseMiddle = 0x04,
    MouseBack = 0x05,
    MouseForward = 0x06,

    // Editing and whitespace keys
    Backspace = 0x08,
    Tab = 0x09,
    Enter = 0x0D,
    Escape = 0x1B,
    Space = 0x20,

    // Arrow keys (VK_LEFT=0x25 … VK_DOWN=0x28)
    ArrowLeft = 0x25,
    ArrowUp = 0x26,
    ArrowRight = 0x27,
    ArrowDown = 0x28,

    // Navigation cluster subset
    Insert = 0x2D,
    Delete = 0x2E,

    // Digits (VK 0x30–0x39, same as ASCII '0'–'9')
    Digit0 = 0x30,
    Digit1 = 0x31,
    Digit2 = 0x32,
    Digit3 = 0x33,
    Digit4 = 0x34,
    Digit5 = 0x35,
    Digit6 = 0x36,
    Digit7 = 0x37,
    Digit8 = 0x38,
    Digit9 = 0x39,

    // Letters (VK 0x41–0x5A, same as ASCII 'A'–'Z')
    KeyA = 0x41,
    KeyB = 0x42,
    KeyC = 0x43,
    KeyD = 0x44,
    KeyE = 0x45,
    KeyF = 0x46,
    KeyG = 0x47,
    KeyH = 0x48,
    KeyI = 0x49,
    KeyJ = 0x4A,
    KeyK = 0x4B,
    KeyL = 0x4C,
    KeyM = 0x4D,
    KeyN = 0x4E,
    KeyO = 0x4F,
    KeyP = 0x50,
    KeyQ = 0x51,
    KeyR = 0x52,
    KeyS = 0x53,
    KeyT = 0x54,
    KeyU = 0x55,
    KeyV = 0x56,
    KeyW = 0x57,
    KeyX = 0x58,
    KeyY = 0x59,
    KeyZ = 0x5A,

    // Function keys (VK_F1=0x70 … VK_F12=0x7B)
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,

    // Left/right modifier pairs (VK_LSHIFT=0xA0 … VK_RMENU=0xA5)
    ShiftLeft = 0xA0,
    ShiftRight = 0xA1,
    ControlLeft = 0xA2,
    ControlRight = 0xA3,
    AltLeft = 0xA4,
    AltRight = 0xA5,

    // Bracket keys (VK_OEM_4 / VK_OEM_6)
    BracketLeft = 0xDB,
    BracketRight = 0xDD,

    /// Sentinel for raw values outside the published set.
    Unknown = 0x0000,
}

impl KeyCode {
    /// Converts a raw canonical value (Windows VK code) to a [`KeyCode`].
    ///
    /// Returns [`KeyCode::Unknown`] if the value does not correspond to a
    /// published variant.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x01 => KeyCode::MouseLeft,
            0x02 => KeyCode::MouseRight,
            0x04 => KeyCode::MouseMiddle,
            0x05 => KeyCode::MouseBack,
            0x06 => KeyCode::MouseForward,
            0x08 => KeyCode::Backspace,
            0x09 => KeyCode::Tab,
            0x0D => KeyCode::Enter,
            0x1B => KeyCode::Escape,
            0x20 => KeyCode::Space,
            0x25 => KeyCode::ArrowLeft,
            0x26 => KeyCode::ArrowUp,
            0x27 => KeyCode::ArrowRight,
            0x28 => KeyCode::ArrowDown,
            0x2D => KeyCode::Insert,
            0x2E => KeyCode::Delete,
            0x30 => KeyCode::Digit0,
            0x31 => KeyCode::Digit1,
            0x32 => KeyCode::Digit2,
            0x33 => KeyCode::Digit3,
            0x34 => KeyCode::Digit4,
            0x35 => KeyCode::Digit5,
            0x36 => KeyCode::Digit6,
            0x37 => KeyCode::Digit7,
            0x38 => KeyCode::Digit8,
            0x39 => KeyCode::Digit9,
            0x41 => KeyCode::KeyA,
            0x42 => KeyCode::KeyB,
            0x43 => KeyCode::KeyC,
            0x44 => KeyCode::KeyD,
            0x45 => KeyCode::KeyE,
            0x46 => KeyCode::KeyF,
            0x47 => KeyCode::KeyG,
            0x48 => KeyCode::KeyH,
            0x49 => KeyCode::KeyI,
            0x4A => KeyCode::KeyJ,
            0x4B => KeyCode::KeyK,
            0x4C => KeyCode::KeyL,
            0x4D => KeyCode::KeyM,
            0x4E => KeyCode::KeyN,
            0x4F => KeyCode::KeyO,
            0x50 => KeyCode::KeyP,
            0x51 => KeyCode::KeyQ,
            0x52 => KeyCode::KeyR,
            0x53 => KeyCode::KeyS,
            0x54 => KeyCode::KeyT,
            0x55 => KeyCode::KeyU,
            0x56 => KeyCode::KeyV,
            0x57 => KeyCode::KeyW,
            0x58 => KeyCode::KeyX,
            0x59 => KeyCode::KeyY,
            0x5A => KeyCode::KeyZ,
            0x70 => KeyCode::F1,
            0x71 => KeyCode::F2,
            0x72 => KeyCode::F3,
            0x73 => KeyCode::F4,
            0x74 => KeyCode::F5,
            0x75 => KeyCode::F6,
            0x76 => KeyCode::F7,
            0x77 => KeyCode::F8,
            0x78 => KeyCode::F9,
            0x79 => KeyCode::F10,
            0x7A => KeyCode::F11,
            0x7B => KeyCode::F12,
            0xA0 => KeyCode::ShiftLeft,
            0xA1 => KeyCode::ShiftRight,
            0xA2 => KeyCode::ControlLeft,
            0xA3 => KeyCode::ControlRight,
            0xA4 => KeyCode::AltLeft,
            0xA5 => KeyCode::AltRight,
            0xDB => KeyCode::BracketLeft,
            0xDD => KeyCode::BracketRight,
            _ => KeyCode::Unknown,
        }
    }

    /// Returns the raw canonical value (Windows VK code) for this key.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns `true` if this is a left/right modifier key.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::ShiftLeft
                | KeyCode::ShiftRight
                | KeyCode::ControlLeft
                | KeyCode::ControlRight
                | KeyCode::AltLeft
                | KeyCode::AltRight
        )
    }

    /// Returns the fixed human-readable display name for this key.
    ///
    /// The display table is deliberately partial: letters, the common
    /// whitespace keys, F1–F12, the brackets, the three main mouse buttons,
    /// and the left-side Shift/Ctrl have names. Every other key (digits,
    /// arrows, right-side modifiers, Alt keys, editing keys, extended mouse
    /// buttons) reports `"Unknown"`.
    pub fn name(self) -> &'static str {
        match self {
            KeyCode::KeyA => "A",
            KeyCode::KeyB => "B",
            KeyCode::KeyC => "C",
            KeyCode::KeyD => "D",
            KeyCode::KeyE => "E",
            KeyCode::KeyF => "F",
            KeyCode::KeyG => "G",
            KeyCode::KeyH => "H",
            KeyCode::KeyI => "I",
            KeyCode::KeyJ => "J",
            KeyCode::KeyK => "K",
            KeyCode::KeyL => "L",
            KeyCode::KeyM => "M",
            KeyCode::KeyN => "N",
            KeyCode::KeyO => "O",
            KeyCode::KeyP => "P",
            KeyCode::KeyQ => "Q",
            KeyCode::KeyR => "R",
            KeyCode::KeyS => "S",
            KeyCode::KeyT => "T",
            KeyCode::KeyU => "U",
            KeyCode::KeyV => "V",
            KeyCode::KeyW => "W",
            KeyCode::KeyX => "X",
            KeyCode::KeyY => "Y",
            KeyCode::KeyZ => "Z",
            KeyCode::Space => "Space",
            KeyCode::Enter => "Enter",
            KeyCode::Tab => "Tab",
            KeyCode::Escape => "Escape",
            KeyCode::F1 => "F1",
            KeyCode::F2 => "F2",
            KeyCode::F3 => "F3",
            KeyCode::F4 => "F4",
            KeyCode::F5 => "F5",
            KeyCode::F6 => "F6",
            KeyCode::F7 => "F7",
            KeyCode::F8 => "F8",
            KeyCode::F9 => "F9",
            KeyCode::F10 => "F10",
            KeyCode::F11 => "F11",
            KeyCode::F12 => "F12",
            KeyCode::BracketLeft => "[",
            KeyCode::BracketRight => "]",
            KeyCode::MouseLeft => "LMB",
            KeyCode::MouseRight => "RMB",
            KeyCode::MouseMiddle => "MMB",
            KeyCode::ShiftLeft => "LShift",
            KeyCode::ControlLeft => "LCtrl",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All published canonical codes that must round-trip through
    /// from_u16/as_u16.
    const STANDARD_KEYS: &[(u16, KeyCode)] = &[
        (0x01, KeyCode::MouseLeft),
        (0x02, KeyCode::MouseRight),
        (0x04, KeyCode::MouseMiddle),
        (0x05, KeyCode::MouseBack),
        (0x06, KeyCode::MouseForward),
        (0x08, KeyCode::Backspace),
        (0x09, KeyCode::Tab),
        (0x0D, KeyCode::Enter),
        (0x1B, KeyCode::Escape),
        (0x20, KeyCode::Space),
        (0x25, KeyCode::ArrowLeft),
        (0x26, KeyCode::ArrowUp),
        (0x27, KeyCode::ArrowRight),
        (0x28, KeyCode::ArrowDown),
        (0x2D, KeyCode::Insert),
        (0x2E, KeyCode::Delete),
        (0x30, KeyCode::Digit0),
        (0x39, KeyCode::Digit9),
        (0x41, KeyCode::KeyA),
        (0x44, KeyCode::KeyD),
        (0x53, KeyCode::KeyS),
        (0x57, KeyCode::KeyW),
        (0x5A, KeyCode::KeyZ),
        (0x70, KeyCode::F1),
        (0x7B, KeyCode::F12),
        (0xA0, KeyCode::ShiftLeft),
        (0xA1, KeyCode::ShiftRight),
        (0xA2, KeyCode::ControlLeft),
        (0xA3, KeyCode::ControlRight),
        (0xA4, KeyCode::AltLeft),
        (0xA5, KeyCode::AltRight),
        (0xDB, KeyCode::BracketLeft),
        (0xDD, KeyCode::BracketRight),
    ];

    #[test]
    fn test_from_u16_produces_correct_key_codes_for_all_standard_keys() {
        for &(raw, expected) in STANDARD_KEYS {
            // Arrange / Act
            let result = KeyCode::from_u16(raw);

            // Assert
            assert_eq!(
                result, expected,
                "from_u16(0x{raw:02X}) should produce {expected:?}"
            );
        }
    }

    #[test]
    fn test_as_u16_returns_correct_canonical_value_for_all_standard_keys() {
        for &(expected_raw, code) in STANDARD_KEYS {
            // Arrange / Act
            let raw = code.as_u16();

            // Assert
            assert_eq!(
                raw, expected_raw,
                "{code:?}.as_u16() should return 0x{expected_raw:02X}"
            );
        }
    }

    #[test]
    fn test_round_trip_from_u16_and_as_u16() {
        for &(raw, _) in STANDARD_KEYS {
            // Arrange / Act
            let code = KeyCode::from_u16(raw);
            let back = code.as_u16();

            // Assert
            assert_eq!(raw, back, "round-trip for 0x{raw:02X} failed");
        }
    }

    #[test]
    fn test_unassigned_u16_values_return_unknown() {
        // Raw values with no published variant (gaps in the VK space and
        // keys outside the supported subset, e.g. VK_LWIN = 0x5B).
        for unassigned in [0x00, 0x03, 0x07, 0x0A, 0x1C, 0x2F, 0x3A, 0x5B, 0x6F, 0x7C, 0xDC, 0xFF]
        {
            let result = KeyCode::from_u16(unassigned);
            assert_eq!(
                result,
                KeyCode::Unknown,
                "0x{unassigned:02X} should map to Unknown"
            );
        }
    }

    #[test]
    fn test_unknown_code_returns_zero_from_as_u16() {
        assert_eq!(KeyCode::Unknown.as_u16(), 0x0000);
    }

    #[test]
    fn test_named_keys_report_their_display_string() {
        // A sample across every named group in the display table.
        const NAMED: &[(KeyCode, &str)] = &[
            (KeyCode::KeyA, "A"),
            (KeyCode::KeyW, "W"),
            (KeyCode::KeyZ, "Z"),
            (KeyCode::Space, "Space"),
            (KeyCode::Enter, "Enter"),
            (KeyCode::Tab, "Tab"),
            (KeyCode::Escape, "Escape"),
            (KeyCode::F1, "F1"),
            (KeyCode::F12, "F12"),
            (KeyCode::BracketLeft, "["),
            (KeyCode::BracketRight, "]"),
            (KeyCode::MouseLeft, "LMB"),
            (KeyCode::MouseRight, "RMB"),
            (KeyCode::MouseMiddle, "MMB"),
            (KeyCode::ShiftLeft, "LShift"),
            (KeyCode::ControlLeft, "LCtrl"),
        ];

        for &(code, expected) in NAMED {
            assert_eq!(code.name(), expected, "{code:?} has the wrong display name");
        }
    }

    #[test]
    fn test_keys_outside_the_display_table_report_unknown() {
        // The display table is partial on purpose; these variants exist in
        // the canonical space but have no assigned string.
        let unnamed = [
            KeyCode::Digit5,
            KeyCode::ArrowUp,
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::ShiftRight,
            KeyCode::ControlRight,
            KeyCode::AltLeft,
            KeyCode::AltRight,
            KeyCode::MouseBack,
            KeyCode::MouseForward,
            KeyCode::Unknown,
        ];

        for code in unnamed {
            assert_eq!(code.name(), "Unknown", "{code:?} should have no display name");
        }
    }

    #[test]
    fn test_modifier_keys_are_identified_correctly() {
        let modifiers = [
            KeyCode::ShiftLeft,
            KeyCode::ShiftRight,
            KeyCode::ControlLeft,
            KeyCode::ControlRight,
            KeyCode::AltLeft,
            KeyCode::AltRight,
        ];
        for m in modifiers {
            assert!(m.is_modifier(), "{m:?} should be a modifier key");
        }
    }

    #[test]
    fn test_non_modifier_keys_are_not_identified_as_modifiers() {
        let non_modifiers = [
            KeyCode::KeyA,
            KeyCode::Enter,
            KeyCode::Escape,
            KeyCode::F1,
            KeyCode::Space,
            KeyCode::MouseLeft,
            KeyCode::Unknown,
        ];
        for k in non_modifiers {
            assert!(!k.is_modifier(), "{k:?} should not be a modifier key");
        }
    }
}
