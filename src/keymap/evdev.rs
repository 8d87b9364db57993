//! Canonical (Windows VK) to Linux evdev key code translation tables.
//!
//! Reference: `linux/input-event-codes.h` (`KEY_*` constants) and the
//! Windows Virtual-Key Codes it is paired with in [`super::vk`].
//!
//! # How this table works
//!
//! `VK_TO_EVDEV` is a compile-time constant array of 256 `u16` values indexed
//! by canonical code. Position 0x41 holds 30 because canonical `KeyA` is VK
//! 0x41 and the kernel's `KEY_A` is 30. Entries without a mapping hold 0
//! (`KEY_RESERVED`, never a real translation target). `EVDEV_TO_VK` is the
//! exact inverse, derived from the forward table at compile time so the two
//! can never drift apart.
//!
//! The covered subset is a bijection: letters, digits, F1–F12,
//! Space/Enter/Tab/Escape, the six left/right modifiers, and the bracket
//! keys. Indexing is an O(1) lookup in both directions, which matters because
//! every captured key event on Linux goes through `evdev_to_vk`.
//!
//! # The identity fallback, and why it can alias
//!
//! Codes outside the covered subset (arrows, mouse buttons, editing keys,
//! anything at or above 256) are returned *unchanged*. The two namespaces
//! overlap numerically, so a passed-through value can collide with an
//! unrelated key on the other side: canonical `MouseLeft` (0x01) passes
//! through as evdev 1, which the kernel reads as `KEY_ESC`. This is
//! long-standing documented behavior of the translation layer, kept as-is;
//! callers that need exact semantics must stay inside the covered subset.

/// Translates a canonical code to a Linux evdev key code.
///
/// Falls back to returning `vk` unchanged when no mapping exists (see the
/// module docs for the aliasing consequences).
pub fn vk_to_evdev(vk: u16) -> u16 {
    if vk >= 256 {
        return vk;
    }
    match VK_TO_EVDEV[vk as usize] {
        0 => vk,
        ev => ev,
    }
}

/// Translates a Linux evdev key code to a canonical code.
///
/// Falls back to returning `code` unchanged when no mapping exists.
pub fn evdev_to_vk(code: u16) -> u16 {
    if code >= 256 {
        return code;
    }
    match EVDEV_TO_VK[code as usize] {
        0 => code,
        vk => vk,
    }
}

/// Canonical → evdev mapping table indexed by canonical code (0x00–0xFF).
///
/// Entries are 0 (`KEY_RESERVED`) when no evdev equivalent is mapped.
const VK_TO_EVDEV: [u16; 256] = {
    let mut t = [0u16; 256];

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = 30; // KEY_A
    t[0x42] = 48; // KEY_B
    t[0x43] = 46; // KEY_C
    t[0x44] = 32; // KEY_D
    t[0x45] = 18; // KEY_E
    t[0x46] = 33; // KEY_F
    t[0x47] = 34; // KEY_G
    t[0x48] = 35; // KEY_H
    t[0x49] = 23; // KEY_I
    t[0x4A] = 36; // KEY_J
    t[0x4B] = 37; // KEY_K
    t[0x4C] = 38; // KEY_L
    t[0x4D] = 50; // KEY_M
    t[0x4E] = 49; // KEY_N
    t[0x4F] = 24; // KEY_O
    t[0x50] = 25; // KEY_P
    t[0x51] = 16; // KEY_Q
    t[0x52] = 19; // KEY_R
    t[0x53] = 31; // KEY_S
    t[0x54] = 20; // KEY_T
    t[0x55] = 22; // KEY_U
    t[0x56] = 47; // KEY_V
    t[0x57] = 17; // KEY_W
    t[0x58] = 45; // KEY_X
    t[0x59] = 21; // KEY_Y
    t[0x5A] = 44; // KEY_Z

    // ── Digit row (VK 0x30–0x39) ─────────────────────────────────────────────
    t[0x30] = 11; // KEY_0
    t[0x31] = 2; // KEY_1
    t[0x32] = 3; // KEY_2
    t[0x33] = 4; // KEY_3
    t[0x34] = 5; // KEY_4
    t[0x35] = 6; // KEY_5
    t[0x36] = 7; // KEY_6
    t[0x37] = 8; // KEY_7
    t[0x38] = 9; // KEY_8
    t[0x39] = 10; // KEY_9

    // ── Function keys (VK_F1=0x70 … VK_F12=0x7B) ─────────────────────────────
    t[0x70] = 59; // KEY_F1
    t[0x71] = 60; // KEY_F2
    t[0x72] = 61; // KEY_F3
    t[0x73] = 62; // KEY_F4
    t[0x74] = 63; // KEY_F5
    t[0x75] = 64; // KEY_F6
    t[0x76] = 65; // KEY_F7
    t[0x77] = 66; // KEY_F8
    t[0x78] = 67; // KEY_F9
    t[0x79] = 68; // KEY_F10
    t[0x7A] = 87; // KEY_F11
    t[0x7B] = 88; // KEY_F12

    // ── Whitespace and escape ────────────────────────────────────────────────
    t[0x20] = 57; // KEY_SPACE
    t[0x0D] = 28; // KEY_ENTER
    t[0x09] = 15; // KEY_TAB
    t[0x1B] = 1; // KEY_ESC

    // ── Left/right modifier pairs ────────────────────────────────────────────
    t[0xA0] = 42; // KEY_LEFTSHIFT
    t[0xA1] = 54; // KEY_RIGHTSHIFT
    t[0xA2] = 29; // KEY_LEFTCTRL
    t[0xA3] = 97; // KEY_RIGHTCTRL
    t[0xA4] = 56; // KEY_LEFTALT
    t[0xA5] = 100; // KEY_RIGHTALT

    // ── Bracket keys ─────────────────────────────────────────────────────────
    t[0xDB] = 26; // KEY_LEFTBRACE
    t[0xDD] = 27; // KEY_RIGHTBRACE

    t
};

/// evdev → canonical mapping table, the compile-time inverse of
/// [`VK_TO_EVDEV`].
const EVDEV_TO_VK: [u16; 256] = {
    let mut t = [0u16; 256];
    let mut vk = 0usize;
    while vk < 256 {
        let ev = VK_TO_EVDEV[vk];
        if ev != 0 {
            t[ev as usize] = vk as u16;
        }
        vk += 1;
    }
    t
};
