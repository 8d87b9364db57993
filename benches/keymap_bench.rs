//! Criterion benchmarks for the key code translation tables.
//!
//! Measures the latency of both translation directions (canonical→evdev,
//! evdev→canonical) to verify the table lookups stay in the
//! nanosecond class expected on the capture hot path, where every observed
//! event passes through `evdev_to_vk`.
//!
//! Run with:
//! ```bash
//! cargo bench --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use macro_input::keymap::{evdev_to_vk, vk_to_evdev};

// ── Representative key codes for benchmarking ─────────────────────────────────

/// Canonical codes covering the most common keys.
const BENCH_VK_CODES: &[u16] = &[
    0x41, // A
    0x5A, // Z
    0x0D, // Enter
    0x1B, // Escape
    0x09, // Tab
    0x20, // Space
    0x70, // F1
    0x7B, // F12
    0xA0, // LShift
    0xA2, // LCtrl
    0xA4, // LAlt
    0x31, // 1
    0x30, // 0
    0xDB, // [
    0xDD, // ]
    0x2E, // Delete (unmapped, passes through)
    0x1234, // out of table range
];

/// Device-level codes covering the same keys from the other side.
const BENCH_EVDEV_CODES: &[u16] = &[
    30,  // KEY_A
    44,  // KEY_Z
    28,  // KEY_ENTER
    1,   // KEY_ESC
    15,  // KEY_TAB
    57,  // KEY_SPACE
    59,  // KEY_F1
    88,  // KEY_F12
    42,  // KEY_LEFTSHIFT
    29,  // KEY_LEFTCTRL
    56,  // KEY_LEFTALT
    2,   // KEY_1
    11,  // KEY_0
    26,  // KEY_LEFTBRACE
    27,  // KEY_RIGHTBRACE
    272, // BTN_LEFT (unmapped, passes through)
];

// ── Benchmarks: canonical → evdev ─────────────────────────────────────────────

fn bench_vk_to_evdev(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_vk_to_evdev");

    // Single lookup (typical per-emission cost)
    group.bench_with_input(BenchmarkId::new("single", "KeyA"), &0x41u16, |b, &vk| {
        b.iter(|| vk_to_evdev(black_box(vk)))
    });

    // Pass-through path for a code outside the table
    group.bench_with_input(
        BenchmarkId::new("single", "unmapped"),
        &0x1234u16,
        |b, &vk| b.iter(|| vk_to_evdev(black_box(vk))),
    );

    // Batch of diverse codes (simulates a burst of emissions)
    group.bench_function("batch_17", |b| {
        b.iter(|| {
            BENCH_VK_CODES
                .iter()
                .map(|&vk| vk_to_evdev(black_box(vk)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// ── Benchmarks: evdev → canonical ─────────────────────────────────────────────

fn bench_evdev_to_vk(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_evdev_to_vk");

    // Single lookup (per observed event on the capture thread)
    group.bench_with_input(BenchmarkId::new("single", "KEY_A"), &30u16, |b, &code| {
        b.iter(|| evdev_to_vk(black_box(code)))
    });

    group.bench_with_input(
        BenchmarkId::new("single", "unmapped"),
        &272u16,
        |b, &code| b.iter(|| evdev_to_vk(black_box(code))),
    );

    group.bench_function("batch_16", |b| {
        b.iter(|| {
            BENCH_EVDEV_CODES
                .iter()
                .map(|&code| evdev_to_vk(black_box(code)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_vk_to_evdev, bench_evdev_to_vk);
criterion_main!(benches);
