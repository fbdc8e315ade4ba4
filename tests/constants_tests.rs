// Host-side tests for tuning constants and their relationships.
// The main crate is wasm-only, so we compile the platform-free core directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_window_holds_both_bands() {
    assert_eq!(ANALYSER_BINS, 32);
    assert!(BASS_RANGE.end <= ANALYSER_BINS);
    assert!(HIGH_RANGE.end <= ANALYSER_BINS);
    assert!(!BASS_RANGE.is_empty());
    assert!(!HIGH_RANGE.is_empty());
}

#[test]
fn bands_do_not_overlap() {
    assert!(HIGH_RANGE.end <= BASS_RANGE.start);
    assert_eq!(BASS_RANGE.len(), 10);
    assert_eq!(HIGH_RANGE.len(), 8);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_fractions() {
    assert!(INTENSITY_LERP > 0.0 && INTENSITY_LERP < 1.0);
    assert!(ACTIVE_LERP > 0.0 && ACTIVE_LERP < 1.0);
    // Activity transitions read faster than the intensity wiggle
    assert!(ACTIVE_LERP > INTENSITY_LERP);
}

#[test]
fn frame_time_step_is_literal() {
    assert_eq!(TIME_STEP, 0.002);
    assert_eq!(INTENSITY_LERP, 0.05);
    assert_eq!(ACTIVE_LERP, 0.1);
}
