// Host-side tests for band intensity extraction from analyser snapshots.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;
mod common;

use crate::core::*;
use common::approx;

#[test]
fn mid_scale_snapshot_reads_as_half_intensity() {
    let s = IntensitySample::from_time_domain(&[128u8; 32]);
    assert!(approx(s.bass, 128.0 / 255.0));
    assert!(approx(s.high, 128.0 / 255.0));
    assert!((s.bass - 0.502).abs() < 1e-3);
}

#[test]
fn zero_snapshot_reads_as_silence() {
    let s = IntensitySample::from_time_domain(&[0u8; 32]);
    assert_eq!(s, IntensitySample::SILENT);
}

#[test]
fn full_scale_snapshot_reads_as_one() {
    let s = IntensitySample::from_time_domain(&[255u8; 32]);
    assert!(approx(s.bass, 1.0));
    assert!(approx(s.high, 1.0));
}

#[test]
fn bass_reads_only_bytes_twenty_to_thirty() {
    let mut buf = [0u8; 32];
    for b in &mut buf[20..30] {
        *b = 255;
    }
    let s = IntensitySample::from_time_domain(&buf);
    assert!(approx(s.bass, 1.0));
    assert_eq!(s.high, 0.0);

    // Bytes just outside the window do not count
    let mut edges = [0u8; 32];
    edges[19] = 255;
    edges[30] = 255;
    assert_eq!(IntensitySample::from_time_domain(&edges).bass, 0.0);
}

#[test]
fn high_reads_only_bytes_two_to_ten() {
    let mut buf = [0u8; 32];
    for b in &mut buf[2..10] {
        *b = 255;
    }
    let s = IntensitySample::from_time_domain(&buf);
    assert!(approx(s.high, 1.0));
    assert_eq!(s.bass, 0.0);

    let mut edges = [0u8; 32];
    edges[1] = 255;
    edges[10] = 255;
    assert_eq!(IntensitySample::from_time_domain(&edges).high, 0.0);
}

#[test]
fn window_average_of_a_ramp() {
    let ramp: Vec<u8> = (0..32u8).collect();
    let s = IntensitySample::from_time_domain(&ramp);
    // avg(20..=29) = 24.5, avg(2..=9) = 5.5
    assert!(approx(s.bass, 24.5 / 255.0));
    assert!(approx(s.high, 5.5 / 255.0));
}

#[test]
fn intensities_stay_in_unit_range() {
    let mut seed: u32 = 0x1234_abcd;
    for _ in 0..500 {
        let buf: Vec<u8> = (0..32)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                (seed & 0xff) as u8
            })
            .collect();
        let s = IntensitySample::from_time_domain(&buf);
        assert!((0.0..=1.0).contains(&s.bass));
        assert!((0.0..=1.0).contains(&s.high));
    }
}

#[test]
fn short_snapshot_counts_missing_bytes_as_zero() {
    let s = IntensitySample::from_time_domain(&[255u8; 25]);
    assert!(approx(s.bass, 5.0 / 10.0));
    assert!(approx(s.high, 1.0));
    assert_eq!(band_intensity(&[], 2..10), 0.0);
    assert_eq!(band_intensity(&[255; 32], 4..4), 0.0);
}

#[test]
fn clamped_limits_out_of_range_samples() {
    let s = IntensitySample {
        bass: 1.7,
        high: -0.2,
    }
    .clamped();
    assert_eq!(s.bass, 1.0);
    assert_eq!(s.high, 0.0);
}

#[test]
fn debug_bar_scale_follows_byte_value() {
    assert_eq!(bar_scale(0), 0.0);
    assert_eq!(bar_scale(255), 1.0);
    assert!(approx(bar_scale(51), 0.2));
    assert_eq!(bar_transform(255), "scale(1, 1)");
    assert_eq!(bar_transform(0), "scale(1, 0)");
}
