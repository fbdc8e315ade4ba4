// Host-side tests for visual settings, parsing and clamping.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::*;

#[test]
fn defaults_match_panel_initial_values() {
    let s = VisualSettings::default();
    assert!(!s.is_full);
    assert_eq!(s.radius, 0.4);
    assert_eq!(s.step, 0.6);
    assert_eq!(s.color1, 0xff0000);
    assert_eq!(s.color2, 0x00ff00);
    assert_eq!(s.time_acceleration, 0.15);
    assert_eq!(s.radius_acceleration, 0.7);
    assert_eq!(s.radius_distortion, 0.25);
}

#[test]
fn defaults_sit_inside_their_ranges() {
    let s = VisualSettings::default();
    for key in SettingKey::ALL {
        match (key.kind(), s.get(key)) {
            (SettingKind::Number(r), SettingValue::Number(v)) => {
                assert!(v >= r.min && v <= r.max, "{} out of range", key.name())
            }
            (SettingKind::Toggle, SettingValue::Bool(_)) => {}
            (SettingKind::Color, SettingValue::Color(_)) => {}
            (kind, value) => panic!("{} has {:?} for {:?}", key.name(), value, kind),
        }
    }
}

#[test]
fn numbers_are_clamped_into_range() {
    let mut s = VisualSettings::default();
    assert!(s.set(SettingKey::Radius, SettingValue::Number(0.1)));
    assert_eq!(s.radius, 0.35);
    assert!(s.set(SettingKey::Radius, SettingValue::Number(4.0)));
    assert_eq!(s.radius, 1.0);
    assert!(s.set(SettingKey::Step, SettingValue::Number(0.9)));
    assert_eq!(s.step, 0.75);
    assert!(s.set(SettingKey::RadiusDistortion, SettingValue::Number(-1.0)));
    assert_eq!(s.radius_distortion, 0.0);
}

#[test]
fn mismatched_value_type_is_rejected() {
    let mut s = VisualSettings::default();
    assert!(!s.set(SettingKey::Radius, SettingValue::Bool(true)));
    assert!(!s.set(SettingKey::IsFull, SettingValue::Number(1.0)));
    assert!(!s.set(SettingKey::Color1, SettingValue::Number(0.5)));
    assert_eq!(s, VisualSettings::default());
}

#[test]
fn parse_reads_control_state() {
    assert_eq!(
        SettingKey::Step.parse(" 0.5 ", false),
        Some(SettingValue::Number(0.5))
    );
    assert_eq!(SettingKey::Step.parse("abc", false), None);
    assert_eq!(SettingKey::Step.parse("NaN", false), None);
    assert_eq!(
        SettingKey::IsFull.parse("on", true),
        Some(SettingValue::Bool(true))
    );
    assert_eq!(
        SettingKey::Color2.parse("#00ff00", false),
        Some(SettingValue::Color(0x00ff00))
    );
    assert_eq!(SettingKey::Color2.parse("#zzzzzz", false), None);
}

#[test]
fn hex_colors_convert_both_ways() {
    assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
    assert_eq!(hex_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
    assert_eq!(parse_hex_color("0x0000ff"), Some(0x0000ff));
    assert_eq!(parse_hex_color("ABCDEF"), Some(0xabcdef));
    assert_eq!(parse_hex_color("#fff"), None);
    assert_eq!(format_hex_color(0x00ff00), "#00ff00");
}

#[test]
fn key_names_are_unique() {
    let mut names: Vec<&str> = SettingKey::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), SettingKey::ALL.len());
}
