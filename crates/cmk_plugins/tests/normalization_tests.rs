//! Tests for the field normalization helpers.

use cmk_plugins::normalize::{band_from_active_client, format_mac, uptime_seconds, Band};
use serde_json::json;

#[test]
fn test_plain_seconds_pass_through() {
    for secs in [1u64, 59, 3_600, 86_400, 31_536_000, 315_360_000] {
        assert_eq!(uptime_seconds(&json!(secs)), secs, "{}", secs);
    }
}

#[test]
fn test_large_numbers_are_milliseconds() {
    assert_eq!(uptime_seconds(&json!(400_000_000u64)), 400_000);
    assert_eq!(uptime_seconds(&json!(315_360_001_000u64)), 315_360_001);
    assert_eq!(uptime_seconds(&json!("400000000")), 400_000);
}

#[test]
fn test_composite_and_nested_uptime() {
    assert_eq!(uptime_seconds(&json!("1d 2h 3m 4s")), 93_784);
    assert_eq!(uptime_seconds(&json!("2h 30")), 7_230);
    assert_eq!(uptime_seconds(&json!({"uptime_seconds": 120})), 120);
    assert_eq!(uptime_seconds(&json!({"uptime_ms": 5_000})), 5);
}

#[test]
fn test_uptime_never_fails() {
    assert_eq!(uptime_seconds(&json!(null)), 0);
    assert_eq!(uptime_seconds(&json!(-5)), 0);
    assert_eq!(uptime_seconds(&json!("n/a")), 0);
    assert_eq!(uptime_seconds(&json!([1, 2])), 0);
}

#[test]
fn test_mac_formats() {
    for raw in [
        "4c231a0403d5",
        "4C:23:1A:04:03:D5",
        "4c-23-1a-04-03-d5",
        "4c23.1a04.03d5",
        "4C231A0403D5FFFF",
    ] {
        let mac = format_mac(raw);
        assert_eq!(mac, "4C:23:1A:04:03:D5", "{}", raw);
        assert_eq!(mac.len(), 17);
    }
}

#[test]
fn test_short_mac_unchanged() {
    assert_eq!(format_mac("4c:23:1a"), "4c:23:1a");
    assert_eq!(format_mac("unknown"), "unknown");
}

#[test]
fn test_band_priority_chain() {
    assert_eq!(
        band_from_active_client(&json!({"radio_type": 2, "channel": 6})),
        Band::Ghz5
    );
    assert_eq!(
        band_from_active_client(&json!({"mac_protocol": "802.11ax-6G", "channel": 6})),
        Band::Ghz6
    );
    assert_eq!(band_from_active_client(&json!({"channel": "44"})), Band::Ghz5);
    assert_eq!(band_from_active_client(&json!({"channel": 11})), Band::Ghz24);
    assert_eq!(band_from_active_client(&json!({})), Band::Ghz24);
}
