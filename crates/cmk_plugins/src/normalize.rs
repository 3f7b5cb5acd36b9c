//! Field normalization helpers for loosely-typed XIQ data.
//!
//! Every function here is total: unparseable input degrades to a default
//! (0, the original string, or the 2.4 GHz band) instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Plain numbers above this (ten years in seconds) are milliseconds.
pub const MILLIS_THRESHOLD: f64 = 315_360_000.0;

/// Boot timestamps above this are Unix milliseconds.
const UNIX_MILLIS_MIN: i64 = 10_000_000_000;

/// Range treated as a Unix timestamp in seconds.
const UNIX_SECONDS_RANGE: std::ops::RangeInclusive<i64> = 1_000_000_000..=4_000_000_000;

/// Wireless frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    Ghz24,
    #[serde(rename = "5GHz")]
    Ghz5,
    #[serde(rename = "6GHz")]
    Ghz6,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Ghz24, Band::Ghz5, Band::Ghz6];

    pub fn label(self) -> &'static str {
        match self {
            Band::Ghz24 => "2.4GHz",
            Band::Ghz5 => "5GHz",
            Band::Ghz6 => "6GHz",
        }
    }

    /// Suffix used in metric names (`xiq_clients_24`, `_5`, `_6`).
    pub fn metric_suffix(self) -> &'static str {
        match self {
            Band::Ghz24 => "24",
            Band::Ghz5 => "5",
            Band::Ghz6 => "6",
        }
    }

    pub fn from_label(label: &str) -> Option<Band> {
        match label.trim() {
            "2.4GHz" => Some(Band::Ghz24),
            "5GHz" => Some(Band::Ghz5),
            "6GHz" => Some(Band::Ghz6),
            _ => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client (or any other) counts per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    #[serde(rename = "2.4GHz", default)]
    pub ghz24: u64,
    #[serde(rename = "5GHz", default)]
    pub ghz5: u64,
    #[serde(rename = "6GHz", default)]
    pub ghz6: u64,
}

impl BandCounts {
    pub fn new(ghz24: u64, ghz5: u64, ghz6: u64) -> Self {
        Self { ghz24, ghz5, ghz6 }
    }

    pub fn get(&self, band: Band) -> u64 {
        match band {
            Band::Ghz24 => self.ghz24,
            Band::Ghz5 => self.ghz5,
            Band::Ghz6 => self.ghz6,
        }
    }

    pub fn add(&mut self, band: Band, n: u64) {
        match band {
            Band::Ghz24 => self.ghz24 += n,
            Band::Ghz5 => self.ghz5 += n,
            Band::Ghz6 => self.ghz6 += n,
        }
    }

    pub fn total(&self) -> u64 {
        self.ghz24 + self.ghz5 + self.ghz6
    }

    /// Counts from an object keyed by band label; missing or invalid
    /// entries count as 0.
    pub fn from_value(v: &Value) -> Self {
        let mut counts = Self::default();
        for band in Band::ALL {
            let n = v.get(band.label()).map(|x| to_int(x, 0)).unwrap_or(0);
            counts.add(band, n.max(0) as u64);
        }
        counts
    }
}

/// Render any JSON scalar as text; `null` becomes the empty string.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip LLDP/CDP decoration like "(interface name)".
pub fn clean_text(v: &str) -> String {
    v.replace("(interface name)", "")
        .replace("(mac address)", "")
        .trim()
        .to_string()
}

/// Normalize a MAC address to `AA:BB:CC:DD:EE:FF`.
///
/// Accepts `4C231A0403D5`, `4c:23:1a:04:03:d5`, `4C-23-1A-04-03-D5`,
/// `4C23.1A04.03D5` and the over-long variants XIQ sometimes sends.
/// Input with fewer than 12 hex digits is returned unchanged.
pub fn format_mac(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let hex: Vec<char> = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_hexdigit)
        .collect();

    if hex.len() < 12 {
        return raw.to_string();
    }

    hex[..12]
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}

/// Classify the band of an active-client record.
///
/// Priority: `radio_type` (1/2/4), then the `mac_protocol` text, then the
/// channel number. Falls back to 2.4 GHz.
pub fn band_from_active_client(client: &Value) -> Band {
    if let Some(rt) = client.get("radio_type").and_then(Value::as_f64) {
        if rt == 1.0 {
            return Band::Ghz24;
        }
        if rt == 2.0 {
            return Band::Ghz5;
        }
        if rt == 4.0 {
            return Band::Ghz6;
        }
    }

    let protocol = client
        .get("mac_protocol")
        .map(value_to_string)
        .unwrap_or_default()
        .to_lowercase();
    if protocol.contains("2.4") {
        return Band::Ghz24;
    }
    if protocol.contains("5g") {
        return Band::Ghz5;
    }
    if protocol.contains("6g") {
        return Band::Ghz6;
    }

    let channel = client.get("channel").map(channel_number).unwrap_or(0);
    if (1..=13).contains(&channel) {
        return Band::Ghz24;
    }
    if (36..=165).contains(&channel) {
        return Band::Ghz5;
    }

    Band::Ghz24
}

fn channel_number(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// `Xd Yh Zm`, always with all three parts.
pub fn fmt_uptime(seconds: u64) -> String {
    let d = seconds / 86_400;
    let h = (seconds % 86_400) / 3_600;
    let m = (seconds % 3_600) / 60;
    format!("{}d {}h {}m", d, h, m)
}

/// Compact duration: non-zero day/hour/minute parts, seconds only when
/// nothing larger is present. `0s` for zero.
pub fn fmt_dhms(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }
    let d = seconds / 86_400;
    let h = (seconds % 86_400) / 3_600;
    let m = (seconds % 3_600) / 60;
    let s = seconds % 60;

    let mut parts = Vec::new();
    if d > 0 {
        parts.push(format!("{}d", d));
    }
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 && parts.is_empty() {
        parts.push(format!("{}s", s));
    }
    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Uptime from a value that is either an uptime or a boot timestamp.
///
/// - `> 10^10`: boot time as Unix milliseconds
/// - `10^9..=4·10^9`: boot time as Unix seconds
/// - anything else: an uptime, read like [`uptime_seconds`] reads numbers
///
/// Boot times in the future clamp to 0.
pub fn elapsed_uptime(raw: i64, now_s: i64) -> u64 {
    if raw <= 0 {
        return 0;
    }
    if raw > UNIX_MILLIS_MIN {
        return (now_s - raw / 1000).max(0) as u64;
    }
    if UNIX_SECONDS_RANGE.contains(&raw) {
        return (now_s - raw).max(0) as u64;
    }
    seconds_from_number(raw as f64)
}

/// Normalize an uptime of unknown representation into seconds.
///
/// Numbers (and numeric strings) above ten years' worth of seconds are read
/// as milliseconds. Objects are searched for `uptime_seconds`, `seconds`,
/// `value`, `uptime`, then `uptime_ms`. Other strings are scanned as
/// `"1d 2h 3m 4s"`; a trailing number without unit counts as seconds.
pub fn uptime_seconds(raw: &Value) -> u64 {
    match raw {
        Value::Number(n) => n.as_f64().map(seconds_from_number).unwrap_or(0),
        Value::String(s) => uptime_from_text(s),
        Value::Object(map) => {
            for key in ["uptime_seconds", "seconds", "value", "uptime"] {
                if let Some(inner) = map.get(key) {
                    return uptime_seconds(inner);
                }
            }
            match map.get("uptime_ms") {
                Some(ms) => number_of(ms)
                    .filter(|v| *v > 0.0)
                    .map(|v| (v / 1000.0) as u64)
                    .unwrap_or(0),
                None => 0,
            }
        }
        _ => 0,
    }
}

fn seconds_from_number(val: f64) -> u64 {
    if !val.is_finite() || val <= 0.0 {
        return 0;
    }
    if val > MILLIS_THRESHOLD {
        (val / 1000.0) as u64
    } else {
        val as u64
    }
}

fn number_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn uptime_from_text(raw: &str) -> u64 {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return 0;
    }
    if let Ok(val) = s.parse::<f64>() {
        return seconds_from_number(val);
    }

    let mut total: u64 = 0;
    let mut num = String::new();
    for ch in s.chars() {
        if ch.is_ascii_digit() {
            num.push(ch);
            continue;
        }
        if num.is_empty() {
            continue;
        }
        let v = num.parse::<u64>().unwrap_or(u64::MAX);
        let factor = match ch {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => 0,
        };
        total = total.saturating_add(v.saturating_mul(factor));
        num.clear();
    }
    if !num.is_empty() {
        total = total.saturating_add(num.parse::<u64>().unwrap_or(u64::MAX));
    }
    total
}

/// Integer from a number or numeric text (`"12"`, `"12.7"`); `default` otherwise.
pub fn to_int(v: &Value, default: i64) -> i64 {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(default),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return default;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(default)
        }
        Value::Bool(b) => i64::from(*b),
        _ => default,
    }
}

/// Integer from the digits (and minus signs) found in any text, e.g.
/// `"20 MHz"` → 20. `default` when no digits are present.
pub fn to_int_digits(v: &Value, default: i64) -> i64 {
    match v {
        Value::Null => default,
        Value::Number(_) | Value::Bool(_) => to_int(v, default),
        other => {
            let text = value_to_string(other);
            let digits: String = text
                .trim()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            if digits.is_empty() || digits == "-" {
                return default;
            }
            digits.parse::<i64>().unwrap_or(default)
        }
    }
}

/// Shorten a location path to its `LOC…` leaf.
///
/// `"Germany/Berlin/Building A/Floor 2 LOC0815"` → `"LOC0815"`. Without a
/// `LOC` marker the last path element is returned.
pub fn location_leaf(loc: &str) -> String {
    let parts: Vec<&str> = loc
        .split('/')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    for part in parts.iter().rev() {
        let up = part.to_uppercase();
        if let Some(idx) = up.rfind("LOC") {
            return up[idx..].to_string();
        }
    }
    parts.last().map(|p| p.to_string()).unwrap_or_default()
}

/// Connected flag from the many spellings XIQ and the agent use.
pub fn norm_connected(val: &str) -> bool {
    let v = val.trim().to_uppercase();
    match v.as_str() {
        "1" | "TRUE" | "YES" | "Y" | "CONNECTED" | "ONLINE" => true,
        "0" | "FALSE" | "NO" | "N" | "DISCONNECTED" | "OFFLINE" => false,
        other => other.parse::<i64>().map(|n| n != 0).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uptime_plain_seconds_unchanged() {
        assert_eq!(uptime_seconds(&json!(0)), 0);
        assert_eq!(uptime_seconds(&json!(59)), 59);
        assert_eq!(uptime_seconds(&json!(315_359_999)), 315_359_999);
        assert_eq!(uptime_seconds(&json!(315_360_000)), 315_360_000);
    }

    #[test]
    fn test_uptime_large_numbers_are_millis() {
        assert_eq!(uptime_seconds(&json!(400_000_000)), 400_000);
        assert_eq!(uptime_seconds(&json!(315_360_001)), 315_360);
        assert_eq!(uptime_seconds(&json!("400000000")), 400_000);
    }

    #[test]
    fn test_uptime_negative_and_garbage() {
        assert_eq!(uptime_seconds(&json!(-5)), 0);
        assert_eq!(uptime_seconds(&json!("-5")), 0);
        assert_eq!(uptime_seconds(&Value::Null), 0);
        assert_eq!(uptime_seconds(&json!([1, 2])), 0);
        assert_eq!(uptime_seconds(&json!("")), 0);
        assert_eq!(uptime_seconds(&json!("n/a")), 0);
    }

    #[test]
    fn test_uptime_composite_strings() {
        assert_eq!(uptime_seconds(&json!("1d 2h 3m 4s")), 93_784);
        assert_eq!(uptime_seconds(&json!("2H 30M")), 9_000);
        assert_eq!(uptime_seconds(&json!("1d 5")), 86_405);
        assert_eq!(uptime_seconds(&json!("3d")), 3 * 86_400);
    }

    #[test]
    fn test_uptime_unit_must_follow_digits() {
        // A digit run ended by a space has no unit and is dropped.
        assert_eq!(uptime_seconds(&json!("3 days")), 0);
        assert_eq!(uptime_seconds(&json!("2 h 10m")), 600);
    }

    #[test]
    fn test_uptime_objects() {
        assert_eq!(uptime_seconds(&json!({"seconds": 120})), 120);
        assert_eq!(uptime_seconds(&json!({"uptime": "1h"})), 3_600);
        assert_eq!(uptime_seconds(&json!({"uptime_ms": 5000})), 5);
        assert_eq!(uptime_seconds(&json!({"other": 1})), 0);
    }

    #[test]
    fn test_elapsed_uptime_from_boot_timestamps() {
        let now = 1_700_000_000;
        assert_eq!(elapsed_uptime(1_699_996_400, now), 3_600);
        assert_eq!(elapsed_uptime(1_699_996_400_000, now), 3_600);
        assert_eq!(elapsed_uptime(7_200, now), 7_200);
        assert_eq!(elapsed_uptime(400_000_000, now), 400_000);
        assert_eq!(elapsed_uptime(1_800_000_000, now), 0);
        assert_eq!(elapsed_uptime(-1, now), 0);
    }

    #[test]
    fn test_format_mac_variants() {
        for raw in [
            "4C231A0403D5",
            "4c:23:1a:04:03:d5",
            "4C-23-1A-04-03-D5",
            "4C23.1A04.03D5",
            "4C231A0403D5FF",
        ] {
            let mac = format_mac(raw);
            assert_eq!(mac, "4C:23:1A:04:03:D5", "input {}", raw);
            assert_eq!(mac.len(), 17);
        }
    }

    #[test]
    fn test_format_mac_too_short_is_unchanged() {
        assert_eq!(format_mac("4c:23:1a"), "4c:23:1a");
        assert_eq!(format_mac("unknown"), "unknown");
        assert_eq!(format_mac(""), "");
    }

    #[test]
    fn test_band_priority_chain() {
        assert_eq!(
            band_from_active_client(&json!({"radio_type": 2, "channel": 6})),
            Band::Ghz5
        );
        assert_eq!(
            band_from_active_client(&json!({"radio_type": 4})),
            Band::Ghz6
        );
        assert_eq!(
            band_from_active_client(&json!({"mac_protocol": "802.11ax-6G", "channel": 6})),
            Band::Ghz6
        );
        assert_eq!(
            band_from_active_client(&json!({"mac_protocol": "2.4GHz n"})),
            Band::Ghz24
        );
        assert_eq!(
            band_from_active_client(&json!({"channel": "44"})),
            Band::Ghz5
        );
        assert_eq!(band_from_active_client(&json!({"channel": 11})), Band::Ghz24);
        assert_eq!(band_from_active_client(&json!({"channel": 200})), Band::Ghz24);
        assert_eq!(band_from_active_client(&json!("garbage")), Band::Ghz24);
    }

    #[test]
    fn test_fmt_durations() {
        assert_eq!(fmt_uptime(90_061), "1d 1h 1m");
        assert_eq!(fmt_uptime(0), "0d 0h 0m");
        assert_eq!(fmt_dhms(0), "0s");
        assert_eq!(fmt_dhms(42), "42s");
        assert_eq!(fmt_dhms(3_660), "1h 1m");
        assert_eq!(fmt_dhms(86_401), "1d");
    }

    #[test]
    fn test_to_int_variants() {
        assert_eq!(to_int(&json!("12"), 0), 12);
        assert_eq!(to_int(&json!(" 12.9 "), 0), 12);
        assert_eq!(to_int(&json!(7.5), 0), 7);
        assert_eq!(to_int(&json!("x"), -1), -1);
        assert_eq!(to_int(&Value::Null, 3), 3);
        assert_eq!(to_int_digits(&json!("20 MHz"), 0), 20);
        assert_eq!(to_int_digits(&json!("-"), 9), 9);
        assert_eq!(to_int_digits(&json!(""), 9), 9);
        assert_eq!(to_int_digits(&json!(40), 0), 40);
    }

    #[test]
    fn test_location_leaf() {
        assert_eq!(
            location_leaf("Germany/Berlin/Building A/Floor 2 loc0815"),
            "LOC0815"
        );
        assert_eq!(location_leaf("Campus / Hall 3 /"), "Hall 3");
        assert_eq!(location_leaf(""), "");
    }

    #[test]
    fn test_norm_connected() {
        assert!(norm_connected("online"));
        assert!(norm_connected(" 1 "));
        assert!(norm_connected("2"));
        assert!(!norm_connected("Disconnected"));
        assert!(!norm_connected("maybe"));
    }

    #[test]
    fn test_band_counts_from_value() {
        let counts = BandCounts::from_value(&json!({"2.4GHz": 5, "5GHz": "3", "6GHz": -1}));
        assert_eq!(counts, BandCounts::new(5, 3, 0));
        assert_eq!(counts.total(), 8);
        assert_eq!(BandCounts::from_value(&json!(null)).total(), 0);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("eth0 (interface name) "), "eth0");
        assert_eq!(clean_text("(mac address)aa"), "aa");
    }
}
