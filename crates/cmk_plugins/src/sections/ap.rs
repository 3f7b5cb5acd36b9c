//! Per-AP sections written into the piggyback block of each access point.

use crate::agent_based::StringTable;
use crate::normalize::{clean_text, elapsed_uptime, format_mac, to_int, uptime_seconds, BandCounts};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of `extreme_ap_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApStatus {
    pub ap_name: String,
    pub serial: String,
    pub mac: String,
    pub ip: String,
    pub model: String,
    pub connected: bool,
    pub state: String,
    pub sw_version: String,
    /// Column 8 as sent by the agent.
    pub uptime_raw: String,
    /// Column 8 resolved to seconds since boot.
    pub uptime_seconds: u64,
    pub locations: String,
    pub lldp_cdp_short: String,
}

/// Parse `extreme_ap_status`, resolving boot timestamps against the
/// current time.
pub fn parse_ap_status(table: &StringTable) -> Option<ApStatus> {
    parse_ap_status_at(table, chrono::Utc::now().timestamp())
}

/// Same as [`parse_ap_status`] with an explicit "now" in Unix seconds.
///
/// Columns: name | serial | mac | ip | model | connected | state |
/// firmware | uptime | location | lldp/cdp summary. Missing trailing
/// columns read as empty.
pub fn parse_ap_status_at(table: &StringTable, now_s: i64) -> Option<ApStatus> {
    let row = table.first()?;
    let col = |i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    let uptime_raw = col(8);
    let uptime_seconds = resolve_uptime(&uptime_raw, now_s);

    Some(ApStatus {
        ap_name: col(0),
        serial: col(1),
        mac: format_mac(&col(2)),
        ip: col(3),
        model: col(4),
        connected: col(5) == "1",
        state: col(6),
        sw_version: col(7),
        uptime_raw,
        uptime_seconds,
        locations: col(9),
        lldp_cdp_short: clean_text(&col(10)),
    })
}

/// Integers may be boot timestamps; anything else is an uptime in one of
/// the usual textual forms.
fn resolve_uptime(raw: &str, now_s: i64) -> u64 {
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => elapsed_uptime(v.trunc() as i64, now_s),
        _ => uptime_seconds(&Value::String(raw.to_string())),
    }
}

/// Parse `extreme_ap_clients`: one row `<2.4GHz> <5GHz> <6GHz>`.
pub fn parse_ap_clients(table: &StringTable) -> Option<BandCounts> {
    let row = table.first()?;
    let count = |i: usize| {
        row.get(i)
            .map(|s| to_int(&Value::String(s.clone()), 0).max(0) as u64)
            .unwrap_or(0)
    };
    Some(BandCounts::new(count(0), count(1), count(2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn row(cells: &[&str]) -> StringTable {
        vec![cells.iter().map(|c| c.to_string()).collect()]
    }

    #[test]
    fn test_parse_full_status_row() {
        let t = row(&[
            "AP-1",
            "SER123",
            "4c231a0403d5",
            "10.0.0.5",
            "AP410C",
            "1",
            "CONNECTED",
            "10.6.1.0",
            "7200",
            "DE/Berlin/LOC1",
            "sw1 (interface name) ge.1.5",
        ]);
        let s = parse_ap_status_at(&t, NOW).unwrap();
        assert_eq!(s.ap_name, "AP-1");
        assert_eq!(s.mac, "4C:23:1A:04:03:D5");
        assert!(s.connected);
        assert_eq!(s.uptime_seconds, 7_200);
        assert_eq!(s.lldp_cdp_short, "sw1  ge.1.5");
    }

    #[test]
    fn test_uptime_column_variants() {
        let at = |v: &str| {
            let mut cells = vec!["AP"; 8];
            cells.push(v);
            parse_ap_status_at(&row(&cells), NOW).unwrap().uptime_seconds
        };
        assert_eq!(at("1699996400"), 3_600);
        assert_eq!(at("1699996400000"), 3_600);
        assert_eq!(at("400000000"), 400_000);
        assert_eq!(at("1d 2h"), 93_600);
        assert_eq!(at(""), 0);
        assert_eq!(at("-3"), 0);
    }

    #[test]
    fn test_short_row_defaults() {
        let s = parse_ap_status_at(&row(&["AP-2", "S", "xx", "", "", "0"]), NOW).unwrap();
        assert!(!s.connected);
        assert_eq!(s.mac, "xx");
        assert_eq!(s.locations, "");
        assert_eq!(s.uptime_seconds, 0);
    }

    #[test]
    fn test_parse_ap_clients() {
        assert_eq!(
            parse_ap_clients(&row(&["5", "3", "0"])),
            Some(BandCounts::new(5, 3, 0))
        );
        assert_eq!(
            parse_ap_clients(&row(&["x", "2"])),
            Some(BandCounts::new(0, 2, 0))
        );
        assert_eq!(parse_ap_clients(&Vec::new()), None);
    }
}
