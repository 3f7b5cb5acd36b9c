use crate::agent_based::StringTable;
use crate::normalize::{clean_text, format_mac};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum number of columns of a device inventory row.
pub const DEVICE_MIN_COLUMNS: usize = 10;

/// Minimum number of columns of a neighbor row.
pub const NEIGHBOR_MIN_COLUMNS: usize = 9;

/// One device of `extreme_device_inventory`.
///
/// `id | hostname | serial | mac | ip | model | software | location |
/// function | managed_by [| connected]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRow {
    pub id: String,
    pub hostname: String,
    pub serial: String,
    pub mac: String,
    pub ip: String,
    pub model: String,
    pub software: String,
    pub location: String,
    pub function: String,
    pub managed_by: String,
    /// Only present when the agent sent the eleventh column.
    pub connected: Option<String>,
}

/// Device class derived from the free-text function column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    AccessPoint,
    Switch,
    Misc,
}

impl DeviceRow {
    pub fn class(&self) -> DeviceClass {
        let f = self.function.to_uppercase();
        if f.contains("AP") {
            DeviceClass::AccessPoint
        } else if f.contains("SW") {
            DeviceClass::Switch
        } else {
            DeviceClass::Misc
        }
    }
}

/// Parse `extreme_device_inventory`, dropping rows that are too short.
pub fn parse_device_inventory(table: &StringTable) -> Option<Vec<DeviceRow>> {
    let rows: Vec<DeviceRow> = table
        .iter()
        .filter(|row| {
            let ok = row.len() >= DEVICE_MIN_COLUMNS;
            if !ok {
                warn!(columns = row.len(), "dropping short device inventory row");
            }
            ok
        })
        .map(|row| DeviceRow {
            id: row[0].clone(),
            hostname: row[1].clone(),
            serial: row[2].clone(),
            mac: row[3].clone(),
            ip: row[4].clone(),
            model: row[5].clone(),
            software: row[6].clone(),
            location: row[7].clone(),
            function: row[8].clone(),
            managed_by: row[9].clone(),
            connected: row.get(10).cloned(),
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

/// One LLDP/CDP neighbor of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub device_id: String,
    pub hostname: String,
    pub host_ip: String,
    pub local_port: String,
    pub management_ip: String,
    pub remote_port: String,
    pub port_description: String,
    pub mac_address: String,
    pub remote_device: String,
}

impl Neighbor {
    /// Field by its column name, as used by the presentation rule.
    pub fn field(&self, name: &str) -> Option<&str> {
        let v = match name {
            "device_id" => &self.device_id,
            "hostname" => &self.hostname,
            "host_ip" => &self.host_ip,
            "local_port" => &self.local_port,
            "management_ip" => &self.management_ip,
            "remote_port" => &self.remote_port,
            "port_description" => &self.port_description,
            "mac_address" | "remote_mac" => &self.mac_address,
            "remote_device" | "remote_name" => &self.remote_device,
            _ => return None,
        };
        Some(v.as_str())
    }
}

/// Parse `extreme_device_neighbors` / `extreme_ap_neighbors`.
pub fn parse_neighbors(table: &StringTable) -> Option<Vec<Neighbor>> {
    let rows: Vec<Neighbor> = table
        .iter()
        .filter(|row| row.len() >= NEIGHBOR_MIN_COLUMNS)
        .map(|row| {
            let c = |i: usize| clean_text(&row[i]);
            Neighbor {
                device_id: c(0),
                hostname: c(1),
                host_ip: c(2),
                local_port: c(3),
                management_ip: c(4),
                remote_port: c(5),
                port_description: c(6),
                mac_address: format_mac(&c(7)),
                remote_device: c(8),
            }
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe_rows(lines: &[&str]) -> StringTable {
        lines
            .iter()
            .map(|l| l.split('|').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_device_rows_and_classes() {
        let t = pipe_rows(&[
            "1|AP-1|S1|aa|10.0.0.1|AP410C|10.6|DE/LOC1|AP|XIQ|1",
            "2|SW-1|S2|bb|10.0.0.2|X440|31.7|DE/LOC1|Switch SW|XIQ",
            "3|short|row",
            "4|FW|S4|cc|10.0.0.4|FW1|1.0|DE|router|XIQ|0",
        ]);
        let rows = parse_device_inventory(&t).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].class(), DeviceClass::AccessPoint);
        assert_eq!(rows[1].class(), DeviceClass::Switch);
        assert_eq!(rows[1].connected, None);
        assert_eq!(rows[2].class(), DeviceClass::Misc);
    }

    #[test]
    fn test_neighbors_are_cleaned() {
        let t = pipe_rows(&[
            "91|AP-1|10.0.0.5|eth0 (interface name)|10.0.0.1|ge.1.5|uplink|00:11:22:33:44:55 (mac address)|core-sw",
            "too|short",
        ]);
        let rows = parse_neighbors(&t).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].local_port, "eth0");
        assert_eq!(rows[0].mac_address, "00:11:22:33:44:55");
        assert_eq!(rows[0].field("remote_name"), Some("core-sw"));
        assert_eq!(rows[0].field("bogus"), None);
    }

    #[test]
    fn test_no_usable_rows() {
        assert!(parse_neighbors(&pipe_rows(&["a|b"])).is_none());
        assert!(parse_device_inventory(&Vec::new()).is_none());
    }
}
