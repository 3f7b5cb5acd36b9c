use super::InventoryPlugin;
use crate::agent_based::TableRow;
use crate::normalize::{location_leaf, norm_connected};
use crate::sections::devices::DeviceClass;
use crate::sections::{names, DeviceRow, Sections};

pub struct Devices;

/// Every device under `extreme.ap`, `extreme.sw` or `extreme.misc`.
pub fn inventory_devices(rows: &[DeviceRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|d| {
            let node = match d.class() {
                DeviceClass::AccessPoint => "ap",
                DeviceClass::Switch => "sw",
                DeviceClass::Misc => "misc",
            };
            let mut row = TableRow::new(&["extreme", node])
                .key("id", d.id.as_str())
                .column("hostname", d.hostname.as_str())
                .column("serial", d.serial.as_str())
                .column("mac", d.mac.as_str())
                .column("ip", d.ip.as_str())
                .column("model", d.model.as_str())
                .column("software", d.software.as_str())
                .column("location_full", d.location.as_str())
                .column("location_leaf", location_leaf(&d.location))
                .column("device_function", d.function.to_uppercase())
                .column("managed_by", d.managed_by.as_str());
            if let Some(connected) = d.connected.as_deref() {
                row = row.column("connected", norm_connected(connected));
            }
            row
        })
        .collect()
}

impl InventoryPlugin for Devices {
    fn name(&self) -> &'static str {
        "xiq_inventory_devices"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::DEVICE_INVENTORY]
    }

    fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        sections
            .device_inventory()
            .map(inventory_devices)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_device_nodes_and_columns() {
        let rows = vec![
            DeviceRow {
                id: "1".to_string(),
                function: "ap".to_string(),
                location: "DE/Berlin/LOC7".to_string(),
                connected: Some("online".to_string()),
                ..Default::default()
            },
            DeviceRow {
                id: "2".to_string(),
                function: "switch-sw".to_string(),
                ..Default::default()
            },
        ];
        let inv = inventory_devices(&rows);
        assert_eq!(inv[0].node(), "extreme.ap");
        assert_eq!(inv[0].get_str("device_function"), Some("AP"));
        assert_eq!(inv[0].get_str("location_leaf"), Some("LOC7"));
        assert_eq!(inv[0].get("connected"), Some(&Value::Bool(true)));
        assert_eq!(inv[1].node(), "extreme.sw");
        assert!(inv[1].get("connected").is_none());
    }
}
