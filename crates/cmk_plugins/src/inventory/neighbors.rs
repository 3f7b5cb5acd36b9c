use super::InventoryPlugin;
use crate::agent_based::TableRow;
use crate::sections::{names, Neighbor, Sections};

pub struct Neighbors;

/// One `networking.lldp_infos` row per device and local port.
pub fn inventory_neighbors(rows: &[Neighbor]) -> Vec<TableRow> {
    rows.iter()
        .map(|n| {
            TableRow::new(&["networking", "lldp_infos"])
                .key("key", format!("{}_{}", n.device_id, n.local_port))
                .column("device_id", n.device_id.as_str())
                .column("hostname", n.hostname.as_str())
                .column("host_ip", n.host_ip.as_str())
                .column("local_port", n.local_port.as_str())
                .column("management_ip", n.management_ip.as_str())
                .column("remote_port", n.remote_port.as_str())
                .column("port_description", n.port_description.as_str())
                .column("mac_address", n.mac_address.as_str())
                .column("remote_device", n.remote_device.as_str())
        })
        .collect()
}

impl InventoryPlugin for Neighbors {
    fn name(&self) -> &'static str {
        "xiq_inventory_neighbors"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::DEVICE_NEIGHBORS]
    }

    fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        sections
            .neighbors(names::DEVICE_NEIGHBORS)
            .map(inventory_neighbors)
            .unwrap_or_default()
    }
}
