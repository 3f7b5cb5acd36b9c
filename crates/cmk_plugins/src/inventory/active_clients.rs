use super::InventoryPlugin;
use crate::agent_based::TableRow;
use crate::normalize::{band_from_active_client, value_to_string};
use crate::sections::{names, ActiveClients, Sections};
use serde_json::Value;

pub struct ActiveClientsInventory;

const TEXT_COLUMNS: [&str; 9] = [
    "hostname",
    "ip",
    "ssid",
    "bssid",
    "rssi",
    "snr",
    "channel",
    "os_type",
    "user_profile",
];

fn text(client: &Value, key: &str) -> String {
    client.get(key).map(value_to_string).unwrap_or_default()
}

fn sort_key(client: &Value) -> String {
    let mac = text(client, "mac").to_lowercase();
    let ssid = text(client, "ssid").to_lowercase();
    if mac.is_empty() && ssid.is_empty() {
        "zzz".to_string()
    } else {
        format!("{}__{}", ssid, mac)
    }
}

/// One `extreme.clients` row per active client, ordered by SSID and MAC.
/// Clients without MAC are keyed by their position.
pub fn inventory_active_clients(section: &ActiveClients) -> Vec<TableRow> {
    let device_id = section.device_id();
    let ap_name = section.hostname();

    let mut clients: Vec<&Value> = section.clients().iter().collect();
    clients.sort_by_cached_key(|c| sort_key(c));

    clients
        .into_iter()
        .enumerate()
        .map(|(idx, c)| {
            let mac = Some(text(c, "mac"))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("idx-{}", idx));
            let band = Some(text(c, "band"))
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| band_from_active_client(c).label().to_string());
            let own_ap = Some(text(c, "ap_name")).filter(|s| !s.is_empty());
            let own_ap_id = Some(text(c, "ap_id")).filter(|s| !s.is_empty());

            let mut row = TableRow::new(&["extreme", "clients"])
                .key("device_id", device_id.as_str())
                .key("mac", mac);
            for col in TEXT_COLUMNS {
                row = row.column(col, text(c, col));
            }
            row.column("band", band)
                .column("ap_name", own_ap.unwrap_or_else(|| ap_name.clone()))
                .column("ap_id", own_ap_id.unwrap_or_else(|| device_id.clone()))
                .column("connected", text(c, "connected"))
        })
        .collect()
}

impl InventoryPlugin for ActiveClientsInventory {
    fn name(&self) -> &'static str {
        "xiq_inventory_active_clients"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::ACTIVE_CLIENTS]
    }

    fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        sections
            .active_clients()
            .map(inventory_active_clients)
            .unwrap_or_default()
    }
}
