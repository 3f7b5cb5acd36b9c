use super::InventoryPlugin;
use crate::agent_based::TableRow;
use crate::normalize::{to_int_digits, Band};
use crate::sections::{names, RadioInformation, Sections};
use serde_json::Value;

pub struct ApRadios;
pub struct ApBssids;

/// One `extreme.ap_radios` row per radio.
pub fn inventory_ap_radios(info: &RadioInformation) -> Vec<TableRow> {
    info.radios
        .iter()
        .map(|r| {
            TableRow::new(&["extreme", "ap_radios"])
                .key("radio_key", format!("{}_{}", info.device_id, r.name))
                .column("radio_name", r.name.as_str())
                .column("radio_mac", r.mac.as_str())
                .column("frequency", r.frequency.label())
                .column("channel_number", r.channel_number)
                .column(
                    "channel_width",
                    to_int_digits(&Value::String(r.channel_width.clone()), 0),
                )
                .column("mode", r.mode.as_str())
                .column("power", r.power)
                .column("hostname", info.hostname.as_str())
                .column("device_id", info.device_id.as_str())
        })
        .collect()
}

/// One `extreme.ap_bssids` row per SSID/BSSID pair, sorted by SSID,
/// band and BSSID. WLANs without SSID or BSSID are skipped.
pub fn inventory_ap_bssids(info: &RadioInformation) -> Vec<TableRow> {
    let mut entries: Vec<(&str, Band, &str, &str)> = info
        .radios
        .iter()
        .flat_map(|r| {
            r.wlans
                .iter()
                .filter(|w| !w.ssid.is_empty() && !w.bssid.is_empty())
                .map(move |w| (w.ssid.as_str(), r.frequency, w.bssid.as_str(), r.name.as_str()))
        })
        .collect();
    entries.sort_by(|a, b| (a.0, a.1.label(), a.2).cmp(&(b.0, b.1.label(), b.2)));

    entries
        .into_iter()
        .map(|(ssid, band, bssid, radio)| {
            TableRow::new(&["extreme", "ap_bssids"])
                .key("bssid_key", format!("{}_{}_{}", info.device_id, ssid, bssid))
                .column("ssid", ssid)
                .column("bssid", bssid)
                .column("frequency", band.label())
                .column("device_id", info.device_id.as_str())
                .column("hostname", info.hostname.as_str())
                .column("radio_name", radio)
        })
        .collect()
}

impl InventoryPlugin for ApRadios {
    fn name(&self) -> &'static str {
        "xiq_inventory_ap_radios"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::RADIO_INFORMATION]
    }

    fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        sections
            .radio_information()
            .map(inventory_ap_radios)
            .unwrap_or_default()
    }
}

impl InventoryPlugin for ApBssids {
    fn name(&self) -> &'static str {
        "xiq_inventory_ap_bssids"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::RADIO_INFORMATION]
    }

    fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        sections
            .radio_information()
            .map(inventory_ap_bssids)
            .unwrap_or_default()
    }
}
