//! `xiq_radio_information`: one JSON document per AP describing its radios,
//! the WLANs they broadcast and the client count per SSID and band.

use super::join_cells;
use crate::agent_based::StringTable;
use crate::normalize::{format_mac, to_int, to_int_digits, value_to_string, Band, BandCounts};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A WLAN (SSID) broadcast by one radio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wlan {
    pub ssid: String,
    pub bssid: String,
    pub policy: String,
}

/// One radio of an AP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radio {
    pub name: String,
    pub mac: String,
    pub frequency: Band,
    pub channel_number: i64,
    pub channel_width: String,
    pub mode: String,
    pub power: i64,
    pub wlans: Vec<Wlan>,
    pub client_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioInformation {
    pub device_id: String,
    pub hostname: String,
    pub radios: Vec<Radio>,
    /// Active clients per SSID and band.
    pub ssid_freq: BTreeMap<String, BandCounts>,
}

impl RadioInformation {
    pub fn radios_on(&self, band: Band) -> impl Iterator<Item = &Radio> {
        self.radios.iter().filter(move |r| r.frequency == band)
    }

    /// Bands with at least one radio, in 2.4/5/6 order.
    pub fn bands(&self) -> Vec<Band> {
        let present: BTreeSet<Band> = self.radios.iter().map(|r| r.frequency).collect();
        present.into_iter().collect()
    }

    /// SSIDs with active clients plus SSIDs broadcast without clients.
    pub fn ssids(&self) -> BTreeSet<String> {
        let mut ssids: BTreeSet<String> = self
            .ssid_freq
            .keys()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        for radio in &self.radios {
            for wlan in &radio.wlans {
                if !wlan.ssid.is_empty() {
                    ssids.insert(wlan.ssid.clone());
                }
            }
        }
        ssids
    }

    /// Sorted, de-duplicated network policy names.
    pub fn policies(&self) -> Vec<String> {
        self.radios
            .iter()
            .flat_map(|r| r.wlans.iter())
            .filter(|w| !w.policy.is_empty())
            .map(|w| w.policy.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Clients on `band` summed over all SSIDs.
    pub fn clients_on(&self, band: Band) -> u64 {
        self.ssid_freq.values().map(|c| c.get(band)).sum()
    }
}

fn str_field(v: &Value, key: &str) -> String {
    v.get(key).map(value_to_string).unwrap_or_default().trim().to_string()
}

fn radio_band(radio: &Value) -> Band {
    if let Some(band) = radio
        .get("frequency")
        .map(value_to_string)
        .and_then(|f| Band::from_label(&f))
    {
        return band;
    }
    let mode = str_field(radio, "mode").to_lowercase();
    if mode.contains("5g") {
        Band::Ghz5
    } else if mode.contains("6g") {
        Band::Ghz6
    } else {
        Band::Ghz24
    }
}

fn radio_clients(radio: &Value) -> u64 {
    ["active_clients", "connected_clients", "client_count"]
        .iter()
        .filter_map(|k| radio.get(*k))
        .map(|v| to_int(v, -1))
        .find(|n| *n >= 0)
        .unwrap_or(0) as u64
}

fn parse_radio(radio: &Value) -> Radio {
    let wlans = radio
        .get("wlans")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|w| Wlan {
                    ssid: str_field(w, "ssid"),
                    bssid: format_mac(&str_field(w, "bssid")),
                    policy: str_field(w, "network_policy_name"),
                })
                .collect()
        })
        .unwrap_or_default();

    Radio {
        name: str_field(radio, "name"),
        mac: format_mac(&str_field(radio, "mac_address")),
        frequency: radio_band(radio),
        channel_number: radio.get("channel_number").map(|v| to_int_digits(v, 0)).unwrap_or(0),
        channel_width: str_field(radio, "channel_width"),
        mode: str_field(radio, "mode"),
        power: radio.get("power").map(|v| to_int_digits(v, 0)).unwrap_or(0),
        wlans,
        client_count: radio_clients(radio),
    }
}

/// Parse the JSON radio document. Anything that is not a JSON object is
/// ignored.
pub fn parse_radio_information(table: &StringTable) -> Option<RadioInformation> {
    let raw = join_cells(table, "");
    if !raw.starts_with('{') {
        return None;
    }
    let data: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "radio information is not valid JSON");
            return None;
        }
    };

    let radios = data
        .get("radios")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(parse_radio).collect())
        .unwrap_or_default();

    let ssid_freq = data
        .get("_ssid_freq")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(ssid, counts)| (ssid.clone(), BandCounts::from_value(counts)))
                .collect()
        })
        .unwrap_or_default();

    Some(RadioInformation {
        device_id: str_field(&data, "device_id"),
        hostname: str_field(&data, "hostname"),
        radios,
        ssid_freq,
    })
}
