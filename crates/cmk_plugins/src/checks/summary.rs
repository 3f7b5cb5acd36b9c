use super::CheckPlugin;
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::normalize::{norm_connected, to_int};
use crate::sections::devices::DeviceClass;
use crate::sections::{names, DeviceRow, Sections};
use serde_json::Value;
use std::collections::BTreeMap;

pub struct Summary;

const CONNECTED_KEY_PAIRS: [(&str, &str); 3] = [
    ("aps_connected", "aps_disconnected"),
    ("access_points_connected", "access_points_disconnected"),
    ("ap_connected", "ap_disconnected"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCounts {
    pub ap: u64,
    pub sw: u64,
    pub misc: u64,
    pub total: u64,
}

pub fn count_by_function(rows: &[DeviceRow]) -> DeviceCounts {
    let mut counts = DeviceCounts::default();
    for row in rows {
        match row.class() {
            DeviceClass::AccessPoint => counts.ap += 1,
            DeviceClass::Switch => counts.sw += 1,
            DeviceClass::Misc => counts.misc += 1,
        }
        counts.total += 1;
    }
    counts
}

/// `(connected, disconnected)` APs, or `None` when no AP row carries a
/// connected column.
pub fn count_ap_connected(rows: &[DeviceRow]) -> Option<(u64, u64)> {
    let aps: Vec<&DeviceRow> = rows
        .iter()
        .filter(|r| r.class() == DeviceClass::AccessPoint)
        .collect();
    if aps.iter().all(|r| r.connected.is_none()) {
        return None;
    }
    let connected = aps
        .iter()
        .filter(|r| r.connected.as_deref().is_some_and(norm_connected))
        .count() as u64;
    Some((connected, aps.len() as u64 - connected))
}

fn int_of(summary: &BTreeMap<String, String>, key: &str) -> i64 {
    summary
        .get(key)
        .map(|v| to_int(&Value::String(v.clone()), 0))
        .unwrap_or(0)
}

pub fn discover_summary(summary: Option<&BTreeMap<String, String>>) -> Vec<Service> {
    summary.map(|_| vec![Service::new()]).unwrap_or_default()
}

pub fn check_summary(
    summary: Option<&BTreeMap<String, String>>,
    inventory: Option<&[DeviceRow]>,
) -> CheckOutput {
    let Some(summary) = summary.filter(|s| !s.is_empty()) else {
        return CheckOutput::unknown("No XIQ summary data available");
    };

    let aps = int_of(summary, "access_points");
    let total_clients = int_of(summary, "total_clients");

    let agent_split = CONNECTED_KEY_PAIRS
        .iter()
        .find(|(c, d)| summary.contains_key(*c) || summary.contains_key(*d))
        .map(|(c, d)| {
            let connected = int_of(summary, c);
            let disconnected = if summary.contains_key(*d) {
                int_of(summary, d)
            } else {
                (aps - connected).max(0)
            };
            (connected, disconnected)
        });

    let rows = inventory.unwrap_or(&[]);
    let inv = count_by_function(rows);
    let inv_split = count_ap_connected(rows);

    let short = format!("{} APs, {} Clients", aps, total_clients);
    let mut lines = vec![short.clone()];
    match (agent_split, inv_split) {
        (Some((c, d)), _) => lines.push(format!(
            "APs in XIQ: {} (connected {} / disconnected {})",
            aps, c, d
        )),
        (None, Some((c, d))) => lines.push(format!(
            "APs in XIQ: {} (connected {} / disconnected {})",
            inv.ap, c, d
        )),
        (None, None) => {
            let n = if inv.ap > 0 { inv.ap as i64 } else { aps };
            lines.push(format!("APs in XIQ: {}", n));
        }
    }
    if inv.total > 0 {
        lines.push(format!("Switches in XIQ: {}", inv.sw));
        lines.push(format!("Misc devices in XIQ: {}", inv.misc));
        lines.push(format!("Total devices in XIQ: {}", inv.total));
    }

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(State::Ok, short));
    out.push(
        CheckResult::notice(State::Ok, "XIQ Summary details available in long output")
            .with_details(lines.join("\n")),
    );
    out.metric("xiq_aps_total", aps as f64);
    out.metric("xiq_clients_total", total_clients as f64);
    out.metric("xiq_clients_24", int_of(summary, "clients_24") as f64);
    out.metric("xiq_clients_5", int_of(summary, "clients_5") as f64);
    out.metric("xiq_clients_6", int_of(summary, "clients_6") as f64);
    out
}

impl CheckPlugin for Summary {
    fn name(&self) -> &'static str {
        "xiq_summary"
    }

    fn service_name(&self) -> &'static str {
        "XIQ Summary"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::SUMMARY, names::DEVICE_INVENTORY]
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_summary(sections.summary())
    }

    fn check(&self, _item: Option<&str>, _params: &Value, sections: &Sections) -> CheckOutput {
        check_summary(sections.summary(), sections.device_inventory())
    }
}
