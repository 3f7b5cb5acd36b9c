use super::{missing_item, CheckPlugin};
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::rulesets::{parse_params, NeighborPresentation, XIQ_AP_NEIGHBORS_PRESENTATION};
use crate::sections::{names, Neighbor, Sections};
use serde_json::Value;
use std::collections::BTreeSet;

pub struct ApNeighbors;

fn field_label(key: &str) -> &str {
    match key {
        "local_port" => "Local Port",
        "remote_device" | "remote_name" => "Remote Device",
        "remote_port" => "Remote Port",
        "management_ip" => "Management IP",
        "mac_address" | "remote_mac" => "Remote MAC",
        "port_description" => "Port Description",
        other => other,
    }
}

fn or_dash(v: &str) -> &str {
    if v.is_empty() {
        "-"
    } else {
        v
    }
}

/// One service per reporting host, in order of first appearance.
pub fn discover_ap_neighbors(rows: Option<&[Neighbor]>) -> Vec<Service> {
    let mut seen = BTreeSet::new();
    rows.unwrap_or(&[])
        .iter()
        .map(|n| n.hostname.trim())
        .filter(|h| !h.is_empty() && seen.insert(h.to_string()))
        .map(Service::with_item)
        .collect()
}

pub fn check_ap_neighbors(
    item: &str,
    params: &NeighborPresentation,
    rows: Option<&[Neighbor]>,
) -> CheckOutput {
    let Some(rows) = rows else {
        return CheckOutput::unknown(format!("{}: no neighbor data available", item));
    };

    let mut mine: Vec<&Neighbor> = rows.iter().filter(|n| n.hostname.trim() == item).collect();
    let mut out = CheckOutput::new();
    if mine.is_empty() {
        out.push(CheckResult::summary(State::Ok, format!("{}: no neighbors found", item)));
        return out;
    }

    mine.sort_by(|a, b| {
        (&a.local_port, &a.remote_device, &a.remote_port).cmp(&(
            &b.local_port,
            &b.remote_device,
            &b.remote_port,
        ))
    });

    let first = mine[0];
    out.push(CheckResult::summary(
        State::Ok,
        format!(
            "LLDP/CDP: {} neighbor(s), first: {} -> {} ({})",
            mine.len(),
            or_dash(&first.local_port),
            or_dash(&first.remote_device),
            or_dash(&first.remote_port)
        ),
    ));

    let limit = if params.neighbor_limit == 0 {
        usize::MAX
    } else {
        params.neighbor_limit
    };
    let mut lines = vec!["**LLDP/CDP Neighbors**".to_string()];
    for n in mine.iter().take(limit) {
        for key in &params.fields {
            let value = match key.as_str() {
                "mac_address" | "remote_mac" => Some(or_dash(&n.mac_address)),
                other => n.field(other).filter(|v| !v.is_empty()),
            };
            if let Some(v) = value {
                lines.push(format!("- {}: {}", field_label(key), v));
            }
        }
        lines.push(String::new());
    }

    out.push(
        CheckResult::notice(State::Ok, "LLDP/CDP: detailed neighbor information available")
            .with_details(lines.join("\n").trim_end()),
    );
    out
}

impl CheckPlugin for ApNeighbors {
    fn name(&self) -> &'static str {
        "xiq_ap_neighbors"
    }

    fn service_name(&self) -> &'static str {
        "XIQ AP %s Neighbors"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::DEVICE_NEIGHBORS]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_AP_NEIGHBORS_PRESENTATION)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_ap_neighbors(sections.neighbors(names::DEVICE_NEIGHBORS))
    }

    fn check(&self, item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let Some(item) = item else {
            return missing_item(self.name());
        };
        let params: NeighborPresentation = parse_params(XIQ_AP_NEIGHBORS_PRESENTATION, params);
        check_ap_neighbors(item, &params, sections.neighbors(names::DEVICE_NEIGHBORS))
    }
}
