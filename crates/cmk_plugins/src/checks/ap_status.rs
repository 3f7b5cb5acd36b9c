//! `XIQ AP <name> Status` on the piggyback host of each access point.

use super::{kv_line, missing_item, CheckPlugin};
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::checks::ap_uptime::eval_min_uptime;
use crate::normalize::{clean_text, fmt_dhms, location_leaf, BandCounts};
use crate::rulesets::{parse_params, ApStatusParams, Levels, XIQ_AP_STATUS_LEVELS};
use crate::sections::{names, ApStatus, Neighbor, RadioInformation, Sections};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const RULER: &str = "------------------------------";

pub struct ApStatusCheck;

/// Everything the status check looks at for one AP.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApView<'a> {
    pub status: Option<&'a ApStatus>,
    pub neighbors: &'a [Neighbor],
    pub radios: Option<&'a RadioInformation>,
    pub clients: Option<&'a BandCounts>,
}

impl<'a> ApView<'a> {
    pub fn from_sections(sections: &'a Sections) -> Self {
        Self {
            status: sections.ap_status(),
            neighbors: sections.neighbors(names::AP_NEIGHBORS).unwrap_or(&[]),
            radios: sections.radio_information(),
            clients: sections.ap_clients(),
        }
    }
}

pub fn discover_ap_status(status: Option<&ApStatus>) -> Vec<Service> {
    status
        .filter(|s| !s.ap_name.is_empty())
        .map(|s| vec![Service::with_item(s.ap_name.clone())])
        .unwrap_or_default()
}

/// Connection state: connected is OK, transitional states WARN, anything
/// else the configured state.
pub fn map_connection_state(connected: bool, state_text: &str, disconnected: State) -> State {
    if connected {
        return State::Ok;
    }
    match state_text.trim().to_lowercase().as_str() {
        "provisioning" | "configuring" | "adopting" => State::Warn,
        _ => disconnected,
    }
}

/// Bracketed hint and whitespace run patterns.
fn lldp_patterns() -> Option<&'static (Regex, Regex)> {
    static PATTERNS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| Some((Regex::new(r"\([^)]*\)").ok()?, Regex::new(r"\s{2,}").ok()?)))
        .as_ref()
}

/// Drop bracketed hints and collapse runs of whitespace.
pub fn clean_lldp_short(lldp: &str) -> String {
    if lldp.is_empty() {
        return String::new();
    }
    let Some((parens, spaces)) = lldp_patterns() else {
        return clean_text(lldp.trim());
    };
    let s = parens.replace_all(lldp, "");
    let s = clean_text(s.trim());
    spaces.replace_all(&s, " ").into_owned()
}

fn neighbor_lines(neighbors: &[Neighbor]) -> Vec<String> {
    const FIELDS: [(&str, &str); 7] = [
        ("local_port", "Local Port"),
        ("remote_device", "Remote Device"),
        ("management_ip", "Remote Mgmt-IP"),
        ("remote_port", "Remote Port"),
        ("port_description", "Port Desc"),
        ("mac_address", "MAC"),
        ("device_id", "Device-ID"),
    ];
    let mut lines = Vec::new();
    for (idx, n) in neighbors.iter().enumerate() {
        lines.push(format!("- Neighbor #{}:", idx + 1));
        for (key, title) in FIELDS {
            if let Some(v) = n.field(key).filter(|v| !v.is_empty()) {
                lines.push(format!("  - {}: {}", title, clean_text(v)));
            }
        }
    }
    lines
}

pub fn check_ap_status(item: &str, params: &ApStatusParams, view: ApView<'_>) -> CheckOutput {
    let Some(s) = view.status else {
        return CheckOutput::unknown(format!("{}: no status data available", item));
    };

    let lldp_short = clean_lldp_short(&s.lldp_cdp_short);
    let policies = view.radios.map(RadioInformation::policies).unwrap_or_default();
    let clients = view.clients.copied().unwrap_or_default();
    let total_clients = clients.total();
    let uptime = s.uptime_seconds;
    let loc_leaf = if s.locations.is_empty() {
        String::new()
    } else {
        location_leaf(&s.locations)
    };

    let mut bits = Vec::new();
    if !s.ip.is_empty() {
        bits.push(format!("IP: {}", s.ip));
    }
    if !loc_leaf.is_empty() {
        bits.push(format!("Loc: {}", loc_leaf));
    }
    if !lldp_short.is_empty() {
        bits.push(format!("LLDP: {}", lldp_short));
    }
    bits.push(format!("Clients: {}", total_clients));
    if uptime > 0 {
        bits.push(format!("Uptime: {}", fmt_dhms(uptime)));
    }
    let summary = format!("{} | {}", item, bits.join(" | "));

    let mut lines: Vec<Option<String>> = vec![Some("**Device**".to_string())];
    lines.push(kv_line("Name", item));
    lines.push(kv_line("Model", &s.model));
    lines.push(kv_line("Firmware", &s.sw_version));
    lines.push(kv_line("Serial", &s.serial));
    if s.locations.contains('/') {
        lines.push(kv_line("Location", &s.locations));
        lines.push(kv_line("Loc (short)", &loc_leaf));
    } else {
        lines.push(kv_line("Loc (short)", &s.locations));
    }
    if !policies.is_empty() {
        lines.push(kv_line("Policy", &policies.join(", ")));
    }

    lines.push(Some(RULER.to_string()));
    lines.push(Some("**Network**".to_string()));
    lines.push(kv_line("IP", &s.ip));
    lines.push(kv_line("MAC", &s.mac));

    lines.push(Some(RULER.to_string()));
    lines.push(Some("**Clients & Uptime**".to_string()));
    lines.push(kv_line("Clients total", &total_clients.to_string()));
    lines.push(kv_line("Clients 2.4GHz", &clients.ghz24.to_string()));
    lines.push(kv_line("Clients 5GHz", &clients.ghz5.to_string()));
    lines.push(kv_line("Clients 6GHz", &clients.ghz6.to_string()));
    lines.push(kv_line("Uptime", &fmt_dhms(uptime)));

    let show_neighbors = params.enable_lldp_checks && !view.neighbors.is_empty();
    if !lldp_short.is_empty() || show_neighbors {
        lines.push(Some(RULER.to_string()));
        lines.push(Some("**LLDP Info**".to_string()));
        if !lldp_short.is_empty() {
            lines.push(Some(format!("- {}", lldp_short)));
        }
        if show_neighbors {
            lines.extend(neighbor_lines(view.neighbors).into_iter().map(Some));
        }
    }
    let details = lines.into_iter().flatten().collect::<Vec<_>>().join("\n");

    let disconnected = State::from_code(i64::from(params.treat_disconnected_as)).unwrap_or(State::Crit);
    let state = map_connection_state(s.connected, &s.state, disconnected);

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(state, summary).with_details(details));

    let client_levels = Levels::new(params.client_warn, params.client_crit);
    let client_state = client_levels.check_upper(total_clients);
    if client_state != State::Ok {
        out.push(CheckResult::summary(
            client_state,
            format!(
                "Clients {} (warn/crit at {}/{})",
                total_clients, params.client_warn, params.client_crit
            ),
        ));
    }

    if uptime > 0 {
        let (uptime_state, text) = eval_min_uptime(uptime, params.min_uptime_warn, params.min_uptime_crit);
        if uptime_state != State::Ok {
            out.push(CheckResult::summary(uptime_state, text));
        }
    }

    out.metric("xiq_uptime_seconds", uptime as f64);
    out.metric("xiq_clients_total", total_clients as f64);
    out.metric("xiq_clients_24", clients.ghz24 as f64);
    out.metric("xiq_clients_5", clients.ghz5 as f64);
    out.metric("xiq_clients_6", clients.ghz6 as f64);
    out.metric("xiq_uptime_days", (uptime / 86_400) as f64);
    out
}

impl CheckPlugin for ApStatusCheck {
    fn name(&self) -> &'static str {
        "xiq_ap_status"
    }

    fn service_name(&self) -> &'static str {
        "XIQ AP %s Status"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[
            names::AP_STATUS,
            names::AP_NEIGHBORS,
            names::RADIO_INFORMATION,
            names::AP_CLIENTS,
        ]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_AP_STATUS_LEVELS)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_ap_status(sections.ap_status())
    }

    fn check(&self, item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let Some(item) = item else {
            return missing_item(self.name());
        };
        let params: ApStatusParams = parse_params(XIQ_AP_STATUS_LEVELS, params);
        check_ap_status(item, &params, ApView::from_sections(sections))
    }
}
