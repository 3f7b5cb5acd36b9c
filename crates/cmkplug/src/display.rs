//! Terminal rendering of check results.

use cmk_plugins::graphing;
use cmk_plugins::registry::{DiscoveredService, HostReport, ServiceResult};
use cmk_plugins::{State, TableRow};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::fmt::Write as _;

pub const SEPARATOR: &str = "------------------------------------------------------------";

/// `[OK  ]`-style tag, colored when `color` is set.
pub fn state_tag(state: State, color: bool) -> String {
    let tag = format!("[{:<4}]", state.as_str());
    if !color {
        return tag;
    }
    match state {
        State::Ok => tag.green().to_string(),
        State::Warn => tag.yellow().to_string(),
        State::Crit => tag.bright_red().to_string(),
        State::Unknown => tag.bright_magenta().to_string(),
    }
}

pub fn host_header(out: &mut String, host: &str, color: bool) {
    let title = format!("[{}]", host);
    let _ = writeln!(out, "{}", if color { title.bold().to_string() } else { title });
}

pub fn discovered(out: &mut String, services: &[DiscoveredService]) {
    if services.is_empty() {
        let _ = writeln!(out, "  (no services)");
        return;
    }
    for s in services {
        let _ = writeln!(out, "  {:<40} {}", s.description, s.plugin);
    }
}

fn metric_line(name: &str, value: f64) -> String {
    match graphing::metric_info(name) {
        Some(info) => format!("    {}: {}", info.title, info.unit.render(value)),
        None => format!("    {}: {}", name, value),
    }
}

pub fn service(out: &mut String, svc: &ServiceResult, details: bool, color: bool) {
    let _ = writeln!(
        out,
        "  {} {}: {}",
        state_tag(svc.state, color),
        svc.description,
        svc.output.summary_line()
    );
    if !details {
        return;
    }
    let long = svc.output.long_output();
    for line in long.lines().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "      {}", line);
    }
    for m in &svc.output.metrics {
        let _ = writeln!(out, "{}", metric_line(&m.name, m.value));
    }
    let graphs = graphing::graphs_for(svc.output.metrics.iter().map(|m| m.name.as_str()));
    if !graphs.is_empty() {
        let titles: Vec<&str> = graphs.iter().map(|g| g.title).collect();
        let _ = writeln!(out, "    graphs: {}", titles.join(", "));
    }
}

/// One line per host with the state counts.
pub fn totals(out: &mut String, reports: &[HostReport]) {
    let _ = writeln!(out, "{}", SEPARATOR);
    for r in reports {
        let count = |state: State| r.services.iter().filter(|s| s.state == state).count();
        let _ = writeln!(
            out,
            "{}: {} services, {} OK, {} WARN, {} CRIT, {} UNKNOWN",
            r.host,
            r.services.len(),
            count(State::Ok),
            count(State::Warn),
            count(State::Crit),
            count(State::Unknown)
        );
    }
}

fn cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn inventory_row(out: &mut String, row: &TableRow) {
    let keys: Vec<String> = row
        .key_columns
        .iter()
        .map(|(k, v)| format!("{}={}", k, cell(v)))
        .collect();
    let cols: Vec<String> = row
        .inventory_columns
        .iter()
        .map(|(k, v)| format!("{}={}", k, cell(v)))
        .collect();
    let _ = writeln!(out, "  {} [{}] {}", row.node(), keys.join(", "), cols.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_tag_plain() {
        assert_eq!(state_tag(State::Ok, false), "[OK  ]");
        assert_eq!(state_tag(State::Crit, false), "[CRIT]");
        assert!(state_tag(State::Warn, true).contains("\u{1b}["));
    }

    #[test]
    fn test_metric_line_uses_title() {
        assert!(metric_line("unknown_metric", 3.0).contains("unknown_metric: 3"));
        let known = metric_line("xiq_uptime_seconds", 90_061.0);
        assert!(!known.contains("xiq_uptime_seconds"), "{}", known);
    }

    #[test]
    fn test_inventory_row() {
        let row = TableRow::new(&["extreme", "ap"]).key("name", "AP-1").column("ip", json!(null));
        let mut out = String::new();
        inventory_row(&mut out, &row);
        assert_eq!(out, "  extreme.ap [name=AP-1] ip=-\n");
    }
}
