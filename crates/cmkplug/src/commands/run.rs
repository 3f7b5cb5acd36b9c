//! sections / discover / check / inventory over saved agent output.

use crate::display;
use anyhow::Result;
use cmk_plugins::config::PluginConfig;
use cmk_plugins::registry::HostReport;
use cmk_plugins::{AgentOutput, Registry, Sections, State, TableRow};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Hosts of an agent output with their sections, queried host first.
fn hosts<'a>(output: &'a AgentOutput, host: &'a str) -> Vec<(&'a str, Sections)> {
    std::iter::once((host, Sections::from_host(&output.host)))
        .chain(
            output
                .piggyback
                .iter()
                .map(|(name, raw)| (name.as_str(), Sections::from_host(raw))),
        )
        .collect()
}

pub fn sections(text: &str) -> String {
    let output = AgentOutput::parse(text);
    let mut out = String::new();
    let all = std::iter::once(("(queried host)", &output.host))
        .chain(output.piggyback.iter().map(|(h, s)| (h.as_str(), s)));
    for (host, raw) in all {
        if raw.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{}]", host);
        let parsed = Sections::from_host(raw);
        for (name, rows) in raw.iter() {
            let status = if parsed.contains(name) { "parsed" } else { "ignored" };
            debug!("{}: section {} {}", host, name, status);
            let _ = writeln!(out, "  {:<32} {:>4} rows  {}", name, rows.len(), status);
        }
    }
    out
}

pub fn discover(text: &str, host: &str, color: bool) -> String {
    let output = AgentOutput::parse(text);
    let registry = Registry::new();
    let mut out = String::new();
    for (name, sections) in hosts(&output, host) {
        let services = registry.discover(&sections);
        debug!("{}: discovered {} services", name, services.len());
        display::host_header(&mut out, name, color);
        display::discovered(&mut out, &services);
    }
    out
}

pub fn check_reports(text: &str, host: &str, config: &PluginConfig) -> Vec<HostReport> {
    Registry::new().run(&AgentOutput::parse(text), host, config)
}

/// Rendered check results and the worst state seen.
pub fn check(
    text: &str,
    host: &str,
    config: &PluginConfig,
    json: bool,
    details: bool,
    color: bool,
) -> Result<(String, State)> {
    let reports = check_reports(text, host, config);
    let worst = State::worst_of(reports.iter().flat_map(|r| r.services.iter().map(|s| s.state)));
    debug!("checked {} hosts, worst state {}", reports.len(), worst.as_str());

    if json {
        return Ok((serde_json::to_string_pretty(&reports)?, worst));
    }

    let mut out = String::new();
    for report in &reports {
        display::host_header(&mut out, &report.host, color);
        if report.services.is_empty() {
            let _ = writeln!(out, "  (no services)");
        }
        for svc in &report.services {
            display::service(&mut out, svc, details, color);
        }
    }
    display::totals(&mut out, &reports);
    Ok((out, worst))
}

pub fn inventory(text: &str, host: &str, json: bool) -> Result<String> {
    let output = AgentOutput::parse(text);
    let registry = Registry::new();
    let per_host: Vec<(String, Vec<TableRow>)> = hosts(&output, host)
        .into_iter()
        .map(|(name, sections)| (name.to_string(), registry.inventory(&sections)))
        .collect();

    if json {
        let map: BTreeMap<String, Vec<TableRow>> = per_host.into_iter().collect();
        return Ok(serde_json::to_string_pretty(&map)?);
    }

    let mut out = String::new();
    for (name, rows) in &per_host {
        if rows.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{}]", name);
        for row in rows {
            display::inventory_row(&mut out, row);
        }
    }
    Ok(out)
}
