//! Metric, graph and perfometer metadata.
//!
//! Plain static tables. The CLI uses them to label perfdata; a Checkmk
//! frontend would render graphs from the same definitions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Aps,
    Clients,
    Seconds,
    Days,
    Dbm,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Count => "",
            Unit::Aps => "APs",
            Unit::Clients => "Clients",
            Unit::Seconds => "s",
            Unit::Days => "d",
            Unit::Dbm => "dBm",
        }
    }

    /// Human readable value in this unit.
    pub fn render(&self, value: f64) -> String {
        match self {
            Unit::Seconds => crate::normalize::fmt_dhms(value.max(0.0) as u64),
            Unit::Count => format!("{:.0}", value),
            _ => format!("{:.0} {}", value, self.symbol()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    DarkBlue,
    Green,
    LightGreen,
    LightRed,
    Orange,
    Red,
    Purple,
    DarkPurple,
    Grey,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub unit: Unit,
    pub color: Color,
}

const fn metric(name: &'static str, title: &'static str, unit: Unit, color: Color) -> MetricInfo {
    MetricInfo {
        name,
        title,
        unit,
        color,
    }
}

pub static METRICS: &[MetricInfo] = &[
    metric("xiq_aps_total", "Access Points (total)", Unit::Aps, Color::Blue),
    metric("xiq_aps_connected", "Access Points (connected)", Unit::Count, Color::LightGreen),
    metric("xiq_aps_disconnected", "Access Points (disconnected)", Unit::Count, Color::LightRed),
    metric("xiq_clients_total", "Clients (total)", Unit::Clients, Color::Green),
    metric("xiq_clients_24", "Clients (2.4 GHz)", Unit::Count, Color::LightGreen),
    metric("xiq_clients_5", "Clients (5 GHz)", Unit::Count, Color::Orange),
    metric("xiq_clients_6", "Clients (6 GHz)", Unit::Count, Color::Red),
    metric("xiq_ap_clients_total", "AP clients (total)", Unit::Clients, Color::Green),
    metric("xiq_ap_clients_24", "AP clients (2.4 GHz)", Unit::Count, Color::LightGreen),
    metric("xiq_ap_clients_5", "AP clients (5 GHz)", Unit::Count, Color::Orange),
    metric("xiq_ap_clients_6", "AP clients (6 GHz)", Unit::Count, Color::Red),
    metric("xiq_api_remaining", "API remaining quota", Unit::Count, Color::DarkBlue),
    metric("xiq_api_limit", "API quota limit", Unit::Count, Color::Grey),
    metric("xiq_uptime_seconds", "Uptime", Unit::Seconds, Color::Blue),
    metric("xiq_uptime_days", "Uptime (days)", Unit::Days, Color::Blue),
    metric("xiq_ssid_clients_total", "SSID clients (total)", Unit::Count, Color::Green),
    metric("xiq_ssid_clients_24", "SSID clients (2.4 GHz)", Unit::Count, Color::LightGreen),
    metric("xiq_ssid_clients_5", "SSID clients (5 GHz)", Unit::Count, Color::Orange),
    metric("xiq_ssid_clients_6", "SSID clients (6 GHz)", Unit::Count, Color::Red),
    metric("xiq_radio_clients_24", "Radio clients (2.4 GHz)", Unit::Count, Color::LightGreen),
    metric("xiq_radio_clients_5", "Radio clients (5 GHz)", Unit::Count, Color::Orange),
    metric("xiq_radio_clients_6", "Radio clients (6 GHz)", Unit::Count, Color::Red),
    metric("xiq_radio_clients_total", "Radio clients (total)", Unit::Count, Color::Green),
    metric("xiq_radio_power_avg_dbm", "Radio power (avg, dBm)", Unit::Dbm, Color::Purple),
    metric("xiq_radio_power_min_dbm", "Radio power (min, dBm)", Unit::Dbm, Color::DarkPurple),
    metric("xiq_radio_channels_count", "Radio channels (distinct)", Unit::Count, Color::Grey),
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GraphInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub minimal_range: (f64, f64),
    /// Stacked areas, drawn below the simple lines.
    pub compound_lines: &'static [&'static str],
    pub simple_lines: &'static [&'static str],
}

pub static GRAPHS: &[GraphInfo] = &[
    GraphInfo {
        name: "xiq_aps",
        title: "XIQ: Access Points",
        minimal_range: (0.0, 10.0),
        compound_lines: &[],
        simple_lines: &["xiq_aps_total"],
    },
    GraphInfo {
        name: "xiq_clients_combined",
        title: "XIQ: Clients (total and by frequency)",
        minimal_range: (0.0, 10.0),
        compound_lines: &["xiq_clients_24", "xiq_clients_5", "xiq_clients_6"],
        simple_lines: &["xiq_clients_total"],
    },
    GraphInfo {
        name: "xiq_ap_clients",
        title: "XIQ: AP clients by frequency",
        minimal_range: (0.0, 10.0),
        compound_lines: &["xiq_ap_clients_24", "xiq_ap_clients_5", "xiq_ap_clients_6"],
        simple_lines: &["xiq_ap_clients_total"],
    },
    GraphInfo {
        name: "xiq_api_remaining",
        title: "XIQ: API Calls Remaining",
        minimal_range: (0.0, 1000.0),
        compound_lines: &[],
        simple_lines: &["xiq_api_remaining"],
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PerfometerInfo {
    pub name: &'static str,
    pub segments: &'static [&'static str],
    /// Upper bound of the focus range; the lower bound is always 0.
    pub focus_max: f64,
}

pub static PERFOMETERS: &[PerfometerInfo] = &[
    PerfometerInfo {
        name: "xiq_aps_only",
        segments: &["xiq_aps_total"],
        focus_max: 100.0,
    },
    PerfometerInfo {
        name: "xiq_clients_by_frequency",
        segments: &["xiq_clients_24", "xiq_clients_5", "xiq_clients_6"],
        focus_max: 600.0,
    },
    PerfometerInfo {
        name: "xiq_ssid_clients",
        segments: &["xiq_ssid_clients_total"],
        focus_max: 100.0,
    },
    PerfometerInfo {
        name: "xiq_radios",
        segments: &["xiq_radio_clients_total"],
        focus_max: 200.0,
    },
];

pub fn metric_info(name: &str) -> Option<&'static MetricInfo> {
    METRICS.iter().find(|m| m.name == name)
}

pub fn graph(name: &str) -> Option<&'static GraphInfo> {
    GRAPHS.iter().find(|g| g.name == name)
}

/// Graphs that can be drawn from the given metric names. A graph needs all
/// of its lines.
pub fn graphs_for<'a, I>(metrics: I) -> Vec<&'static GraphInfo>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = metrics.into_iter().collect();
    GRAPHS
        .iter()
        .filter(|g| {
            g.compound_lines
                .iter()
                .chain(g.simple_lines.iter())
                .all(|m| present.contains(m))
        })
        .collect()
}

/// Title for a metric; unknown metrics are titled by their name.
pub fn title(name: &str) -> &str {
    metric_info(name).map(|m| m.title).unwrap_or(name)
}
