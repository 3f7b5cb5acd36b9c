use super::{missing_item, CheckPlugin};
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::normalize::Band;
use crate::rulesets::{parse_params, RadioLevels, XIQ_RADIO_LEVELS};
use crate::sections::{names, RadioInformation, Sections};
use serde_json::Value;
use std::collections::BTreeSet;

pub struct Radios;

/// One service per band that has at least one radio.
pub fn discover_radios(info: Option<&RadioInformation>) -> Vec<Service> {
    info.map(|i| {
        i.bands()
            .into_iter()
            .map(|b| Service::with_item(b.label()))
            .collect()
    })
    .unwrap_or_default()
}

fn join_sorted(values: &[i64]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Clients on the band (upper levels) and minimum TX power (lower levels).
pub fn check_radios(item: &str, params: &RadioLevels, info: Option<&RadioInformation>) -> CheckOutput {
    let Some(info) = info else {
        return CheckOutput::unknown("No radio data");
    };
    let Some(band) = Band::from_label(item) else {
        return CheckOutput::unknown(format!("Unknown radio band {}", item));
    };

    let clients = info.clients_on(band);
    let channels: Vec<i64> = info
        .radios_on(band)
        .map(|r| r.channel_number)
        .filter(|c| *c > 0)
        .collect();
    let powers: Vec<i64> = info
        .radios_on(band)
        .map(|r| r.power)
        .filter(|p| *p > 0)
        .collect();

    let mut state = State::Ok;
    let mut problems = Vec::new();

    if clients >= params.crit_clients {
        state = State::Crit;
        problems.push(format!("clients={} ≥ crit({})", clients, params.crit_clients));
    } else if clients >= params.warn_clients {
        state = State::Warn;
        problems.push(format!("clients={} ≥ warn({})", clients, params.warn_clients));
    }

    let min_power = powers.iter().min().copied();
    if let Some(min_power) = min_power {
        if min_power <= params.crit_power {
            state = State::Crit;
            problems.push(format!("power={} dBm ≤ crit({})", min_power, params.crit_power));
        } else if min_power <= params.warn_power {
            state = State::worst(state, State::Warn);
            problems.push(format!("power={} dBm ≤ warn({})", min_power, params.warn_power));
        }
    }

    let suffix = if problems.is_empty() {
        String::new()
    } else {
        format!(" ({})", problems.join("; "))
    };

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(
        state,
        format!(
            "Radio {}: {} clients • Channels: {} • Power: {} dBm{}",
            band,
            clients,
            join_sorted(&channels),
            join_sorted(&powers),
            suffix
        ),
    ));

    out.metric(&format!("xiq_radio_clients_{}", band.metric_suffix()), clients as f64);
    out.metric("xiq_radio_clients_total", clients as f64);
    if let Some(min_power) = min_power {
        let avg = powers.iter().sum::<i64>() as f64 / powers.len() as f64;
        out.metric("xiq_radio_power_avg_dbm", avg);
        out.metric("xiq_radio_power_min_dbm", min_power as f64);
    }
    out
}

impl CheckPlugin for Radios {
    fn name(&self) -> &'static str {
        "xiq_radios"
    }

    fn service_name(&self) -> &'static str {
        "XIQ Radio %s"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::RADIO_INFORMATION]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_RADIO_LEVELS)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_radios(sections.radio_information())
    }

    fn check(&self, item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let Some(item) = item else {
            return missing_item(self.name());
        };
        let params: RadioLevels = parse_params(XIQ_RADIO_LEVELS, params);
        check_radios(item, &params, sections.radio_information())
    }
}
