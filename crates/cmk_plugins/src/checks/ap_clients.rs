use super::CheckPlugin;
use crate::agent_based::{CheckOutput, CheckResult, Service};
use crate::normalize::BandCounts;
use crate::rulesets::{parse_params, ApClientsParams, XIQ_AP_CLIENTS_LEVELS};
use crate::sections::{names, Sections};
use serde_json::Value;

pub struct ApClients;

pub fn discover_ap_clients(counts: Option<&BandCounts>) -> Vec<Service> {
    counts.map(|_| vec![Service::new()]).unwrap_or_default()
}

/// Total clients of an AP against optional upper levels.
pub fn check_ap_clients(params: &ApClientsParams, counts: Option<&BandCounts>) -> CheckOutput {
    let Some(counts) = counts else {
        return CheckOutput::unknown("No AP client data available");
    };

    let total = counts.total();
    let state = params
        .global_levels
        .map(|l| l.check_upper(total))
        .unwrap_or_default();

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(
        state,
        format!(
            "AP clients: {} (2.4GHz {}, 5GHz {}, 6GHz {})",
            total, counts.ghz24, counts.ghz5, counts.ghz6
        ),
    ));
    out.metric("xiq_ap_clients_total", total as f64);
    out.metric("xiq_ap_clients_24", counts.ghz24 as f64);
    out.metric("xiq_ap_clients_5", counts.ghz5 as f64);
    out.metric("xiq_ap_clients_6", counts.ghz6 as f64);
    out
}

impl CheckPlugin for ApClients {
    fn name(&self) -> &'static str {
        "xiq_ap_clients"
    }

    fn service_name(&self) -> &'static str {
        "XIQ AP Clients"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::AP_CLIENTS]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_AP_CLIENTS_LEVELS)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_ap_clients(sections.ap_clients())
    }

    fn check(&self, _item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let params: ApClientsParams = parse_params(XIQ_AP_CLIENTS_LEVELS, params);
        check_ap_clients(&params, sections.ap_clients())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulesets::Levels;
    use crate::State;

    fn with_levels(warn: u64, crit: u64) -> ApClientsParams {
        ApClientsParams {
            global_levels: Some(Levels::new(warn, crit)),
        }
    }

    #[test]
    fn test_counts_below_levels() {
        let out = check_ap_clients(&with_levels(100, 150), Some(&BandCounts::new(5, 3, 0)));
        assert_eq!(out.state(), State::Ok);
        assert_eq!(out.metric_value("xiq_ap_clients_total"), Some(8.0));
        assert_eq!(out.summary_line(), "AP clients: 8 (2.4GHz 5, 5GHz 3, 6GHz 0)");
    }

    #[test]
    fn test_crit_boundary_inclusive() {
        let out = check_ap_clients(&with_levels(100, 150), Some(&BandCounts::new(50, 90, 10)));
        assert_eq!(out.state(), State::Crit);
        let out = check_ap_clients(&with_levels(100, 150), Some(&BandCounts::new(100, 0, 0)));
        assert_eq!(out.state(), State::Warn);
    }

    #[test]
    fn test_no_levels_no_alarm() {
        let out = check_ap_clients(&ApClientsParams::default(), Some(&BandCounts::new(900, 0, 0)));
        assert_eq!(out.state(), State::Ok);
    }
}
