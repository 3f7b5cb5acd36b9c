use super::{missing_item, CheckPlugin};
use crate::agent_based::{CheckOutput, CheckResult, Service, State};
use crate::normalize::Band;
use crate::rulesets::{parse_params, SsidClientsParams, XIQ_SSID_CLIENTS};
use crate::sections::{names, ApStatus, RadioInformation, Sections};
use serde_json::Value;

pub struct SsidClients;

/// One service per SSID seen on the AP, including SSIDs without clients.
pub fn discover_ssid_clients(radios: Option<&RadioInformation>) -> Vec<Service> {
    radios
        .map(|r| r.ssids().into_iter().map(Service::with_item).collect())
        .unwrap_or_default()
}

pub fn check_ssid_clients(
    ssid: &str,
    params: &SsidClientsParams,
    radios: Option<&RadioInformation>,
    status: Option<&ApStatus>,
) -> CheckOutput {
    let Some(info) = radios else {
        return CheckOutput::unknown(format!("SSID {}: no radio data available", ssid));
    };

    let counts = info.ssid_freq.get(ssid).copied().unwrap_or_default();
    let total = counts.total();
    let state = params
        .global_levels
        .map(|l| l.check_upper(total))
        .unwrap_or_default();

    let ap_name = status
        .map(|s| s.ap_name.trim())
        .filter(|n| !n.is_empty())
        .or_else(|| Some(info.hostname.as_str()).filter(|n| !n.is_empty()));
    let prefix = ap_name.map(|n| format!("AP {}: ", n)).unwrap_or_default();

    let mut out = CheckOutput::new();
    out.push(CheckResult::summary(
        state,
        format!(
            "{}SSID {}: {} Clients (2.4GHz {}, 5GHz {}, 6GHz {})",
            prefix, ssid, total, counts.ghz24, counts.ghz5, counts.ghz6
        ),
    ));

    // Last BSSID per band wins; the first policy found is shown.
    let mut bssids: [String; 3] = Default::default();
    let mut policy = String::new();
    for radio in &info.radios {
        let slot = match radio.frequency {
            Band::Ghz24 => 0,
            Band::Ghz5 => 1,
            Band::Ghz6 => 2,
        };
        for wlan in radio.wlans.iter().filter(|w| w.ssid == ssid) {
            bssids[slot] = wlan.bssid.clone();
            if policy.is_empty() {
                policy = wlan.policy.clone();
            }
        }
    }
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    let details = format!(
        "**Radios**\n- 2.4 GHz : {}\n- 5   GHz : {}\n- 6   GHz : {}\n\n**Policy**\n- Network Policy: {}",
        or_dash(&bssids[0]),
        or_dash(&bssids[1]),
        or_dash(&bssids[2]),
        or_dash(&policy)
    );
    out.push(CheckResult::notice(State::Ok, details));

    out.metric("xiq_ssid_clients_total", total as f64);
    out.metric("xiq_ssid_clients_24", counts.ghz24 as f64);
    out.metric("xiq_ssid_clients_5", counts.ghz5 as f64);
    out.metric("xiq_ssid_clients_6", counts.ghz6 as f64);
    out
}

impl CheckPlugin for SsidClients {
    fn name(&self) -> &'static str {
        "xiq_ssid_clients"
    }

    fn service_name(&self) -> &'static str {
        "XIQ SSID %s"
    }

    fn sections(&self) -> &'static [&'static str] {
        &[names::RADIO_INFORMATION, names::AP_STATUS, names::AP_CLIENTS]
    }

    fn ruleset(&self) -> Option<&'static str> {
        Some(XIQ_SSID_CLIENTS)
    }

    fn discover(&self, sections: &Sections) -> Vec<Service> {
        discover_ssid_clients(sections.radio_information())
    }

    fn check(&self, item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput {
        let Some(item) = item else {
            return missing_item(self.name());
        };
        let params: SsidClientsParams = parse_params(XIQ_SSID_CLIENTS, params);
        check_ssid_clients(item, &params, sections.radio_information(), sections.ap_status())
    }
}
