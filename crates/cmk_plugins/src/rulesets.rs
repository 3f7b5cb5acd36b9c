//! Rule parameters of the check plugins and special agents.
//!
//! Every parameter struct deserializes from the rule value with
//! `#[serde(default)]`, so a partial rule only overrides what it names and
//! an absent rule yields the plugin defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const XIQ_AP_UPTIME_LEVELS: &str = "xiq_ap_uptime_levels";
pub const XIQ_AP_CLIENTS_LEVELS: &str = "xiq_ap_clients_levels";
pub const XIQ_AP_STATUS_LEVELS: &str = "xiq_ap_status_levels";
pub const XIQ_RADIO_LEVELS: &str = "xiq_radio_levels";
pub const XIQ_SSID_CLIENTS: &str = "xiq_ssid_clients";
pub const XIQ_AP_NEIGHBORS_PRESENTATION: &str = "xiq_ap_neighbors_presentation";
pub const SPECIAL_AGENT_XIQ: &str = "special_agent_xiq";
pub const SPECIAL_AGENT_LOGINCHECK: &str = "special_agent_logincheck";

/// Deserialize rule parameters, falling back to the defaults on a rule
/// that does not fit the expected shape.
pub fn parse_params<T>(ruleset: &str, value: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return T::default();
    }
    match serde_json::from_value(value.clone()) {
        Ok(params) => params,
        Err(e) => {
            warn!(ruleset, error = %e, "invalid rule parameters, using defaults");
            T::default()
        }
    }
}

/// Upper levels `(warn, crit)`. Either bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LevelsRepr")]
pub struct Levels {
    pub warn: Option<u64>,
    pub crit: Option<u64>,
}

/// Rules store levels either as `{"warn": .., "crit": ..}` or as a pair.
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelsRepr {
    Map {
        #[serde(default)]
        warn: Option<u64>,
        #[serde(default)]
        crit: Option<u64>,
    },
    Pair(u64, u64),
}

impl From<LevelsRepr> for Levels {
    fn from(repr: LevelsRepr) -> Self {
        match repr {
            LevelsRepr::Map { warn, crit } => Levels { warn, crit },
            LevelsRepr::Pair(warn, crit) => Levels::new(warn, crit),
        }
    }
}

impl Levels {
    pub fn new(warn: u64, crit: u64) -> Self {
        Self {
            warn: Some(warn),
            crit: Some(crit),
        }
    }

    /// State of `value` against the upper levels; both bounds inclusive.
    pub fn check_upper(&self, value: u64) -> crate::State {
        use crate::State;
        if self.crit.is_some_and(|c| value >= c) {
            State::Crit
        } else if self.warn.is_some_and(|w| value >= w) {
            State::Warn
        } else {
            State::Ok
        }
    }
}

/// `xiq_ap_uptime_levels`: lower uptime levels in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeLevels {
    pub min_uptime_warn: u64,
    pub min_uptime_crit: u64,
}

impl Default for UptimeLevels {
    fn default() -> Self {
        Self {
            min_uptime_warn: 6 * 3600,
            min_uptime_crit: 3600,
        }
    }
}

/// `xiq_ap_clients_levels`. No levels unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApClientsParams {
    pub global_levels: Option<Levels>,
}

/// `xiq_ap_status_levels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApStatusParams {
    pub min_uptime_warn: u64,
    pub min_uptime_crit: u64,
    pub client_warn: u64,
    pub client_crit: u64,
    /// State code (0..=3) for an AP that is neither connected nor
    /// provisioning.
    pub treat_disconnected_as: u8,
    /// Show every LLDP/CDP neighbor in the long output.
    pub enable_lldp_checks: bool,
}

impl Default for ApStatusParams {
    fn default() -> Self {
        let uptime = UptimeLevels::default();
        Self {
            min_uptime_warn: uptime.min_uptime_warn,
            min_uptime_crit: uptime.min_uptime_crit,
            client_warn: 100,
            client_crit: 150,
            treat_disconnected_as: 2,
            enable_lldp_checks: false,
        }
    }
}

/// `xiq_ssid_clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsidClientsParams {
    pub global_levels: Option<Levels>,
}

impl Default for SsidClientsParams {
    fn default() -> Self {
        Self {
            global_levels: Some(Levels::new(100, 150)),
        }
    }
}

/// `xiq_radio_levels`: upper client levels, lower TX power levels (dBm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioLevels {
    pub warn_clients: u64,
    pub crit_clients: u64,
    pub warn_power: i64,
    pub crit_power: i64,
}

impl Default for RadioLevels {
    fn default() -> Self {
        Self {
            warn_clients: 100,
            crit_clients: 150,
            warn_power: 10,
            crit_power: 5,
        }
    }
}

pub const DEFAULT_NEIGHBOR_FIELDS: [&str; 6] = [
    "local_port",
    "remote_device",
    "remote_port",
    "management_ip",
    "mac_address",
    "port_description",
];

/// `xiq_ap_neighbors_presentation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborPresentation {
    pub fields: Vec<String>,
    /// Maximum neighbors in the long output, 0 for all.
    pub neighbor_limit: usize,
}

impl Default for NeighborPresentation {
    fn default() -> Self {
        Self {
            fields: DEFAULT_NEIGHBOR_FIELDS.iter().map(|s| s.to_string()).collect(),
            neighbor_limit: 0,
        }
    }
}

/// Parameters of the XIQ special agent rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XiqAgentParams {
    pub url: String,
    pub username: String,
    pub password: String,
    pub verify_tls: bool,
    pub timeout: u64,
    pub proxy_url: Option<String>,
}

impl Default for XiqAgentParams {
    fn default() -> Self {
        Self {
            url: "https://api.extremecloudiq.com".to_string(),
            username: String::new(),
            password: String::new(),
            verify_tls: true,
            timeout: 30,
            proxy_url: None,
        }
    }
}

impl XiqAgentParams {
    /// Command line of `agent_xiq` for `host`.
    pub fn command_arguments(&self, host: &str) -> Vec<String> {
        let mut args = vec![
            "--url".to_string(),
            self.url.clone(),
            "--username".to_string(),
            self.username.clone(),
            "--password".to_string(),
            self.password.clone(),
            "--timeout".to_string(),
            self.timeout.to_string(),
            "--host".to_string(),
            host.to_string(),
        ];
        if !self.verify_tls {
            args.push("--no-cert-check".to_string());
        }
        if let Some(proxy) = self.proxy_url.as_deref().filter(|p| !p.is_empty()) {
            args.push("--proxy".to_string());
            args.push(proxy.to_string());
        }
        args
    }
}

/// Parameters of the HTTP login special agent rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginCheckParams {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl LoginCheckParams {
    pub fn command_arguments(&self) -> Vec<String> {
        vec![
            "--url".to_string(),
            self.url.clone(),
            "--username".to_string(),
            self.username.clone(),
            "--password".to_string(),
            self.password.clone(),
        ]
    }
}

/// Description of a parameter ruleset.
#[derive(Debug, Clone, Copy)]
pub struct RulesetSpec {
    pub name: &'static str,
    pub title: &'static str,
    /// Title of the item the rule condition matches on, if any.
    pub item_title: Option<&'static str>,
}

pub const RULESETS: [RulesetSpec; 8] = [
    RulesetSpec {
        name: XIQ_AP_UPTIME_LEVELS,
        title: "XIQ AP Uptime - minimum uptime thresholds",
        item_title: Some("Service"),
    },
    RulesetSpec {
        name: XIQ_AP_CLIENTS_LEVELS,
        title: "XIQ AP Clients - total thresholds",
        item_title: Some("Service"),
    },
    RulesetSpec {
        name: XIQ_AP_STATUS_LEVELS,
        title: "XIQ AP Status - parameters",
        item_title: Some("AP Name"),
    },
    RulesetSpec {
        name: XIQ_RADIO_LEVELS,
        title: "XIQ Radio Levels - clients and power thresholds",
        item_title: Some("Radio Band"),
    },
    RulesetSpec {
        name: XIQ_SSID_CLIENTS,
        title: "XIQ SSID Clients - thresholds (per SSID)",
        item_title: Some("SSID"),
    },
    RulesetSpec {
        name: XIQ_AP_NEIGHBORS_PRESENTATION,
        title: "XIQ AP Neighbors - presentation",
        item_title: Some("AP Name"),
    },
    RulesetSpec {
        name: SPECIAL_AGENT_XIQ,
        title: "ExtremeCloudIQ (XIQ) - Special Agent",
        item_title: None,
    },
    RulesetSpec {
        name: SPECIAL_AGENT_LOGINCHECK,
        title: "Login Check (HTTP POST)",
        item_title: None,
    },
];

/// Default parameters of a ruleset as JSON, `None` for unknown names.
pub fn default_params(ruleset: &str) -> Option<Value> {
    let value = match ruleset {
        XIQ_AP_UPTIME_LEVELS => serde_json::to_value(UptimeLevels::default()),
        XIQ_AP_CLIENTS_LEVELS => serde_json::to_value(ApClientsParams::default()),
        XIQ_AP_STATUS_LEVELS => serde_json::to_value(ApStatusParams::default()),
        XIQ_RADIO_LEVELS => serde_json::to_value(RadioLevels::default()),
        XIQ_SSID_CLIENTS => serde_json::to_value(SsidClientsParams::default()),
        XIQ_AP_NEIGHBORS_PRESENTATION => serde_json::to_value(NeighborPresentation::default()),
        SPECIAL_AGENT_XIQ => serde_json::to_value(XiqAgentParams::default()),
        SPECIAL_AGENT_LOGINCHECK => serde_json::to_value(LoginCheckParams::default()),
        _ => return None,
    };
    value.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::State;
    use serde_json::json;

    #[test]
    fn test_partial_rule_keeps_defaults() {
        let p: RadioLevels = parse_params(XIQ_RADIO_LEVELS, &json!({"crit_power": 3}));
        assert_eq!(p.crit_power, 3);
        assert_eq!(p.warn_clients, 100);
    }

    #[test]
    fn test_invalid_rule_falls_back() {
        let p: UptimeLevels = parse_params(XIQ_AP_UPTIME_LEVELS, &json!({"min_uptime_warn": "soon"}));
        assert_eq!(p, UptimeLevels::default());
        let p: UptimeLevels = parse_params(XIQ_AP_UPTIME_LEVELS, &Value::Null);
        assert_eq!(p.min_uptime_crit, 3600);
    }

    #[test]
    fn test_levels_forms() {
        let p: SsidClientsParams = parse_params(XIQ_SSID_CLIENTS, &json!({"global_levels": [10, 20]}));
        assert_eq!(p.global_levels, Some(Levels::new(10, 20)));
        let p: ApClientsParams = parse_params(XIQ_AP_CLIENTS_LEVELS, &json!({"global_levels": {"crit": 5}}));
        assert_eq!(p.global_levels, Some(Levels { warn: None, crit: Some(5) }));
        assert_eq!(ApClientsParams::default().global_levels, None);
    }

    #[test]
    fn test_upper_levels_inclusive() {
        let l = Levels::new(100, 150);
        assert_eq!(l.check_upper(8), State::Ok);
        assert_eq!(l.check_upper(100), State::Warn);
        assert_eq!(l.check_upper(150), State::Crit);
        assert_eq!(Levels::default().check_upper(1_000), State::Ok);
    }

    #[test]
    fn test_xiq_agent_command() {
        let p: XiqAgentParams = parse_params(
            SPECIAL_AGENT_XIQ,
            &json!({"username": "u", "password": "p", "verify_tls": false, "proxy_url": "http://proxy:3128"}),
        );
        let args = p.command_arguments("xiq-cloud");
        assert_eq!(args[1], "https://api.extremecloudiq.com");
        assert_eq!(args[7], "30");
        assert_eq!(args[9], "xiq-cloud");
        assert!(args.contains(&"--no-cert-check".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("http://proxy:3128"));
    }

    #[test]
    fn test_default_params_known_rulesets() {
        for spec in RULESETS {
            assert!(default_params(spec.name).is_some(), "{}", spec.name);
        }
        assert!(default_params("nope").is_none());
        assert_eq!(default_params(XIQ_SSID_CLIENTS).unwrap()["global_levels"]["warn"], 100);
    }
}
