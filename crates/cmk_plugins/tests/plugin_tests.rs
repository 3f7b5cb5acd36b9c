//! End-to-end tests: raw agent output through parse, discovery, check and
//! inventory.

use cmk_plugins::checks::ap_clients::check_ap_clients;
use cmk_plugins::checks::{self, CheckPlugin};
use cmk_plugins::config::PluginConfig;
use cmk_plugins::inventory;
use cmk_plugins::normalize::BandCounts;
use cmk_plugins::registry::Registry;
use cmk_plugins::rulesets::{ApClientsParams, Levels};
use cmk_plugins::{AgentOutput, Sections, State};
use serde_json::{json, Value};

const XIQ_OUTPUT: &str = r#"<<<extreme_cloud_iq_login>>>
STATUS:OK CODE:200 RESPONSE:{"access_token": "..."}
<<<extreme_summary>>>
access_points 2
connected_aps 1
disconnected_aps 1
total_clients 9
clients_24 3
clients_5 6
clients_6 0
<<<extreme_cloud_iq_rate_limits>>>
state OK
limit 7500;w=3600
remaining 300
reset_in_seconds 1200
<<<extreme_device_inventory:sep(124)>>>
91|AP-1|SER1|4c231a0403d5|10.0.0.11|AP410C|10.6.1|DE/Berlin/LOC7|AP|XIQ|true
92|AP-2|SER2|4c231a0403d6|10.0.0.12|AP410C|10.6.1|DE/Berlin/LOC7|AP|XIQ|false
93|SW-1|SER3|4c231a0403d7|10.0.0.2|X435|31.7|DE/Berlin|SWITCH|XIQ|true
<<<extreme_device_neighbors:sep(124)>>>
91|AP-1|10.0.0.11|eth0|10.0.0.2|1:5|uplink|4c231a0403d7|SW-1
<<<<AP-1>>>>
<<<extreme_ap_status:sep(124)>>>
AP-1|SER1|4c231a0403d5|10.0.0.11|AP410C|1|CONNECTED|10.6.1|90000|DE/Berlin/LOC7|SW-1 (1:5)
<<<extreme_ap_clients>>>
3 6 0
<<<xiq_radio_information:sep(0)>>>
{"device_id": 91, "hostname": "AP-1", "radios": [{"name": "wifi0", "mac_address": "4c231a0403e0", "frequency": "2.4GHz", "channel_number": 6, "channel_width": "20MHz", "mode": "11ax", "power": 12, "wlans": [{"ssid": "corp", "bssid": "4c:23:1a:04:03:e1", "network_policy_name": "Corp-Policy"}]}, {"name": "wifi1", "mac_address": "4c231a0403f0", "frequency": "5GHz", "channel_number": 44, "channel_width": "80MHz", "mode": "11ax", "power": 4, "wlans": [{"ssid": "corp", "bssid": "4c:23:1a:04:03:f1", "network_policy_name": "Corp-Policy"}]}], "_ssid_freq": {"corp": {"2.4GHz": 3, "5GHz": 6}}}
<<<xiq_active_clients:sep(0)>>>
{"device_id": 91, "hostname": "AP-1", "clients": [{"mac": "02:00:00:00:00:01", "ssid": "corp", "radio_type": 2}]}
<<<<>>>>
"#;

fn report_service<'a>(
    reports: &'a [cmk_plugins::registry::HostReport],
    host: &str,
    description: &str,
) -> &'a cmk_plugins::registry::ServiceResult {
    reports
        .iter()
        .find(|r| r.host == host)
        .and_then(|r| r.services.iter().find(|s| s.description == description))
        .unwrap_or_else(|| panic!("no service {} on {}", description, host))
}

#[test]
fn test_client_levels_ok_below_warn() {
    let params = ApClientsParams {
        global_levels: Some(Levels::new(100, 150)),
    };
    let out = check_ap_clients(&params, Some(&BandCounts::new(5, 3, 0)));
    assert_eq!(out.state(), State::Ok);
    assert_eq!(out.metric_value("xiq_ap_clients_total"), Some(8.0));
}

#[test]
fn test_client_levels_crit_inclusive() {
    let params = ApClientsParams {
        global_levels: Some(Levels::new(100, 150)),
    };
    let out = check_ap_clients(&params, Some(&BandCounts::new(100, 50, 0)));
    assert_eq!(out.state(), State::Crit);

    let out = check_ap_clients(&params, Some(&BandCounts::new(60, 40, 0)));
    assert_eq!(out.state(), State::Warn);
}

#[test]
fn test_absent_sections_discover_nothing_and_check_unknown() {
    let empty = Sections::new();
    for plugin in checks::all() {
        assert!(plugin.discover(&empty).is_empty(), "{}", plugin.name());
        for item in [None, Some("x")] {
            let out = plugin.check(item, &Value::Null, &empty);
            assert_eq!(out.results.len(), 1, "{}", plugin.name());
            assert_eq!(out.state(), State::Unknown, "{}", plugin.name());
        }
    }
    for plugin in inventory::all() {
        assert!(plugin.inventory(&empty).is_empty(), "{}", plugin.name());
    }
}

#[test]
fn test_full_agent_output() {
    let output = AgentOutput::parse(XIQ_OUTPUT);
    let reports = Registry::new().run(&output, "xiq-cloud", &PluginConfig::default());
    assert_eq!(reports.len(), 2);

    let login = report_service(&reports, "xiq-cloud", "XIQ API Login");
    assert_eq!(login.state, State::Ok);

    let summary = report_service(&reports, "xiq-cloud", "XIQ Summary");
    assert_eq!(summary.output.metric_value("xiq_aps_total"), Some(2.0));
    assert_eq!(summary.output.metric_value("xiq_clients_total"), Some(9.0));

    // 300 of 7500 remaining is 4%.
    let limits = report_service(&reports, "xiq-cloud", "XIQ API Rate Limits");
    assert_eq!(limits.state, State::Crit);
    assert_eq!(limits.output.metric_value("xiq_api_limit"), Some(7500.0));

    let neighbors = report_service(&reports, "xiq-cloud", "XIQ AP AP-1 Neighbors");
    assert_eq!(neighbors.state, State::Ok);
    assert!(neighbors.output.summary_line().contains("eth0 -> SW-1 (1:5)"));

    let status = report_service(&reports, "AP-1", "XIQ AP AP-1 Status");
    assert_eq!(status.state, State::Ok);
    let line = status.output.summary_line();
    assert!(line.starts_with("AP-1 | IP: 10.0.0.11 | Loc: LOC7 | LLDP: SW-1"), "{}", line);
    assert!(line.contains("Clients: 9"));
    assert_eq!(status.output.metric_value("xiq_uptime_seconds"), Some(90_000.0));
    assert!(status.output.long_output().contains("- MAC: 4C:23:1A:04:03:D5"));

    let ssid = report_service(&reports, "AP-1", "XIQ SSID corp");
    assert_eq!(ssid.output.metric_value("xiq_ssid_clients_total"), Some(9.0));

    // 5 GHz radio transmits at 4 dBm, below the 5 dBm critical level.
    let radio5 = report_service(&reports, "AP-1", "XIQ Radio 5GHz");
    assert_eq!(radio5.state, State::Crit);
    let radio24 = report_service(&reports, "AP-1", "XIQ Radio 2.4GHz");
    assert_eq!(radio24.state, State::Ok);

    let host_inv = &reports[0].inventory;
    let nodes: Vec<String> = host_inv.iter().map(|r| r.node()).collect();
    assert_eq!(nodes.iter().filter(|n| *n == "extreme.ap").count(), 2);
    assert_eq!(nodes.iter().filter(|n| *n == "extreme.sw").count(), 1);
    assert!(nodes.iter().any(|n| n == "networking.lldp_infos"));

    let ap_inv = &reports[1].inventory;
    assert!(ap_inv.iter().any(|r| r.node() == "extreme.ap_radios"));
    assert_eq!(ap_inv.iter().filter(|r| r.node() == "extreme.ap_bssids").count(), 2);
    let client = ap_inv.iter().find(|r| r.node() == "extreme.clients").unwrap();
    assert_eq!(client.get_str("band"), Some("5GHz"));
}

#[test]
fn test_config_rule_applied() {
    let output = AgentOutput::parse(XIQ_OUTPUT);
    let mut config = PluginConfig::default();
    config.rules.insert(
        "xiq_radio_levels".to_string(),
        json!({"warn_power": 3, "crit_power": 1}),
    );
    let reports = Registry::new().run(&output, "xiq-cloud", &config);
    let radio5 = report_service(&reports, "AP-1", "XIQ Radio 5GHz");
    assert_eq!(radio5.state, State::Ok);
}
