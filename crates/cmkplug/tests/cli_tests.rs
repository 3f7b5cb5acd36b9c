//! Command tests over saved agent output and config files.

use cmk_plugins::config::PluginConfig;
use cmk_plugins::State;
use cmkplug::cli::AgentKind;
use cmkplug::commands::{self, agent, gui, run};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OUTPUT: &str = "<<<extreme_cloud_iq_login>>>
STATUS:OK CODE:200 RESPONSE:Login successful
<<<extreme_summary>>>
access_points 1
connected_aps 1
disconnected_aps 0
total_clients 4
clients_24 1
clients_5 3
clients_6 0
<<<unrelated_section>>>
foo bar
<<<<AP-1>>>>
<<<extreme_ap_status:sep(124)>>>
AP-1|SER1|4c231a0403d5|10.0.0.11|AP410C|1|CONNECTED|10.6.1|90000|DE/LOC7|
<<<extreme_ap_clients>>>
1 3 0
<<<<>>>>
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_read_input_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = commands::read_input(&dir.path().join("nope.txt")).unwrap_err();
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn test_sections_listing() {
    let out = run::sections(OUTPUT);
    assert!(out.contains("[(queried host)]"));
    assert!(out.contains("[AP-1]"));
    let unrelated = out.lines().find(|l| l.contains("unrelated_section")).unwrap();
    assert!(unrelated.ends_with("ignored"));
    let summary = out.lines().find(|l| l.contains("extreme_summary")).unwrap();
    assert!(summary.ends_with("parsed"));
}

#[test]
fn test_discover_lists_services() {
    let out = run::discover(OUTPUT, "xiq", false);
    assert!(out.contains("[xiq]"));
    assert!(out.contains("XIQ Summary"));
    assert!(out.contains("XIQ AP AP-1 Status"));
}

#[test]
fn test_check_text_and_worst_state() {
    let (out, worst) = run::check(OUTPUT, "xiq", &PluginConfig::default(), false, true, false).unwrap();
    assert_eq!(worst, State::Ok);
    assert!(out.contains("[OK  ] XIQ API Login"));
    assert!(out.contains("graphs: "));
    assert!(out.contains("xiq: "));
    assert!(out.contains("AP-1: "));
}

#[test]
fn test_check_json_reports() {
    let (out, _) = run::check(OUTPUT, "xiq", &PluginConfig::default(), true, false, false).unwrap();
    let reports: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(reports[0]["host"], "xiq");
    assert_eq!(reports[1]["host"], "AP-1");
}

#[test]
fn test_check_uses_config_rules() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "config.toml",
        "[rules.xiq_ap_clients_levels]\nglobal_levels = { warn = 2, crit = 10 }\n",
    );
    let config = PluginConfig::load(Some(&path)).unwrap();
    let (_, worst) = run::check(OUTPUT, "xiq", &config, false, false, false).unwrap();
    assert_eq!(worst, State::Warn);
}

#[test]
fn test_inventory_json() {
    let text = "<<<extreme_device_inventory:sep(124)>>>\n91|AP-1|SER1|4c231a0403d5|10.0.0.11|AP410C|10.6.1|DE/LOC7|AP|XIQ|true\n";
    let out = run::inventory(text, "xiq", true).unwrap();
    let map: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(map["xiq"][0]["path"], serde_json::json!(["extreme", "ap"]));
}

#[test]
fn test_agent_args_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "config.toml",
        "[rules.special_agent_logincheck]\nurl = \"https://api.example.com/login\"\nusername = \"mon\"\npassword = \"pw\"\n",
    );
    let config = PluginConfig::load(Some(&path)).unwrap();
    let args = agent::agent_args(AgentKind::Logincheck, "app", &config);
    assert_eq!(
        args,
        ["agent_logincheck", "--url", "https://api.example.com/login", "--username", "mon", "--password", "pw"]
    );

    let xiq = agent::agent_args(AgentKind::Xiq, "xiq-cloud", &config);
    assert_eq!(xiq[0], "agent_xiq");
    assert!(xiq.windows(2).any(|w| w[0] == "--host" && w[1] == "xiq-cloud"));
}

#[test]
fn test_dashlet_html() {
    let html = gui::dashlet(None, 3).unwrap();
    assert!(html.contains("dashboard.py?name=main"));
    assert!(gui::dashlet(Some("{not json"), 3).is_err());
}

#[test]
fn test_snapin_without_database() {
    let dir = TempDir::new().unwrap();
    let html = gui::snapin(Some(dir.path()), &PluginConfig::default()).unwrap();
    assert!(html.contains("Database not found"));
}
