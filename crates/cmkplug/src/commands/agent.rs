//! Metadata listings and special agent command lines.

use crate::cli::AgentKind;
use cmk_plugins::config::PluginConfig;
use cmk_plugins::graphing::{GRAPHS, METRICS, PERFOMETERS};
use cmk_plugins::rulesets::{
    default_params, parse_params, LoginCheckParams, XiqAgentParams, RULESETS,
    SPECIAL_AGENT_LOGINCHECK, SPECIAL_AGENT_XIQ,
};
use serde_json::Value;
use std::fmt::Write as _;

pub fn metrics() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[METRICS]");
    for m in METRICS {
        let _ = writeln!(out, "  {:<32} {:<36} {}", m.name, m.title, m.unit.symbol());
    }
    let _ = writeln!(out, "[GRAPHS]");
    for g in GRAPHS {
        let lines: Vec<&str> = g.compound_lines.iter().chain(g.simple_lines.iter()).copied().collect();
        let _ = writeln!(out, "  {:<32} {} ({})", g.name, g.title, lines.join(", "));
    }
    let _ = writeln!(out, "[PERFOMETERS]");
    for p in PERFOMETERS {
        let _ = writeln!(out, "  {:<32} {} (0..{})", p.name, p.segments.join(" + "), p.focus_max);
    }
    out
}

/// Defaults with the configured rule's keys laid over them.
pub fn effective_params(ruleset: &str, config: &PluginConfig) -> Value {
    let mut params = default_params(ruleset).unwrap_or(Value::Null);
    match config.rule(ruleset) {
        Value::Null => {}
        Value::Object(rule) => match params.as_object_mut() {
            Some(base) => base.extend(rule),
            None => params = Value::Object(rule),
        },
        other => params = other,
    }
    params
}

/// Ruleset listing. Passwords are masked.
pub fn rules(config: &PluginConfig) -> String {
    let mut out = String::new();
    for spec in RULESETS {
        let mut params = effective_params(spec.name, config);
        if let Some(pw) = params.get_mut("password") {
            if pw.as_str().is_some_and(|s| !s.is_empty()) {
                *pw = Value::String("********".to_string());
            }
        }
        let configured = if config.rules.contains_key(spec.name) { " (configured)" } else { "" };
        let _ = writeln!(out, "{} - {}{}", spec.name, spec.title, configured);
        if let Some(item) = spec.item_title {
            let _ = writeln!(out, "  item: {}", item);
        }
        let _ = writeln!(out, "  {}", params);
    }
    out
}

pub fn agent_args(agent: AgentKind, host: &str, config: &PluginConfig) -> Vec<String> {
    match agent {
        AgentKind::Xiq => {
            let p: XiqAgentParams = parse_params(SPECIAL_AGENT_XIQ, &config.rule(SPECIAL_AGENT_XIQ));
            let mut args = vec!["agent_xiq".to_string()];
            args.extend(p.command_arguments(host));
            args
        }
        AgentKind::Logincheck => {
            let p: LoginCheckParams =
                parse_params(SPECIAL_AGENT_LOGINCHECK, &config.rule(SPECIAL_AGENT_LOGINCHECK));
            let mut args = vec!["agent_logincheck".to_string()];
            args.extend(p.command_arguments());
            args
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_params_overlay() {
        let mut config = PluginConfig::default();
        config.rules.insert("xiq_radio_levels".to_string(), json!({"warn_power": 3}));
        let p = effective_params("xiq_radio_levels", &config);
        assert_eq!(p["warn_power"], 3);
        assert_eq!(p["warn_clients"], 100);
    }

    #[test]
    fn test_rules_mask_password() {
        let mut config = PluginConfig::default();
        config
            .rules
            .insert(SPECIAL_AGENT_LOGINCHECK.to_string(), json!({"password": "s3cret"}));
        let out = rules(&config);
        assert!(!out.contains("s3cret"));
        assert!(out.contains("special_agent_logincheck - Login Check (HTTP POST) (configured)"));
    }

    #[test]
    fn test_metrics_listing() {
        let out = metrics();
        assert!(out.contains("xiq_clients_combined"));
        assert!(out.contains("[PERFOMETERS]"));
    }
}
