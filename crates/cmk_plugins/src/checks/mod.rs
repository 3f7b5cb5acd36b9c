//! Check plugins: discovery plus check function per service type.
//!
//! Each plugin module exposes typed `discover_*` / `check_*` functions and a
//! unit struct implementing [`CheckPlugin`] that wires them to the parsed
//! [`Sections`] and the rule parameters.

pub mod ap_clients;
pub mod ap_status;
pub mod ap_uptime;
pub mod login;
pub mod neighbors;
pub mod radios;
pub mod rate_limits;
pub mod ssid_clients;
pub mod summary;

use crate::agent_based::{CheckOutput, Service};
use crate::sections::Sections;
use serde_json::Value;

/// A check plugin as registered with the monitoring host.
pub trait CheckPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Service name template; `%s` is replaced by the item.
    fn service_name(&self) -> &'static str;

    /// Sections the plugin subscribes to. The first one is required for
    /// discovery.
    fn sections(&self) -> &'static [&'static str];

    fn ruleset(&self) -> Option<&'static str> {
        None
    }

    fn discover(&self, sections: &Sections) -> Vec<Service>;

    fn check(&self, item: Option<&str>, params: &Value, sections: &Sections) -> CheckOutput;

    fn service_description(&self, item: Option<&str>) -> String {
        match item {
            Some(item) => self.service_name().replace("%s", item),
            None => self.service_name().to_string(),
        }
    }
}

/// All check plugins of the package.
pub fn all() -> Vec<Box<dyn CheckPlugin>> {
    vec![
        Box::new(ap_uptime::ApUptime),
        Box::new(ap_clients::ApClients),
        Box::new(ap_status::ApStatusCheck),
        Box::new(summary::Summary),
        Box::new(ssid_clients::SsidClients),
        Box::new(rate_limits::RateLimitsCheck),
        Box::new(radios::Radios),
        Box::new(neighbors::ApNeighbors),
        Box::new(login::XiqLogin),
        Box::new(login::LoginCheck),
    ]
}

/// Result for an itemized service invoked without an item.
pub(crate) fn missing_item(plugin: &str) -> CheckOutput {
    CheckOutput::unknown(format!("{}: service item missing", plugin))
}

/// `- key: value`, or nothing for an empty value.
pub(crate) fn kv_line(key: &str, value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(format!("- {}: {}", key, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_plugin_names_are_unique() {
        let plugins = all();
        let names: HashSet<_> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), plugins.len());
    }

    #[test]
    fn test_service_description_substitutes_item() {
        let p = ap_status::ApStatusCheck;
        assert_eq!(p.service_description(Some("AP-1")), "XIQ AP AP-1 Status");
        assert_eq!(summary::Summary.service_description(None), "XIQ Summary");
    }

    #[test]
    fn test_empty_sections_discover_nothing_and_check_unknown() {
        let empty = Sections::new();
        for plugin in all() {
            assert!(plugin.discover(&empty).is_empty(), "{}", plugin.name());
            let out = plugin.check(Some("x"), &Value::Null, &empty);
            assert_eq!(out.results.len(), 1, "{}", plugin.name());
            assert_eq!(out.state(), crate::State::Unknown, "{}", plugin.name());
        }
    }
}
