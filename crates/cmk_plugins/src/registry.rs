//! Plugin registry: runs discovery, checks and inventory over parsed
//! sections the way the monitoring host would.

use crate::agent_based::{AgentOutput, CheckOutput, State, TableRow};
use crate::checks::{self, CheckPlugin};
use crate::config::PluginConfig;
use crate::error::{PluginError, Result};
use crate::inventory::{self, InventoryPlugin};
use crate::sections::Sections;
use serde::Serialize;
use tracing::{debug, info};

/// A service found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredService {
    pub plugin: &'static str,
    pub item: Option<String>,
    pub description: String,
}

/// One checked service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResult {
    pub plugin: &'static str,
    pub item: Option<String>,
    pub description: String,
    pub state: State,
    pub output: CheckOutput,
}

/// Everything produced for one (piggyback) host.
#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub host: String,
    pub services: Vec<ServiceResult>,
    pub inventory: Vec<TableRow>,
}

pub struct Registry {
    checks: Vec<Box<dyn CheckPlugin>>,
    inventory: Vec<Box<dyn InventoryPlugin>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            checks: checks::all(),
            inventory: inventory::all(),
        }
    }

    pub fn check_plugins(&self) -> impl Iterator<Item = &dyn CheckPlugin> {
        self.checks.iter().map(|p| p.as_ref())
    }

    pub fn inventory_plugins(&self) -> impl Iterator<Item = &dyn InventoryPlugin> {
        self.inventory.iter().map(|p| p.as_ref())
    }

    pub fn check_plugin(&self, name: &str) -> Option<&dyn CheckPlugin> {
        self.check_plugins().find(|p| p.name() == name)
    }

    pub fn discover(&self, sections: &Sections) -> Vec<DiscoveredService> {
        self.check_plugins()
            .flat_map(|plugin| {
                plugin
                    .discover(sections)
                    .into_iter()
                    .map(move |service| DiscoveredService {
                        plugin: plugin.name(),
                        description: plugin.service_description(service.item.as_deref()),
                        item: service.item,
                    })
            })
            .collect()
    }

    /// Run one check with the rule value configured for its ruleset.
    pub fn check(
        &self,
        plugin_name: &str,
        item: Option<&str>,
        sections: &Sections,
        config: &PluginConfig,
    ) -> Result<CheckOutput> {
        let plugin = self
            .check_plugin(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin(plugin_name.to_string()))?;
        let params = plugin
            .ruleset()
            .map(|r| config.rule(r))
            .unwrap_or_default();
        Ok(plugin.check(item, &params, sections))
    }

    /// Discover and check every service of one host.
    pub fn check_all(&self, sections: &Sections, config: &PluginConfig) -> Vec<ServiceResult> {
        self.discover(sections)
            .into_iter()
            .filter_map(|svc| {
                let output = self
                    .check(svc.plugin, svc.item.as_deref(), sections, config)
                    .ok()?;
                debug!(service = %svc.description, state = %output.state().as_str(), "checked");
                Some(ServiceResult {
                    plugin: svc.plugin,
                    item: svc.item,
                    description: svc.description,
                    state: output.state(),
                    output,
                })
            })
            .collect()
    }

    pub fn inventory(&self, sections: &Sections) -> Vec<TableRow> {
        self.inventory_plugins()
            .flat_map(|plugin| plugin.inventory(sections))
            .collect()
    }

    /// Reports for the queried host (named `host_name`) and every
    /// piggyback host in `output`.
    pub fn run(&self, output: &AgentOutput, host_name: &str, config: &PluginConfig) -> Vec<HostReport> {
        let hosts = std::iter::once((host_name.to_string(), &output.host)).chain(
            output
                .piggyback
                .iter()
                .map(|(name, sections)| (name.clone(), sections)),
        );

        let reports: Vec<HostReport> = hosts
            .map(|(host, raw)| {
                let sections = Sections::from_host(raw);
                HostReport {
                    services: self.check_all(&sections, config),
                    inventory: self.inventory(&sections),
                    host,
                }
            })
            .collect();
        info!(
            hosts = reports.len(),
            services = reports.iter().map(|r| r.services.len()).sum::<usize>(),
            "plugin run complete"
        );
        reports
    }
}
