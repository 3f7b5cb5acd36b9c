//! Checkmk plugins for ExtremeCloud IQ and HTTP login monitoring.
//!
//! The crate mirrors the layout of a Checkmk plugin package:
//! - `agent_based`: the host contract (states, results, metrics, services, agent output)
//! - `sections`: parse functions turning raw agent sections into typed records
//! - `checks` / `inventory`: discovery, check and inventory functions
//! - `rulesets` / `graphing`: parameter defaults and metric metadata
//! - `gui`: the link dashlet and the ticket system snapin
//!
//! Every plugin is a pure function over one invocation's data. Nothing here
//! keeps state between invocations.

pub mod agent_based;
pub mod checks;
pub mod config;
pub mod error;
pub mod graphing;
pub mod gui;
pub mod inventory;
pub mod logging;
pub mod normalize;
pub mod registry;
pub mod rulesets;
pub mod sections;

pub use agent_based::{
    AgentOutput, CheckOutput, CheckResult, HostSections, Metric, Service, State, StringTable,
    TableRow,
};
pub use error::{PluginError, Result};
pub use registry::Registry;
pub use sections::{Section, Sections};
