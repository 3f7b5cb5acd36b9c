//! Host plugin contract.
//!
//! Types the monitoring host hands to plugins and expects back:
//! - `StringTable`: one raw section, already split into rows and cells
//! - `Service`: one discovered service identity
//! - `CheckOutput`: results and metrics of one check invocation
//! - `TableRow`: one inventory table entry
//! - `AgentOutput`: raw agent text split into sections per (piggyback) host

mod inventory;
mod output;
mod results;
mod state;

pub use inventory::TableRow;
pub use output::{AgentOutput, HostSections};
pub use results::{CheckOutput, CheckResult, Metric, Service};
pub use state::State;

/// Rows of one raw agent section.
pub type StringTable = Vec<Vec<String>>;
