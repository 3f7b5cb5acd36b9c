//! Error types for the plugin library.
//!
//! Plugins never surface these to the monitoring host: parse failures
//! degrade to defaults and check failures become result states. Errors are
//! only returned from the edges (config loading, database access, CLI glue).

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PluginError>;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Config file {path} could not be read: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is invalid: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid parameters for ruleset {ruleset}: {reason}")]
    InvalidParams { ruleset: String, reason: String },

    #[error("Unknown check plugin: {0}")]
    UnknownPlugin(String),

    #[error("Ticket database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
