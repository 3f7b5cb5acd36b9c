//! Command implementations.
//!
//! Every command returns the text to print so the binary only handles
//! output and exit codes.

pub mod agent;
pub mod gui;
pub mod run;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read agent output from a file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read agent output from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read agent output from {}", path.display()))
}
