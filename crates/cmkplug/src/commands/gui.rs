//! HTML previews of the dashlet and the snapin.

use anyhow::{anyhow, Context, Result};
use cmk_plugins::config::PluginConfig;
use cmk_plugins::gui::{dashlet, snapin, DashletConfig};
use std::path::Path;

pub fn dashlet(settings: Option<&str>, id: u32) -> Result<String> {
    let config = match settings {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("Dashlet settings are not valid JSON")?;
            DashletConfig::from_value(&value)
        }
        None => DashletConfig::default(),
    };
    Ok(dashlet::render(&config, id))
}

pub fn snapin(omd_root: Option<&Path>, config: &PluginConfig) -> Result<String> {
    let root = omd_root
        .map(Path::to_path_buf)
        .or_else(|| config.site_root())
        .ok_or_else(|| anyhow!("No site root: pass --omd-root, set omd_root in the config or $OMD_ROOT"))?;
    Ok(snapin::render(&root))
}
