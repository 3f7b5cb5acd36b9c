//! Configuration for running plugins outside a monitoring site.
//!
//! Lookup order:
//! 1. An explicit path (`--config`)
//! 2. `$OMD_ROOT/etc/check_mk/cmk_plugins.toml`
//! 3. `~/.config/cmk_plugins/config.toml`
//! 4. Defaults
//!
//! ```toml
//! log_level = "info"
//! omd_root = "/omd/sites/prod"
//!
//! [rules.xiq_radio_levels]
//! warn_clients = 40
//! crit_clients = 60
//! ```

use crate::error::{PluginError, Result};
use crate::logging::LogLevel;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SITE_CONFIG_RELATIVE: &str = "etc/check_mk/cmk_plugins.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub log_level: LogLevel,

    /// Site root; falls back to `$OMD_ROOT`.
    pub omd_root: Option<PathBuf>,

    /// Rule values per ruleset name. Keys a plugin does not know are
    /// ignored by its parameter parser.
    pub rules: BTreeMap<String, Value>,

    /// Path the config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PluginConfig {
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cmk_plugins").join("config.toml"))
    }

    pub fn site_config_path(omd_root: &Path) -> PathBuf {
        omd_root.join(SITE_CONFIG_RELATIVE)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PluginError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: PluginConfig =
            toml::from_str(&contents).map_err(|source| PluginError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.source = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load using the standard lookup order. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let site_root = std::env::var_os("OMD_ROOT").map(PathBuf::from);
        Self::load_with(explicit, site_root.as_deref(), Self::user_config_path())
    }

    pub fn load_with(
        explicit: Option<&Path>,
        omd_root: Option<&Path>,
        user_path: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let candidates = omd_root
            .map(Self::site_config_path)
            .into_iter()
            .chain(user_path);
        for path in candidates {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Rule value for `ruleset`, or `Null` so the plugin uses its defaults.
    pub fn rule(&self, ruleset: &str) -> Value {
        self.rules.get(ruleset).cloned().unwrap_or(Value::Null)
    }

    pub fn site_root(&self) -> Option<PathBuf> {
        self.omd_root
            .clone()
            .or_else(|| std::env::var_os("OMD_ROOT").map(PathBuf::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulesets::{parse_params, RadioLevels, XIQ_RADIO_LEVELS};
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_rules_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "c.toml",
            "log_level = \"debug\"\n[rules.xiq_radio_levels]\nwarn_clients = 40\n",
        );
        let config = PluginConfig::load_from(&path).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));

        let params: RadioLevels = parse_params(XIQ_RADIO_LEVELS, &config.rule(XIQ_RADIO_LEVELS));
        assert_eq!(params.warn_clients, 40);
        assert_eq!(params.crit_clients, RadioLevels::default().crit_clients);
        assert!(config.rule("xiq_ssid_clients").is_null());
    }

    #[test]
    fn test_site_config_preferred_over_user() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("site");
        write(&site, SITE_CONFIG_RELATIVE, "log_level = \"error\"\n");
        let user = write(dir.path(), "user.toml", "log_level = \"trace\"\n");

        let config = PluginConfig::load_with(None, Some(&site), Some(user.clone())).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);

        let config = PluginConfig::load_with(None, Some(&dir.path().join("none")), Some(user)).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);

        let config = PluginConfig::load_with(None, None, None).unwrap();
        assert!(config.source.is_none());
    }

    #[test]
    fn test_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            PluginConfig::load_with(Some(&missing), None, None),
            Err(PluginError::ConfigRead { .. })
        ));

        let bad = write(dir.path(), "bad.toml", "log_level = [\n");
        assert!(matches!(
            PluginConfig::load_from(&bad),
            Err(PluginError::ConfigParse { .. })
        ));
    }
}
