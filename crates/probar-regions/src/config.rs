//! Region configuration.
//!
//! A config file extends the default capability sets and can set the log
//! filter. YAML and JSON are both accepted:
//!
//! ```yaml
//! readable: [li, td]
//! clickable: [div]
//! settable: [date_field]
//! log_filter: probar_regions=debug
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use tracing::debug;

use crate::capabilities::{Capabilities, Tag};
use crate::result::{PageError, PageResult};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "PROBAR_REGIONS_CONFIG";

/// Configuration for page objects and regions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionsConfig {
    /// Extra readable tags
    pub readable: Vec<Tag>,
    /// Extra clickable tags
    pub clickable: Vec<Tag>,
    /// Extra settable tags
    pub settable: Vec<Tag>,
    /// `tracing` filter directive (e.g. `probar_regions=debug`)
    pub log_filter: Option<String>,
}

impl RegionsConfig {
    /// Create an empty config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> PageResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        debug!(path = %path.display(), "loading region config");
        match extension {
            "json" => Self::from_json_str(&contents),
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            other => Err(PageError::Config {
                message: format!("unsupported config extension `{other}` for {}", path.display()),
            }),
        }
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], if set
    pub fn from_env() -> PageResult<Option<Self>> {
        Self::from_env_var(CONFIG_ENV_VAR)
    }

    fn from_env_var(name: &str) -> PageResult<Option<Self>> {
        match std::env::var(name) {
            Ok(path) if !path.is_empty() => Self::load(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Add the configured tags to an existing registry
    pub fn apply(&self, capabilities: &mut Capabilities) {
        for tag in &self.readable {
            let _ = capabilities.add_readable(tag.clone());
        }
        for tag in &self.clickable {
            let _ = capabilities.add_clickable(tag.clone());
        }
        for tag in &self.settable {
            let _ = capabilities.add_settable(tag.clone());
        }
    }

    /// Default registry extended by this config
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let mut capabilities = Capabilities::new();
        self.apply(&mut capabilities);
        capabilities
    }
}
