use crate::tools::AvailableTools;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toolsense_core::ToolCatalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Reported to clients as `serverInfo.name`
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Catalog tools to offer; `None` means the whole catalog
    #[serde(default)]
    pub enabled: Option<Vec<String>>,

    /// Removed after `enabled` is applied
    #[serde(default)]
    pub disabled: Vec<String>,
}

fn default_server_name() -> String {
    "toolsense".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            tools: ToolsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read configuration file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration file")
    }

    /// Resolve the availability map against a catalog.
    ///
    /// Names the catalog does not know are logged and skipped.
    pub fn availability(&self, catalog: &ToolCatalog) -> AvailableTools {
        let mut available = match &self.tools.enabled {
            Some(names) => {
                let mut selected = AvailableTools::new();
                for name in names {
                    match catalog.require(name) {
                        Ok(tool) => {
                            selected.insert(tool.name.clone(), tool.clone());
                        }
                        Err(e) => tracing::warn!("Ignoring enabled entry: {}", e),
                    }
                }
                selected
            }
            None => catalog.availability(),
        };

        for name in &self.tools.disabled {
            if catalog.get(name).is_none() {
                tracing::warn!("Ignoring disabled entry for unknown tool: {}", name);
            }
            available.remove(name);
        }

        available
    }
}
