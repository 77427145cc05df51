// Catalog tool: advertise the tool descriptors as data

use crate::protocol::{CallToolResult, ListToolsResult, ToolSchema};
use crate::tools::{AvailableTools, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use toolsense_core::schema::{json_schema_boolean, json_schema_empty_object};
use toolsense_core::{ToolCatalog, ToolDescriptor};

/// Tool to list catalog descriptors, optionally only the enabled ones
pub struct ListCatalogTool {
    catalog: &'static ToolCatalog,
    available: Arc<AvailableTools>,
}

impl ListCatalogTool {
    pub fn new(available: Arc<AvailableTools>) -> Self {
        Self {
            catalog: ToolCatalog::builtin(),
            available,
        }
    }

    /// Descriptors in catalog order
    fn descriptors(&self, enabled_only: bool) -> Vec<&ToolDescriptor> {
        if enabled_only {
            enabled_descriptors(self.catalog, &self.available).collect()
        } else {
            self.catalog.tools().iter().collect()
        }
    }
}

fn enabled_descriptors<'a>(
    catalog: &'a ToolCatalog,
    available: &'a AvailableTools,
) -> impl Iterator<Item = &'a ToolDescriptor> + 'a {
    catalog
        .tools()
        .iter()
        .filter(move |t| available.contains_key(&t.name))
}

/// Enabled catalog entries as a `tools/list` result, in catalog order
pub fn enabled_listing(catalog: &ToolCatalog, available: &AvailableTools) -> ListToolsResult {
    ListToolsResult {
        tools: enabled_descriptors(catalog, available)
            .map(ToolSchema::from)
            .collect(),
    }
}

fn default_enabled_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ListCatalogArgs {
    #[serde(default = "default_enabled_only")]
    enabled_only: bool,
}

#[async_trait::async_trait]
impl Tool for ListCatalogTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_tool_catalog".to_string(),
            description: "List tool descriptors (name, description, inputSchema) from the catalog".to_string(),
            input_schema: json_schema_empty_object(
                serde_json::json!({
                    "enabled_only": json_schema_boolean("Only list tools enabled on this server (default: true)")
                }),
                false,
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListCatalogArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for list_tool_catalog")?;

        let tools = self.descriptors(args.enabled_only);
        let json = serde_json::to_string_pretty(&tools)?;
        Ok(CallToolResult::text(format!(
            "Catalog contains {} tool(s):\n\n{}",
            tools.len(),
            json
        )))
    }
}
