// MCP tool trait and registry

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools.
///
/// Listing follows registration order; registering a name twice replaces the
/// earlier tool in place.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| self.tools[slot].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolsense_core::schema::json_schema_object;

    struct EchoTool {
        name: &'static str,
        reply: &'static str,
    }

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.to_string(),
                description: "Echo".to_string(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(self.reply))
        }
    }

    #[test]
    fn test_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "b", reply: "1" }));
        registry.register(Arc::new(EchoTool { name: "a", reply: "2" }));

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
    }

    #[tokio::test]
    async fn test_reregister_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "a", reply: "old" }));
        registry.register(Arc::new(EchoTool { name: "b", reply: "b" }));
        registry.register(Arc::new(EchoTool { name: "a", reply: "new" }));

        assert_eq!(registry.len(), 2);
        let result = registry
            .get("a")
            .unwrap()
            .execute(serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(result.content[0].as_text(), "new");
        assert_eq!(registry.list_schemas()[0].name, "a");
    }
}
