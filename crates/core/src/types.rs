use serde::{Deserialize, Serialize};

/// Static description of a callable tool as advertised to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

#[cfg(test)]
impl ToolDescriptor {
    /// Names listed under the schema's `required` key, in declaration order
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|fields| fields.iter().filter_map(|f| f.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether the schema declares a property with the given name
    pub fn has_property(&self, property: &str) -> bool {
        self.input_schema
            .get("properties")
            .and_then(|p| p.get(property))
            .is_some()
    }
}

/// A suggested next tool for a given thought
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tool_name: String,
    /// Hand-tuned per rule, in [0, 1]
    pub confidence: f64,
    pub rationale: String,
    /// Emission order (1-based) unless the rule pins it
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
}
