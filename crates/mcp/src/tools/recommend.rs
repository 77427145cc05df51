// Recommendation tool: suggest catalog tools for an agent's current thought

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{AvailableTools, Tool};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toolsense_core::schema::{json_schema_array, json_schema_object, json_schema_string, json_schema_type};
use toolsense_core::{Recommendation, Recommender, ToolCatalog};

/// Tool that runs the keyword recommender over a thought
pub struct RecommendToolsTool {
    catalog: &'static ToolCatalog,
    available: Arc<AvailableTools>,
    recommender: Recommender,
}

impl RecommendToolsTool {
    pub fn new(available: Arc<AvailableTools>) -> Self {
        Self {
            catalog: ToolCatalog::builtin(),
            available,
            recommender: Recommender::default(),
        }
    }

    /// Availability from an explicit name list; names outside the catalog are dropped
    fn availability_for(&self, names: &[String]) -> AvailableTools {
        names
            .iter()
            .filter_map(|name| self.catalog.get(name))
            .map(|t| (t.name.clone(), t.clone()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RecommendArgs {
    thought: String,
    #[serde(default)]
    available_tools: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct RecommendOutput<'a> {
    thought: &'a str,
    recommendations: Vec<Recommendation>,
}

#[async_trait::async_trait]
impl Tool for RecommendToolsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "recommend_tools".to_string(),
            description: "Suggest which tools to use next for a reasoning step. Returns recommendations in evaluation order with confidence, rationale, priority and alternatives.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "thought": json_schema_string("The current reasoning step, in free text"),
                    "available_tools": json_schema_array(
                        json_schema_type("string"),
                        "Tool names to consider (default: all tools enabled on this server)",
                    )
                }),
                vec!["thought"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: RecommendArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for recommend_tools")?;

        let recommendations = match args.available_tools.as_deref() {
            Some(names) => {
                let available = self.availability_for(names);
                self.recommender.recommend(&args.thought, &available)
            }
            None => self.recommender.recommend(&args.thought, &*self.available),
        };

        tracing::debug!(count = recommendations.len(), "Recommended tools for thought");

        let json = serde_json::to_string_pretty(&RecommendOutput {
            thought: &args.thought,
            recommendations,
        })?;
        Ok(CallToolResult::text(json))
    }
}
