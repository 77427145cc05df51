pub mod catalog;
pub mod recommend;
mod registry;

use std::collections::HashMap;
use toolsense_core::ToolDescriptor;

pub use catalog::{enabled_listing, ListCatalogTool};
pub use recommend::RecommendToolsTool;
pub use registry::{Tool, ToolRegistry};

/// Availability map: tools the host currently offers, keyed by name
pub type AvailableTools = HashMap<String, ToolDescriptor>;
