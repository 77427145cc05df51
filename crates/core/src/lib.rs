// Core types and functionality for Toolsense: tool catalog and recommender

pub mod types;
pub mod error;
pub mod schema;
pub mod catalog;
pub mod recommend;

pub use catalog::ToolCatalog;
pub use error::{CatalogError, CatalogResult};
pub use recommend::{recommend, Availability, Recommender};
pub use types::*;
