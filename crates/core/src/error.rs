//! Error types for catalog lookups.

/// Result type for strict catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the strict catalog lookups.
///
/// The recommender itself never fails; these only surface when a host asks
/// the catalog to resolve names it expects to exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No descriptor with this name exists in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
