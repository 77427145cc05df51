// MCP (Model Context Protocol) server for the tool catalog and recommender.
// Advertises catalog descriptors and answers recommendation requests; it never
// executes catalog tools itself.

pub mod codec;
pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::McpServer;
