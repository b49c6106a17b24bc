/// MCP front-end for the habit streak engine
///
/// JSON-RPC over stdio: `protocol` holds the message types, `server` the
/// read loop and tool routing.

pub mod protocol;
pub mod server;

pub use server::McpServer;
