//! MCP (Model Context Protocol) JSON-RPC server implementation for modlens.
//!
//! Exposes single-file analysis as the `analyze_code` tool through JSON-RPC
//! 2.0 over stdin/stdout.

pub mod protocol;
pub mod server;
pub mod tools;
