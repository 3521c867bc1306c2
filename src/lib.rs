#![forbid(unsafe_code)]

//! Gemini search MCP server.
//!
//! Exposes web search through the Gemini CLI as MCP tools, with a
//! time-bounded result cache and a size-bounded search history surfaced as
//! both tools and resources.

pub mod config;
pub mod errors;
pub mod mcp;
pub mod models;
pub mod search;
pub mod store;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
