//! Model Context Protocol server layer.

pub mod handler;
pub mod prompts;
pub mod request;
pub mod resources;
pub mod response;
pub mod tools;
pub mod transport;
