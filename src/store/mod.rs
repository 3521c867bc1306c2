//! Process-wide in-memory stores shared by the MCP tool handlers.
//!
//! Both stores guard their state with an internal `tokio::sync::Mutex`, so
//! every public method is a single atomic critical section even when the
//! server handles requests concurrently.

pub mod cache;
pub mod history;

pub use cache::{CacheSnapshotEntry, ResultCache};
pub use history::HistoryLog;
