//! Domain model module declarations.

pub mod cache;
pub mod history;
