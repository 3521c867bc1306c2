//! External search capability.
//!
//! The [`SearchInvoker`] trait decouples the tool dispatcher from the
//! program that actually performs the search, so tests can substitute a
//! scripted fake for the Gemini CLI.

pub mod cli;

use std::future::Future;
use std::pin::Pin;

use crate::Result;

pub use cli::{build_prompt, CliInvoker};

/// Runs one search against the backing capability and returns its raw output.
pub trait SearchInvoker: Send + Sync {
    /// Execute a search for `query`.
    ///
    /// The output is returned as opaque text; the invoker performs no
    /// interpretation of it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`](crate::AppError::NotFound) if the
    /// external program cannot be resolved, or
    /// [`AppError::Execution`](crate::AppError::Execution) if it exits with a
    /// non-zero status (carrying its standard error).
    fn invoke<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}
