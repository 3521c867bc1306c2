//! Gemini CLI invoker.
//!
//! Spawns the configured search program once per call with stdin closed and
//! both output streams captured. The call blocks until the child exits, or
//! until the optional timeout elapses, in which case the child is killed.

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, info_span, warn, Instrument};

use super::SearchInvoker;
use crate::config::GlobalConfig;
use crate::{AppError, Result};

/// Wrap `query` in the fixed read-only, search-only instruction template.
#[must_use]
pub fn build_prompt(query: &str) -> String {
    format!(
        "You are acting strictly as a web search assistant. Use your web search \
         (Google Search) tool to research the following query and answer it.\n\
         \n\
         Rules:\n\
         - Operate in read-only mode: do not create, modify, or delete any files.\n\
         - Do not run shell commands or any tool other than web search and web fetch.\n\
         - Summarize the most relevant, up-to-date findings concisely.\n\
         - Cite the source URLs you relied on.\n\
         \n\
         Query: {query}"
    )
}

/// [`SearchInvoker`] backed by an external command-line program.
#[derive(Debug, Clone)]
pub struct CliInvoker {
    command: String,
    base_args: Vec<String>,
    model: Option<String>,
    timeout: Option<Duration>,
}

impl CliInvoker {
    /// Create an invoker for `command` with the given leading arguments.
    #[must_use]
    pub fn new(command: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            base_args,
            model: None,
            timeout: None,
        }
    }

    /// Build an invoker from the server configuration.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            command: config.search_command.clone(),
            base_args: config.search_args.clone(),
            model: config.model.clone(),
            timeout: config.timeout(),
        }
    }

    /// Pass `-m <model>` on every invocation.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Kill the child and fail once `timeout` elapses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Program name or path being invoked.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Full argument list for a search: model flag, base args, then the prompt.
    #[must_use]
    pub fn build_args(&self, query: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.base_args.len() + 3);
        if let Some(model) = &self.model {
            args.push("-m".to_owned());
            args.push(model.clone());
        }
        args.extend(self.base_args.iter().cloned());
        args.push(build_prompt(query));
        args
    }

    async fn run(&self, query: &str) -> Result<String> {
        let mut cmd = Command::new(&self.command);
        cmd.args(self.build_args(query))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                AppError::NotFound(format!(
                    "search command '{}' was not found on PATH",
                    self.command
                ))
            } else {
                AppError::Execution(format!(
                    "failed to start search command '{}': {err}",
                    self.command
                ))
            }
        })?;

        debug!(pid = child.id().unwrap_or(0), "search process spawned");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    AppError::Execution(format!(
                        "search command timed out after {} seconds",
                        limit.as_secs()
                    ))
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|err| AppError::Execution(format!("failed to collect search output: {err}")))?;

        if output.status.success() {
            info!(bytes = output.stdout.len(), "search command succeeded");
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let detail = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("search command exited with status {code}"),
                None => "search command was terminated by a signal".to_owned(),
            }
        } else {
            stderr
        };

        warn!(status = ?output.status.code(), %detail, "search command failed");
        Err(AppError::Execution(detail))
    }
}

impl SearchInvoker for CliInvoker {
    fn invoke<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        let span = info_span!("search_invoke", command = %self.command);
        Box::pin(self.run(query).instrument(span))
    }
}
