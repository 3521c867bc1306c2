#![forbid(unsafe_code)]

//! `gemini-search-mcp` MCP server binary.
//!
//! Bootstraps configuration and logging, then serves the MCP protocol over
//! stdio until the client closes the stream or a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use gemini_search_mcp::config::GlobalConfig;
use gemini_search_mcp::mcp::handler::AppState;
use gemini_search_mcp::mcp::transport;
use gemini_search_mcp::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "gemini-search-mcp", about = "MCP server for Gemini CLI web search", version, long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json). Logs are written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the external search command.
    #[arg(long)]
    search_command: Option<String>,

    /// Override the Gemini model passed to the search command.
    #[arg(long)]
    model: Option<String>,

    /// Override the search timeout in seconds (0 disables the timeout).
    #[arg(long)]
    timeout_seconds: Option<u64>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    let config = load_config(&args).map_err(|err| {
        error!(%err, "failed to load configuration");
        err
    })?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(config))
        .map_err(|err| {
            error!(%err, "server terminated with a fatal error");
            err
        })
}

fn load_config(args: &Cli) -> Result<GlobalConfig> {
    let mut config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };

    if let Some(command) = &args.search_command {
        config.search_command.clone_from(command);
    }
    if let Some(model) = &args.model {
        config.model = Some(model.clone());
    }
    if let Some(timeout) = args.timeout_seconds {
        config.timeout_seconds = timeout;
    }

    config.validate()?;
    Ok(config)
}

async fn run(config: GlobalConfig) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        search_command = %config.search_command,
        model = config.model.as_deref().unwrap_or("default"),
        timeout_seconds = config.timeout_seconds,
        cache_ttl_seconds = config.cache_ttl_seconds,
        max_history = config.max_history,
        "gemini-search-mcp starting"
    );

    let state = Arc::new(AppState::from_config(config));
    let ct = CancellationToken::new();

    let signal_ct = ct.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        signal_ct.cancel();
    });

    transport::serve_stdio(state, ct).await?;
    info!("gemini-search-mcp shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
