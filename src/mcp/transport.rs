//! Stream transport setup for the MCP client connection.
//!
//! Wires [`SearchServer`] to a pair of byte streams carrying
//! newline-delimited JSON-RPC. Production uses stdin/stdout. The handlers
//! admit one request at a time (see [`AppState::admit`]), so a response is
//! written only after every earlier request has completed.

use std::sync::Arc;

use rmcp::service::ServiceExt;
use rmcp::transport::stdio;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handler::{AppState, SearchServer};
use crate::{AppError, Result};

/// Serve the MCP server over stdio until the stream closes or the
/// cancellation token fires.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the initialization handshake fails or the
/// service task terminates abnormally.
pub async fn serve_stdio(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let (reader, writer) = stdio();
    info!("starting stdio MCP transport");
    serve_streams(state, reader, writer, ct).await
}

/// Serve the MCP server over an arbitrary reader/writer pair until the
/// reader reaches end of stream or the cancellation token fires.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the initialization handshake fails or the
/// service task terminates abnormally.
pub async fn serve_streams<R, W>(
    state: Arc<AppState>,
    reader: R,
    writer: W,
    ct: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let server = SearchServer::new(state);

    let service = server
        .serve_with_ct((reader, writer), ct)
        .await
        .map_err(|err| AppError::Mcp(format!("MCP transport failed: {err}")))?;

    let reason = service
        .waiting()
        .await
        .map_err(|err| AppError::Mcp(format!("MCP service error: {err}")))?;

    info!(?reason, "MCP transport shut down");
    Ok(())
}
