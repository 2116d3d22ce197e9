//! Stdio transport
//!
//! Newline-delimited JSON-RPC frames. The writer carries protocol frames and
//! nothing else; diagnostics go through `tracing`, which writes to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::handlers::McpHandler;
use crate::error::AppError;

/// Serves frames from `reader` until EOF, writing each response to `writer`.
pub async fn serve<R, W>(handler: &McpHandler, mut reader: R, mut writer: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            tracing::info!("MCP input closed");
            break;
        }

        let frame = String::from_utf8_lossy(&buf);
        let frame = frame.trim();
        if frame.is_empty() {
            continue;
        }

        if let Some(response) = handler.handle_frame(frame) {
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Serves the process's stdin/stdout.
pub async fn serve_stdio(handler: &McpHandler) -> Result<(), AppError> {
    serve(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
