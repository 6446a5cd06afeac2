//! Newline-delimited JSON-RPC over a byte stream
//!
//! Each request line is handled on its own task so slow tool calls overlap.
//! Responses go through a single writer task, which keeps output lines
//! whole. Serving ends at end of input or on a read error, after in-flight
//! requests finish.

use crate::protocol::JsonRpcResponse;
use crate::server::McpServer;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Serve requests from the process stdin, answering on stdout
pub async fn serve_stdio(server: Arc<McpServer>) -> io::Result<()> {
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve requests read from `reader`, writing responses to `writer`
pub async fn serve<R, W>(server: Arc<McpServer>, mut reader: R, writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(write_responses(writer, rx));

    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    // Raw bytes, so a line that is not UTF-8 still gets a parse error response
    let read_result = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }

        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let line = buf.clone();
        let server = server.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            if let Some(response) = server.handle_line(&line).await {
                // The writer only stops once every sender is gone
                let _ = tx.send(response);
            }
        });

        // Reap finished handlers so the set does not grow unbounded
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                error!("Request handler panicked: {}", e);
            }
        }
    };

    match &read_result {
        Ok(()) => info!("Input closed, waiting for {} in-flight request(s)", in_flight.len()),
        Err(e) => error!(
            "Failed to read input: {}, waiting for {} in-flight request(s)",
            e,
            in_flight.len()
        ),
    }
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Request handler panicked: {}", e);
        }
    }

    drop(tx);
    writer_task
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

    read_result
}

async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
        debug!(bytes = line.len(), "Wrote response");
    }
    writer.shutdown().await
}
