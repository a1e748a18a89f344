//! Command loop multiplexing protocol input with the refresh ticker

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use crate::error::HostResult;
use crate::protocol::Response;
use crate::session::Session;

async fn write_response<W>(writer: &mut W, response: &Response) -> HostResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(response.to_line()?.as_bytes()).await?;
    Ok(())
}

/// Serve commands from `reader` until end of input.
///
/// Every `refresh_every` the session's statuses are recomputed and
/// transitions are written as `status_changed` lines.
pub async fn run<R, W>(
    session: &mut Session,
    reader: R,
    writer: &mut W,
    refresh_every: Duration,
) -> HostResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    let mut ticker = tokio::time::interval(refresh_every.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let response = session.handle_line(&line);
                write_response(writer, &response).await?;
                writer.flush().await?;
            }
            _ = ticker.tick() => {
                for response in session.refresh() {
                    write_response(writer, &response).await?;
                }
                writer.flush().await?;
            }
        }
    }

    tracing::info!(registered = session.store().len(), "Input closed");
    Ok(())
}
