//! Terminal input forwarding task

use std::io;

use anyhow::{anyhow, Context};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::controller::Event;

/// Forward terminal events into the event loop.
///
/// Returns `Ok` once the loop goes away. A failed read or the end of the
/// input stream means the terminal is gone and is reported as an error.
pub async fn forward_terminal_events<S>(
    mut stream: S,
    events: UnboundedSender<Event>,
) -> anyhow::Result<()>
where
    S: Stream<Item = io::Result<crossterm::event::Event>> + Unpin,
{
    debug!("Starting terminal input task");

    while let Some(next) = stream.next().await {
        let event = next.context("failed to read terminal event")?;
        if events.send(Event::from(event)).is_err() {
            debug!("Event loop gone, stopping input task");
            return Ok(());
        }
    }

    Err(anyhow!("terminal input stream closed"))
}
