//! One-shot tick scheduling

use std::time::{Duration, Instant};

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::sleep};
use tracing::{debug, warn};

use crate::controller::Event;

/// Current time on the runtime clock.
///
/// Reads tokio's clock so that paused test time and scheduled ticks agree.
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Deliver exactly one `Event::Tick` after `delay`.
///
/// Fire-and-forget: there is no cancellation, a tick that arrives after the
/// countdown stopped is ignored by the controller.
pub fn schedule_tick(delay: Duration, events: UnboundedSender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(delay).await;
        let at = now();
        if events.send(Event::Tick(at)).is_err() {
            warn!("Event loop gone, dropping tick");
        } else {
            debug!("Tick delivered");
        }
    })
}
