//! Follow-up work the host performs after a reduction step

use std::time::Duration;

/// Tick resolution of the countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Printed once when the countdown reaches zero
pub const COMPLETION_NOTICE: &str = "Pomodoro Timer done!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deliver one `Event::Tick` after the delay
    ScheduleTick(Duration),
    /// Print a line above the live frame
    Println(String),
    /// Leave the event loop
    Quit,
}
