//! Background tasks module
//!
//! This module contains the tasks that feed events into the event loop.

pub mod input;
pub mod ticker;

// Re-export main functions
pub use input::forward_terminal_events;
pub use ticker::{now, schedule_tick};
