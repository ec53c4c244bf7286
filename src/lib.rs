//! Pomodoro - A terminal countdown timer
//!
//! This library provides the countdown state machine, the controller that
//! folds terminal and timer events into it, frame rendering, and the host
//! runtime that drives everything on a real terminal.

pub mod config;
pub mod controller;
pub mod host;
pub mod render;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Layout};
pub use controller::{Command, Controller, Event};
pub use state::{Phase, TimerState};
pub use utils::signals::shutdown_signal;
