//! State management module
//!
//! This module contains the countdown state and its transition logic.

pub mod timer_state;

// Re-export main types
pub use timer_state::{Phase, TimerState};
