//! Utility functions module
//!
//! This module contains process-level helpers used by the binary.

pub mod logging;
pub mod signals;

// Re-export main functions
pub use logging::init_tracing;
pub use signals::shutdown_signal;
