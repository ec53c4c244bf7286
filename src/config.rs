//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::state::timer_state::DEFAULT_DURATION_SECONDS;

/// Spaces in front of the remaining-time readout
pub const PADDING_MIDDLE: u16 = 40;

/// Longest accepted countdown, one day
pub const MAX_DURATION_SECONDS: u64 = 24 * 60 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A terminal pomodoro countdown timer")]
#[command(version)]
pub struct Config {
    /// Countdown length in seconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION_SECONDS, value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECONDS))]
    pub duration: u64,

    /// Left padding in columns around the progress bar
    #[arg(long, default_value = "3")]
    pub padding: u16,

    /// Maximum progress bar width in columns
    #[arg(long, default_value = "80")]
    pub max_width: u16,

    /// Disable colors
    #[arg(long)]
    pub plain: bool,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Screen geometry used by resize and render
    pub fn layout(&self) -> Layout {
        Layout {
            padding: self.padding,
            padding_middle: PADDING_MIDDLE,
            max_width: self.max_width,
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Horizontal geometry of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub padding: u16,
    pub padding_middle: u16,
    pub max_width: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            padding: 3,
            padding_middle: PADDING_MIDDLE,
            max_width: 80,
        }
    }
}
