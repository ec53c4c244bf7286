//! Tracing subscriber setup

use std::{fs::File, io, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber.
///
/// The terminal belongs to the timer display, so logs only go to
/// `--log-file` when given and are discarded otherwise.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::new(format!("pomodoro={}", config.log_level()));

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .init();
        }
    }

    Ok(())
}
