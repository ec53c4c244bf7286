//! Pomodoro - A terminal countdown timer
//!
//! This is the main entry point for the pomodoro application.

use tracing::{error, info};

use pomodoro::{config::Config, host, utils::init_tracing};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = init_tracing(&config) {
        eprintln!("Oh no! {:#}", e);
        std::process::exit(1);
    }

    info!("Starting pomodoro v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: duration={}s, padding={}, max_width={}, plain={}",
        config.duration, config.padding, config.max_width, config.plain
    );

    // The terminal session is restored before we get here
    if let Err(e) = host::run(&config).await {
        error!("{:#}", e);
        eprintln!("Oh no! {:#}", e);
        std::process::exit(1);
    }

    info!("Pomodoro exited");
}
