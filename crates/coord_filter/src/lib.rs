//! # Coord Filter - Command Line Entry Point
//!
//! Filters the village coordinates of a Tribal Wars world by owning tribe,
//! owning player and an inclusive map rectangle, and prints them in the
//! `xxx|yyy` (or `xxx,yyy`) notation the game understands.
//!
//! ## Quick Start
//!
//! ```bash
//! # Villages of two tribes inside a 100x100 square
//! coord-filter --tribes "NW;KoS" --x-min 400 --x-max 500 --y-min 400 --y-max 500
//!
//! # Players from a different world, comma separated output
//! coord-filter --world https://en141.tribalwars.net --players "Bob;Alice" --separator ,
//!
//! # Offline, from previously downloaded tables
//! coord-filter --data-dir ./en140 --players Bob --format json
//! ```
//!
//! ## Configuration
//!
//! Settings are read from a TOML file (default: `config.toml`). If the file
//! doesn't exist, a default configuration is written there. A file that
//! exists but cannot be read or parsed stops the run with exit code 1.
//!
//! ## Exit Codes
//!
//! * **0**: coordinates printed (possibly none)
//! * **1**: configuration, input or world data failure
//! * **2**: some requested tribes or players do not exist

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Runs the tool with the process arguments and returns the exit code.
pub async fn init() -> i32 {
    run_with_args(CliArgs::parse()).await
}

/// Runs the tool with already parsed arguments and returns the exit code.
pub async fn run_with_args(args: CliArgs) -> i32 {
    let config = match AppConfig::load_or_default(&args.config_path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load {}: {e}", args.config_path.display());
            return 1;
        }
    };

    let log_settings = config::LoggingSettings {
        level: args.log_level.clone().unwrap_or_else(|| config.logging.level.clone()),
        json_format: config.logging.json_format,
    };
    if let Err(e) = logging::setup_logging(&log_settings, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        return 1;
    }

    let app = match Application::new(args, config) {
        Ok(app) => app,
        Err(e) => {
            error!("❌ Failed to start application: {e}");
            return 1;
        }
    };

    match app.run().await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("❌ Filter run failed: {e}");
            1
        }
    }
}

pub use app::RunOutcome;
pub use config::{FilterSettings, LoggingSettings, WorldSettings, WorldSource};
