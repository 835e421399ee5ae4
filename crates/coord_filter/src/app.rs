//! Main application logic.
//!
//! `Application` merges CLI overrides into the configuration, runs one
//! filter pass against the configured world data source and prints the
//! result.

use crate::cli::{CliArgs, OutputFormat};
use crate::config::{AppConfig, WorldSource};
use coord_filter_core::{
    render_result, run_filter, FilterRequest, FilterResult, Notifier, Phrases, ResultPanel,
};
use serde::Serialize;
use tracing::{error, info};

/// How a run ended, mapped to the process exit status by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The filter ran; carries the number of coordinates printed
    Matched(usize),
    /// Some requested names matched nothing
    Unresolved,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Matched(_) => 0,
            RunOutcome::Unresolved => 2,
        }
    }
}

/// Shows error messages through the log on stderr.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error_message(&self, message: &str) {
        error!("❌ {message}");
    }
}

/// Machine-readable form of a run, printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub request: &'a FilterRequest,
    pub coordinates: &'a [String],
    pub missing_tribes: &'a [String],
    pub missing_players: &'a [String],
}

impl<'a> JsonReport<'a> {
    pub fn new(request: &'a FilterRequest, result: &'a FilterResult) -> Self {
        match result {
            Ok(coords) => Self {
                request,
                coordinates: coords,
                missing_tribes: &[],
                missing_players: &[],
            },
            Err(unresolved) => Self {
                request,
                coordinates: &[],
                missing_tribes: &unresolved.missing_tribes,
                missing_players: &unresolved.missing_players,
            },
        }
    }
}

pub struct Application {
    /// Configuration with CLI overrides applied
    config: AppConfig,
    args: CliArgs,
}

impl Application {
    /// Applies command-line overrides to `config` and validates the result.
    pub fn new(args: CliArgs, mut config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(world) = &args.world {
            config.world.source = WorldSource::Http;
            config.world.base_url = world.clone();
        }

        if let Some(data_dir) = &args.data_dir {
            config.world.source = WorldSource::Directory;
            config.world.directory = data_dir.to_string_lossy().to_string();
        }

        if let Some(separator) = &args.separator {
            config.filter.separator = separator.clone();
        }

        if let Some(log_level) = &args.log_level {
            config.logging.level = log_level.clone();
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }

        Ok(Self { config, args })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs one filter pass and returns the rendered output with the outcome.
    pub async fn execute(&self) -> Result<(String, RunOutcome), Box<dyn std::error::Error>> {
        let request = self.args.to_form(&self.config).collect()?;
        let gateway = self.config.to_gateway()?;
        info!("🌍 Reading world data from {}", gateway.describe());

        let result = run_filter(gateway.as_ref(), &request).await?;

        let mut panel = ResultPanel::new();
        render_result(&result, &Phrases::EN, &mut panel, &LogNotifier);

        let outcome = match &result {
            Ok(coords) => RunOutcome::Matched(coords.len()),
            Err(_) => RunOutcome::Unresolved,
        };

        let output = match self.args.format {
            OutputFormat::Text => panel.output().to_string(),
            OutputFormat::Json => serde_json::to_string(&JsonReport::new(&request, &result))?,
        };

        Ok((output, outcome))
    }

    /// Runs the filter and prints the result to stdout.
    pub async fn run(self) -> Result<RunOutcome, Box<dyn std::error::Error>> {
        let (output, outcome) = self.execute().await?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(outcome)
    }
}
