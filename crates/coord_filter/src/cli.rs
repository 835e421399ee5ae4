//! Command-line interface handling for the coordinate filter.
//!
//! The command line plays the role of the filter form: each option fills
//! one raw form field, and the remaining options override the config file.

use crate::config::AppConfig;
use clap::{Arg, ArgAction, ArgMatches, Command};
use coord_filter_core::FilterForm;
use std::ffi::OsString;
use std::path::PathBuf;

/// How the result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Space-joined coordinates on one line
    #[default]
    Text,
    /// A JSON object with coordinates and unresolved names
    Json,
}

/// Command line arguments parsed from user input.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Raw tribe list, `;` or newline separated
    pub tribes: String,
    /// Raw player list, `;` or newline separated
    pub players: String,
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
    /// Optional override for the coordinate separator
    pub separator: Option<String>,
    /// Optional override for the world base URL
    pub world: Option<String>,
    /// Optional local directory to read world tables from
    pub data_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

/// Builds the clap command definition.
pub fn command() -> Command {
    Command::new("coord-filter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Filter Tribal Wars village coordinates by tribe, player and map area")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("tribes")
                .short('t')
                .long("tribes")
                .value_name("TAGS")
                .help("Tribe tags, separated by ';' (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("players")
                .short('p')
                .long("players")
                .value_name("NAMES")
                .help("Player names, separated by ';' (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(bound_arg("x-min", "Smallest x coordinate to keep"))
        .arg(bound_arg("x-max", "Largest x coordinate to keep"))
        .arg(bound_arg("y-min", "Smallest y coordinate to keep"))
        .arg(bound_arg("y-max", "Largest y coordinate to keep"))
        .arg(
            Arg::new("separator")
                .short('s')
                .long("separator")
                .value_name("CHAR")
                .help("Coordinate separator")
                .value_parser(["|", ","]),
        )
        .arg(
            Arg::new("world")
                .short('w')
                .long("world")
                .value_name("URL")
                .help("World base URL (e.g., https://en140.tribalwars.net)")
                .conflicts_with("data-dir"),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Read village.txt, player.txt and ally.txt from a directory"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Output logs in JSON format")
                .action(ArgAction::SetTrue),
        )
}

// Bounds stay raw text so the collector decides how to read them.
fn bound_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("N")
        .help(help)
        .allow_hyphen_values(true)
}

impl CliArgs {
    /// Parses the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Parses an explicit argument list.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let joined = |id: &str| {
            matches
                .get_many::<String>(id)
                .map(|values| values.cloned().collect::<Vec<_>>().join(";"))
                .unwrap_or_default()
        };
        let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.toml")),
            tribes: joined("tribes"),
            players: joined("players"),
            x_min: text("x-min"),
            x_max: text("x-max"),
            y_min: text("y-min"),
            y_max: text("y-max"),
            separator: matches.get_one::<String>("separator").cloned(),
            world: matches.get_one::<String>("world").cloned(),
            data_dir: matches.get_one::<String>("data-dir").map(PathBuf::from),
            format: match matches.get_one::<String>("format").map(String::as_str) {
                Some("json") => OutputFormat::Json,
                _ => OutputFormat::Text,
            },
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }

    /// Fills the filter form from the arguments, taking the separator
    /// from the config when none was given.
    pub fn to_form(&self, config: &AppConfig) -> FilterForm {
        FilterForm {
            tribes: self.tribes.clone(),
            players: self.players.clone(),
            x_min: self.x_min.clone(),
            x_max: self.x_max.clone(),
            y_min: self.y_min.clone(),
            y_max: self.y_max.clone(),
            separator: self
                .separator
                .clone()
                .unwrap_or_else(|| config.filter.separator.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = CliArgs::try_parse_from([
            "coord-filter",
            "--config",
            "test.toml",
            "-t",
            "NW;KoS",
            "-t",
            "ABC",
            "--players",
            "Bob",
            "--x-min",
            "-5",
            "--y-max",
            "600",
            "--separator",
            ",",
            "--data-dir",
            "dumps",
            "--format",
            "json",
            "--json-logs",
        ])
        .unwrap();

        assert_eq!(args.config_path, PathBuf::from("test.toml"));
        assert_eq!(args.tribes, "NW;KoS;ABC");
        assert_eq!(args.players, "Bob");
        assert_eq!(args.x_min, "-5");
        assert_eq!(args.x_max, "");
        assert_eq!(args.y_max, "600");
        assert_eq!(args.separator.as_deref(), Some(","));
        assert_eq!(args.data_dir, Some(PathBuf::from("dumps")));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.json_logs);
    }

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::try_parse_from(["coord-filter"]).unwrap();
        assert_eq!(args.config_path, PathBuf::from("config.toml"));
        assert!(args.tribes.is_empty());
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.separator, None);
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn test_cli_rejects_conflicts_and_bad_separator() {
        assert!(CliArgs::try_parse_from(["coord-filter", "--world", "https://x", "--data-dir", "d"]).is_err());
        assert!(CliArgs::try_parse_from(["coord-filter", "--separator", ";"]).is_err());
    }

    #[test]
    fn test_form_uses_config_separator() {
        let mut config = AppConfig::default();
        config.filter.separator = ",".to_string();

        let args = CliArgs::try_parse_from(["coord-filter", "-p", "Bob", "--x-max", "abc"]).unwrap();
        let form = args.to_form(&config);
        assert_eq!(form.separator, ",");
        assert_eq!(form.players, "Bob");
        assert_eq!(form.x_max, "abc");

        let args = CliArgs::try_parse_from(["coord-filter", "-s", "|"]).unwrap();
        assert_eq!(args.to_form(&config).separator, "|");
    }
}
