use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub output: Output,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level used for the `pareggio` crates.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Output {
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// Settlements for `summary`/`settle`, balances for `balances`.
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "pareggio")]
#[command(about = "Split shared expenses and settle a group with the fewest transfers")]
pub struct Cli {
    /// Optional settings file path (TOML, extension may be omitted).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Totals, balances and settlements.
    Summary(ReportArgs),
    /// Net balance of every member.
    Balances(ReportArgs),
    /// Transfers that settle the group.
    Settle(ReportArgs),
}

impl Command {
    pub fn args(&self) -> &ReportArgs {
        match self {
            Self::Summary(args) | Self::Balances(args) | Self::Settle(args) => args,
        }
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Group snapshot (JSON).
    #[arg(long, short, env = "PAREGGIO_INPUT")]
    pub input: PathBuf,
    /// Only expenses that occurred at or after this instant (RFC 3339).
    #[arg(long)]
    pub since: Option<DateTime<FixedOffset>>,
    /// Only expenses that occurred before this instant (RFC 3339).
    #[arg(long)]
    pub until: Option<DateTime<FixedOffset>>,
}

/// Reads the settings file and `PAREGGIO_*` variables (`PAREGGIO_APP__LEVEL`,
/// `PAREGGIO_OUTPUT__FORMAT`), then applies CLI overrides.
pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder
        .add_source(config::File::with_name(config_path).required(cli.config.is_some()));
    builder = builder.add_source(
        config::Environment::with_prefix("PAREGGIO")
            .prefix_separator("_")
            .separator("__"),
    );
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    if let Some(level) = &cli.level {
        settings.app.level = level.clone();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let cli = Cli::parse_from([
            "pareggio",
            "--format",
            "json",
            "--level",
            "debug",
            "settle",
            "--input",
            "group.json",
        ]);
        let settings = load(&cli).unwrap();
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.app.level, "debug");
        assert_eq!(cli.command.args().input, PathBuf::from("group.json"));
    }

    #[test]
    fn window_parses_rfc3339() {
        let cli = Cli::parse_from([
            "pareggio",
            "summary",
            "-i",
            "group.json",
            "--since",
            "2026-01-01T00:00:00+01:00",
        ]);
        let args = cli.command.args();
        assert!(args.since.is_some());
        assert!(args.until.is_none());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from([
            "pareggio",
            "--config",
            "does/not/exist",
            "balances",
            "-i",
            "group.json",
        ]);
        assert!(load(&cli).is_err());
    }
}
