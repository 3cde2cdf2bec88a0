use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use pareggio_engine::summarize;

use crate::{
    config::{Cli, Command, Settings},
    error::Result,
    render::View,
    store::{StoredGroup, Window},
};

mod config;
mod error;
mod render;
mod store;

const DEFAULT_LEVEL: &str = "info";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match config::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(cli.level.as_deref().unwrap_or(DEFAULT_LEVEL));
            return finish(Err(err));
        }
    };

    init_tracing(&settings.app.level);
    finish(run(&cli, &settings))
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(format!("pareggio={level},pareggio_engine={level}"))
        .with_writer(io::stderr)
        .init();
}

/// Logs a failure once and turns it into the process exit status.
fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let args = cli.command.args();
    let view = match cli.command {
        Command::Summary(_) => View::Summary,
        Command::Balances(_) => View::Balances,
        Command::Settle(_) => View::Settlements,
    };

    let window = Window {
        since: args.since,
        until: args.until,
    };
    let group = StoredGroup::open(&args.input, window)?;
    tracing::info!("Loaded snapshot from {}", args.input.display());

    let summary = summarize(&group)?;
    tracing::info!(
        expenses = summary.expense_count,
        settlements = summary.settlements.len(),
        "summary ready"
    );

    let report = render::build_report(&summary, &group, group.currency(), group.group_name());
    let mut out = io::stdout().lock();
    render::write_report(&report, view, settings.output.format, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn failures_map_to_exit_status() {
        assert_eq!(finish(Ok(())), ExitCode::SUCCESS);
        assert_eq!(
            finish(Err(AppError::Snapshot("broken".to_string()))),
            ExitCode::FAILURE
        );
    }
}
