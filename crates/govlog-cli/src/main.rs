//! govlog CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use govlog_cli::cli::{Cli, Commands};
use govlog_cli::commands::{AnalyzeCommand, LimitsCommand, Outcome, EXIT_USAGE};
use govlog_cli::output::OutputFormat;
use govlog_core::Analyzer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome, govlog_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let analyzer = Analyzer::with_config(cli.analyzer_config()?)?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Analyze(args) => AnalyzeCommand::new(&analyzer).execute(&mut stdout, &format, args),
        Commands::Limits(args) => LimitsCommand::new(&analyzer).execute(&mut stdout, &format, args),
    }
}
