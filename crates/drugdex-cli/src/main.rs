//! drugdex: merged substance data from PsychonautWiki and TripSit.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use drugdex_cli::logging::{LogConfig, LogFormat, init_logging};
use drugdex_cli::pipeline::{failed_item, run};
use drugdex_cli::progress::ProgressPrinter;
use drugdex_cli::types::{RunOptions, RunOutcome};
use drugdex_ingest::{CancelToken, SourceConfig};
use drugdex_output::default_output_path;
use tracing::level_filters::LevelFilter;
use tracing::warn;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(error) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(%error, "could not install interrupt handler");
    }

    let options = run_options_from_cli(&cli);
    let mut printer = ProgressPrinter::stdout(options.quiet);
    let exit_code = match run(&options, &mut printer, &cancel) {
        Ok(RunOutcome::Completed(summary)) => {
            print_summary(&summary);
            0
        }
        Ok(RunOutcome::Cancelled) => {
            println!("\nScrape canceled");
            0
        }
        Err(error) => {
            if let Some(name) = failed_item(&error) {
                eprintln!("{name} failed:");
            }
            eprintln!("error: {error:?}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_options_from_cli(cli: &Cli) -> RunOptions {
    RunOptions {
        output: cli.output.clone().unwrap_or_else(default_output_path),
        cache_file: cli.cache_file.clone(),
        write_cache: cli.write_cache,
        quiet: cli.quiet(),
        sources: SourceConfig::default()
            .with_psychonautwiki_url(&cli.psychonautwiki_url)
            .with_tripsit_url(&cli.tripsit_url),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_timestamps = cli.log_timestamps;
    config.with_target = cli.log_target;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
