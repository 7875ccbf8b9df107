//! CLI argument definitions for drugdex.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use drugdex_ingest::{DEFAULT_CACHE_FILE, PSYCHONAUTWIKI_API_URL, TRIPSIT_API_URL};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "drugdex",
    version,
    about = "Scrape PsychonautWiki and TripSit into one substance dataset",
    long_about = "Fetch substance pages from PsychonautWiki and factsheets from TripSit,\n\
                  merge records that name the same substance, and write the result\n\
                  as a pretty-printed JSON array."
)]
pub struct Cli {
    /// Output file (default: substances_<unix time>.json).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Adjust verbosity (-v for debug, -vv for trace). -q prints one
    /// character per page instead of a line and only logs warnings.
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q for logging).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix each log line with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the emitting module in each log line.
    #[arg(long = "log-target")]
    pub log_target: bool,

    /// Wiki record cache. When it exists and is not empty the wiki is not fetched.
    #[arg(long = "cache-file", value_name = "PATH", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Save fetched wiki records to the cache file.
    #[arg(long = "write-cache")]
    pub write_cache: bool,

    /// PsychonautWiki GraphQL endpoint.
    #[arg(long = "psychonautwiki-url", value_name = "URL", default_value = PSYCHONAUTWIKI_API_URL)]
    pub psychonautwiki_url: String,

    /// TripSit getAllDrugs endpoint.
    #[arg(long = "tripsit-url", value_name = "URL", default_value = TRIPSIT_API_URL)]
    pub tripsit_url: String,
}

impl Cli {
    /// Quiet once `-q` drops logging below info.
    pub fn quiet(&self) -> bool {
        matches!(
            self.verbosity.tracing_level_filter(),
            LevelFilter::WARN | LevelFilter::ERROR | LevelFilter::OFF
        )
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
