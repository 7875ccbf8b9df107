use std::path::PathBuf;

use drugdex_ingest::SourceConfig;
use drugdex_merge::ReconcileStats;

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: PathBuf,
    pub cache_file: PathBuf,
    /// Write freshly fetched wiki records to `cache_file`.
    pub write_cache: bool,
    /// Print one progress character per page instead of a line.
    pub quiet: bool,
    pub sources: SourceConfig,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub wiki_records: usize,
    /// Wiki records came from the cache file instead of the network.
    pub from_cache: bool,
    pub factsheet_records: usize,
    pub stats: ReconcileStats,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Interrupted by the user. Nothing was written.
    Cancelled,
}
