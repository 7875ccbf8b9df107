//! Run stages: factsheets, wiki records, reconciliation, output.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use drugdex_ingest::{
    CancelToken, FetchObserver, HttpClient, IngestError, PsychonautWiki, fetch_factsheets,
    fetch_substances, load_cache, save_cache,
};
use drugdex_merge::{Reconciliation, reconcile};
use drugdex_model::{PwSubstance, TsSubstance};
use drugdex_output::write_substances;
use tracing::{info, info_span};

use crate::types::{RunOptions, RunOutcome, RunSummary};

/// Wiki records and where they came from.
#[derive(Debug)]
pub struct WikiRecords {
    pub records: Vec<PwSubstance>,
    pub from_cache: bool,
}

/// Run every stage. Cancellation is an outcome, not an error.
pub fn run(
    options: &RunOptions,
    observer: &mut dyn FetchObserver,
    cancel: &CancelToken,
) -> Result<RunOutcome> {
    match run_stages(options, observer, cancel) {
        Err(error) if is_cancelled(&error) => Ok(RunOutcome::Cancelled),
        result => result.map(RunOutcome::Completed),
    }
}

fn run_stages(
    options: &RunOptions,
    observer: &mut dyn FetchObserver,
    cancel: &CancelToken,
) -> Result<RunSummary> {
    let client = HttpClient::new(&options.sources).context("build http client")?;

    cancel.check()?;
    let factsheets = info_span!("factsheets")
        .in_scope(|| fetch_factsheets(&client, &options.sources, cancel))
        .context("fetch factsheets")?;

    cancel.check()?;
    let wiki = info_span!("wiki").in_scope(|| load_wiki_records(&client, options, observer, cancel))?;

    let wiki_records = wiki.records.len();
    let factsheet_records = factsheets.len();

    cancel.check()?;
    let reconciliation = merge_records(wiki.records, factsheets);

    cancel.check()?;
    write_output(&options.output, &reconciliation)?;

    Ok(RunSummary {
        wiki_records,
        from_cache: wiki.from_cache,
        factsheet_records,
        stats: reconciliation.stats,
        output: options.output.clone(),
    })
}

/// Load wiki records from the cache file, or fetch them and optionally
/// refresh the cache.
pub fn load_wiki_records(
    client: &HttpClient,
    options: &RunOptions,
    observer: &mut dyn FetchObserver,
    cancel: &CancelToken,
) -> Result<WikiRecords> {
    if let Some(records) = load_cache(&options.cache_file).context("load wiki cache")? {
        return Ok(WikiRecords {
            records,
            from_cache: true,
        });
    }

    let source = PsychonautWiki::new(client, &options.sources, cancel);
    let records = fetch_substances(&source, observer).context("fetch wiki records")?;
    if options.write_cache {
        save_cache(&options.cache_file, &records).context("write wiki cache")?;
    }
    Ok(WikiRecords {
        records,
        from_cache: false,
    })
}

pub fn merge_records(wiki: Vec<PwSubstance>, factsheets: Vec<TsSubstance>) -> Reconciliation {
    let span = info_span!("reconcile", wiki = wiki.len(), factsheets = factsheets.len());
    let _guard = span.enter();
    let start = Instant::now();
    let reconciliation = reconcile(wiki, factsheets);
    let stats = &reconciliation.stats;
    info!(
        names = stats.names_visited,
        emitted = stats.emitted,
        dropped_without_routes = stats.dropped_without_routes,
        duplicate_names = stats.duplicate_names,
        duration_ms = start.elapsed().as_millis(),
        "reconcile complete"
    );
    reconciliation
}

pub fn write_output(path: &Path, reconciliation: &Reconciliation) -> Result<()> {
    write_substances(path, &reconciliation.substances)
        .with_context(|| format!("write {}", path.display()))
}

fn is_cancelled(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<IngestError>(),
        Some(IngestError::Cancelled)
    )
}

/// Name of the item whose failure ended the run, if that is what happened.
pub fn failed_item(error: &anyhow::Error) -> Option<&str> {
    match error.downcast_ref::<IngestError>() {
        Some(IngestError::Item { name, .. }) => Some(name),
        _ => None,
    }
}
