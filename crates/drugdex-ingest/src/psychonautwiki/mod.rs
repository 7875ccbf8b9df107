//! PsychonautWiki: the structured wiki.
//!
//! Fetching is strictly sequential: one listing query, then for every listed
//! page one HTML request and one GraphQL point query.

pub mod graphql;
pub mod page;

use std::time::Instant;

use drugdex_model::PwSubstance;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::client::HttpClient;
use crate::config::SourceConfig;
use crate::error::{IngestError, Result, RetryError};
use crate::progress::{FetchEvent, FetchObserver};
use crate::retry::with_retry;

pub use graphql::{ListedSubstance, SubstanceDetails};
pub use page::{PageOutcome, SkipReason, classify_page, clean_common_name, page_aliases};

use graphql::{GraphqlRequest, GraphqlResponse, listing_query};

/// Source name used in errors and logs.
pub const SOURCE_NAME: &str = "psychonautwiki";

/// Requests against the wiki and its API, each wrapped in the retry policy.
#[derive(Debug, Clone, Copy)]
pub struct PsychonautWiki<'a> {
    client: &'a HttpClient,
    config: &'a SourceConfig,
    cancel: &'a CancelToken,
}

impl<'a> PsychonautWiki<'a> {
    pub fn new(client: &'a HttpClient, config: &'a SourceConfig, cancel: &'a CancelToken) -> Self {
        Self {
            client,
            config,
            cancel,
        }
    }

    /// All page names and URLs.
    pub fn list_substances(&self) -> std::result::Result<Vec<ListedSubstance>, RetryError> {
        let query = listing_query();
        let request = GraphqlRequest::new(&query);
        with_retry(&self.config.retry, self.cancel, "substance listing", || {
            self.client
                .post_json::<_, GraphqlResponse<ListedSubstance>>(
                    &self.config.psychonautwiki_url,
                    &request,
                )?
                .into_substances()
        })
    }

    /// Structured data for one substance name.
    pub fn substance_details(
        &self,
        name: &str,
    ) -> std::result::Result<Vec<SubstanceDetails>, RetryError> {
        let request = GraphqlRequest::detail(name);
        with_retry(&self.config.retry, self.cancel, "substance query", || {
            self.client
                .post_json::<_, GraphqlResponse<SubstanceDetails>>(
                    &self.config.psychonautwiki_url,
                    &request,
                )?
                .into_substances()
        })
    }

    pub fn fetch_page(&self, url: &str) -> std::result::Result<String, RetryError> {
        with_retry(&self.config.retry, self.cancel, "page fetch", || {
            self.client.get_text(url)
        })
    }
}

/// Fetch every substance page and its structured data.
///
/// Skipped pages are left out, and so are items whose requests ran out of
/// retries or were answered with a 4xx status. Any other failure aborts the
/// whole fetch with [`IngestError::Item`]. The source's cancel token is
/// checked before every request.
pub fn fetch_substances(
    source: &PsychonautWiki<'_>,
    observer: &mut dyn FetchObserver,
) -> Result<Vec<PwSubstance>> {
    let cancel = source.cancel;
    let start = Instant::now();
    cancel.check()?;
    let listing = match source.list_substances() {
        Ok(listing) => listing,
        Err(error) => {
            cancel.check()?;
            return Err(IngestError::SourceUnavailable {
                source_name: SOURCE_NAME,
                source: error,
            });
        }
    };
    let total = listing.len();
    info!(total, "listed wiki substances");

    let mut substances = Vec::new();
    for (position, listed) in listing.iter().enumerate() {
        cancel.check()?;
        let index = position + 1;

        let html = match source.fetch_page(&listed.url) {
            Ok(html) => html,
            Err(error) => {
                cancel.check()?;
                if !error.is_skippable() {
                    return Err(item_error(listed, error));
                }
                warn!(name = %listed.name, url = %listed.url, error = %error, "giving up on page");
                observer.on_event(&skipped(None, &listed.url, index, total));
                continue;
            }
        };

        let (title, common_names) = match classify_page(&html) {
            PageOutcome::Skip { title, reason } => {
                debug!(name = %listed.name, url = %listed.url, %reason, "skipping page");
                observer.on_event(&skipped(title.as_deref(), &listed.url, index, total));
                continue;
            }
            PageOutcome::Substance {
                title,
                common_names,
            } => (title, common_names),
        };

        cancel.check()?;
        let mut details = match source.substance_details(&listed.name) {
            Ok(details) => details,
            Err(error) => {
                cancel.check()?;
                if !error.is_skippable() {
                    return Err(item_error(listed, error));
                }
                warn!(name = %listed.name, error = %error, "giving up on substance query");
                observer.on_event(&skipped(Some(&title), &listed.url, index, total));
                continue;
            }
        };
        if details.is_empty() {
            debug!(name = %listed.name, "no structured data");
            continue;
        }
        if details.len() > 1 {
            warn!(
                name = %title,
                results = details.len(),
                "more than one dataset returned, using the first"
            );
        }
        let details = details.swap_remove(0);

        let substance = PwSubstance {
            url: listed.url.clone(),
            aliases: page_aliases(common_names, &listed.name, &title),
            name: title,
            classes: details.class,
            toxicity: details.toxicity,
            addiction_potential: details.addiction_potential,
            tolerance: details.tolerance,
            cross_tolerances: details.cross_tolerances,
            roas: details.roas.unwrap_or_default(),
        };
        observer.on_event(&FetchEvent::Done {
            title: &substance.name,
            routes: substance.roas.len(),
            index,
            total,
        });
        substances.push(substance);
    }
    observer.on_finish();

    info!(
        fetched = substances.len(),
        total,
        duration_ms = start.elapsed().as_millis(),
        "wiki fetch complete"
    );
    Ok(substances)
}

fn skipped<'a>(title: Option<&'a str>, url: &'a str, index: usize, total: usize) -> FetchEvent<'a> {
    FetchEvent::Skipped {
        title,
        url,
        index,
        total,
    }
}

fn item_error(listed: &ListedSubstance, source: RetryError) -> IngestError {
    IngestError::Item {
        name: listed.name.clone(),
        source,
    }
}
