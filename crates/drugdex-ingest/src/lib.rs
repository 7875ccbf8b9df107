//! Source adapters for drugdex.
//!
//! PsychonautWiki is read through a GraphQL listing of pages, one HTML page per
//! substance for title and common names, and a GraphQL point query for the
//! structured route data. TripSit factsheets come from one bulk request.
//! Every network call goes through [`with_retry`].

pub mod cache;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod progress;
pub mod psychonautwiki;
pub mod retry;
pub mod tripsit;

pub use cache::{DEFAULT_CACHE_FILE, load_cache, save_cache};
pub use cancel::CancelToken;
pub use client::HttpClient;
pub use config::{PSYCHONAUTWIKI_API_URL, SourceConfig, TRIPSIT_API_URL};
pub use error::{FetchError, IngestError, Result, RetryError};
pub use progress::{FetchEvent, FetchObserver, NoopObserver};
pub use psychonautwiki::{PsychonautWiki, fetch_substances};
pub use retry::{RetryPolicy, with_retry};
pub use tripsit::{fetch_factsheets, parse_all_drugs};
