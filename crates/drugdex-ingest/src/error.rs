//! Error types for source fetching.

use std::path::PathBuf;

use thiserror::Error;

/// A single failed request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Connection, TLS or timeout failure, or a request that could not be built.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body could not be decoded into the expected shape.
    #[error("invalid response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// GraphQL payload without `data`.
    #[error("GraphQL error: {0}")]
    Graphql(String),
}

impl FetchError {
    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(error) => !error.is_builder(),
            Self::Decode { .. } | Self::Graphql(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }

    /// A 4xx status other than 429: the resource is missing or refused.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status) && *status != 429)
    }
}

/// The outcome of a request that never succeeded.
#[derive(Debug, Error)]
#[error("{operation} failed after {attempts} attempt(s)")]
pub struct RetryError {
    pub operation: String,
    pub attempts: u32,
    #[source]
    pub last: FetchError,
}

impl RetryError {
    /// True when every attempt failed transiently and the budget ran out.
    ///
    /// False when a non-retryable error stopped the loop early.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.last.is_retryable()
    }

    /// True when the item behind the request should be treated as absent:
    /// retries ran out, or the server answered with a client error.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        self.is_exhausted() || self.last.is_client_error()
    }
}

/// Errors that abort a fetch phase.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{source_name} is unavailable")]
    SourceUnavailable {
        source_name: &'static str,
        #[source]
        source: RetryError,
    },

    /// An item failed in a way retrying cannot fix.
    #[error("{name} failed")]
    Item {
        name: String,
        #[source]
        source: RetryError,
    },

    #[error("failed to {operation} cache file {path}")]
    CacheIo {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache file {path} is not valid JSON")]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("scrape canceled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, IngestError>;
