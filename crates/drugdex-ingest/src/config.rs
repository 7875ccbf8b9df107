//! Endpoint and request configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Wiki GraphQL endpoint.
pub const PSYCHONAUTWIKI_API_URL: &str = "https://api.psychonautwiki.org";

/// Factsheet bulk endpoint.
pub const TRIPSIT_API_URL: &str = "https://tripbot.tripsit.me/api/tripsit/getAllDrugs";

/// Upper bound passed to the wiki listing query.
pub const LISTING_LIMIT: u32 = 11_000;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("drugdex/", env!("CARGO_PKG_VERSION"));

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how the sources are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub psychonautwiki_url: String,
    pub tripsit_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            psychonautwiki_url: PSYCHONAUTWIKI_API_URL.to_string(),
            tripsit_url: TRIPSIT_API_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn with_psychonautwiki_url(mut self, url: impl Into<String>) -> Self {
        self.psychonautwiki_url = url.into();
        self
    }

    #[must_use]
    pub fn with_tripsit_url(mut self, url: impl Into<String>) -> Self {
        self.tripsit_url = url.into();
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
