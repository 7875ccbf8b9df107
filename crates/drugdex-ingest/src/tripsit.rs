//! TripSit: the factsheet API.

use std::fmt;
use std::time::Instant;

use drugdex_model::TsSubstance;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::client::HttpClient;
use crate::config::SourceConfig;
use crate::error::{IngestError, Result};
use crate::retry::with_retry;

/// Source name used in errors and logs.
pub const SOURCE_NAME: &str = "tripsit";

/// `{"err": null, "data": [{"<key>": {...}, ...}]}`
#[derive(Debug, Default, Deserialize)]
struct AllDrugsResponse {
    #[serde(default)]
    data: Vec<Factsheets>,
}

impl AllDrugsResponse {
    fn into_records(self) -> Vec<TsSubstance> {
        self.data
            .into_iter()
            .next()
            .map(|sheets| sheets.0)
            .unwrap_or_default()
    }
}

/// Factsheets in response order. Entries that are not objects are dropped.
#[derive(Debug, Default)]
struct Factsheets(Vec<TsSubstance>);

impl<'de> Deserialize<'de> for Factsheets {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FactsheetVisitor;

        impl<'de> Visitor<'de> for FactsheetVisitor {
            type Value = Factsheets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of factsheets")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    match serde_json::from_value::<TsSubstance>(value) {
                        Ok(record) => records.push(record),
                        Err(error) => warn!(key = %key, %error, "skipping malformed factsheet"),
                    }
                }
                Ok(Factsheets(records))
            }
        }

        deserializer.deserialize_map(FactsheetVisitor)
    }
}

/// Parse a bulk response body into factsheets, keeping upstream order.
pub fn parse_all_drugs(body: &str) -> serde_json::Result<Vec<TsSubstance>> {
    let response: AllDrugsResponse = serde_json::from_str(body)?;
    Ok(response.into_records())
}

/// Fetch every factsheet in one request.
pub fn fetch_factsheets(
    client: &HttpClient,
    config: &SourceConfig,
    cancel: &CancelToken,
) -> Result<Vec<TsSubstance>> {
    let start = Instant::now();
    cancel.check()?;
    let response = match with_retry(&config.retry, cancel, "factsheet fetch", || {
        client.get_json::<AllDrugsResponse>(&config.tripsit_url)
    }) {
        Ok(response) => response,
        Err(error) => {
            cancel.check()?;
            return Err(IngestError::SourceUnavailable {
                source_name: SOURCE_NAME,
                source: error,
            });
        }
    };
    let records = response.into_records();
    info!(
        count = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "factsheet fetch complete"
    );
    Ok(records)
}
