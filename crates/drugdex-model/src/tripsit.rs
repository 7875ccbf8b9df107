//! TripSit records: community factsheets fetched in bulk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// One factsheet entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsSubstance {
    /// Primary key, lowercase by convention.
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub pretty_name: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub aliases: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub properties: TsProperties,
    /// Combo risk keyed by the factsheet's fixed substance vocabulary.
    /// Entries that are not objects are dropped.
    #[serde(deserialize_with = "lenient::entries")]
    pub combos: Option<BTreeMap<String, ComboRisk>>,
    #[serde(deserialize_with = "lenient::optional")]
    pub links: Option<TsLinks>,
}

/// The subset of free-text properties the merge reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsProperties {
    #[serde(deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(rename = "test-kits", deserialize_with = "lenient::string")]
    pub test_kits: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bioavailability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsLinks {
    #[serde(deserialize_with = "lenient::string")]
    pub experiences: Option<String>,
}

/// Interaction risk between this substance and one combo key.
///
/// Keys beyond status, note and sources are kept in `extra` and written back
/// out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboRisk {
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<ComboSource>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboSource {
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}
