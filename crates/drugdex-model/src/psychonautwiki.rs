//! PsychonautWiki records: one per wiki page with structured route data.

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::route::RouteRecord;

/// A substance scraped from the wiki and enriched from its GraphQL API.
///
/// This is also the on-disk cache format for wiki records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PwSubstance {
    pub url: String,
    /// Page title, used as the display name.
    pub name: String,
    /// Other common names, sorted, never containing `name`.
    pub aliases: Vec<String>,
    #[serde(rename = "class")]
    pub classes: Option<SubstanceClass>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub toxicity: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string")]
    pub addiction_potential: Option<String>,
    pub tolerance: Option<Tolerance>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub cross_tolerances: Option<Vec<String>>,
    pub roas: Vec<RouteRecord>,
}

/// Chemical and psychoactive category tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstanceClass {
    #[serde(deserialize_with = "lenient::string_list")]
    pub chemical: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub psychoactive: Option<Vec<String>>,
}

/// Time to full, half and zero tolerance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    #[serde(deserialize_with = "lenient::string")]
    pub full: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub half: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub zero: Option<String>,
}
