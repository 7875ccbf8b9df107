//! GraphQL documents and response shapes for the wiki API.

use drugdex_model::lenient;
use drugdex_model::{RouteRecord, SubstanceClass, Tolerance};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::LISTING_LIMIT;
use crate::error::FetchError;

/// Every page name and URL known to the API.
pub fn listing_query() -> String {
    format!("{{ substances(limit: {LISTING_LIMIT}) {{ name url }} }}")
}

/// Structured data for one substance, looked up by name.
pub const DETAIL_QUERY: &str = r"
query SubstanceDetails($query: String) {
    substances(query: $query) {
        name
        class { chemical psychoactive }
        tolerance { full half zero }
        toxicity
        addictionPotential
        crossTolerances
        roas {
            name
            dose {
                units
                threshold
                heavy
                common { min max }
                light { min max }
                strong { min max }
            }
            duration {
                afterglow { min max units }
                comeup { min max units }
                duration { min max units }
                offset { min max units }
                onset { min max units }
                peak { min max units }
                total { min max units }
            }
        }
    }
}
";

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl<'a> GraphqlRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            variables: None,
        }
    }
}

impl GraphqlRequest<'static> {
    pub fn detail(name: &str) -> GraphqlRequest<'static> {
        GraphqlRequest {
            query: DETAIL_QUERY,
            variables: Some(json!({ "query": name })),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<SubstancesData<T>>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct SubstancesData<T> {
    pub substances: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// The `substances` list, or an error when the payload carries no data.
    ///
    /// A null list reads as empty.
    pub fn into_substances(self) -> Result<Vec<T>, FetchError> {
        match self.data {
            Some(data) => Ok(data.substances.unwrap_or_default()),
            None if self.errors.is_empty() => {
                Err(FetchError::Graphql("response has no data".to_string()))
            }
            None => Err(FetchError::Graphql(
                self.errors
                    .into_iter()
                    .map(|error| error.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }
}

/// One entry of the listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListedSubstance {
    pub name: String,
    pub url: String,
}

/// One entry of the detail query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubstanceDetails {
    pub name: Option<String>,
    pub class: Option<SubstanceClass>,
    pub tolerance: Option<Tolerance>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub toxicity: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string")]
    pub addiction_potential: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub cross_tolerances: Option<Vec<String>>,
    pub roas: Option<Vec<RouteRecord>>,
}
