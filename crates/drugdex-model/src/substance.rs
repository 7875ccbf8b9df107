//! The merged output record.

use serde::{Deserialize, Serialize};

use crate::psychonautwiki::{SubstanceClass, Tolerance};
use crate::route::RouteRecord;
use crate::tripsit::ComboRisk;

/// One merged record per real-world substance.
///
/// Field order is the output order. Absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSubstance {
    pub url: String,
    pub experiences_url: Option<String>,
    pub name: String,
    /// Lowercased alternate names, sorted, never containing `name`.
    pub aliases: Vec<String>,
    /// `aliases` joined with commas.
    pub aliases_str: String,
    pub summary: Option<String>,
    /// Reagent test-kit notes.
    pub reagents: Option<String>,
    pub classes: Option<SubstanceClass>,
    pub toxicity: Option<Vec<String>>,
    pub addiction_potential: Option<String>,
    pub tolerance: Option<Tolerance>,
    pub cross_tolerances: Option<Vec<String>>,
    /// Never empty for an emitted record.
    pub roas: Vec<RouteRecord>,
    pub interactions: Option<Vec<Interaction>>,
}

/// A combo risk entry labelled with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    #[serde(flatten)]
    pub risk: ComboRisk,
}
