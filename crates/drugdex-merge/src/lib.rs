//! Reconciliation of PsychonautWiki records and TripSit factsheets into one
//! canonical record per substance.

pub mod fields;
pub mod reconcile;
pub mod resolver;
pub mod route;

pub use reconcile::{ReconcileStats, Reconciliation, merge_substance, reconcile};
pub use resolver::{SourcePool, SubstanceNames, matches};
pub use route::{find_route, roa_matches_name};
