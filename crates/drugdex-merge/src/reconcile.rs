//! The reconciliation walk.

use std::collections::{BTreeSet, HashSet};

use drugdex_model::{CanonicalSubstance, PwSubstance, TsSubstance};
use tracing::{debug, trace};

use crate::fields;
use crate::resolver::SourcePool;

/// Counters describing one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Distinct lowercased primary names walked.
    pub names_visited: usize,
    /// Names already claimed through another record's alias.
    pub unmatched: usize,
    pub emitted: usize,
    /// Merged records with no route carrying duration data.
    pub dropped_without_routes: usize,
    /// Records whose display name was already emitted.
    pub duplicate_names: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub substances: Vec<CanonicalSubstance>,
    pub stats: ReconcileStats,
}

/// Merge both record lists into one record per substance, ordered by
/// lowercased primary name.
///
/// Each record is claimed at most once. A record that several names match
/// belongs to whichever name sorts first.
pub fn reconcile(wiki: Vec<PwSubstance>, factsheets: Vec<TsSubstance>) -> Reconciliation {
    let mut wiki = SourcePool::new(wiki);
    let mut factsheets = SourcePool::new(factsheets);
    let names: BTreeSet<String> = wiki
        .primary_names()
        .chain(factsheets.primary_names())
        .collect();

    let mut stats = ReconcileStats::default();
    let mut substances = Vec::new();
    let mut emitted_names = HashSet::new();

    for name in &names {
        stats.names_visited += 1;
        let pw = wiki.find_and_consume(name);
        let ts = factsheets.find_and_consume(name);
        if pw.is_none() && ts.is_none() {
            trace!(%name, "already claimed by another record");
            stats.unmatched += 1;
            continue;
        }

        let Some(substance) = merge_substance(name, pw, ts.as_ref()) else {
            debug!(%name, "dropped, no route with duration data");
            stats.dropped_without_routes += 1;
            continue;
        };

        if !emitted_names.insert(substance.name.to_lowercase()) {
            debug!(%name, display_name = %substance.name, "dropped, display name already emitted");
            stats.duplicate_names += 1;
            continue;
        }

        stats.emitted += 1;
        substances.push(substance);
    }

    debug!(
        names = stats.names_visited,
        emitted = stats.emitted,
        wiki_left = wiki.remaining(),
        factsheets_left = factsheets.remaining(),
        "reconciliation finished"
    );
    Reconciliation { substances, stats }
}

/// Build the canonical record for one name from whatever each source matched.
///
/// Returns `None` when no route carries duration data.
pub fn merge_substance(
    key: &str,
    pw: Option<PwSubstance>,
    ts: Option<&TsSubstance>,
) -> Option<CanonicalSubstance> {
    let url = fields::substance_url(pw.as_ref(), ts, key);
    let name = fields::display_name(pw.as_ref(), ts, key);
    let aliases = fields::merge_aliases(pw.as_ref(), ts, &name);

    let properties = ts.map(|ts| &ts.properties);
    let summary = fields::clean_text(properties.and_then(|p| p.summary.as_deref()));
    let reagents = fields::clean_text(properties.and_then(|p| p.test_kits.as_deref()));
    if let Some(text) = fields::clean_text(properties.and_then(|p| p.bioavailability.as_deref())) {
        let bioavailability = fields::parse_bioavailability(&text);
        trace!(%name, ?bioavailability, "parsed bioavailability");
    }

    let experiences_url = ts
        .and_then(|ts| ts.links.as_ref())
        .and_then(|links| links.experiences.clone());
    let interactions = fields::build_interactions(ts.and_then(|ts| ts.combos.as_ref()));

    let pw = pw.unwrap_or_default();
    let roas = fields::usable_routes(pw.roas);
    if roas.is_empty() {
        return None;
    }

    Some(CanonicalSubstance {
        url,
        experiences_url,
        name,
        aliases_str: aliases.join(","),
        aliases,
        summary,
        reagents,
        classes: pw.classes,
        toxicity: pw.toxicity,
        addiction_potential: pw.addiction_potential,
        tolerance: pw.tolerance,
        cross_tolerances: pw.cross_tolerances,
        roas,
        interactions,
    })
}
