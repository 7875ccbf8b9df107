//! Property tests for matching and reconciliation.

use std::collections::HashSet;

use drugdex_merge::{SourcePool, SubstanceNames, matches, reconcile};
use drugdex_model::{DurationPhase, PwSubstance, RouteDuration, RouteRecord, TsSubstance};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn route(name: String, timed: bool) -> RouteRecord {
    RouteRecord {
        name,
        dose: None,
        duration: timed.then(|| RouteDuration {
            onset: Some(DurationPhase::default()),
            ..RouteDuration::default()
        }),
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-dA-D]{1,3}"
}

fn wiki_strategy() -> impl Strategy<Value = PwSubstance> {
    (
        name_strategy(),
        prop::collection::vec(name_strategy(), 0..3),
        prop::collection::vec((name_strategy(), any::<bool>()), 0..3),
    )
        .prop_map(|(name, aliases, routes)| PwSubstance {
            url: format!("https://psychonautwiki.org/wiki/{name}"),
            name,
            aliases,
            roas: routes
                .into_iter()
                .map(|(label, timed)| route(label, timed))
                .collect(),
            ..PwSubstance::default()
        })
}

fn factsheet_strategy() -> impl Strategy<Value = TsSubstance> {
    (
        name_strategy(),
        prop::option::of(name_strategy()),
        prop::option::of(prop::collection::vec(name_strategy(), 0..3)),
    )
        .prop_map(|(name, pretty_name, aliases)| TsSubstance {
            name: Some(name),
            pretty_name,
            aliases,
            ..TsSubstance::default()
        })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn every_published_name_matches_in_any_case(record in factsheet_strategy()) {
        let names: Vec<String> = record.match_names().map(str::to_string).collect();
        for name in names {
            prop_assert!(matches(&name.to_uppercase(), &record));
            prop_assert!(matches(&name.to_lowercase(), &record));
        }
        prop_assert!(!matches("unrelated-0", &record));
    }

    #[test]
    fn a_record_is_consumed_at_most_once(
        record in wiki_strategy(),
        lookups in prop::collection::vec(name_strategy(), 1..6),
    ) {
        let mut pool = SourcePool::new(vec![record]);
        let found = lookups
            .iter()
            .filter_map(|name| pool.find_and_consume(name))
            .count();
        prop_assert!(found <= 1);
        prop_assert_eq!(pool.remaining(), 1 - found);
    }

    #[test]
    fn emitted_records_are_well_formed(
        wiki in prop::collection::vec(wiki_strategy(), 0..8),
        factsheets in prop::collection::vec(factsheet_strategy(), 0..8),
    ) {
        let result = reconcile(wiki, factsheets);
        let mut seen = HashSet::new();
        for substance in &result.substances {
            prop_assert!(seen.insert(substance.name.to_lowercase()));
            prop_assert!(!substance.roas.is_empty());
            prop_assert!(substance.roas.iter().all(RouteRecord::has_duration));
            prop_assert!(!substance.aliases.contains(&substance.name.to_lowercase()));
            prop_assert_eq!(&substance.aliases_str, &substance.aliases.join(","));
        }
        prop_assert_eq!(result.stats.emitted, result.substances.len());
    }

    #[test]
    fn reconciliation_is_deterministic(
        wiki in prop::collection::vec(wiki_strategy(), 0..8),
        factsheets in prop::collection::vec(factsheet_strategy(), 0..8),
    ) {
        let first = reconcile(wiki.clone(), factsheets.clone());
        let second = reconcile(wiki, factsheets);
        let first_json = serde_json::to_string(&first.substances).expect("serialize");
        let second_json = serde_json::to_string(&second.substances).expect("serialize");
        prop_assert_eq!(first_json, second_json);
        prop_assert_eq!(first.stats, second.stats);
    }
}
