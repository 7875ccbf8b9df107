//! Case-insensitive name matching and consume-once lookup.

use std::collections::{BTreeSet, HashMap};

use drugdex_model::{PwSubstance, TsSubstance};

/// Names a source record answers to.
pub trait SubstanceNames {
    /// The key the iteration name set is built from.
    fn primary_name(&self) -> Option<&str>;

    /// Primary name, display name and aliases, as published.
    fn match_names(&self) -> impl Iterator<Item = &str>;
}

impl SubstanceNames for PwSubstance {
    fn primary_name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|name| !name.is_empty())
    }

    fn match_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl SubstanceNames for TsSubstance {
    fn primary_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn match_names(&self) -> impl Iterator<Item = &str> {
        self.name
            .as_deref()
            .into_iter()
            .chain(self.pretty_name.as_deref())
            .chain(self.aliases.iter().flatten().map(String::as_str))
    }
}

/// True when `name` equals any of the record's names, ignoring case.
pub fn matches<R: SubstanceNames>(name: &str, record: &R) -> bool {
    let wanted = name.to_lowercase();
    record
        .match_names()
        .any(|candidate| candidate.to_lowercase() == wanted)
}

/// Records of one source, each handed out at most once.
///
/// Lookups behave like a linear scan in source order: the first remaining
/// record that [`matches`] wins and is removed from the pool.
#[derive(Debug, Clone)]
pub struct SourcePool<R> {
    slots: Vec<Option<R>>,
    /// Lowercased name to slot positions, ascending.
    index: HashMap<String, Vec<usize>>,
}

impl<R: SubstanceNames> SourcePool<R> {
    pub fn new(records: Vec<R>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            let keys: BTreeSet<String> = record.match_names().map(str::to_lowercase).collect();
            for key in keys {
                index.entry(key).or_default().push(position);
            }
        }
        Self {
            slots: records.into_iter().map(Some).collect(),
            index,
        }
    }

    /// Lowercased primary names of the records still in the pool.
    pub fn primary_names(&self) -> impl Iterator<Item = String> + '_ {
        self.slots
            .iter()
            .flatten()
            .filter_map(SubstanceNames::primary_name)
            .map(str::to_lowercase)
    }

    /// Remove and return the first remaining record matching `name`.
    pub fn find_and_consume(&mut self, name: &str) -> Option<R> {
        let candidates = self.index.get(&name.to_lowercase())?;
        let position = candidates
            .iter()
            .copied()
            .find(|&position| self.slots[position].is_some())?;
        self.slots[position].take()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki(name: &str, aliases: &[&str]) -> PwSubstance {
        PwSubstance {
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            ..PwSubstance::default()
        }
    }

    fn factsheet(name: &str, pretty_name: Option<&str>) -> TsSubstance {
        TsSubstance {
            name: Some(name.to_string()),
            pretty_name: pretty_name.map(str::to_string),
            ..TsSubstance::default()
        }
    }

    #[test]
    fn matches_name_alias_and_pretty_name_ignoring_case() {
        let lsd = wiki("LSD", &["Acid", "Lucy"]);
        assert!(matches("lsd", &lsd));
        assert!(matches("ACID", &lsd));
        assert!(!matches("mdma", &lsd));

        let sheet = factsheet("2c-b", Some("2C-B"));
        assert!(matches("2C-b", &sheet));
        assert!(!matches("2c", &sheet));
    }

    #[test]
    fn consumed_record_is_not_returned_again() {
        let mut pool = SourcePool::new(vec![wiki("LSD", &["Acid"])]);
        assert!(pool.find_and_consume("acid").is_some());
        assert!(pool.find_and_consume("lsd").is_none());
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn first_match_in_source_order_wins() {
        let mut pool = SourcePool::new(vec![
            wiki("Molly", &["MDMA"]),
            wiki("MDMA", &[]),
        ]);
        let first = pool.find_and_consume("mdma").expect("first match");
        assert_eq!(first.name, "Molly");
        let second = pool.find_and_consume("mdma").expect("second match");
        assert_eq!(second.name, "MDMA");
    }

    #[test]
    fn primary_names_skip_consumed_and_blank_records() {
        let mut pool = SourcePool::new(vec![
            factsheet("lsd", None),
            factsheet("", Some("Blank")),
            factsheet("DMT", None),
        ]);
        pool.find_and_consume("lsd");
        let names: Vec<String> = pool.primary_names().collect();
        assert_eq!(names, vec!["dmt".to_string()]);
    }
}
