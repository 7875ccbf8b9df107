//! Route label lookup with a fixed synonym table.
//!
//! The merge keeps wiki route labels as published. These helpers are for
//! consumers that look up a dose by a canonical route name.

use drugdex_model::RouteRecord;

/// Pairs of interchangeable route labels, lowercase.
const ROUTE_SYNONYMS: &[(&str, &str)] = &[
    ("iv", "intravenous"),
    ("im", "intramuscular"),
    ("insufflated", "snorted"),
    ("vaporized", "vapourized"),
];

fn synonyms_of(name: &str) -> impl Iterator<Item = &'static str> + '_ {
    ROUTE_SYNONYMS.iter().filter_map(move |&(left, right)| {
        if left == name {
            Some(right)
        } else if right == name {
            Some(left)
        } else {
            None
        }
    })
}

/// True when the route's label is `name` or one of its synonyms, ignoring case.
pub fn roa_matches_name(route: &RouteRecord, name: &str) -> bool {
    let wanted = name.to_lowercase();
    let label = route.name.to_lowercase();
    label == wanted || synonyms_of(&wanted).any(|synonym| synonym == label)
}

/// First route answering to `name`.
pub fn find_route<'a>(routes: &'a [RouteRecord], name: &str) -> Option<&'a RouteRecord> {
    routes.iter().find(|route| roa_matches_name(route, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str) -> RouteRecord {
        RouteRecord {
            name: name.to_string(),
            ..RouteRecord::default()
        }
    }

    #[test]
    fn synonyms_work_in_both_directions() {
        assert!(roa_matches_name(&route("Intravenous"), "IV"));
        assert!(roa_matches_name(&route("IV"), "intravenous"));
        assert!(roa_matches_name(&route("Insufflated"), "snorted"));
        assert!(roa_matches_name(&route("Vapourized"), "Vaporized"));
        assert!(roa_matches_name(&route("IM"), "Intramuscular"));
    }

    #[test]
    fn unrelated_routes_do_not_match() {
        assert!(roa_matches_name(&route("Oral"), "oral"));
        assert!(!roa_matches_name(&route("Oral"), "sublingual"));
        assert!(!roa_matches_name(&route("Intravenous"), "im"));
    }

    #[test]
    fn find_route_returns_first_match() {
        let routes = vec![route("Oral"), route("Insufflated"), route("Snorted")];
        let found = find_route(&routes, "snorted").expect("route");
        assert_eq!(found.name, "Insufflated");
        assert!(find_route(&routes, "rectal").is_none());
    }
}
