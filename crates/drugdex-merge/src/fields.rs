//! Per-field merge policies. All of them are pure.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use drugdex_model::{ComboRisk, Interaction, PwSubstance, RouteRecord, TsSubstance};
use regex::Regex;
use tracing::warn;

/// Factsheet page prefix for substances the wiki does not know.
pub const FACTSHEET_URL_BASE: &str = "https://drugs.tripsit.me";

/// Combo keys that duplicate another key.
pub const COMBO_IGNORE: &[&str] = &["benzos"];

/// Display names for the factsheet combo vocabulary.
pub const COMBO_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("lsd", "LSD"),
    ("mushrooms", "Mushrooms"),
    ("dmt", "DMT"),
    ("mescaline", "Mescaline"),
    ("dox", "DOx"),
    ("nbomes", "NBOMes"),
    ("2c-x", "2C-x"),
    ("2c-t-x", "2C-T-x"),
    ("amt", "aMT"),
    ("5-meo-xxt", "5-MeO-xxT"),
    ("cannabis", "Cannabis"),
    ("ketamine", "Ketamine"),
    ("mxe", "MXE"),
    ("dxm", "DXM"),
    ("pcp", "PCP"),
    ("nitrous", "Nitrous"),
    ("amphetamines", "Amphetamines"),
    ("mdma", "MDMA"),
    ("cocaine", "Cocaine"),
    ("caffeine", "Caffeine"),
    ("alcohol", "Alcohol"),
    ("ghb/gbl", "GHB/GBL"),
    ("opioids", "Opioids"),
    ("tramadol", "Tramadol"),
    ("benzodiazepines", "Benzodiazepines"),
    ("maois", "MAOIs"),
    ("ssris", "SSRIs"),
];

static BIOAVAILABILITY_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z/]+)[.:\s]+([0-9.%\s+/-]+)").expect("Invalid bioavailability regex")
});

#[must_use]
pub fn combo_display_name(key: &str) -> Option<&'static str> {
    COMBO_DISPLAY_NAMES
        .iter()
        .find(|(combo_key, _)| *combo_key == key)
        .map(|(_, display)| *display)
}

/// The wiki URL, else the factsheet page for the factsheet key.
pub fn substance_url(pw: Option<&PwSubstance>, ts: Option<&TsSubstance>, key: &str) -> String {
    if let Some(url) = pw.map(|pw| pw.url.as_str()).filter(|url| !url.is_empty()) {
        return url.to_string();
    }
    let slug = ts
        .and_then(|ts| ts.name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(key);
    format!("{FACTSHEET_URL_BASE}/{slug}")
}

/// The shorter of the wiki name and the factsheet pretty name.
///
/// Ties go to the wiki. Without either, the factsheet key, then `key`.
pub fn display_name(pw: Option<&PwSubstance>, ts: Option<&TsSubstance>, key: &str) -> String {
    let candidates = [
        pw.map(|pw| pw.name.as_str()),
        ts.and_then(|ts| ts.pretty_name.as_deref()),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .min_by_key(|name| name.chars().count())
        .or_else(|| ts.and_then(|ts| ts.name.as_deref()).filter(|name| !name.is_empty()))
        .unwrap_or(key)
        .to_string()
}

/// Every known name, lowercased and sorted, without the display name.
pub fn merge_aliases(
    pw: Option<&PwSubstance>,
    ts: Option<&TsSubstance>,
    display_name: &str,
) -> Vec<String> {
    let mut names: BTreeSet<String> = pw
        .map(|pw| pw.name.as_str())
        .into_iter()
        .chain(ts.and_then(|ts| ts.pretty_name.as_deref()))
        .chain(pw.into_iter().flat_map(|pw| pw.aliases.iter().map(String::as_str)))
        .chain(
            ts.and_then(|ts| ts.aliases.as_ref())
                .into_iter()
                .flatten()
                .map(String::as_str),
        )
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect();
    names.remove(&display_name.to_lowercase());
    names.into_iter().collect()
}

/// Trimmed text, `None` when blank.
#[must_use]
pub fn clean_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Parse `"Oral: 60-70%, IV: 100%"` into `{"oral": "60-70%", "iv": "100%"}`.
#[must_use]
pub fn parse_bioavailability(text: &str) -> BTreeMap<String, String> {
    BIOAVAILABILITY_ENTRY
        .captures_iter(text.trim())
        .map(|captures| {
            let route = captures[1].to_lowercase();
            let value = captures[2]
                .trim_matches(|c| matches!(c, '.' | ' ' | '\t'))
                .to_string();
            (route, value)
        })
        .collect()
}

/// Named combo entries sorted by display name. `None` without combo data.
pub fn build_interactions(combos: Option<&BTreeMap<String, ComboRisk>>) -> Option<Vec<Interaction>> {
    let combos = combos.filter(|combos| !combos.is_empty())?;
    let mut interactions: Vec<Interaction> = combos
        .iter()
        .filter(|(key, _)| !COMBO_IGNORE.contains(&key.as_str()))
        .map(|(key, risk)| {
            let name = combo_display_name(key).map_or_else(
                || {
                    warn!(combo = %key, "no display name for combo key");
                    key.clone()
                },
                str::to_string,
            );
            let mut risk = risk.clone();
            risk.extra.remove("name");
            Interaction { name, risk }
        })
        .collect();
    interactions.sort_by(|left, right| left.name.cmp(&right.name));
    Some(interactions)
}

/// Routes that carry duration data.
#[must_use]
pub fn usable_routes(routes: Vec<RouteRecord>) -> Vec<RouteRecord> {
    routes.into_iter().filter(RouteRecord::has_duration).collect()
}
