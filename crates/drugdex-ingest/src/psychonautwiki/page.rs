//! Wiki page parsing: title, skip rules and common names.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const ROUTES_HEADING: &str = "Routes of Administration";
const COMMON_NAMES_LABEL: &str = "Common names";
const EXPERIENCE_PREFIX: &str = "Experience:";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1#firstHeading").expect("Invalid title selector"));

static CITATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""?\[\d*\]$"#).expect("Invalid citation regex"));

static MORE_NAMES_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*More names\.$").expect("Invalid more-names regex"));

/// Why a listed page is not a substance page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    ExperienceReport,
    NoRoutes,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingTitle => "page has no title",
            Self::ExperienceReport => "experience report",
            Self::NoRoutes => "no routes of administration section",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Skip {
        title: Option<String>,
        reason: SkipReason,
    },
    Substance {
        title: String,
        /// Cleaned names from the "Common names" row, in page order.
        common_names: Vec<String>,
    },
}

/// Decide whether a page describes a substance and pull out its names.
pub fn classify_page(html: &str) -> PageOutcome {
    let document = Html::parse_document(html);
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let Some(title) = title else {
        return PageOutcome::Skip {
            title: None,
            reason: SkipReason::MissingTitle,
        };
    };
    if title.starts_with(EXPERIENCE_PREFIX) {
        return PageOutcome::Skip {
            title: Some(title),
            reason: SkipReason::ExperienceReport,
        };
    }
    if !has_text(&document, ROUTES_HEADING) {
        return PageOutcome::Skip {
            title: Some(title),
            reason: SkipReason::NoRoutes,
        };
    }

    PageOutcome::Substance {
        title,
        common_names: common_names(&document),
    }
}

fn has_text(document: &Html, needle: &str) -> bool {
    document
        .tree
        .nodes()
        .any(|node| node.value().as_text().is_some_and(|text| text.trim() == needle))
}

/// Names in the table cell that follows the "Common names" label.
fn common_names(document: &Html) -> Vec<String> {
    let Some(label) = document.tree.nodes().find(|node| {
        node.value()
            .as_text()
            .is_some_and(|text| text.trim() == COMMON_NAMES_LABEL)
    }) else {
        return Vec::new();
    };
    let cell = label
        .parent()
        .into_iter()
        .flat_map(|parent| parent.next_siblings())
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "td");
    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.text()
        .collect::<String>()
        .split(", ")
        .map(clean_common_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Strip quotes, citation marks and the "More names." link text.
pub fn clean_common_name(raw: &str) -> String {
    let name = raw.strip_prefix('"').unwrap_or(raw);
    let name = name.strip_suffix('"').unwrap_or(name);
    let name = CITATION_SUFFIX.replace(name, "");
    let name = MORE_NAMES_SUFFIX.replace(&name, "");
    let name: &str = &name;
    name.strip_suffix('.').unwrap_or(name).trim().to_string()
}

/// Alias list for a page: common names plus the API name, minus the title.
pub fn page_aliases(common_names: Vec<String>, listed_name: &str, title: &str) -> Vec<String> {
    let mut names: BTreeSet<String> = common_names.into_iter().collect();
    names.insert(listed_name.to_string());
    names.remove(title);
    names.into_iter().collect()
}
