//! Tests for the JSON writer.

use std::fs;

use drugdex_model::{CanonicalSubstance, RouteDuration, RouteRecord};
use drugdex_output::write_substances;
use tempfile::TempDir;

fn substance(name: &str) -> CanonicalSubstance {
    CanonicalSubstance {
        url: format!("https://psychonautwiki.org/wiki/{name}"),
        experiences_url: None,
        name: name.to_string(),
        aliases: vec!["acid".to_string(), "lucy".to_string()],
        aliases_str: "acid,lucy".to_string(),
        summary: None,
        reagents: None,
        classes: None,
        toxicity: None,
        addiction_potential: None,
        tolerance: None,
        cross_tolerances: None,
        roas: vec![RouteRecord {
            name: "Oral".to_string(),
            dose: None,
            duration: Some(RouteDuration::default()),
        }],
        interactions: None,
    }
}

#[test]
fn writes_pretty_array_in_field_order() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("substances.json");

    write_substances(&path, &[substance("LSD")]).expect("write");

    let text = fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("[\n  {\n    \"url\""));
    let keys: Vec<usize> = [
        "\"url\"",
        "\"experiencesUrl\"",
        "\"name\"",
        "\"aliases\"",
        "\"aliasesStr\"",
        "\"summary\"",
        "\"reagents\"",
        "\"classes\"",
        "\"toxicity\"",
        "\"addictionPotential\"",
        "\"tolerance\"",
        "\"crossTolerances\"",
        "\"roas\"",
        "\"interactions\"",
    ]
    .iter()
    .map(|key| text.find(key).expect("key present"))
    .collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(text.contains("\"experiencesUrl\": null"));

    let parsed: Vec<CanonicalSubstance> = serde_json::from_str(&text).expect("parse back");
    assert_eq!(parsed, vec![substance("LSD")]);
    assert!(!dir.path().join("substances.json.tmp").exists());
}

#[test]
fn replaces_existing_file_and_creates_parents() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("out.json");

    write_substances(&path, &[substance("LSD"), substance("DMT")]).expect("first write");
    write_substances(&path, &[]).expect("second write");

    let text = fs::read_to_string(&path).expect("read back");
    assert_eq!(text.trim(), "[]");
}

#[test]
fn failed_replace_leaves_no_temp_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("out.json");
    fs::create_dir(&path).expect("directory in the way");
    fs::write(path.join("keep.txt"), "x").expect("fill directory");

    let error = write_substances(&path, &[substance("LSD")]).expect_err("rename onto a directory");

    assert!(error.to_string().starts_with("failed to rename"));
    assert!(!dir.path().join("out.json.tmp").exists());
    assert!(path.join("keep.txt").exists());
}
