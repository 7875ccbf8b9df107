//! Tests for the wiki cache file.

use std::fs;

use drugdex_ingest::{IngestError, load_cache, save_cache};
use drugdex_model::{PwSubstance, RouteDuration, RouteRecord};
use tempfile::tempdir;

fn lsd() -> PwSubstance {
    PwSubstance {
        url: "https://psychonautwiki.org/wiki/LSD".to_string(),
        name: "LSD".to_string(),
        aliases: vec!["Acid".to_string()],
        roas: vec![RouteRecord {
            name: "Sublingual".to_string(),
            dose: None,
            duration: Some(RouteDuration::default()),
        }],
        ..PwSubstance::default()
    }
}

#[test]
fn missing_cache_is_none() {
    let dir = tempdir().unwrap();
    let loaded = load_cache(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn saved_cache_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");
    save_cache(&path, &[lsd()]).unwrap();

    let loaded = load_cache(&path).unwrap().expect("records");
    assert_eq!(loaded, vec![lsd()]);
}

#[test]
fn empty_cache_means_fetch_again() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");
    fs::write(&path, "[]").unwrap();
    assert!(load_cache(&path).unwrap().is_none());
}

#[test]
fn corrupt_cache_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");
    fs::write(&path, "{ not json").unwrap();
    let error = load_cache(&path).unwrap_err();
    assert!(matches!(error, IngestError::CacheFormat { .. }));
}
