//! On-disk cache of wiki records.
//!
//! A non-empty cache file replaces the whole wiki fetch phase.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use drugdex_model::PwSubstance;
use tracing::info;

use crate::error::{IngestError, Result};

pub const DEFAULT_CACHE_FILE: &str = "_cached_pw_substances.json";

/// Load cached records. `None` when the file is missing or holds no records.
pub fn load_cache(path: &Path) -> Result<Option<Vec<PwSubstance>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(IngestError::CacheIo {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let records: Vec<PwSubstance> =
        serde_json::from_str(&text).map_err(|source| IngestError::CacheFormat {
            path: path.to_path_buf(),
            source,
        })?;
    if records.is_empty() {
        return Ok(None);
    }
    info!(path = %path.display(), count = records.len(), "loaded wiki cache");
    Ok(Some(records))
}

/// Write records so a later run can skip the wiki fetch.
pub fn save_cache(path: &Path, records: &[PwSubstance]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| IngestError::CacheFormat {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| IngestError::CacheIo {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = records.len(), "wrote wiki cache");
    Ok(())
}
