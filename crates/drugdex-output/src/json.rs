//! Pretty JSON array output.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use drugdex_model::CanonicalSubstance;
use tracing::info;

use crate::error::{OutputError, Result};

/// `substances_{unix_seconds}.json` in the working directory.
#[must_use]
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!("substances_{}.json", Utc::now().timestamp()))
}

/// Write the records as one pretty-printed UTF-8 JSON array.
///
/// The document is written to a sibling temp file first and renamed over
/// `path`, so an existing file is never left half-written. The temp file is
/// removed again when any step after its creation fails.
pub fn write_substances(path: &Path, substances: &[CanonicalSubstance]) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(substances)?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    if let Err(error) = replace_with(&temp_path, path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    info!(path = %path.display(), count = substances.len(), "wrote substances");
    Ok(())
}

/// Write `bytes` to `temp_path`, flush it to disk, then move it to `path`.
fn replace_with(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|source| OutputError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;
    file.write_all(bytes).map_err(|source| OutputError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source,
    })?;
    file.sync_all().map_err(|source| OutputError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })?;
    drop(file);

    fs::rename(temp_path, path).map_err(|source| OutputError::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_embeds_timestamp() {
        let path = default_output_path();
        let name = path.to_string_lossy().into_owned();
        let stamp = name
            .strip_prefix("substances_")
            .and_then(|rest| rest.strip_suffix(".json"))
            .expect("substances_<ts>.json");
        assert!(stamp.parse::<i64>().expect("numeric timestamp") > 0);
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path_for(Path::new("out/substances.json")),
            PathBuf::from("out/substances.json.tmp")
        );
    }
}
