//! Reads the package version recorded in a `codemeta.json` file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

pub const CODEMETA_FILE: &str = "codemeta.json";

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("The file '{0}' was not found.")]
    NotFound(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The file '{path}' could not be decoded as JSON: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Version not found in '{0}'")]
    MissingVersion(PathBuf),
}

/// Return the top-level `version` of the JSON document at `path`.
///
/// Non-string versions (e.g. a bare number) are rendered as JSON text.
pub fn extract_version_from_file(path: impl AsRef<Path>) -> Result<String, VersionError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            VersionError::NotFound(path.to_path_buf())
        } else {
            VersionError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let doc: Value = serde_json::from_str(&raw).map_err(|source| VersionError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    match doc.get("version") {
        Some(Value::String(v)) => Ok(v.clone()),
        Some(Value::Null) | None => Err(VersionError::MissingVersion(path.to_path_buf())),
        Some(other) => Ok(other.to_string()),
    }
}
