//! Package metadata (`package.json`) supplying the extension version.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{PackageError, PackageResult};

/// Read the non-empty string `version` field from a `package.json` style file.
pub fn read_version(path: &Path) -> PackageResult<String> {
  let content = fs::read_to_string(path).map_err(|err| PackageError::io(path, err))?;
  let metadata: Value = serde_json::from_str(&content).map_err(|source| PackageError::Json {
    path: path.to_path_buf(),
    source,
  })?;

  metadata
    .get("version")
    .and_then(Value::as_str)
    .filter(|version| !version.is_empty())
    .map(str::to_string)
    .ok_or_else(|| PackageError::InvalidVersion {
      path: path.to_path_buf(),
    })
}
