//! Loading, versioning and rendering of the authored extension manifest.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use json_comments::StripComments;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{PackageError, PackageResult};

/// File name of the rendered manifest inside every package.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Load a JSON-with-comments manifest from disk.
pub fn load_manifest(path: &Path) -> PackageResult<Map<String, Value>> {
  let file = File::open(path).map_err(|err| PackageError::io(path, err))?;
  let reader = StripComments::new(BufReader::new(file));
  let value: Value = serde_json::from_reader(reader).map_err(|source| PackageError::Json {
    path: path.to_path_buf(),
    source,
  })?;

  match value {
    Value::Object(manifest) => Ok(manifest),
    _ => Err(PackageError::ManifestShape {
      path: path.to_path_buf(),
    }),
  }
}

/// Set the manifest `version`, keeping the key's position when it already exists.
pub fn inject_version(manifest: &mut Map<String, Value>, version: &str) {
  manifest.insert("version".to_string(), Value::String(version.to_string()));
}

/// Serialise a manifest as pretty-printed JSON indented by `indent` spaces.
pub fn render_manifest(manifest: &Map<String, Value>, indent: usize) -> PackageResult<Vec<u8>> {
  let indent = " ".repeat(indent);
  let mut buffer = Vec::new();
  let mut serializer =
    serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
  manifest
    .serialize(&mut serializer)
    .map_err(|source| PackageError::Json {
      path: MANIFEST_FILE_NAME.into(),
      source,
    })?;
  Ok(buffer)
}
