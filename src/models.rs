//! Data structures produced while packaging extensions.

use std::path::PathBuf;

use serde_json::{Map, Value};

/// Browser-specific manifest and the resources it references, before anything is written.
#[derive(Debug, Clone)]
pub struct TargetPlan {
  /// Browser identifier the manifest was filtered for.
  pub browser: String,
  /// Filtered manifest with the version injected.
  pub manifest: Map<String, Value>,
  /// Resource paths discovered in the filtered manifest.
  pub resources: Vec<String>,
}

/// Artifacts written for one browser target.
#[derive(Debug, Clone)]
pub struct TargetArtifacts {
  /// Browser identifier.
  pub browser: String,
  /// Unpacked extension directory.
  pub directory: PathBuf,
  /// Zip archive holding the same files.
  pub archive: PathBuf,
  /// Resource paths copied next to the manifest.
  pub resources: Vec<String>,
}

/// Summary of a complete packaging run.
#[derive(Debug, Clone)]
pub struct PackageReport {
  /// Version injected into every manifest.
  pub version: String,
  /// Per-target artifacts in build order.
  pub targets: Vec<TargetArtifacts>,
}
