//! Error type shared by the packaging pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the library.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can abort a packaging run.
#[derive(Debug, Error)]
pub enum PackageError {
  /// Package metadata does not declare a usable version.
  #[error("no version found in {}", path.display())]
  InvalidVersion {
    /// Metadata file that was inspected.
    path: PathBuf,
  },
  /// A resource referenced by the manifest could not be read.
  #[error("manifest resource {resource} could not be read from {}", path.display())]
  MissingResource {
    /// Resource path exactly as it appears in the manifest.
    resource: String,
    /// Resolved source path.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },
  /// Generic filesystem failure outside of resource copying.
  #[error("failed to access {}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// A JSON document could not be parsed or rendered.
  #[error("failed to process JSON in {}", path.display())]
  Json {
    /// Path of the offending document.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
  /// The manifest parsed, but its top level is not an object.
  #[error("manifest {} must contain a JSON object at the top level", path.display())]
  ManifestShape {
    /// Manifest path.
    path: PathBuf,
  },
  /// The zip writer rejected an entry or failed to finish.
  #[error("failed to build archive entry {entry}")]
  Archive {
    /// Entry being written when the failure happened.
    entry: String,
    /// Source archive error.
    #[source]
    source: zip::result::ZipError,
  },
  /// A requested browser is not part of the configured set.
  #[error("unknown browser target {0:?}")]
  UnknownBrowser(String),
}

impl PackageError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
