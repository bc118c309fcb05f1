//! Resolved filesystem layout and static configuration for one packaging run.

use std::path::PathBuf;

use crate::browsers::KnownBrowsers;
use crate::resources::ResourceMatcher;

/// Absolute locations and immutable settings consumed by [`crate::Packager`].
#[derive(Debug, Clone)]
pub struct ProjectLayout {
  /// Base manifest, possibly containing comments.
  pub manifest_path: PathBuf,
  /// Directory every manifest resource path is resolved against.
  pub source_root: PathBuf,
  /// Metadata file providing the extension version.
  pub package_json_path: PathBuf,
  /// Directory receiving one unpacked directory and one archive per browser.
  pub output_dir: PathBuf,
  /// Browser targets, in build order.
  pub browsers: KnownBrowsers,
  /// Rules deciding which manifest strings are bundled files.
  pub resources: ResourceMatcher,
  /// Indent width of the rendered manifest.
  pub manifest_indent: usize,
}

impl ProjectLayout {
  /// Directory holding the unpacked extension for `browser`.
  pub fn target_dir(&self, browser: &str) -> PathBuf {
    self.output_dir.join(browser)
  }

  /// Path of the zip archive for `browser`.
  pub fn archive_path(&self, browser: &str) -> PathBuf {
    self.output_dir.join(format!("{browser}.zip"))
  }
}
