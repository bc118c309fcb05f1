//! Project configuration loader describing where the manifest lives and what to build.

use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::browsers::KnownBrowsers;
use crate::project::ProjectLayout;
use crate::resources::ResourceMatcher;

/// Default configuration file searched for in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "webext.config.json";

/// Discoverable project configuration describing inputs, outputs and targets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackagerConfig {
  /// Path from the project root to the JSON-with-comments base manifest.
  pub manifest_path: String,
  /// Path from the project root to the metadata file providing the version.
  pub package_json_path: String,
  /// Directory, relative to the project root, receiving the packages.
  pub output_dir: String,
  /// Browser identifiers to package for, in build order.
  pub browsers: Vec<String>,
  /// Filename suffixes of manifest values that should be bundled.
  pub resource_extensions: Vec<String>,
  /// Number of spaces used to indent the rendered `manifest.json`.
  pub manifest_indent: usize,
}

impl Default for PackagerConfig {
  fn default() -> Self {
    Self {
      manifest_path: "src/manifest.jsonc".into(),
      package_json_path: "package.json".into(),
      output_dir: "packages".into(),
      browsers: KnownBrowsers::default().iter().map(str::to_string).collect(),
      resource_extensions: ResourceMatcher::default().extensions().to_vec(),
      manifest_indent: 4,
    }
  }
}

impl PackagerConfig {
  /// Attempt to load configuration from the provided project directory.
  ///
  /// A missing or unparsable configuration file falls back to the defaults.
  pub fn discover(project_root: &Path) -> Self {
    let candidate = project_root.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Self::default();
    }

    Self::from_path(&candidate).unwrap_or_else(|| {
      warn!(
        "ignoring unreadable configuration at {}, using defaults",
        candidate.display()
      );
      Self::default()
    })
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Resolve the configuration against `project_root`.
  pub fn into_layout(self, project_root: &Path) -> ProjectLayout {
    let manifest_path = project_root.join(&self.manifest_path);
    let source_root = manifest_path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| project_root.to_path_buf());

    let mut browsers = KnownBrowsers::new(&self.browsers);
    if browsers.is_empty() {
      warn!("no browsers configured, falling back to the default targets");
      browsers = KnownBrowsers::default();
    }

    ProjectLayout {
      manifest_path,
      source_root,
      package_json_path: project_root.join(&self.package_json_path),
      output_dir: project_root.join(&self.output_dir),
      browsers,
      resources: ResourceMatcher::new(self.resource_extensions),
      manifest_indent: self.manifest_indent,
    }
  }
}
