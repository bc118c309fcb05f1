//! Copy the files a manifest references into a package destination.

use std::collections::BTreeSet;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::destination::Destination;
use crate::error::PackageResult;
use crate::resources::{
  ResourceMatcher, discover_resources, normalize_entry_name, relative_resource_path,
};

/// Discovers manifest resources and copies them into destinations.
#[derive(Debug, Clone, Copy)]
pub struct ResourceBundler<'a> {
  matcher: &'a ResourceMatcher,
}

impl<'a> ResourceBundler<'a> {
  /// Create a bundler recognising resources through `matcher`.
  pub fn new(matcher: &'a ResourceMatcher) -> Self {
    Self { matcher }
  }

  /// Resource paths referenced by `manifest`, in traversal order.
  pub fn discover(&self, manifest: &Map<String, Value>) -> Vec<String> {
    discover_resources(manifest, self.matcher)
  }

  /// Copy every resource referenced by `manifest` from `source_root` into `destination`.
  ///
  /// Leading separators are ignored, so `/popup.html` resolves below `source_root`. A file
  /// referenced several times is copied once. Stops at the first resource that cannot be
  /// read; entries copied before the failure are left in place. Returns the copied resource
  /// paths.
  pub fn copy_resources<D: Destination + ?Sized>(
    &self,
    manifest: &Map<String, Value>,
    source_root: &Path,
    destination: &mut D,
  ) -> PackageResult<Vec<String>> {
    let mut copied = Vec::new();
    let mut seen = BTreeSet::new();

    for resource in self.discover(manifest) {
      if !seen.insert(normalize_entry_name(&resource)) {
        continue;
      }

      let source = source_root.join(relative_resource_path(&resource));
      debug!("copying {resource} from {}", source.display());
      destination.copy_resource(&resource, &source)?;
      copied.push(resource);
    }

    Ok(copied)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::destination::{ArchiveSink, DirectorySink};
  use crate::error::PackageError;
  use serde_json::json;
  use std::fs;
  use std::io::{Cursor, Read};
  use tempfile::tempdir;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      other => panic!("expected object, got {other}"),
    }
  }

  fn source_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("icons")).unwrap();
    fs::write(dir.path().join("icons/48.png"), [0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap();
    dir
  }

  #[test]
  fn copies_single_resource_into_directory() {
    let source = source_tree();
    let out = tempdir().unwrap();
    let manifest = object(json!({ "name": "X", "icons": { "48": "icons/48.png" } }));
    let matcher = ResourceMatcher::default();

    let mut sink = DirectorySink::new(out.path());
    let copied = ResourceBundler::new(&matcher)
      .copy_resources(&manifest, source.path(), &mut sink)
      .unwrap();

    assert_eq!(copied, vec!["icons/48.png"]);
    assert_eq!(
      fs::read(out.path().join("icons/48.png")).unwrap(),
      fs::read(source.path().join("icons/48.png")).unwrap()
    );
    let entries: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
  }

  #[test]
  fn copies_single_resource_into_archive() {
    let source = source_tree();
    let manifest = object(json!({ "icons": { "48": "icons/48.png" } }));
    let matcher = ResourceMatcher::default();

    let mut sink = ArchiveSink::new();
    ResourceBundler::new(&matcher)
      .copy_resources(&manifest, source.path(), &mut sink)
      .unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(sink.finish().unwrap())).unwrap();
    assert_eq!(archive.len(), 1);
    let mut contents = Vec::new();
    archive
      .by_name("icons/48.png")
      .unwrap()
      .read_to_end(&mut contents)
      .unwrap();
    assert_eq!(contents, fs::read(source.path().join("icons/48.png")).unwrap());
  }

  #[test]
  fn missing_resource_aborts_the_copy() {
    let source = source_tree();
    let out = tempdir().unwrap();
    let manifest = object(json!({
      "a": "icons/48.png",
      "b": "missing.js",
      "c": "icons/48.png"
    }));
    let matcher = ResourceMatcher::default();

    let mut sink = DirectorySink::new(out.path().join("pkg"));
    let err = ResourceBundler::new(&matcher)
      .copy_resources(&manifest, source.path(), &mut sink)
      .unwrap_err();

    match err {
      PackageError::MissingResource { resource, path, .. } => {
        assert_eq!(resource, "missing.js");
        assert_eq!(path, source.path().join("missing.js"));
      }
      other => panic!("unexpected error: {other}"),
    }
    assert!(out.path().join("pkg/icons/48.png").exists());
  }

  #[test]
  fn repeated_resources_are_copied_once() {
    let source = source_tree();
    let manifest = object(json!({
      "icons": { "48": "icons/48.png" },
      "action": { "default_icon": { "48": "icons/48.png" } }
    }));
    let matcher = ResourceMatcher::default();
    let bundler = ResourceBundler::new(&matcher);

    let mut archive = ArchiveSink::new();
    let copied = bundler
      .copy_resources(&manifest, source.path(), &mut archive)
      .unwrap();
    assert_eq!(copied, vec!["icons/48.png"]);
    assert_eq!(archive.entries(), ["icons/48.png".to_string()]);

    let out = tempdir().unwrap();
    let mut directory = DirectorySink::new(out.path());
    bundler
      .copy_resources(&manifest, source.path(), &mut directory)
      .unwrap();
    assert!(out.path().join("icons/48.png").is_file());
  }

  #[test]
  fn rooted_resources_resolve_below_the_source_root() {
    let source = source_tree();
    fs::write(source.path().join("popup.html"), "<p>popup</p>").unwrap();
    let manifest = object(json!({ "action": { "default_popup": "/popup.html" } }));
    let matcher = ResourceMatcher::default();
    let bundler = ResourceBundler::new(&matcher);

    let out = tempdir().unwrap();
    let mut directory = DirectorySink::new(out.path().join("pkg"));
    bundler
      .copy_resources(&manifest, source.path(), &mut directory)
      .unwrap();
    assert_eq!(
      fs::read_to_string(out.path().join("pkg/popup.html")).unwrap(),
      "<p>popup</p>"
    );

    let mut archive = ArchiveSink::new();
    bundler
      .copy_resources(&manifest, source.path(), &mut archive)
      .unwrap();
    assert_eq!(archive.entries(), ["popup.html".to_string()]);
  }

  #[test]
  fn works_through_trait_objects() {
    let source = source_tree();
    let manifest = object(json!({ "icon": "icons/48.png" }));
    let matcher = ResourceMatcher::default();

    let mut sink = ArchiveSink::new();
    let destination: &mut dyn Destination = &mut sink;
    ResourceBundler::new(&matcher)
      .copy_resources(&manifest, source.path(), destination)
      .unwrap();

    assert_eq!(sink.entries(), ["icons/48.png".to_string()]);
  }
}
