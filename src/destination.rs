//! Output sinks a packaging pass writes manifest files and resources into.

use std::collections::BTreeSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use log::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{PackageError, PackageResult};
use crate::resources::{normalize_entry_name, relative_resource_path};

/// Something that accepts named files for an extension package.
pub trait Destination {
  /// Store `contents` under the bundle-relative `name`.
  fn write_entry(&mut self, name: &str, contents: &[u8]) -> PackageResult<()>;

  /// Copy the manifest resource `resource`, located at `source`, into the destination.
  ///
  /// The default implementation reads the source fully and stores it under the
  /// forward-slash form of `resource`.
  fn copy_resource(&mut self, resource: &str, source: &Path) -> PackageResult<()> {
    let contents = fs::read(source).map_err(|err| missing_resource(resource, source, err))?;
    self.write_entry(&normalize_entry_name(resource), &contents)
  }
}

pub(crate) fn missing_resource(resource: &str, source: &Path, err: std::io::Error) -> PackageError {
  PackageError::MissingResource {
    resource: resource.to_string(),
    path: source.to_path_buf(),
    source: err,
  }
}

/// Writes real files below a root directory, creating parents on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
  root: PathBuf,
}

impl DirectorySink {
  /// Create a sink rooted at `root`. The directory is created lazily.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Root directory of the unpacked extension.
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn prepare(&self, name: &str) -> PackageResult<PathBuf> {
    let destination = self.root.join(relative_resource_path(name));
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent).map_err(|err| PackageError::io(parent, err))?;
    }
    Ok(destination)
  }
}

impl Destination for DirectorySink {
  fn write_entry(&mut self, name: &str, contents: &[u8]) -> PackageResult<()> {
    let destination = self.prepare(name)?;
    fs::write(&destination, contents).map_err(|err| PackageError::io(&destination, err))
  }

  fn copy_resource(&mut self, resource: &str, source: &Path) -> PackageResult<()> {
    if !source.is_file() {
      return Err(missing_resource(
        resource,
        source,
        std::io::Error::new(std::io::ErrorKind::NotFound, "resource file does not exist"),
      ));
    }

    let destination = self.prepare(resource)?;
    fs::copy(source, &destination).map_err(|err| missing_resource(resource, source, err))?;
    Ok(())
  }
}

/// Accumulates entries in an in-memory zip archive.
///
/// Each name is stored once; writing a name that is already present is a no-op.
pub struct ArchiveSink {
  writer: ZipWriter<Cursor<Vec<u8>>>,
  options: SimpleFileOptions,
  entries: Vec<String>,
  seen: BTreeSet<String>,
}

impl ArchiveSink {
  /// Start an empty archive using deflate compression.
  pub fn new() -> Self {
    Self {
      writer: ZipWriter::new(Cursor::new(Vec::new())),
      options: SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated),
      entries: Vec::new(),
      seen: BTreeSet::new(),
    }
  }

  /// Names of the entries written so far, in insertion order.
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Finalise the archive and return its bytes.
  pub fn finish(self) -> PackageResult<Vec<u8>> {
    let cursor = self.writer.finish().map_err(|source| PackageError::Archive {
      entry: "<central directory>".to_string(),
      source,
    })?;
    Ok(cursor.into_inner())
  }
}

impl Default for ArchiveSink {
  fn default() -> Self {
    Self::new()
  }
}

impl Destination for ArchiveSink {
  fn write_entry(&mut self, name: &str, contents: &[u8]) -> PackageResult<()> {
    if !self.seen.insert(name.to_string()) {
      debug!("skipping duplicate archive entry {name}");
      return Ok(());
    }

    let archive_error = |source: zip::result::ZipError| PackageError::Archive {
      entry: name.to_string(),
      source,
    };

    self
      .writer
      .start_file(name, self.options)
      .map_err(archive_error)?;
    self
      .writer
      .write_all(contents)
      .map_err(|err| archive_error(err.into()))?;
    self.entries.push(name.to_string());
    Ok(())
  }
}
