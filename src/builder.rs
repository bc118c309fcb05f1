//! Packaging orchestrator producing one directory and one archive per browser.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::bundler::ResourceBundler;
use crate::destination::{ArchiveSink, Destination, DirectorySink};
use crate::error::{PackageError, PackageResult};
use crate::filter::KeyFilter;
use crate::manifest::{MANIFEST_FILE_NAME, inject_version, load_manifest, render_manifest};
use crate::metadata::read_version;
use crate::models::{PackageReport, TargetArtifacts, TargetPlan};
use crate::project::ProjectLayout;

/// High-level helper turning the base manifest into per-browser packages.
#[derive(Debug, Clone)]
pub struct Packager {
  layout: ProjectLayout,
  targets: Vec<String>,
}

impl Packager {
  /// Create a packager building every configured browser.
  pub fn new(layout: ProjectLayout) -> Self {
    let targets = layout.browsers.iter().map(str::to_string).collect();
    Self { layout, targets }
  }

  /// Restrict the run to a subset of the configured browsers.
  ///
  /// Every name must be a configured browser; an empty list keeps all of them.
  pub fn with_targets<I, S>(mut self, targets: I) -> PackageResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut selected: Vec<String> = Vec::new();
    for target in targets {
      let target = target.as_ref().trim().to_lowercase();
      if !self.layout.browsers.contains(&target) {
        return Err(PackageError::UnknownBrowser(target));
      }
      if !selected.contains(&target) {
        selected.push(target);
      }
    }

    if !selected.is_empty() {
      self.targets = self
        .layout
        .browsers
        .iter()
        .filter(|browser| selected.iter().any(|target| target == browser))
        .map(str::to_string)
        .collect();
    }

    Ok(self)
  }

  /// Browsers that will be built, in order.
  pub fn targets(&self) -> &[String] {
    &self.targets
  }

  /// Compute every target manifest and its resources without touching the output directory.
  pub fn plan(&self) -> PackageResult<(String, Vec<TargetPlan>)> {
    let (version, base) = self.load_base_manifest()?;
    let filter = KeyFilter::new(&self.layout.browsers);
    let bundler = ResourceBundler::new(&self.layout.resources);

    let plans = self
      .targets
      .iter()
      .map(|browser| {
        let manifest = filter.filter(&base, browser);
        let resources = bundler.discover(&manifest);
        TargetPlan {
          browser: browser.clone(),
          manifest,
          resources,
        }
      })
      .collect();

    Ok((version, plans))
  }

  /// Build every target, replacing the previous contents of the output directory.
  pub fn run(&self) -> PackageResult<PackageReport> {
    let (version, plans) = self.plan()?;
    info!("building extension version {version}");

    reset_output_dir(&self.layout.output_dir)?;

    let mut targets = Vec::with_capacity(plans.len());
    for plan in &plans {
      match self.package_target(plan) {
        Ok(artifacts) => {
          info!(
            "packaged {} with {} resource(s) into {}",
            artifacts.browser,
            artifacts.resources.len(),
            artifacts.archive.display()
          );
          targets.push(artifacts);
        }
        Err(err) => {
          self.discard_target(&plan.browser);
          return Err(err);
        }
      }
    }

    info!("successfully built extension packages for version {version}");
    Ok(PackageReport { version, targets })
  }

  fn load_base_manifest(&self) -> PackageResult<(String, Map<String, Value>)> {
    let version = read_version(&self.layout.package_json_path)?;
    let mut manifest = load_manifest(&self.layout.manifest_path)?;
    inject_version(&mut manifest, &version);
    Ok((version, manifest))
  }

  fn package_target(&self, plan: &TargetPlan) -> PackageResult<TargetArtifacts> {
    let rendered = render_manifest(&plan.manifest, self.layout.manifest_indent)?;
    let bundler = ResourceBundler::new(&self.layout.resources);

    let directory = self.layout.target_dir(&plan.browser);
    debug!("writing unpacked {} extension to {}", plan.browser, directory.display());
    let mut unpacked = DirectorySink::new(&directory);
    fill_package(&mut unpacked, &rendered, plan, &self.layout.source_root, &bundler)?;

    let mut archive = ArchiveSink::new();
    let resources = fill_package(&mut archive, &rendered, plan, &self.layout.source_root, &bundler)?;
    let bytes = archive.finish()?;

    let archive_path = self.layout.archive_path(&plan.browser);
    fs::write(&archive_path, bytes).map_err(|err| PackageError::io(&archive_path, err))?;

    Ok(TargetArtifacts {
      browser: plan.browser.clone(),
      directory: unpacked.root().to_path_buf(),
      archive: archive_path,
      resources,
    })
  }

  fn discard_target(&self, browser: &str) {
    let directory = self.layout.target_dir(browser);
    match fs::remove_dir_all(&directory) {
      Ok(()) => debug!("removed incomplete package {}", directory.display()),
      Err(err) if err.kind() == ErrorKind::NotFound => {}
      Err(err) => warn!("failed to remove incomplete package {}: {err}", directory.display()),
    }
  }
}

fn fill_package<D: Destination>(
  destination: &mut D,
  rendered_manifest: &[u8],
  plan: &TargetPlan,
  source_root: &Path,
  bundler: &ResourceBundler,
) -> PackageResult<Vec<String>> {
  destination.write_entry(MANIFEST_FILE_NAME, rendered_manifest)?;
  bundler.copy_resources(&plan.manifest, source_root, destination)
}

fn reset_output_dir(output_dir: &Path) -> PackageResult<()> {
  match fs::remove_dir_all(output_dir) {
    Ok(()) => {}
    Err(err) if err.kind() == ErrorKind::NotFound => {}
    Err(err) => return Err(PackageError::io(output_dir, err)),
  }
  fs::create_dir_all(output_dir).map_err(|err| PackageError::io(output_dir, err))
}
