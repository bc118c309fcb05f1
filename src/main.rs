use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use webext_bundler::{Packager, PackagerConfig};

/// Package a browser-agnostic extension manifest for every configured browser.
#[derive(Parser)]
#[command(version)]
struct Opts {
  /// Project directory containing the manifest and package metadata.
  #[arg(long, default_value = ".")]
  root: PathBuf,
  /// Configuration file; defaults to `webext.config.json` in the project root.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Output directory, overriding the configured one.
  #[arg(long)]
  out_dir: Option<PathBuf>,
  /// Only build the named browser. May be repeated.
  #[arg(long = "browser")]
  browsers: Vec<String>,
  /// Print the resources each target would bundle instead of packaging.
  #[arg(long)]
  list_resources: bool,
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let opts = Opts::parse();

  let config = match &opts.config {
    Some(path) => PackagerConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => PackagerConfig::discover(&opts.root),
  };

  let mut layout = config.into_layout(&opts.root);
  if let Some(out_dir) = opts.out_dir {
    layout.output_dir = out_dir;
  }

  let packager = Packager::new(layout).with_targets(&opts.browsers)?;

  if opts.list_resources {
    let (version, plans) = packager.plan().context("failed to read extension sources")?;
    println!("version {version}");
    for plan in plans {
      println!("{}:", plan.browser);
      for resource in plan.resources {
        println!("  {resource}");
      }
    }
    return Ok(());
  }

  let report = packager.run().context("failed to package extension")?;
  for target in &report.targets {
    println!("{}", target.archive.display());
  }

  Ok(())
}
