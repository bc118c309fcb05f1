#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod browsers;
pub mod builder;
pub mod bundler;
pub mod config;
pub mod destination;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod metadata;
pub mod models;
pub mod project;
pub mod resources;

pub use browsers::KnownBrowsers;
pub use builder::Packager;
pub use bundler::ResourceBundler;
pub use config::PackagerConfig;
pub use destination::{ArchiveSink, Destination, DirectorySink};
pub use error::{PackageError, PackageResult};
pub use filter::KeyFilter;
pub use models::{PackageReport, TargetArtifacts, TargetPlan};
pub use project::ProjectLayout;
pub use resources::ResourceMatcher;
