//! Discovery of local files referenced by a manifest.
//!
//! Filtering references, normalising archive entry names and walking the manifest are kept
//! in separate submodules so each rule can be tested on its own.

mod discovery;
mod filters;
mod paths;

pub use discovery::discover_resources;
pub use filters::{ResourceMatcher, is_external_url};
pub use paths::{normalize_entry_name, relative_resource_path};
