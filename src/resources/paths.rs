/// Strip leading separators so a manifest path always resolves below the root it is joined to.
///
/// Manifests may reference files as `/popup.html`; `Path::join` would treat that as absolute
/// and replace the base directory entirely.
pub fn relative_resource_path(resource: &str) -> &str {
  resource.trim_start_matches(['/', '\\'])
}

/// Produce the archive entry name for a manifest resource path.
///
/// Zip entries always use forward slashes, regardless of the separator the manifest author
/// used, so the same archive unpacks identically on every platform.
pub fn normalize_entry_name(resource: &str) -> String {
  relative_resource_path(resource).replace('\\', "/")
}
