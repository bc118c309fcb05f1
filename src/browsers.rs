//! The fixed set of browser targets a manifest can be specialised for.

/// Ordered, de-duplicated set of lower-case browser identifiers.
///
/// Membership checks are case-insensitive. The set is built once from configuration and
/// shared read-only by the key filter and the packager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownBrowsers {
  names: Vec<String>,
}

impl KnownBrowsers {
  /// Build the set from raw identifiers, trimming, lower-casing and dropping duplicates.
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut normalised: Vec<String> = Vec::new();
    for name in names {
      let name = name.as_ref().trim().to_lowercase();
      if name.is_empty() || normalised.contains(&name) {
        continue;
      }
      normalised.push(name);
    }

    Self { names: normalised }
  }

  /// Returns `true` when `name` matches a known browser, ignoring case.
  pub fn contains(&self, name: &str) -> bool {
    let name = name.to_lowercase();
    self.names.iter().any(|known| *known == name)
  }

  /// Iterate over the browsers in configuration order.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  /// Number of configured browsers.
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// Returns `true` when no browsers are configured.
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

impl Default for KnownBrowsers {
  fn default() -> Self {
    Self::new(["chromium", "firefox"])
  }
}
