use regex::Regex;

fn external_url_patterns() -> &'static [Regex] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| vec![Regex::new(r"^https?:").expect("invalid http(s) regex")])
    .as_slice()
}

/// Determine whether a manifest string points at a remote location.
///
/// Remote URLs can end in a copyable extension (`https://example.com/icon.png`) but there is
/// no local file to bundle for them.
pub fn is_external_url(value: &str) -> bool {
  external_url_patterns()
    .iter()
    .any(|pattern| pattern.is_match(value))
}

/// Decides which manifest strings name local files that must ship with the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatcher {
  extensions: Vec<String>,
}

impl ResourceMatcher {
  /// Create a matcher for the given filename suffixes, e.g. `.png` or `.js`.
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      extensions: extensions
        .into_iter()
        .map(Into::into)
        .filter(|ext: &String| !ext.is_empty())
        .collect(),
    }
  }

  /// Suffixes recognised by this matcher.
  pub fn extensions(&self) -> &[String] {
    &self.extensions
  }

  /// Returns `true` when `value` is a relative reference to a copyable resource.
  pub fn is_resource_path(&self, value: &str) -> bool {
    if is_external_url(value) {
      return false;
    }

    self.extensions.iter().any(|ext| value.ends_with(ext.as_str()))
  }
}

impl Default for ResourceMatcher {
  fn default() -> Self {
    Self::new([
      ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".js", ".mjs", ".css", ".html",
      ".json",
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_http_urls() {
    assert!(is_external_url("https://example.com/icon.png"));
    assert!(is_external_url("http://example.com/script.js"));
    assert!(!is_external_url("icons/http.png"));
  }

  #[test]
  fn matches_relative_paths_by_suffix() {
    let matcher = ResourceMatcher::default();
    assert!(matcher.is_resource_path("icons/48.png"));
    assert!(matcher.is_resource_path("scripts\\background.js"));
    assert!(!matcher.is_resource_path("My Extension"));
    assert!(!matcher.is_resource_path("1.0.0"));
  }

  #[test]
  fn never_matches_urls() {
    let matcher = ResourceMatcher::default();
    assert!(!matcher.is_resource_path("https://example.com/icon.png"));
    assert!(!matcher.is_resource_path("http://example.com/popup.html"));
  }

  #[test]
  fn suffix_match_is_case_sensitive() {
    let matcher = ResourceMatcher::new([".png"]);
    assert!(!matcher.is_resource_path("icon.PNG"));
  }

  #[test]
  fn ignores_empty_extensions() {
    let matcher = ResourceMatcher::new(["", ".css"]);
    assert_eq!(matcher.extensions(), [".css".to_string()]);
    assert!(!matcher.is_resource_path("anything"));
  }
}
