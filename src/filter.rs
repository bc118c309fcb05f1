//! Specialise a browser-agnostic manifest for a single browser target.
//!
//! Keys may carry a `"<browser>:"` prefix at any depth. Prefixed keys are kept, with the
//! prefix stripped, only when the browser matches the target; everything else is copied
//! through unchanged.

use serde_json::{Map, Value};

use crate::browsers::KnownBrowsers;

/// Recursive manifest key filter bound to a set of known browsers.
#[derive(Debug, Clone, Copy)]
pub struct KeyFilter<'a> {
  browsers: &'a KnownBrowsers,
}

impl<'a> KeyFilter<'a> {
  /// Create a filter recognising prefixes from `browsers`.
  pub fn new(browsers: &'a KnownBrowsers) -> Self {
    Self { browsers }
  }

  /// Produce the manifest as seen by `target`.
  ///
  /// `target` is compared case-insensitively and does not have to be a known browser; an
  /// unknown target simply drops every browser-prefixed key. Key order is preserved.
  pub fn filter(&self, manifest: &Map<String, Value>, target: &str) -> Map<String, Value> {
    let target = target.to_lowercase();
    self.filter_map(manifest, &target)
  }

  fn filter_map(&self, manifest: &Map<String, Value>, target: &str) -> Map<String, Value> {
    let mut result = Map::with_capacity(manifest.len());

    for (key, value) in manifest {
      let (prefix, base) = self.split_key(key);

      if prefix.is_some_and(|prefix| prefix.to_lowercase() != target) {
        continue;
      }

      let value = match value {
        Value::Object(nested) => Value::Object(self.filter_map(nested, target)),
        other => other.clone(),
      };
      result.insert(base.to_string(), value);
    }

    result
  }

  /// Split `key` into its browser prefix and base name.
  ///
  /// Only keys with exactly one colon whose leading segment names a known browser carry a
  /// prefix. Any other key, including `"a:b:c"` and `"tests:key"`, is returned whole.
  pub fn split_key<'k>(&self, key: &'k str) -> (Option<&'k str>, &'k str) {
    let mut parts = key.split(':');
    match (parts.next(), parts.next(), parts.next()) {
      (Some(prefix), Some(base), None) if self.browsers.contains(prefix) => (Some(prefix), base),
      _ => (None, key),
    }
  }
}
