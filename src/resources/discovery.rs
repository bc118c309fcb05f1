//! Walk a filtered manifest collecting resource references.

use serde_json::{Map, Value};

use super::ResourceMatcher;

/// Collect every resource path referenced by `manifest`, depth-first in key order.
///
/// Only string values of objects are considered. Arrays are never descended into, so file
/// names listed inside arrays are not bundled.
pub fn discover_resources(manifest: &Map<String, Value>, matcher: &ResourceMatcher) -> Vec<String> {
  let mut resources = Vec::new();
  collect_resources(manifest, matcher, &mut resources);
  resources
}

fn collect_resources(
  manifest: &Map<String, Value>,
  matcher: &ResourceMatcher,
  resources: &mut Vec<String>,
) {
  for value in manifest.values() {
    match value {
      Value::String(text) if matcher.is_resource_path(text) => resources.push(text.clone()),
      Value::Object(nested) => collect_resources(nested, matcher, resources),
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      other => panic!("expected object, got {other}"),
    }
  }

  #[test]
  fn collects_nested_strings_in_traversal_order() {
    let manifest = object(json!({
      "name": "Example",
      "icons": { "16": "icons/16.png", "48": "icons/48.png" },
      "action": { "default_popup": "popup.html", "default_icon": { "32": "icons/32.png" } },
      "background": { "service_worker": "sw.js" }
    }));

    let resources = discover_resources(&manifest, &ResourceMatcher::default());

    assert_eq!(resources, vec![
      "icons/16.png",
      "icons/48.png",
      "popup.html",
      "icons/32.png",
      "sw.js",
    ]);
  }

  #[test]
  fn skips_urls_and_non_string_values() {
    let manifest = object(json!({
      "homepage_url": "https://example.com/index.html",
      "update_url": "http://example.com/updates.json",
      "manifest_version": 3,
      "incognito": null,
      "offline_enabled": true
    }));

    assert!(discover_resources(&manifest, &ResourceMatcher::default()).is_empty());
  }

  #[test]
  fn does_not_descend_into_arrays() {
    let manifest = object(json!({
      "content_scripts": [{ "js": ["content.js"], "css": ["content.css"] }],
      "web_accessible_resources": ["images/logo.png"]
    }));

    assert!(discover_resources(&manifest, &ResourceMatcher::default()).is_empty());
  }

  #[test]
  fn discovery_is_restartable() {
    let manifest = object(json!({ "icon": "icon.svg" }));
    let matcher = ResourceMatcher::default();
    assert_eq!(
      discover_resources(&manifest, &matcher),
      discover_resources(&manifest, &matcher)
    );
  }
}
