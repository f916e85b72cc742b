//! Attribute rewrites used by implicit aliasing.
//!
//! A path with an `alt` attribute falls back to the same path without it. A
//! path with a plural `count` falls back to `count="other"`, and display names
//! with `count="other"` fall back to the path with no count at all.

use std::sync::LazyLock;

use regex::Regex;

use crate::{PathKey, Result};

static ALT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\[@alt="[^"]*"\]"#).expect("alt attribute pattern is valid"));

static COUNT_ATTRIBUTE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"\[@count="[^"]*"\]"#).expect("count attribute pattern is valid"));

/// Generic plural category.
pub const COUNT_OTHER: &str = "other";

pub fn has_alt(path: &PathKey) -> bool {
	path.as_str().contains("[@alt=")
}

pub fn has_count(path: &PathKey) -> bool {
	path.as_str().contains("[@count=")
}

/// `path` with every `alt` attribute removed, or `None` if it has none.
pub fn without_alt(path: &PathKey) -> Option<PathKey> {
	has_alt(path).then(|| PathKey::from_trusted(ALT_ATTRIBUTE.replace_all(path.as_str(), "").into_owned()))
}

/// `path` with every `count` value replaced by `other`, or `None` if it has
/// no count. The result equals `path` when the count already is `other`.
pub fn with_count_other(path: &PathKey) -> Option<PathKey> {
	has_count(path).then(|| {
		let replaced = COUNT_ATTRIBUTE.replace_all(path.as_str(), format!(r#"[@count="{COUNT_OTHER}"]"#).as_str());
		PathKey::from_trusted(replaced.into_owned())
	})
}

/// `path` with every `count` attribute removed.
pub fn without_count(path: &PathKey) -> PathKey {
	PathKey::from_trusted(COUNT_ATTRIBUTE.replace_all(path.as_str(), "").into_owned())
}

/// Whether the count fallback may strip the attribute entirely.
pub fn is_display_name(path: &PathKey) -> bool {
	path.as_str().contains("/displayName")
}

/// Sets `alt` on the last element of `path`, after its other attributes. An
/// existing `alt` on that element is replaced.
pub fn with_alt(path: &PathKey, alt: &str) -> Result<PathKey> {
	let mut parts = path.parts()?;
	if let Some(last) = parts.elements_mut().last_mut() {
		last.set_attribute("alt", alt);
	}
	Ok(parts.to_key())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn key(s: &str) -> PathKey {
		PathKey::parse(s).unwrap()
	}

	#[test]
	fn test_without_alt() {
		let path = key(r#"//ldml/localeDisplayNames/territories/territory[@type="GB"][@alt="short"]"#);
		assert_eq!(without_alt(&path), Some(key(r#"//ldml/localeDisplayNames/territories/territory[@type="GB"]"#)));
		assert_eq!(without_alt(&key("//ldml/a")), None);
	}

	#[test]
	fn test_count_other() {
		let path = key(r#"//ldml/units/unit[@type="day"]/unitPattern[@count="few"]"#);
		assert_eq!(with_count_other(&path), Some(key(r#"//ldml/units/unit[@type="day"]/unitPattern[@count="other"]"#)));
		let other = key(r#"//ldml/units/unit[@type="day"]/unitPattern[@count="other"]"#);
		assert_eq!(with_count_other(&other).as_ref(), Some(&other));
		assert_eq!(with_count_other(&key("//ldml/a")), None);
	}

	#[test]
	fn test_without_count_on_display_name() {
		let path = key(r#"//ldml/numbers/currencies/currency[@type="EUR"]/displayName[@count="other"]"#);
		assert!(is_display_name(&path));
		assert_eq!(without_count(&path), key(r#"//ldml/numbers/currencies/currency[@type="EUR"]/displayName"#));
	}

	#[test]
	fn test_with_alt() {
		let path = key(r#"//ldml/localeDisplayNames/languages/language[@type="en_GB"]"#);
		assert_eq!(
			with_alt(&path, "short").unwrap(),
			key(r#"//ldml/localeDisplayNames/languages/language[@type="en_GB"][@alt="short"]"#)
		);
		assert_eq!(with_alt(&key("//ldml/a"), "x").unwrap(), key(r#"//ldml/a[@alt="x"]"#));
	}

	#[test]
	fn test_with_alt_targets_last_element() {
		let path = key(r#"//ldml/a[@type="x"]/b"#);
		assert_eq!(with_alt(&path, "v").unwrap(), key(r#"//ldml/a[@type="x"]/b[@alt="v"]"#));
		let replaced = with_alt(&key(r#"//ldml/b[@alt="short"]"#), "long").unwrap();
		assert_eq!(replaced, key(r#"//ldml/b[@alt="long"]"#));
	}
}
