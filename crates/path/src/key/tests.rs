use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn key(s: &str) -> PathKey {
	PathKey::parse(s).unwrap()
}

#[test]
fn test_parse_canonicalizes_quotes() {
	assert_eq!(key("//ldml/a[@type='x']").as_str(), r#"//ldml/a[@type="x"]"#);
}

#[test]
fn test_element_prefixes_skip_quoted_slashes() {
	let path = key(r#"//ldml/a[@x="1/2"]/b/c"#);
	let prefixes: Vec<&str> = path.element_prefixes().collect();
	assert_eq!(prefixes, [r#"//ldml/a[@x="1/2"]/b"#, r#"//ldml/a[@x="1/2"]"#, "//ldml"]);
	assert_eq!(path.depth(), 4);
}

#[test]
fn test_single_element_has_no_prefixes() {
	assert_eq!(key("//ldml").element_prefixes().count(), 0);
	assert_eq!(key("//ldml").depth(), 1);
}

#[test]
fn test_has_element_prefix_respects_boundaries() {
	let path = key("//ldml/dates/days");
	assert!(path.has_element_prefix("//ldml/dates"));
	assert!(path.has_element_prefix("//ldml/dates/days"));
	assert!(!path.has_element_prefix("//ldml/da"));
}

#[test]
fn test_replace_prefix() {
	let path = key("//a/old/x[@type=\"1\"]");
	assert_eq!(path.replace_prefix("//a/old", "//a/new"), Some(key("//a/new/x[@type=\"1\"]")));
	assert_eq!(path.replace_prefix("//a/ol", "//a/new"), None);
}

#[test]
fn test_element_names() {
	let path = key(r#"//ldml/dates/calendars/calendar[@type="a/alias"]/alias[@source="locale"]"#);
	assert_eq!(path.last_element_name(), "alias");
	assert!(path.contains_element("calendar"));
	assert!(!path.contains_element("a"));
	assert_eq!(key("//ldml").last_element_name(), "ldml");
}

#[test]
fn test_ordering_places_descendants_after_ancestor() {
	let mut keys = vec![key("//a/b/c"), key("//a/c"), key("//a/b")];
	keys.sort();
	assert_eq!(keys, [key("//a/b"), key("//a/b/c"), key("//a/c")]);
}

proptest! {
	/// Every yielded prefix is an element-boundary prefix of the path.
	#[test]
	fn prop_prefixes_are_boundaries(segments in proptest::collection::vec("[a-z]{1,4}(\\[@t=\"[a-z/]{0,3}\"\\])?", 1..6)) {
		let raw = format!("//{}", segments.join("/"));
		let path = PathKey::parse(&raw).unwrap();
		let prefixes: Vec<&str> = path.element_prefixes().collect();
		prop_assert_eq!(prefixes.len(), segments.len() - 1);
		for prefix in prefixes {
			prop_assert!(path.has_element_prefix(prefix));
			prop_assert!(PathKey::parse(prefix).is_ok());
		}
	}
}
