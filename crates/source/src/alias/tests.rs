use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn key(s: &str) -> PathKey {
	PathKey::parse(s).unwrap()
}

fn alias(old: &str, new: &str) -> Alias {
	Alias {
		old_path: key(old),
		target: AliasTarget {
			path: key(new),
			locale: None,
		},
	}
}

#[rstest]
#[case(
	r#"//ldml/dates/calendars/calendar[@type="buddhist"]/alias[@source="locale"][@path="../calendar[@type='gregorian']"]"#,
	r#"//ldml/dates/calendars/calendar[@type="buddhist"]"#,
	r#"//ldml/dates/calendars/calendar[@type="gregorian"]"#
)]
#[case("//a/old/alias[@path=\"//a/new\"]", "//a/old", "//a/new")]
#[case("//a/b/c/alias[@path=\"../../x\"]", "//a/b/c", "//a/x")]
fn test_parse_declaration(#[case] declaration: &str, #[case] old: &str, #[case] new: &str) {
	let parsed = Alias::from_declaration(&key(declaration)).unwrap().unwrap();
	assert_eq!(parsed, alias(old, new));
}

#[test]
fn test_parse_cross_locale() {
	let parsed = Alias::from_declaration(&key(r#"//ldml/a/alias[@source="en"]"#)).unwrap().unwrap();
	assert_eq!(parsed.old_path, key("//ldml/a"));
	assert_eq!(parsed.target.path, key("//ldml/a"));
	assert_eq!(parsed.target.locale, Some(LocaleId::parse("en").unwrap()));
}

#[test]
fn test_non_alias_path() {
	assert_eq!(Alias::from_declaration(&key("//ldml/aliases/x")).unwrap(), None);
}

#[rstest]
#[case(r#"//ldml/a/alias[@source="locale"]"#)]
#[case("//ldml/a/alias")]
#[case(r#"//ldml/a/alias[@source="locale"][@path="../a"]"#)]
fn test_alias_without_change(#[case] declaration: &str) {
	let err = Alias::from_declaration(&key(declaration)).unwrap_err();
	assert_eq!(err, SourceError::AliasWithoutChange(key("//ldml/a")));
	assert!(err.is_configuration());
}

#[rstest]
#[case("//alias[@path=\"//b\"]")]
#[case("//ldml/alias[@path=\"//b\"]/x")]
#[case("//ldml/a/alias[@path=\"../../../b\"]")]
#[case("//ldml/a/alias[@source=\"x\"]")]
fn test_malformed(#[case] declaration: &str) {
	assert!(matches!(
		Alias::from_declaration(&key(declaration)),
		Err(SourceError::MalformedAlias { .. })
	));
}

#[test]
fn test_declaration_roundtrip() {
	let path = declaration_path(&key("//ldml/a/old"), None, Some("../new[@type=\"x\"]")).unwrap();
	assert_eq!(path.as_str(), r#"//ldml/a/old/alias[@source="locale"][@path="../new[@type='x']"]"#);
	assert_eq!(Alias::from_declaration(&path).unwrap(), Some(alias("//ldml/a/old", r#"//ldml/a/new[@type="x"]"#)));
}

#[test]
fn test_lookup_exact_and_prefix() {
	let mut table = AliasTable::default();
	table.insert(alias("//a/old", "//a/new"));
	table.insert(alias("//a/old/deep", "//z"));

	assert_eq!(table.lookup(&key("//a/old")).map(|t| t.path), Some(key("//a/new")));
	assert_eq!(table.lookup(&key("//a/old/x[@t=\"1\"]")).map(|t| t.path), Some(key("//a/new/x[@t=\"1\"]")));
	assert_eq!(table.lookup(&key("//a/old/deep/y")).map(|t| t.path), Some(key("//z/y")));
	assert_eq!(table.lookup(&key("//a/older")), None);
	assert_eq!(table.lookup(&key("//a")), None);
}

#[test]
fn test_insert_replaces_reverse_entry() {
	let mut table = AliasTable::default();
	table.insert(alias("//a/old", "//a/new"));
	table.insert(alias("//a/old", "//a/newer"));
	assert_eq!(table.len(), 1);
	assert!(table.sources_of(&key("//a/new")).is_empty());
	assert_eq!(table.sources_of(&key("//a/newer")), [key("//a/old")]);
}

#[test]
fn test_sources_of_descendant() {
	let mut table = AliasTable::default();
	table.insert(alias("//a/old", "//a/new"));
	table.insert(alias("//b/other", "//a/new"));
	let mut sources = table.sources_of(&key("//a/new/x"));
	sources.sort();
	assert_eq!(sources, [key("//a/old/x"), key("//b/other/x")]);
}

#[test]
fn test_direct_aliases_respects_boundaries() {
	let mut table = AliasTable::default();
	table.insert(alias("//a/old", "//a/new"));
	let paths: BTreeSet<PathKey> = [key("//a/new"), key("//a/new/x"), key("//a/newer"), key("//b")].into_iter().collect();
	let found: Vec<PathKey> = table.direct_aliases(&paths).into_iter().collect();
	assert_eq!(found, [key("//a/old"), key("//a/old/x")]);
}

fn arb_path() -> impl Strategy<Value = PathKey> {
	proptest::collection::vec(prop_oneof!["a", "b", "c", "new", "old"], 1..5).prop_map(|segments| key(&format!("//{}", segments.join("/"))))
}

proptest! {
	/// The sorted range scan agrees with per-path prefix lookup.
	#[test]
	fn prop_direct_aliases_matches_sources_of(
		aliases in proptest::collection::vec((arb_path(), arb_path()), 0..6),
		paths in proptest::collection::btree_set(arb_path(), 0..12),
	) {
		let mut table = AliasTable::default();
		for (old, new) in aliases {
			if old != new {
				table.insert(Alias { old_path: old, target: AliasTarget { path: new, locale: None } });
			}
		}
		let expected: BTreeSet<PathKey> = paths.iter().flat_map(|p| table.sources_of(p)).collect();
		prop_assert_eq!(table.direct_aliases(&paths), expected);
	}
}
