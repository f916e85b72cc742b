use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[rstest]
#[case("en", "en")]
#[case("EN-us", "en_US")]
#[case("zh-hant-tw", "zh_Hant_TW")]
#[case("es_419", "es_419")]
#[case("ca_es_valencia", "ca_ES_VALENCIA")]
#[case("de__CH", "de_CH")]
#[case("sl_rozaj_1994", "sl_ROZAJ_1994")]
#[case("", "root")]
#[case("Root", "root")]
fn test_canonicalization(#[case] input: &str, #[case] expected: &str) {
	assert_eq!(LocaleId::parse(input).unwrap().as_str(), expected);
}

#[rstest]
#[case("e")]
#[case("english1")]
#[case("en_US_x")]
#[case("en_Latn_Cyrl")]
#[case("root_GB")]
fn test_rejects_malformed(#[case] input: &str) {
	assert!(LocaleId::parse(input).is_err(), "{input} should be rejected");
}

#[test]
fn test_parts() {
	let id = LocaleId::parse("sr_Latn_RS_EKAVSK").unwrap();
	let parts = id.parts();
	assert_eq!(parts.language, "sr");
	assert_eq!(parts.script, Some("Latn"));
	assert_eq!(parts.region, Some("RS"));
	assert_eq!(parts.variants.as_slice(), ["EKAVSK"]);
	assert_eq!(id.subtag_count(), 4);
}

#[test]
fn test_parts_without_script() {
	let id = LocaleId::parse("en_001").unwrap();
	assert_eq!(id.language(), "en");
	assert_eq!(id.script(), None);
	assert_eq!(id.region(), Some("001"));
}

#[test]
fn test_equality_is_canonical() {
	assert_eq!(LocaleId::parse("pt-br").unwrap(), LocaleId::parse("pt_BR").unwrap());
	assert!(LocaleId::parse("ROOT").unwrap().is_root());
	assert!(!LocaleId::parse("en").unwrap().is_root());
}

#[test]
fn test_deserialize_from_toml() {
	#[derive(Deserialize)]
	struct Holder {
		locale: LocaleId,
	}
	let holder: Holder = toml::from_str(r#"locale = "fr-ca""#).unwrap();
	assert_eq!(holder.locale.as_str(), "fr_CA");
	assert!(toml::from_str::<Holder>(r#"locale = "x""#).is_err());
}

fn arb_locale() -> impl Strategy<Value = String> {
	(
		"[a-z]{2,3}",
		proptest::option::of("[A-Z][a-z]{3}"),
		proptest::option::of(prop_oneof!["[A-Z]{2}", "[0-9]{3}"]),
		proptest::collection::vec("[A-Z0-9]{5,8}", 0..2),
	)
		.prop_map(|(lang, script, region, variants)| {
			let mut id = lang;
			for subtag in script.into_iter().chain(region).chain(variants) {
				id.push('_');
				id.push_str(&subtag);
			}
			id
		})
}

proptest! {
	/// Canonical output re-parses to itself.
	#[test]
	fn prop_canonical_roundtrip(raw in arb_locale(), lower in any::<bool>()) {
		let spelled = if lower { raw.to_ascii_lowercase().replace('_', "-") } else { raw.clone() };
		let id = LocaleId::parse(&spelled).unwrap();
		prop_assert_eq!(id.as_str(), raw.as_str());
		prop_assert_eq!(LocaleId::parse(id.as_str()).unwrap(), id);
	}
}
