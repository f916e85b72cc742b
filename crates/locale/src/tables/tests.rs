use pretty_assertions::assert_eq;

use super::*;

fn id(s: &str) -> LocaleId {
	LocaleId::parse(s).unwrap()
}

#[test]
fn test_builtin_parents() {
	let tables = LocaleTables::builtin();
	assert_eq!(tables.explicit_parent(&id("en_GB")), Some(&id("en_001")));
	assert_eq!(tables.explicit_parent(&id("en_DE")), Some(&id("en_150")));
	assert_eq!(tables.explicit_parent(&id("es_MX")), Some(&id("es_419")));
	assert_eq!(tables.explicit_parent(&id("zh_Hant_MO")), Some(&id("zh_Hant_HK")));
	assert_eq!(tables.explicit_parent(&id("en_US")), None);
}

#[test]
fn test_builtin_default_scripts() {
	let tables = LocaleTables::builtin();
	assert_eq!(tables.default_script("sr"), Some("Cyrl"));
	assert_eq!(tables.default_script("zh"), Some("Hans"));
	assert_eq!(tables.default_script("tlh"), None);
}

#[test]
fn test_builder_overrides() {
	let tables = LocaleTables::new().with_parent(id("fr_CA"), id("fr_FR")).with_default_script("fr", "Latn");
	assert_eq!(tables.explicit_parent(&id("fr_CA")), Some(&id("fr_FR")));
	assert_eq!(tables.default_script("fr"), Some("Latn"));
}

#[test]
fn test_extend_prefers_other() {
	let mut tables = LocaleTables::builtin();
	tables.extend(LocaleTables::new().with_parent(id("en_GB"), id("en")));
	assert_eq!(tables.explicit_parent(&id("en_GB")), Some(&id("en")));
	assert_eq!(tables.explicit_parent(&id("en_AU")), Some(&id("en_001")));
}

#[test]
fn test_deserialize_partial() {
	let tables: LocaleTables = toml::from_str(
		r#"
		[parents]
		"de-AT" = "de_DE"
		"#,
	)
	.unwrap();
	assert_eq!(tables.explicit_parent(&id("de_AT")), Some(&id("de_DE")));
	assert!(tables.default_scripts.is_empty());
}
