//! Static locale tables consumed by the parent resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::LocaleId;

#[cfg(test)]
mod tests;

/// Explicit parent overrides and default scripts.
///
/// Both tables are plain data. They can be deserialized from configuration or
/// taken from [`LocaleTables::builtin`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleTables {
	/// Locales whose parent differs from simple truncation.
	pub parents: BTreeMap<LocaleId, LocaleId>,
	/// The default script for each language code.
	pub default_scripts: BTreeMap<String, String>,
}

/// Children of `en_001` in the builtin table.
const EN_001_CHILDREN: &[&str] = &[
	"en_150", "en_AG", "en_AI", "en_AU", "en_BS", "en_BW", "en_BZ", "en_CM", "en_DG", "en_DM", "en_ER", "en_FJ", "en_FK", "en_GB",
	"en_GD", "en_GG", "en_GH", "en_GI", "en_GM", "en_GY", "en_HK", "en_IE", "en_IL", "en_IM", "en_IN", "en_IO", "en_JE", "en_JM",
	"en_KE", "en_KI", "en_KN", "en_KY", "en_LC", "en_LR", "en_LS", "en_MG", "en_MO", "en_MS", "en_MT", "en_MU", "en_MW", "en_MY",
	"en_NA", "en_NF", "en_NG", "en_NR", "en_NU", "en_NZ", "en_PG", "en_PK", "en_PN", "en_PW", "en_RW", "en_SB", "en_SC", "en_SD",
	"en_SG", "en_SH", "en_SL", "en_SS", "en_SX", "en_SZ", "en_TC", "en_TK", "en_TO", "en_TT", "en_TV", "en_TZ", "en_UG", "en_VC",
	"en_VG", "en_VU", "en_WS", "en_ZA", "en_ZM", "en_ZW",
];

/// Children of `en_150` in the builtin table.
const EN_150_CHILDREN: &[&str] = &[
	"en_AT", "en_BE", "en_CH", "en_DE", "en_DK", "en_FI", "en_NL", "en_SE", "en_SI",
];

/// Children of `es_419` in the builtin table.
const ES_419_CHILDREN: &[&str] = &[
	"es_AR", "es_BO", "es_BR", "es_BZ", "es_CL", "es_CO", "es_CR", "es_CU", "es_DO", "es_EC", "es_GT", "es_HN", "es_MX", "es_NI",
	"es_PA", "es_PE", "es_PR", "es_PY", "es_SV", "es_US", "es_UY", "es_VE",
];

/// Children of `pt_PT` in the builtin table.
const PT_PT_CHILDREN: &[&str] = &[
	"pt_AO", "pt_CH", "pt_CV", "pt_FR", "pt_GQ", "pt_GW", "pt_LU", "pt_MO", "pt_MZ", "pt_ST", "pt_TL",
];

/// Overrides outside the regional groups.
const OTHER_PARENTS: &[(&str, &str)] = &[
	("en_001", "en"),
	("en_150", "en_001"),
	("zh_Hant_MO", "zh_Hant_HK"),
	("zh_Hant_HK", "zh_Hant"),
	("az_Arab", "root"),
];

const DEFAULT_SCRIPTS: &[(&str, &str)] = &[
	("ar", "Arab"),
	("az", "Latn"),
	("bs", "Latn"),
	("de", "Latn"),
	("el", "Grek"),
	("en", "Latn"),
	("es", "Latn"),
	("ff", "Latn"),
	("fr", "Latn"),
	("ha", "Latn"),
	("he", "Hebr"),
	("hi", "Deva"),
	("it", "Latn"),
	("ja", "Jpan"),
	("ko", "Kore"),
	("ks", "Arab"),
	("mn", "Cyrl"),
	("ms", "Latn"),
	("pa", "Guru"),
	("pt", "Latn"),
	("ru", "Cyrl"),
	("sd", "Arab"),
	("shi", "Tfng"),
	("sr", "Cyrl"),
	("uz", "Latn"),
	("vai", "Vaii"),
	("yue", "Hant"),
	("zh", "Hans"),
];

impl LocaleTables {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a representative subset of the CLDR parent-locale and
	/// likely-script data.
	pub fn builtin() -> Self {
		let mut tables = Self::new();
		let groups: [(&str, &[&str]); 4] = [
			("en_001", EN_001_CHILDREN),
			("en_150", EN_150_CHILDREN),
			("es_419", ES_419_CHILDREN),
			("pt_PT", PT_PT_CHILDREN),
		];
		for (parent, children) in groups {
			for child in children {
				tables.insert_parent(child, parent);
			}
		}
		for (child, parent) in OTHER_PARENTS {
			tables.insert_parent(child, parent);
		}
		for (language, script) in DEFAULT_SCRIPTS {
			tables.default_scripts.insert((*language).to_string(), (*script).to_string());
		}
		tables
	}

	fn insert_parent(&mut self, child: &str, parent: &str) {
		match (LocaleId::parse(child), LocaleId::parse(parent)) {
			(Ok(child), Ok(parent)) => {
				self.parents.insert(child, parent);
			}
			_ => tracing::warn!(child, parent, "skipping malformed builtin parent entry"),
		}
	}

	/// Adds or replaces an explicit parent.
	pub fn with_parent(mut self, child: LocaleId, parent: LocaleId) -> Self {
		self.parents.insert(child, parent);
		self
	}

	/// Adds or replaces a default script.
	pub fn with_default_script(mut self, language: impl Into<String>, script: impl Into<String>) -> Self {
		self.default_scripts.insert(language.into(), script.into());
		self
	}

	pub fn explicit_parent(&self, id: &LocaleId) -> Option<&LocaleId> {
		self.parents.get(id)
	}

	pub fn default_script(&self, language: &str) -> Option<&str> {
		self.default_scripts.get(language).map(String::as_str)
	}

	/// Merges `other` into `self`, entries in `other` winning.
	pub fn extend(&mut self, other: LocaleTables) {
		self.parents.extend(other.parents);
		self.default_scripts.extend(other.default_scripts);
	}
}
