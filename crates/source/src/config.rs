//! Configuration for resolution, locale tables and fallback code lists.
//!
//! All sections are optional in TOML; a missing section takes its default.
//!
//! ```toml
//! [resolver]
//! max_alias_depth = 40
//! caching = true
//!
//! [locales.parents]
//! en_GB = "en_001"
//!
//! [codes]
//! territories = ["001", "GB", "US"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use stratum_locale::{LocaleTables, ParentResolver};

use crate::ConfigError;

/// The literal value that makes a layer defer to its parent.
pub const INHERITANCE_MARKER: &str = "↑↑↑";

/// Limits and switches for [`ResolvingView`](crate::ResolvingView).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
	/// Maximum alias hops in one lookup.
	pub max_alias_depth: usize,
	/// Maximum expansion rounds of the path closure.
	pub max_closure_depth: usize,
	/// Value treated as "inherit from parent".
	pub inheritance_marker: String,
	/// Memoize point lookups and the path closure.
	pub caching: bool,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			max_alias_depth: 40,
			max_closure_depth: 40,
			inheritance_marker: INHERITANCE_MARKER.to_string(),
			caching: true,
		}
	}
}

impl ResolverConfig {
	/// Same limits with caching disabled.
	pub fn uncached() -> Self {
		Self {
			caching: false,
			..Self::default()
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.max_alias_depth == 0 {
			return Err(ConfigError::InvalidValue {
				field: "resolver.max_alias_depth",
				reason: "must be at least 1".to_string(),
			});
		}
		if self.max_closure_depth == 0 {
			return Err(ConfigError::InvalidValue {
				field: "resolver.max_closure_depth",
				reason: "must be at least 1".to_string(),
			});
		}
		if self.inheritance_marker.is_empty() {
			return Err(ConfigError::InvalidValue {
				field: "resolver.inheritance_marker",
				reason: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}

/// Enumerable code spaces populating the fallback layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeLists {
	pub languages: Vec<String>,
	pub scripts: Vec<String>,
	pub territories: Vec<String>,
	pub variants: Vec<String>,
	pub currencies: Vec<String>,
	/// Time-zone identifiers such as `America/Los_Angeles`.
	pub zones: Vec<String>,
}

fn owned(codes: &[&str]) -> Vec<String> {
	codes.iter().map(|c| (*c).to_string()).collect()
}

impl CodeLists {
	/// A small representative set of codes.
	pub fn builtin() -> Self {
		Self {
			languages: owned(&[
				"ar", "az", "de", "el", "en", "es", "fa", "fr", "he", "hi", "it", "ja", "ko", "nl", "pl", "pt", "root", "ru", "sr", "sv", "tr",
				"uk", "ur", "zh",
			]),
			scripts: owned(&["Arab", "Cyrl", "Deva", "Grek", "Hans", "Hant", "Hebr", "Jpan", "Kore", "Latn", "Zxxx"]),
			territories: owned(&[
				"001", "150", "419", "AT", "AU", "BR", "CA", "CH", "CN", "DE", "ES", "FR", "GB", "HK", "IN", "IT", "JP", "MO", "MX", "PT", "RU",
				"TW", "US", "ZZ",
			]),
			variants: owned(&["POSIX", "VALENCIA", "REVISED"]),
			currencies: owned(&["BRL", "CHF", "CNY", "EUR", "GBP", "INR", "JPY", "RUB", "USD", "XXX"]),
			zones: owned(&[
				"America/Los_Angeles",
				"America/New_York",
				"America/Sao_Paulo",
				"Asia/Hong_Kong",
				"Asia/Tokyo",
				"Europe/London",
				"Europe/Paris",
				"Etc/Unknown",
			]),
		}
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratumConfig {
	pub resolver: ResolverConfig,
	/// Explicit parents and default scripts. A `[locales]` section replaces
	/// the builtin tables rather than extending them.
	pub locales: LocaleTables,
	/// Codes for the fallback layer. A `[codes]` section replaces the builtin
	/// lists.
	pub codes: CodeLists,
}

impl Default for StratumConfig {
	fn default() -> Self {
		Self {
			resolver: ResolverConfig::default(),
			locales: LocaleTables::builtin(),
			codes: CodeLists::builtin(),
		}
	}
}

impl StratumConfig {
	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.resolver.validate()?;
		config.parent_resolver()?;
		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::from_toml_str(&content)
	}

	/// Builds a validated [`ParentResolver`] from [`Self::locales`].
	pub fn parent_resolver(&self) -> Result<ParentResolver, ConfigError> {
		Ok(ParentResolver::new(self.locales.clone())?)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;
	use stratum_locale::LocaleId;

	use super::*;

	#[test]
	fn test_empty_document_uses_defaults() {
		let config = StratumConfig::from_toml_str("").unwrap();
		assert_eq!(config, StratumConfig::default());
		assert_eq!(config.resolver.max_alias_depth, 40);
		assert_eq!(config.resolver.inheritance_marker, "↑↑↑");
	}

	#[test]
	fn test_partial_sections() {
		let config = StratumConfig::from_toml_str(
			r#"
			[resolver]
			caching = false

			[locales.parents]
			fr_CA = "fr_FR"

			[codes]
			territories = ["GB"]
			"#,
		)
		.unwrap();
		assert!(!config.resolver.caching);
		assert_eq!(config.resolver.max_closure_depth, 40);
		let fr_ca = LocaleId::parse("fr_CA").unwrap();
		assert_eq!(config.locales.explicit_parent(&fr_ca), Some(&LocaleId::parse("fr_FR").unwrap()));
		assert!(config.locales.default_scripts.is_empty());
		assert_eq!(config.codes.territories, ["GB"]);
		assert!(config.codes.languages.is_empty());
	}

	#[test]
	fn test_rejects_zero_depth() {
		let err = StratumConfig::from_toml_str("[resolver]\nmax_alias_depth = 0").unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { field: "resolver.max_alias_depth", .. }));
	}

	#[test]
	fn test_rejects_parent_cycle() {
		let err = StratumConfig::from_toml_str("[locales.parents]\nen_GB = \"en_001\"\nen_001 = \"en_GB\"").unwrap_err();
		assert!(matches!(err, ConfigError::Locale(_)));
	}

	#[test]
	fn test_rejects_bad_locale_id() {
		let err = StratumConfig::from_toml_str("[locales.parents]\nen_GB = \"x\"").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[test]
	fn test_load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[resolver]\nmax_alias_depth = 8").unwrap();
		let config = StratumConfig::load(file.path()).unwrap();
		assert_eq!(config.resolver.max_alias_depth, 8);
	}

	#[test]
	fn test_load_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = StratumConfig::load(dir.path().join("absent.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
