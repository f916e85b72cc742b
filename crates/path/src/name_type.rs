//! Display-name tables keyed by a code.

use std::fmt;

use crate::{PathKey, Result};

/// An enumerable code space with a display-name path per code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameType {
	Language,
	Script,
	Territory,
	Variant,
	CurrencyName,
	CurrencySymbol,
	ExemplarCity,
}

impl NameType {
	pub const ALL: [NameType; 7] = [
		NameType::Language,
		NameType::Script,
		NameType::Territory,
		NameType::Variant,
		NameType::CurrencyName,
		NameType::CurrencySymbol,
		NameType::ExemplarCity,
	];

	fn template(self) -> (&'static str, &'static str) {
		match self {
			NameType::Language => ("//ldml/localeDisplayNames/languages/language[@type=\"", "\"]"),
			NameType::Script => ("//ldml/localeDisplayNames/scripts/script[@type=\"", "\"]"),
			NameType::Territory => ("//ldml/localeDisplayNames/territories/territory[@type=\"", "\"]"),
			NameType::Variant => ("//ldml/localeDisplayNames/variants/variant[@type=\"", "\"]"),
			NameType::CurrencyName => ("//ldml/numbers/currencies/currency[@type=\"", "\"]/displayName"),
			NameType::CurrencySymbol => ("//ldml/numbers/currencies/currency[@type=\"", "\"]/symbol"),
			NameType::ExemplarCity => ("//ldml/dates/timeZoneNames/zone[@type=\"", "\"]/exemplarCity"),
		}
	}

	/// Path holding the display name of `code`.
	pub fn key_path(self, code: &str) -> Result<PathKey> {
		let (head, tail) = self.template();
		PathKey::parse(&format!("{head}{code}{tail}"))
	}

	/// Recovers the code from a path produced by [`Self::key_path`].
	pub fn code_of(self, path: &PathKey) -> Option<&str> {
		let (head, tail) = self.template();
		path.as_str().strip_prefix(head)?.strip_suffix(tail)
	}
}

impl fmt::Display for NameType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			NameType::Language => "language",
			NameType::Script => "script",
			NameType::Territory => "territory",
			NameType::Variant => "variant",
			NameType::CurrencyName => "currency",
			NameType::CurrencySymbol => "currency-symbol",
			NameType::ExemplarCity => "exemplar-city",
		})
	}
}
