//! Locale identifiers.
//!
//! A [`LocaleId`] is an immutable, canonical `language[_Script][_REGION][_VARIANT]*`
//! string. Parsing accepts `-` or `_` separators and any letter case; the
//! stored form always uses `_`, lowercase language, titlecase script and
//! uppercase region and variants. Equality is string equality on the
//! canonical form, so two identifiers that canonicalize identically compare
//! equal regardless of how they were spelled.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::{LocaleError, Result};

#[cfg(test)]
mod tests;

/// Canonical spelling of the root locale.
pub const ROOT_ID: &str = "root";

/// Canonical locale identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId(Arc<str>);

/// Borrowed view of the subtags of a [`LocaleId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleParts<'a> {
	pub language: &'a str,
	pub script: Option<&'a str>,
	pub region: Option<&'a str>,
	pub variants: SmallVec<[&'a str; 2]>,
}

impl LocaleId {
	/// Returns the root locale.
	pub fn root() -> Self {
		Self(Arc::from(ROOT_ID))
	}

	/// Parses and canonicalizes a locale identifier.
	///
	/// The empty string and any casing of `root` parse as [`LocaleId::root`].
	/// Empty subtags (as in `en__GB`) are collapsed.
	pub fn parse(input: &str) -> Result<Self> {
		let trimmed = input.trim();
		let mut subtags = trimmed.split(['_', '-']).filter(|s| !s.is_empty());
		let Some(language) = subtags.next() else {
			return Ok(Self::root());
		};
		if language.eq_ignore_ascii_case(ROOT_ID) {
			return match subtags.next() {
				None => Ok(Self::root()),
				Some(subtag) => Err(LocaleError::InvalidSubtag {
					id: input.to_string(),
					subtag: subtag.to_string(),
				}),
			};
		}
		if !is_language(language) {
			return Err(LocaleError::InvalidLanguage {
				id: input.to_string(),
				subtag: language.to_string(),
			});
		}

		let mut canonical = language.to_ascii_lowercase();
		let mut stage = Stage::Language;
		for subtag in subtags {
			stage = match classify(subtag, stage) {
				Some(Stage::Script) => {
					canonical.push('_');
					push_titlecase(&mut canonical, subtag);
					Stage::Script
				}
				Some(next) => {
					canonical.push('_');
					canonical.push_str(&subtag.to_ascii_uppercase());
					next
				}
				None => {
					return Err(LocaleError::InvalidSubtag {
						id: input.to_string(),
						subtag: subtag.to_string(),
					});
				}
			};
		}
		Ok(Self(Arc::from(canonical)))
	}

	/// Wraps a string already known to be canonical, such as a truncation of
	/// another canonical identifier.
	pub(crate) fn from_canonical(canonical: &str) -> Self {
		debug_assert!(Self::parse(canonical).is_ok_and(|id| id.as_str() == canonical));
		Self(Arc::from(canonical))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		&*self.0 == ROOT_ID
	}

	/// Splits the identifier into its subtags.
	pub fn parts(&self) -> LocaleParts<'_> {
		let mut subtags = self.0.split('_');
		let language = subtags.next().unwrap_or(ROOT_ID);
		let mut parts = LocaleParts {
			language,
			script: None,
			region: None,
			variants: SmallVec::new(),
		};
		let mut stage = Stage::Language;
		for subtag in subtags {
			stage = classify(subtag, stage).unwrap_or(Stage::Variant);
			match stage {
				Stage::Script => parts.script = Some(subtag),
				Stage::Region => parts.region = Some(subtag),
				_ => parts.variants.push(subtag),
			}
		}
		parts
	}

	pub fn language(&self) -> &str {
		self.parts().language
	}

	pub fn script(&self) -> Option<&str> {
		self.parts().script
	}

	pub fn region(&self) -> Option<&str> {
		self.parts().region
	}

	/// Number of `_`-delimited subtags, root counting as one.
	pub fn subtag_count(&self) -> usize {
		self.0.split('_').count()
	}
}

impl Default for LocaleId {
	fn default() -> Self {
		Self::root()
	}
}

impl fmt::Display for LocaleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for LocaleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LocaleId({})", self.0)
	}
}

impl FromStr for LocaleId {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl AsRef<str> for LocaleId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for LocaleId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl Serialize for LocaleId {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for LocaleId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
	Language,
	Script,
	Region,
	Variant,
}

/// Classifies a subtag given the last stage seen; subtags must appear in
/// script, region, variant order.
fn classify(subtag: &str, after: Stage) -> Option<Stage> {
	if after < Stage::Script && is_script(subtag) {
		Some(Stage::Script)
	} else if after < Stage::Region && is_region(subtag) {
		Some(Stage::Region)
	} else if is_variant(subtag) {
		Some(Stage::Variant)
	} else {
		None
	}
}

fn is_language(s: &str) -> bool {
	matches!(s.len(), 2..=3 | 5..=8) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_script(s: &str) -> bool {
	s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
	(s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())) || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(s: &str) -> bool {
	let alnum = s.bytes().all(|b| b.is_ascii_alphanumeric());
	match s.len() {
		5..=8 => alnum,
		4 => alnum && s.as_bytes()[0].is_ascii_digit(),
		_ => false,
	}
}

fn push_titlecase(out: &mut String, s: &str) {
	for (i, c) in s.chars().enumerate() {
		if i == 0 {
			out.push(c.to_ascii_uppercase());
		} else {
			out.push(c.to_ascii_lowercase());
		}
	}
}
