//! Full paths versus distinguishing paths.
//!
//! A full path carries metadata attributes (draft status, references, ...)
//! that do not identify the data point. Stripping them yields the
//! distinguishing path used as the storage key.

use rustc_hash::FxHashSet;

use crate::{PathKey, PathParts, Result};

/// Attributes that never distinguish one data point from another.
pub const DEFAULT_NON_DISTINGUISHING: &[&str] = &["draft", "references", "standard", "validSubLocales", "xml:space"];

/// Set of non-distinguishing attribute names.
#[derive(Debug, Clone)]
pub struct DistinguishingRules {
	non_distinguishing: FxHashSet<Box<str>>,
}

impl Default for DistinguishingRules {
	fn default() -> Self {
		Self::new(DEFAULT_NON_DISTINGUISHING.iter().copied())
	}
}

impl DistinguishingRules {
	pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
		Self {
			non_distinguishing: names.into_iter().map(Box::from).collect(),
		}
	}

	pub fn is_distinguishing(&self, attribute: &str) -> bool {
		!self.non_distinguishing.contains(attribute)
	}

	/// Derives the distinguishing path of `full`.
	pub fn distinguishing(&self, full: &str) -> Result<PathKey> {
		let mut parts = PathParts::parse(full)?;
		for element in parts.elements_mut() {
			element.attributes.retain(|(name, _)| self.is_distinguishing(name));
		}
		Ok(parts.to_key())
	}

	/// Copies the non-distinguishing attributes of `full` onto `target`.
	///
	/// Elements are paired from the end, so `full` may come from a different
	/// (aliased) location with a different prefix. Attributes already on
	/// `target` win.
	pub fn transfer_metadata(&self, target: &PathKey, full: &str) -> Result<String> {
		let mut parts = target.parts()?;
		let source = PathParts::parse(full)?;
		let pairs = parts.len().min(source.len());
		let target_len = parts.len();
		for back in 0..pairs {
			let Some(from) = source.element_from_end(back) else {
				break;
			};
			let to = &mut parts.elements_mut()[target_len - 1 - back];
			for (name, value) in &from.attributes {
				if !self.is_distinguishing(name) && to.attribute(name).is_none() {
					to.attributes.push((name.clone(), value.clone()));
				}
			}
		}
		Ok(parts.to_string())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_distinguishing_strips_metadata() {
		let rules = DistinguishingRules::default();
		let key = rules
			.distinguishing(r#"//ldml/a[@type="x"][@draft="contributed"]/b[@references="R1"][@alt="short"]"#)
			.unwrap();
		assert_eq!(key.as_str(), r#"//ldml/a[@type="x"]/b[@alt="short"]"#);
	}

	#[test]
	fn test_distinguishing_is_idempotent() {
		let rules = DistinguishingRules::default();
		let once = rules.distinguishing(r#"//ldml/a[@draft="unconfirmed"]"#).unwrap();
		assert_eq!(rules.distinguishing(once.as_str()).unwrap(), once);
	}

	#[test]
	fn test_custom_rules() {
		let rules = DistinguishingRules::new(["alt"]);
		assert!(!rules.is_distinguishing("alt"));
		assert!(rules.is_distinguishing("draft"));
	}

	#[test]
	fn test_transfer_metadata_aligns_from_end() {
		let rules = DistinguishingRules::default();
		let target = PathKey::parse(r#"//ldml/old/days/day[@type="sun"]"#).unwrap();
		let merged = rules
			.transfer_metadata(&target, r#"//ldml/new/deeper/days[@draft="provisional"]/day[@type="mon"][@draft="contributed"]"#)
			.unwrap();
		assert_eq!(
			merged,
			r#"//ldml/old/days[@draft="provisional"]/day[@type="sun"][@draft="contributed"]"#
		);
	}
}
