//! Alias declarations and the alias table.
//!
//! Root data declares redirections with a trailing `alias` element:
//!
//! ```text
//! //ldml/dates/calendars/calendar[@type="buddhist"]/alias[@source="locale"][@path="../calendar[@type='gregorian']"]
//! ```
//!
//! The part before `/alias` is the old path. `path` is resolved against it
//! with [`add_relative`]; `source="locale"` (or no `source`) keeps the locale
//! being resolved, any other `source` names a locale.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use stratum_locale::LocaleId;
use stratum_path::{PathKey, PathParts, add_relative};

use crate::{Result, SourceError};

#[cfg(test)]
mod tests;

/// Element name marking an alias declaration.
pub const ALIAS_ELEMENT: &str = "alias";

/// `source` value meaning "the locale being resolved".
const SAME_LOCALE: &str = "locale";

/// Where an aliased path redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
	pub path: PathKey,
	/// `None` keeps the locale being resolved.
	pub locale: Option<LocaleId>,
}

/// One parsed alias declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
	pub old_path: PathKey,
	pub target: AliasTarget,
}

impl Alias {
	/// Parses the alias declared by `path`, or `None` when `path` has no
	/// `alias` element.
	pub fn from_declaration(path: &PathKey) -> Result<Option<Self>> {
		if !path.contains_element(ALIAS_ELEMENT) {
			return Ok(None);
		}
		let parts = path.parts()?;
		let Some(index) = parts.elements().iter().position(|e| e.name == ALIAS_ELEMENT) else {
			return Ok(None);
		};
		let malformed = |reason: &str| SourceError::MalformedAlias {
			path: path.clone(),
			reason: reason.to_string(),
		};
		if index == 0 {
			return Err(malformed("alias element has no parent path"));
		}
		if index + 1 != parts.len() {
			return Err(malformed("alias element must be last"));
		}
		let marker = &parts.elements()[index];
		let mut old = parts.clone();
		old.truncate(index);
		let old_path = old.to_key();

		let locale = match marker.attribute("source") {
			None | Some(SAME_LOCALE) => None,
			Some(source) => Some(LocaleId::parse(source).map_err(|e| malformed(&e.to_string()))?),
		};
		let new_path = match marker.attribute("path") {
			None => old_path.clone(),
			Some(relative) => add_relative(&old_path, relative).map_err(|e| malformed(&e.to_string()))?,
		};
		if locale.is_none() && new_path == old_path {
			return Err(SourceError::AliasWithoutChange(old_path));
		}
		Ok(Some(Self {
			old_path,
			target: AliasTarget { path: new_path, locale },
		}))
	}
}

/// Forward and reverse alias maps of one layer.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
	forward: BTreeMap<PathKey, AliasTarget>,
	/// New path to the old paths redirected onto it.
	reverse: BTreeMap<PathKey, BTreeSet<PathKey>>,
}

impl AliasTable {
	/// Collects the aliases declared among `paths`.
	pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a PathKey>) -> Result<Self> {
		let mut table = Self::default();
		for path in paths {
			if let Some(alias) = Alias::from_declaration(path)? {
				table.insert(alias);
			}
		}
		Ok(table)
	}

	/// Adds `alias`, replacing any alias with the same old path.
	pub fn insert(&mut self, alias: Alias) {
		let Alias { old_path, target } = alias;
		if let Some(previous) = self.forward.insert(old_path.clone(), target.clone())
			&& let Some(olds) = self.reverse.get_mut(&previous.path)
			&& olds.remove(&old_path)
			&& olds.is_empty()
		{
			self.reverse.remove(&previous.path);
		}
		self.reverse.entry(target.path).or_default().insert(old_path);
	}

	pub fn len(&self) -> usize {
		self.forward.len()
	}

	pub fn is_empty(&self) -> bool {
		self.forward.is_empty()
	}

	/// Declared aliases ordered by old path.
	pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &AliasTarget)> {
		self.forward.iter()
	}

	pub fn get(&self, path: &PathKey) -> Option<&AliasTarget> {
		self.forward.get(path)
	}

	/// Exact alias of `path`, else the alias of its longest aliased ancestor
	/// with the descendant suffix spliced onto the target.
	pub fn lookup(&self, path: &PathKey) -> Option<AliasTarget> {
		if let Some(target) = self.forward.get(path) {
			return Some(target.clone());
		}
		path.element_prefixes().find_map(|prefix| {
			let target = self.forward.get(prefix)?;
			Some(AliasTarget {
				path: path.replace_prefix(prefix, target.path.as_str())?,
				locale: target.locale.clone(),
			})
		})
	}

	/// Paths that redirect onto `path` in one hop, through an alias of `path`
	/// itself or of one of its ancestors.
	pub fn sources_of(&self, path: &PathKey) -> Vec<PathKey> {
		let mut out = Vec::new();
		let candidates = std::iter::once(path.as_str()).chain(path.element_prefixes());
		for new_prefix in candidates {
			let Some(olds) = self.reverse.get(new_prefix) else {
				continue;
			};
			out.extend(olds.iter().filter_map(|old| path.replace_prefix(new_prefix, old.as_str())));
		}
		out
	}

	/// Every path that redirects in one hop onto a member of `paths`.
	///
	/// Works over the sorted set: all descendants of a target path follow it
	/// contiguously, so each reverse entry scans one range.
	pub fn direct_aliases(&self, paths: &BTreeSet<PathKey>) -> BTreeSet<PathKey> {
		let mut out = BTreeSet::new();
		for (new_path, olds) in &self.reverse {
			let range = paths.range::<str, _>((Bound::Included(new_path.as_str()), Bound::Unbounded));
			for path in range.take_while(|p| p.as_str().starts_with(new_path.as_str())) {
				if !path.has_element_prefix(new_path.as_str()) {
					continue;
				}
				out.extend(olds.iter().filter_map(|old| path.replace_prefix(new_path.as_str(), old.as_str())));
			}
		}
		out
	}
}

/// Builds the path declaring an alias, the inverse of
/// [`Alias::from_declaration`].
pub fn declaration_path(old_path: &PathKey, source: Option<&LocaleId>, relative: Option<&str>) -> Result<PathKey> {
	let mut parts: PathParts = old_path.parts()?;
	let mut marker = stratum_path::Element::new(ALIAS_ELEMENT);
	marker.set_attribute("source", source.map_or(SAME_LOCALE, LocaleId::as_str));
	if let Some(relative) = relative {
		marker.set_attribute("path", relative.replace('"', "'"));
	}
	parts.push(marker);
	Ok(parts.to_key())
}
