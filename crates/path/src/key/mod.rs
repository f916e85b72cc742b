//! Canonical path keys.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::{PathError, PathParts, Result};

#[cfg(test)]
mod tests;

/// Immutable, canonical path string.
///
/// Canonical means parsed and re-printed by [`PathParts`]: `//` prefix,
/// double-quoted attribute values. Ordering is byte order of that string, so
/// a path sorts immediately before its descendants.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(Arc<str>);

impl PathKey {
	/// Parses and canonicalizes `path`.
	pub fn parse(path: &str) -> Result<Self> {
		Ok(PathParts::parse(path)?.to_key())
	}

	/// Wraps a string the caller knows to be canonical, such as the splice of
	/// two canonical paths at an element boundary.
	pub fn from_trusted(path: impl Into<Arc<str>>) -> Self {
		Self(path.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn parts(&self) -> Result<PathParts> {
		PathParts::parse(&self.0)
	}

	/// Strict ancestor paths at element boundaries, longest first.
	///
	/// `//a/b[@x="1/2"]/c` yields `//a/b[@x="1/2"]` then `//a`.
	pub fn element_prefixes(&self) -> impl Iterator<Item = &str> + '_ {
		element_boundaries(&self.0).into_iter().rev().map(|end| &self.0[..end])
	}

	/// Number of elements.
	pub fn depth(&self) -> usize {
		element_boundaries(&self.0).len() + 1
	}

	/// Whether `prefix` is this path or one of its element-boundary ancestors.
	pub fn has_element_prefix(&self, prefix: &str) -> bool {
		self.0.strip_prefix(prefix).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
	}

	/// Replaces an element-boundary `prefix` with `replacement`, keeping the
	/// descendant suffix.
	pub fn replace_prefix(&self, prefix: &str, replacement: &str) -> Option<PathKey> {
		if !self.has_element_prefix(prefix) {
			return None;
		}
		let suffix = &self.0[prefix.len()..];
		Some(Self::from_trusted(format!("{replacement}{suffix}")))
	}

	/// Name of the last element.
	pub fn last_element_name(&self) -> &str {
		let start = element_boundaries(&self.0).last().map_or(2, |&i| i + 1);
		let tail = &self.0[start.min(self.0.len())..];
		tail.split('[').next().unwrap_or(tail)
	}

	/// Whether any element is named `name`.
	pub fn contains_element(&self, name: &str) -> bool {
		let mut start = 2;
		for end in element_boundaries(&self.0).into_iter().chain(std::iter::once(self.0.len())) {
			let segment = &self.0[start.min(end)..end];
			if segment.split('[').next() == Some(name) {
				return true;
			}
			start = end + 1;
		}
		false
	}
}

/// Byte offsets of the `/` separators between elements, skipping the leading
/// `//` and any `/` inside quoted values.
pub(crate) fn element_boundaries(path: &str) -> SmallVec<[usize; 16]> {
	let mut out = SmallVec::new();
	let mut quote = None;
	for (i, b) in path.bytes().enumerate().skip(2) {
		match (quote, b) {
			(None, b'"' | b'\'') => quote = Some(b),
			(Some(q), _) if q == b => quote = None,
			(None, b'/') => out.push(i),
			_ => {}
		}
	}
	out
}

impl fmt::Display for PathKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for PathKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl FromStr for PathKey {
	type Err = PathError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl AsRef<str> for PathKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for PathKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl Serialize for PathKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for PathKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}
