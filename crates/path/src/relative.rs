//! Relative path addressing.

use crate::key::element_boundaries;
use crate::{PathError, PathKey, Result};

/// Removes the last element of `path`.
///
/// Separators inside quoted values are not element boundaries. Returns `None`
/// when `path` has a single element, or when a quote is left open.
pub fn strip_last_element(path: &str) -> Option<&str> {
	if !quotes_balanced(path) {
		return None;
	}
	element_boundaries(path).last().map(|&end| &path[..end])
}

/// Resolves `relative` against `base`.
///
/// An expression starting with `//` is absolute and replaces `base`. Otherwise
/// each leading `../` drops one trailing element of `base` and the remainder
/// is appended as child elements. Single quotes are normalized to double.
pub fn add_relative(base: &PathKey, relative: &str) -> Result<PathKey> {
	let relative = relative.replace('\'', "\"");
	if relative.starts_with("//") {
		return PathKey::parse(&relative);
	}
	let mut current = base.as_str();
	let mut rest = relative.as_str();
	while let Some(tail) = rest.strip_prefix("../") {
		current = strip_last_element(current).ok_or_else(|| PathError::RelativeOverflow {
			base: base.to_string(),
			relative: relative.clone(),
		})?;
		rest = tail;
	}
	let rest = rest.trim_end_matches('/');
	if rest.is_empty() {
		return PathKey::parse(current);
	}
	PathKey::parse(&format!("{current}/{rest}"))
}

fn quotes_balanced(path: &str) -> bool {
	let mut quote = None;
	for b in path.bytes() {
		match (quote, b) {
			(None, b'"' | b'\'') => quote = Some(b),
			(Some(q), _) if q == b => quote = None,
			_ => {}
		}
	}
	quote.is_none()
}
