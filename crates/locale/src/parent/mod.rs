//! Parent-locale computation.
//!
//! The parent of a locale is, in order of precedence:
//!
//! 1. nothing, for root
//! 2. the explicit override from [`LocaleTables::parents`]
//! 3. root, when the locale is exactly `language_Script` and the script is not
//!    the default script of the language
//! 4. the locale with its last subtag removed, or root when only the language
//!    remains

use std::iter::FusedIterator;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{LocaleError, LocaleId, LocaleTables, Result};


/// Computes parents and ancestor chains from static [`LocaleTables`].
///
/// Construction validates the explicit parent table, so every chain produced
/// by a resolver is finite and ends at root.
#[derive(Debug, Clone)]
pub struct ParentResolver {
	tables: LocaleTables,
}

impl ParentResolver {
	/// Creates a resolver, rejecting tables that give root a parent or whose
	/// explicit entries form a cycle.
	pub fn new(tables: LocaleTables) -> Result<Self> {
		if tables.parents.keys().any(LocaleId::is_root) {
			return Err(LocaleError::RootHasParent);
		}
		let resolver = Self { tables };
		for child in resolver.tables.parents.keys() {
			let mut seen = FxHashSet::default();
			let mut current = Some(child.clone());
			while let Some(id) = current {
				if !seen.insert(id.clone()) {
					return Err(LocaleError::ParentCycle(id.to_string()));
				}
				current = resolver.parent_of(&id);
			}
		}
		debug!(explicit = resolver.tables.parents.len(), "locale parent table validated");
		Ok(resolver)
	}

	/// Resolver over [`LocaleTables::builtin`].
	pub fn builtin() -> Self {
		Self {
			tables: LocaleTables::builtin(),
		}
	}

	pub fn tables(&self) -> &LocaleTables {
		&self.tables
	}

	/// Returns the parent of `id`, or `None` for root.
	pub fn parent_of(&self, id: &LocaleId) -> Option<LocaleId> {
		if id.is_root() {
			return None;
		}
		if let Some(parent) = self.tables.explicit_parent(id) {
			return Some(parent.clone());
		}
		let Some((truncated, _)) = id.as_str().rsplit_once('_') else {
			return Some(LocaleId::root());
		};
		let parts = id.parts();
		if let Some(script) = parts.script
			&& parts.region.is_none()
			&& parts.variants.is_empty()
			&& self.tables.default_script(parts.language) != Some(script)
		{
			return Some(LocaleId::root());
		}
		Some(LocaleId::from_canonical(truncated))
	}

	/// Iterates `id` followed by each of its ancestors, ending with root.
	pub fn ancestors(&self, id: &LocaleId) -> Ancestors<'_> {
		Ancestors {
			resolver: self,
			next: Some(id.clone()),
		}
	}

	/// Collects [`Self::ancestors`].
	pub fn chain(&self, id: &LocaleId) -> Vec<LocaleId> {
		self.ancestors(id).collect()
	}

	/// Whether `ancestor` appears in the chain of `id`. A locale descends from
	/// itself.
	pub fn is_descendant_of(&self, id: &LocaleId, ancestor: &LocaleId) -> bool {
		self.ancestors(id).any(|candidate| &candidate == ancestor)
	}
}

impl Default for ParentResolver {
	fn default() -> Self {
		Self::builtin()
	}
}

/// Iterator returned by [`ParentResolver::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
	resolver: &'a ParentResolver,
	next: Option<LocaleId>,
}

impl Iterator for Ancestors<'_> {
	type Item = LocaleId;

	fn next(&mut self) -> Option<LocaleId> {
		let current = self.next.take()?;
		self.next = self.resolver.parent_of(&current);
		Some(current)
	}
}

impl FusedIterator for Ancestors<'_> {}
