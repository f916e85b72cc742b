//! Per-view memoization and invalidation.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use stratum_path::PathKey;
use tracing::trace;

use super::AliasLocation;
use crate::{AliasTable, LayerListener, SourceId};

/// A point lookup of `path` whose layer walk begins at `start`.
///
/// `start` is non-zero only for lookups reached through a cross-locale alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
	pub path: PathKey,
	pub start: usize,
}

#[derive(Default)]
pub(crate) struct CacheState {
	locations: FxHashMap<CacheKey, AliasLocation>,
	/// Path to the cached lookups whose answer depends on the values at it.
	dependents: FxHashMap<PathKey, FxHashSet<CacheKey>>,
	pub closure: Option<Arc<BTreeSet<PathKey>>>,
	/// Alias table the cached answers were computed with.
	pub aliases: Option<Arc<AliasTable>>,
}

impl CacheState {
	pub fn get(&self, key: &CacheKey) -> Option<&AliasLocation> {
		self.locations.get(key)
	}

	pub fn len(&self) -> usize {
		self.locations.len()
	}

	/// Stores `answer` for every key of one resolved chain. `chain` lists every
	/// path consulted on the way.
	pub fn store(&mut self, keys: &[CacheKey], chain: &[PathKey], answer: &AliasLocation) {
		for key in keys {
			self.locations.insert(key.clone(), answer.clone());
		}
		for path in chain {
			self.dependents.entry(path.clone()).or_default().extend(keys.iter().cloned());
		}
	}

	/// Evicts every lookup that consulted `path`, and transitively every
	/// lookup that reused one of those.
	pub fn invalidate(&mut self, path: &PathKey) -> usize {
		let mut evicted = 0;
		let mut seen = FxHashSet::default();
		let mut pending = vec![path.clone()];
		while let Some(path) = pending.pop() {
			if !seen.insert(path.clone()) {
				continue;
			}
			let Some(keys) = self.dependents.remove(&path) else {
				continue;
			};
			for key in keys {
				if self.locations.remove(&key).is_some() {
					evicted += 1;
				}
				pending.push(key.path);
			}
		}
		evicted
	}

	pub fn clear(&mut self) {
		self.locations.clear();
		self.dependents.clear();
		self.closure = None;
		self.aliases = None;
	}
}

/// Cache shared between a view and the layers it listens to.
#[derive(Default)]
pub(crate) struct ViewCache {
	pub state: Mutex<CacheState>,
}

impl LayerListener for ViewCache {
	fn value_changed(&self, source: &SourceId, path: &PathKey) {
		let mut state = self.state.lock();
		if source.is_root() {
			let evicted = state.len();
			state.clear();
			trace!(%source, %path, evicted, "root changed, cleared view cache");
			return;
		}
		state.closure = None;
		let mut evicted = state.invalidate(path);
		if let Some(aliases) = state.aliases.clone() {
			for dependent in aliases.sources_of(path) {
				evicted += state.invalidate(&dependent);
			}
		}
		trace!(%source, %path, evicted, "invalidated view cache");
	}
}
