//! Unresolved per-locale data layers.
//!
//! A [`DataLayer`] stores at most one value per distinguishing path, plus the
//! full path the value was written under when it carried metadata. Mutations
//! notify subscribed [`LayerListener`]s after the layer's lock is released.
//!
//! Subscriptions are explicit handles: dropping a [`Subscription`] removes the
//! listener.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use stratum_locale::LocaleId;
use stratum_path::{DistinguishingRules, PathKey};
use tracing::{debug, trace};

use crate::{AliasTable, Result, SourceError};


/// Identifier of the synthetic fallback layer.
pub const CODE_FALLBACK_ID: &str = "code-fallback";

/// Identity of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
	Locale(LocaleId),
	/// The fallback layer, and the location of paths found nowhere.
	CodeFallback,
}

impl SourceId {
	pub fn locale(&self) -> Option<&LocaleId> {
		match self {
			Self::Locale(id) => Some(id),
			Self::CodeFallback => None,
		}
	}

	pub fn is_code_fallback(&self) -> bool {
		matches!(self, Self::CodeFallback)
	}

	pub fn is_root(&self) -> bool {
		self.locale().is_some_and(LocaleId::is_root)
	}
}

impl From<LocaleId> for SourceId {
	fn from(id: LocaleId) -> Self {
		Self::Locale(id)
	}
}

impl fmt::Display for SourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Locale(id) => fmt::Display::fmt(id, f),
			Self::CodeFallback => f.write_str(CODE_FALLBACK_ID),
		}
	}
}

/// Receives change notifications from a [`DataLayer`].
pub trait LayerListener: Send + Sync {
	/// Called once per changed path, after the change is visible to readers.
	fn value_changed(&self, source: &SourceId, path: &PathKey);
}

/// How [`DataLayer::put_all`] treats paths present on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
	/// Keep the existing value.
	#[default]
	KeepMine,
	/// Take the incoming value and full path.
	Replace,
}

#[derive(Default)]
struct LayerState {
	values: FxHashMap<PathKey, String>,
	/// Only recorded when the full path differs from the key.
	full_paths: FxHashMap<PathKey, String>,
	frozen: bool,
}

#[derive(Default)]
struct Listeners {
	next_id: u64,
	entries: FxHashMap<u64, Arc<dyn LayerListener>>,
}

/// Exact-match path store for one locale.
pub struct DataLayer {
	id: SourceId,
	rules: DistinguishingRules,
	state: RwLock<LayerState>,
	aliases: Mutex<Option<Arc<AliasTable>>>,
	listeners: Mutex<Listeners>,
}

impl fmt::Debug for DataLayer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.read();
		f.debug_struct("DataLayer")
			.field("id", &self.id)
			.field("paths", &state.values.len())
			.field("frozen", &state.frozen)
			.finish()
	}
}

impl DataLayer {
	pub fn new(locale: LocaleId) -> Self {
		Self::with_id(SourceId::Locale(locale))
	}

	/// Empty, unfrozen layer identified as the code fallback.
	pub fn code_fallback() -> Self {
		Self::with_id(SourceId::CodeFallback)
	}

	fn with_id(id: SourceId) -> Self {
		Self {
			id,
			rules: DistinguishingRules::default(),
			state: RwLock::new(LayerState::default()),
			aliases: Mutex::new(None),
			listeners: Mutex::new(Listeners::default()),
		}
	}

	/// Builds a layer from `(path, value)` pairs.
	pub fn from_values<'a>(locale: LocaleId, values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
		let layer = Self::new(locale);
		{
			let mut state = layer.state.write();
			for (path, value) in values {
				state.values.insert(PathKey::parse(path)?, value.to_string());
			}
		}
		Ok(layer)
	}

	pub fn id(&self) -> &SourceId {
		&self.id
	}

	pub fn locale(&self) -> Option<&LocaleId> {
		self.id.locale()
	}

	pub fn value(&self, path: &PathKey) -> Option<String> {
		self.state.read().values.get(path).cloned()
	}

	/// Runs `f` on the value at `path` without cloning it.
	pub fn inspect<R>(&self, path: &PathKey, f: impl FnOnce(Option<&str>) -> R) -> R {
		f(self.state.read().values.get(path).map(String::as_str))
	}

	pub fn contains(&self, path: &PathKey) -> bool {
		self.state.read().values.contains_key(path)
	}

	/// Full path of the value at `path`, which is `path` itself unless the
	/// value was written with metadata.
	pub fn full_path(&self, path: &PathKey) -> Option<String> {
		let state = self.state.read();
		if !state.values.contains_key(path) {
			return None;
		}
		Some(state.full_paths.get(path).cloned().unwrap_or_else(|| path.to_string()))
	}

	/// Whether the value at `path` carries a draft status.
	pub fn is_draft(&self, path: &PathKey) -> bool {
		self.state.read().full_paths.get(path).is_some_and(|full| full.contains("[@draft="))
	}

	/// All paths with a value, in no particular order.
	pub fn paths(&self) -> Vec<PathKey> {
		self.state.read().values.keys().cloned().collect()
	}

	/// Paths under `prefix` whose whitespace-normalized value equals `normalized`.
	pub fn paths_with_value(&self, normalized: &str, prefix: &str) -> Vec<PathKey> {
		self.state
			.read()
			.values
			.iter()
			.filter(|(path, value)| path.as_str().starts_with(prefix) && normalize_value(value) == normalized)
			.map(|(path, _)| path.clone())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.state.read().values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.read().values.is_empty()
	}

	pub fn is_frozen(&self) -> bool {
		self.state.read().frozen
	}

	/// Rejects all further mutation.
	pub fn freeze(&self) {
		self.state.write().frozen = true;
	}

	pub fn set_value(&self, path: PathKey, value: impl Into<String>) -> Result<()> {
		{
			let mut state = self.writable()?;
			state.full_paths.remove(&path);
			state.values.insert(path.clone(), value.into());
		}
		self.changed(&[path]);
		Ok(())
	}

	/// Stores `value` under the distinguishing path of `full_path`, recording
	/// the full path when it carries extra attributes.
	pub fn put_value_at_full_path(&self, full_path: &str, value: impl Into<String>) -> Result<PathKey> {
		let path = self.rules.distinguishing(full_path)?;
		let full = PathKey::parse(full_path)?;
		{
			let mut state = self.writable()?;
			if full == path {
				state.full_paths.remove(&path);
			} else {
				state.full_paths.insert(path.clone(), full.to_string());
			}
			state.values.insert(path.clone(), value.into());
		}
		self.changed(std::slice::from_ref(&path));
		Ok(path)
	}

	/// Removes the value at `path`, returning it. Listeners are only notified
	/// when a value was present.
	pub fn remove_value(&self, path: &PathKey) -> Result<Option<String>> {
		let removed = {
			let mut state = self.writable()?;
			state.full_paths.remove(path);
			state.values.remove(path)
		};
		if removed.is_some() {
			self.changed(std::slice::from_ref(path));
		}
		Ok(removed)
	}

	/// Removes every path in `paths`.
	pub fn remove_all<'a>(&self, paths: impl IntoIterator<Item = &'a PathKey>) -> Result<()> {
		let removed: Vec<PathKey> = {
			let mut state = self.writable()?;
			paths
				.into_iter()
				.filter(|path| {
					state.full_paths.remove(*path);
					state.values.remove(*path).is_some()
				})
				.cloned()
				.collect()
		};
		self.changed(&removed);
		Ok(())
	}

	/// Copies every value of `other` into this layer.
	pub fn put_all(&self, other: &DataLayer, policy: MergePolicy) -> Result<()> {
		let incoming: Vec<(PathKey, String, Option<String>)> = {
			let theirs = other.state.read();
			theirs
				.values
				.iter()
				.map(|(path, value)| (path.clone(), value.clone(), theirs.full_paths.get(path).cloned()))
				.collect()
		};
		let changed: Vec<PathKey> = {
			let mut state = self.writable()?;
			let mut changed = Vec::new();
			for (path, value, full) in incoming {
				if policy == MergePolicy::KeepMine && state.values.contains_key(&path) {
					continue;
				}
				match full {
					Some(full) => state.full_paths.insert(path.clone(), full),
					None => state.full_paths.remove(&path),
				};
				state.values.insert(path.clone(), value);
				changed.push(path);
			}
			changed
		};
		debug!(layer = %self.id, from = %other.id, count = changed.len(), "merged layer");
		self.changed(&changed);
		Ok(())
	}

	/// Aliases declared in this layer, built on first use and dropped on
	/// mutation. Only meaningful for root.
	pub fn alias_table(&self) -> Result<Arc<AliasTable>> {
		let mut memo = self.aliases.lock();
		if let Some(table) = memo.as_ref() {
			return Ok(Arc::clone(table));
		}
		let table = {
			let state = self.state.read();
			Arc::new(AliasTable::from_paths(state.values.keys())?)
		};
		debug!(layer = %self.id, aliases = table.len(), "built alias table");
		*memo = Some(Arc::clone(&table));
		Ok(table)
	}

	/// Registers `listener` until the returned handle is dropped.
	pub fn subscribe(self: &Arc<Self>, listener: Arc<dyn LayerListener>) -> Subscription {
		let mut listeners = self.listeners.lock();
		let id = listeners.next_id;
		listeners.next_id = listeners.next_id.wrapping_add(1);
		listeners.entries.insert(id, listener);
		Subscription {
			layer: Arc::downgrade(self),
			id,
		}
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.lock().entries.len()
	}

	fn writable(&self) -> Result<parking_lot::RwLockWriteGuard<'_, LayerState>> {
		let state = self.state.write();
		if state.frozen {
			return Err(SourceError::FrozenLayer(self.id.clone()));
		}
		Ok(state)
	}

	/// Drops the alias memo and notifies listeners. Must be called with no
	/// lock on `state` held.
	fn changed(&self, paths: &[PathKey]) {
		if paths.is_empty() {
			return;
		}
		*self.aliases.lock() = None;
		let listeners: Vec<Arc<dyn LayerListener>> = self.listeners.lock().entries.values().cloned().collect();
		trace!(layer = %self.id, paths = paths.len(), listeners = listeners.len(), "layer changed");
		for path in paths {
			for listener in &listeners {
				listener.value_changed(&self.id, path);
			}
		}
	}
}

/// Handle keeping a [`LayerListener`] registered on a [`DataLayer`].
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
	layer: Weak<DataLayer>,
	id: u64,
}

impl Subscription {
	/// Unregisters the listener now.
	pub fn cancel(self) {}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(layer) = self.layer.upgrade() {
			layer.listeners.lock().entries.remove(&self.id);
		}
	}
}

/// Collapses runs of whitespace to one space and trims the ends.
pub(crate) fn normalize_value(value: &str) -> String {
	value.split_whitespace().collect::<Vec<_>>().join(" ")
}
