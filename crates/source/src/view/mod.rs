//! Resolving views over a chain of layers.
//!
//! A [`ResolvingView`] answers, for one locale, where the effective value of a
//! path lives. Its layers run from the locale itself to root, followed by the
//! code-fallback layer. The view never mutates layers; it listens to them and
//! evicts cached answers when they change.
//!
//! Lookups run as a loop over rewritten paths rather than as recursion, so the
//! alias depth limit is a counter and every failure surfaces as a
//! [`SourceError`].

mod cache;
mod trace;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use stratum_locale::LocaleId;
use stratum_path::{DistinguishingRules, PathKey, rewrite};
use tracing::{debug, warn};

use self::cache::{CacheKey, CacheState, ViewCache};
pub use self::trace::{InheritanceReason, InheritanceStep};
use crate::layer::normalize_value;
use crate::{AliasTable, AliasTarget, DataLayer, ResolverConfig, Result, SourceError, SourceId, Subscription};


/// Where a path's effective value was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasLocation {
	/// The path holding the value, which differs from the requested path when
	/// an alias was followed.
	pub path: PathKey,
	pub source: SourceId,
}

impl AliasLocation {
	/// Whether nothing supplied a value.
	pub fn is_code_fallback(&self) -> bool {
		self.source.is_code_fallback()
	}
}

impl fmt::Display for AliasLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} @ {}", self.path, self.source)
	}
}

/// A location together with the value stored there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
	pub value: Option<String>,
	pub location: AliasLocation,
}

/// Rewrite applied when no layer has a value for a path.
#[derive(Debug)]
pub(crate) enum Hop {
	Alias(AliasTarget),
	RemovedAlt(PathKey),
	ChangedCount(PathKey),
}

/// Finds the rewrite of `path`: an explicit alias, then the path without
/// `alt`, then the plural-count fallback.
pub(crate) fn next_hop(aliases: &AliasTable, path: &PathKey) -> Result<Option<Hop>> {
	if let Some(target) = aliases.lookup(path) {
		return Ok(Some(Hop::Alias(target)));
	}
	if let Some(without) = rewrite::without_alt(path) {
		return Ok(Some(Hop::RemovedAlt(without)));
	}
	let Some(other) = rewrite::with_count_other(path) else {
		return Ok(None);
	};
	if &other != path {
		return Ok(Some(Hop::ChangedCount(other)));
	}
	if !rewrite::is_display_name(path) {
		return Ok(None);
	}
	let stripped = rewrite::without_count(path);
	if &stripped == path {
		return Err(SourceError::CountRewriteUnchanged(path.clone()));
	}
	Ok(Some(Hop::ChangedCount(stripped)))
}

/// Read-only resolution over one locale's layer chain.
pub struct ResolvingView {
	locale: LocaleId,
	/// Own layer first, root last.
	layers: Vec<Arc<DataLayer>>,
	fallback: Arc<DataLayer>,
	config: ResolverConfig,
	rules: DistinguishingRules,
	cache: Arc<ViewCache>,
	_subscriptions: Vec<Subscription>,
}

impl fmt::Debug for ResolvingView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let chain: Vec<String> = self.layers.iter().map(|l| l.id().to_string()).collect();
		f.debug_struct("ResolvingView").field("locale", &self.locale).field("chain", &chain).finish()
	}
}

impl ResolvingView {
	/// Creates a view over `layers`, ordered from the view's own locale to
	/// root, and subscribes to each of them.
	pub fn new(layers: Vec<Arc<DataLayer>>, fallback: Arc<DataLayer>, config: ResolverConfig) -> Result<Self> {
		let Some(first) = layers.first() else {
			return Err(SourceError::InvalidChain("a view needs at least one layer".to_string()));
		};
		let Some(locale) = first.locale().cloned() else {
			return Err(SourceError::InvalidChain("the code-fallback layer cannot head a chain".to_string()));
		};
		if !layers.last().is_some_and(|l| l.id().is_root()) {
			return Err(SourceError::InvalidChain(format!("chain for '{locale}' does not end at root")));
		}
		let mut seen = FxHashSet::default();
		for layer in &layers {
			if layer.id().is_code_fallback() || !seen.insert(layer.id().clone()) {
				return Err(SourceError::InvalidChain(format!("layer '{}' is misplaced in the chain for '{locale}'", layer.id())));
			}
		}
		if !fallback.id().is_code_fallback() {
			return Err(SourceError::InvalidChain(format!("fallback layer is '{}'", fallback.id())));
		}

		let cache = Arc::new(ViewCache::default());
		let subscriptions = layers.iter().map(|layer| layer.subscribe(cache.clone())).collect();
		debug!(%locale, layers = layers.len(), caching = config.caching, "created resolving view");
		Ok(Self {
			locale,
			layers,
			fallback,
			config,
			rules: DistinguishingRules::default(),
			cache,
			_subscriptions: subscriptions,
		})
	}

	pub fn locale(&self) -> &LocaleId {
		&self.locale
	}

	/// The view's own, unresolved layer.
	pub fn unresolved(&self) -> &Arc<DataLayer> {
		&self.layers[0]
	}

	pub fn layers(&self) -> &[Arc<DataLayer>] {
		&self.layers
	}

	pub fn fallback(&self) -> &Arc<DataLayer> {
		&self.fallback
	}

	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}

	/// Number of memoized point lookups.
	pub fn cached_lookups(&self) -> usize {
		self.cache.state.lock().len()
	}

	/// Finds where the effective value of `path` lives.
	pub fn resolve(&self, path: &PathKey) -> Result<AliasLocation> {
		let mut state = self.cache.state.lock();
		self.locate(&mut state, path, 0, false)
	}

	/// The effective value of `path`, `None` when nothing supplies one.
	pub fn value(&self, path: &PathKey) -> Result<Option<String>> {
		Ok(self.resolve_value(path)?.value)
	}

	pub fn resolve_value(&self, path: &PathKey) -> Result<Resolved> {
		let location = self.resolve(path)?;
		Ok(self.resolved_at(location))
	}

	/// What `path` would resolve to if the view's own layer had no value for
	/// it.
	pub fn bailey(&self, path: &PathKey) -> Result<Resolved> {
		let location = {
			let mut state = self.cache.state.lock();
			self.locate(&mut state, path, 0, true)?
		};
		Ok(self.resolved_at(location))
	}

	/// Layer where `path` is found, [`SourceId::CodeFallback`] when nowhere.
	pub fn source_locale(&self, path: &PathKey) -> Result<SourceId> {
		Ok(self.resolve(path)?.source)
	}

	/// Whether the view's own layer has a value for `path`. Ancestors are not
	/// consulted.
	pub fn is_here(&self, path: &PathKey) -> bool {
		self.unresolved().contains(path)
	}

	/// Full path of the effective value, with metadata copied from the layer
	/// that supplied it. `None` when nothing supplies a value.
	pub fn full_path(&self, path: &PathKey) -> Result<Option<String>> {
		let location = self.resolve(path)?;
		let Some(full) = self.layer_for(&location.source).and_then(|layer| layer.full_path(&location.path)) else {
			return Ok(None);
		};
		if &location.path == path {
			return Ok(Some(full));
		}
		Ok(Some(self.rules.transfer_metadata(path, &full)?))
	}

	/// Every path the view answers: the paths of all layers plus every path
	/// that reaches one of them through aliases.
	pub fn all_paths(&self) -> Result<Arc<BTreeSet<PathKey>>> {
		let mut state = self.cache.state.lock();
		if self.config.caching
			&& let Some(closure) = &state.closure
		{
			return Ok(Arc::clone(closure));
		}
		let mut paths: BTreeSet<PathKey> = self.walk().flat_map(|layer| layer.paths()).collect();
		let direct = paths.len();
		let aliases = self.aliases(&mut state)?;
		let mut frontier = paths.clone();
		let mut rounds = 0;
		loop {
			let fresh: BTreeSet<PathKey> = aliases.direct_aliases(&frontier).into_iter().filter(|p| !paths.contains(p)).collect();
			if fresh.is_empty() {
				break;
			}
			rounds += 1;
			if rounds > self.config.max_closure_depth {
				warn!(locale = %self.locale, limit = self.config.max_closure_depth, "alias closure did not converge");
				return Err(SourceError::ClosureDepthExceeded {
					limit: self.config.max_closure_depth,
				});
			}
			paths.extend(fresh.iter().cloned());
			frontier = fresh;
		}
		debug!(locale = %self.locale, direct, total = paths.len(), rounds, "computed path closure");
		let paths = Arc::new(paths);
		if self.config.caching {
			state.closure = Some(Arc::clone(&paths));
		}
		Ok(paths)
	}

	/// Paths under `prefix` whose effective value equals `value` after
	/// whitespace normalization.
	///
	/// A value in an ancestor only counts when no more specific layer has an
	/// entry at the same path. An inheritance marker is such an entry, so a
	/// marker in a child hides the ancestor's value here.
	///
	/// Paths that alias onto a match are included when their own resolved
	/// value also matches.
	pub fn paths_with_value(&self, value: &str, prefix: &str) -> Result<BTreeSet<PathKey>> {
		let normalized = normalize_value(value);
		let mut result = BTreeSet::new();
		for (depth, layer) in self.walk().enumerate() {
			for path in layer.paths_with_value(&normalized, prefix) {
				if !self.walk().take(depth).any(|child| child.contains(&path)) {
					result.insert(path);
				}
			}
		}

		let aliases = {
			let mut state = self.cache.state.lock();
			self.aliases(&mut state)?
		};
		let mut reached = BTreeSet::new();
		let mut frontier = result.clone();
		let mut rounds = 0;
		loop {
			let fresh: BTreeSet<PathKey> = aliases.direct_aliases(&frontier).into_iter().filter(|p| !reached.contains(p)).collect();
			if fresh.is_empty() {
				break;
			}
			rounds += 1;
			if rounds > self.config.max_closure_depth {
				return Err(SourceError::ClosureDepthExceeded {
					limit: self.config.max_closure_depth,
				});
			}
			reached.extend(fresh.iter().cloned());
			frontier = fresh;
		}
		for path in reached {
			if path.as_str().starts_with(prefix) && self.value(&path)?.is_some_and(|v| normalize_value(&v) == normalized) {
				result.insert(path);
			}
		}
		Ok(result)
	}

	/// Layers in walk order, fallback last.
	fn walk(&self) -> impl Iterator<Item = &Arc<DataLayer>> {
		self.layers.iter().chain(std::iter::once(&self.fallback))
	}

	fn layer_for(&self, source: &SourceId) -> Option<&Arc<DataLayer>> {
		self.walk().find(|layer| layer.id() == source)
	}

	fn resolved_at(&self, location: AliasLocation) -> Resolved {
		let value = self.layer_for(&location.source).and_then(|layer| layer.value(&location.path));
		Resolved { value, location }
	}

	/// Walk index where a hop into `locale` continues. `None` keeps `current`.
	fn start_for(&self, locale: Option<&LocaleId>, current: usize) -> usize {
		let Some(locale) = locale else {
			return current;
		};
		match self.layers.iter().position(|layer| layer.locale() == Some(locale)) {
			Some(index) => index,
			None => {
				warn!(view = %self.locale, target = %locale, "alias names a locale outside the chain, continuing at root");
				self.layers.len() - 1
			}
		}
	}

	fn root(&self) -> &Arc<DataLayer> {
		&self.layers[self.layers.len() - 1]
	}

	/// Root's alias table, remembered for reverse invalidation.
	fn aliases(&self, state: &mut CacheState) -> Result<Arc<AliasTable>> {
		let table = self.root().alias_table()?;
		state.aliases = Some(Arc::clone(&table));
		Ok(table)
	}

	/// First layer at or after `begin` with a value for `path` other than the
	/// inheritance marker.
	fn find_value(&self, path: &PathKey, begin: usize) -> Option<SourceId> {
		let marker = self.config.inheritance_marker.as_str();
		self.walk()
			.skip(begin)
			.find(|layer| layer.inspect(path, |value| value.is_some_and(|v| v != marker)))
			.map(|layer| layer.id().clone())
	}

	/// Resolves `path` starting at walk index `start`, skipping that layer when
	/// `skip_first` is set.
	///
	/// Every intermediate lookup of the chain shares the final answer and is
	/// cached with it, except the skipped first step of a bailey lookup.
	fn locate(&self, state: &mut CacheState, path: &PathKey, start: usize, skip_first: bool) -> Result<AliasLocation> {
		let caching = self.config.caching;
		let limit = self.config.max_alias_depth;
		let mut keys: SmallVec<[CacheKey; 4]> = SmallVec::new();
		let mut chain: SmallVec<[PathKey; 4]> = SmallVec::new();
		let mut current = path.clone();
		let mut start = start;
		let mut skip = skip_first;
		let mut hops = 0;

		let answer = loop {
			let key = CacheKey {
				path: current.clone(),
				start,
			};
			if caching
				&& !skip
				&& let Some(hit) = state.get(&key)
			{
				chain.push(current.clone());
				break hit.clone();
			}
			chain.push(current.clone());
			let begin = start + usize::from(skip);
			if !skip {
				keys.push(key);
			}
			if let Some(source) = self.find_value(&current, begin) {
				break AliasLocation { path: current, source };
			}
			let aliases = self.aliases(state)?;
			let Some(hop) = next_hop(&aliases, &current)? else {
				break AliasLocation {
					path: current,
					source: SourceId::CodeFallback,
				};
			};
			hops += 1;
			if hops > limit {
				warn!(locale = %self.locale, %path, limit, "alias chain exceeded depth limit");
				return Err(SourceError::AliasDepthExceeded { path: path.clone(), limit });
			}
			(current, start) = match hop {
				Hop::Alias(target) => {
					let next_start = self.start_for(target.locale.as_ref(), start);
					(target.path, next_start)
				}
				Hop::RemovedAlt(next) | Hop::ChangedCount(next) => (next, start),
			};
			skip = false;
		};

		if caching && !keys.is_empty() {
			state.store(&keys, &chain, &answer);
		}
		Ok(answer)
	}
}
