//! In-memory registry of layers and the views built over them.
//!
//! The factory owns one [`DataLayer`] per registered locale and assembles the
//! chain for a locale from its [`ParentResolver`] ancestry. Ancestors without a
//! registered layer are skipped; the locale itself and root must be present.
//! Views are memoized per locale and dropped when a layer in their ancestry is
//! replaced.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use stratum_locale::{LocaleId, ParentResolver};
use tracing::debug;

use crate::{DataLayer, FallbackBuilder, ResolverConfig, ResolvingView, Result, SourceError, StratumConfig};


pub struct LayerFactory {
	parents: ParentResolver,
	config: ResolverConfig,
	fallback: Arc<DataLayer>,
	layers: RwLock<BTreeMap<LocaleId, Arc<DataLayer>>>,
	views: Mutex<FxHashMap<LocaleId, Arc<ResolvingView>>>,
}

impl std::fmt::Debug for LayerFactory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LayerFactory")
			.field("layers", &self.layers.read().len())
			.field("views", &self.views.lock().len())
			.finish_non_exhaustive()
	}
}

impl LayerFactory {
	/// Builds the parent resolver and fallback layer described by `config`.
	pub fn new(config: &StratumConfig) -> Result<Self> {
		let parents = ParentResolver::new(config.locales.clone())?;
		let fallback = FallbackBuilder::new(config.codes.clone()).build()?;
		Ok(Self::with_parts(parents, config.resolver.clone(), fallback))
	}

	pub fn with_parts(parents: ParentResolver, config: ResolverConfig, fallback: Arc<DataLayer>) -> Self {
		Self {
			parents,
			config,
			fallback,
			layers: RwLock::new(BTreeMap::new()),
			views: Mutex::new(FxHashMap::default()),
		}
	}

	pub fn parents(&self) -> &ParentResolver {
		&self.parents
	}

	pub fn fallback(&self) -> &Arc<DataLayer> {
		&self.fallback
	}

	/// Registers `layer` under its locale, returning the layer it replaces.
	///
	/// Memoized views of the locale and its descendants are dropped, since
	/// their chains may now differ.
	pub fn add_layer(&self, layer: Arc<DataLayer>) -> Result<Option<Arc<DataLayer>>> {
		let Some(id) = layer.locale().cloned() else {
			return Err(SourceError::InvalidChain("the code-fallback layer cannot be registered".to_string()));
		};
		let previous = self.layers.write().insert(id.clone(), layer);
		let mut views = self.views.lock();
		let before = views.len();
		views.retain(|locale, _| !self.parents.is_descendant_of(locale, &id));
		debug!(locale = %id, replaced = previous.is_some(), dropped_views = before - views.len(), "registered layer");
		Ok(previous)
	}

	/// The registered layer for `id`, creating an empty one if absent.
	pub fn layer_or_default(&self, id: &LocaleId) -> Result<Arc<DataLayer>> {
		if let Some(layer) = self.layer(id) {
			return Ok(layer);
		}
		let layer = Arc::new(DataLayer::new(id.clone()));
		self.add_layer(Arc::clone(&layer))?;
		Ok(layer)
	}

	pub fn layer(&self, id: &LocaleId) -> Option<Arc<DataLayer>> {
		self.layers.read().get(id).cloned()
	}

	/// Registered locales in sorted order.
	pub fn locales(&self) -> Vec<LocaleId> {
		self.layers.read().keys().cloned().collect()
	}

	/// Layers from `id` to root.
	pub fn chain(&self, id: &LocaleId) -> Result<Vec<Arc<DataLayer>>> {
		let layers = self.layers.read();
		if !layers.contains_key(id) {
			return Err(SourceError::InvalidChain(format!("no layer registered for '{id}'")));
		}
		if !layers.contains_key(&LocaleId::root()) {
			return Err(SourceError::InvalidChain("no root layer registered".to_string()));
		}
		let mut chain = Vec::new();
		for ancestor in self.parents.ancestors(id) {
			match layers.get(&ancestor) {
				Some(layer) => chain.push(Arc::clone(layer)),
				None => debug!(locale = %id, skipped = %ancestor, "no layer for intermediate locale"),
			}
		}
		Ok(chain)
	}

	/// The memoized view for `id`.
	pub fn view(&self, id: &LocaleId) -> Result<Arc<ResolvingView>> {
		let mut views = self.views.lock();
		if let Some(view) = views.get(id) {
			return Ok(Arc::clone(view));
		}
		let view = Arc::new(ResolvingView::new(self.chain(id)?, Arc::clone(&self.fallback), self.config.clone())?);
		views.insert(id.clone(), Arc::clone(&view));
		Ok(view)
	}
}
