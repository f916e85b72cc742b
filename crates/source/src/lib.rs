//! Layered, aliasable locale-data resolution.
//!
//! Each locale owns an unresolved [`DataLayer`]. A [`ResolvingView`] stacks the
//! layers of a locale and its ancestors, ending at root, over a frozen
//! code-fallback layer, and answers which layer and path supply the effective
//! value of any path.
//!
//! # Architecture
//!
//! * [`layer`]: [`DataLayer`], an exact-match store with change subscriptions
//! * [`alias`]: [`AliasTable`], redirections declared by `alias` elements in root
//! * [`fallback`]: [`FallbackBuilder`], synthetic code-as-name values
//! * [`view`]: [`ResolvingView`], point lookup, bailey lookup, path closure and
//!   cache invalidation
//! * [`factory`]: [`LayerFactory`], in-memory registry assembling views
//! * [`config`]: [`StratumConfig`] and its TOML loading
//!
//! # Resolution
//!
//! A lookup walks the view's layers from the most specific to the fallback
//! layer and stops at the first value that is not the inheritance marker. If
//! no layer has one, the path is rewritten by an explicit root alias, by
//! dropping `alt`, or by moving a plural `count` to `other`, and the walk
//! repeats for the rewritten path. A path nothing resolves ends at the
//! code-fallback location.

pub mod alias;
pub mod config;
mod error;
pub mod factory;
pub mod fallback;
pub mod layer;
pub mod view;

pub use alias::{Alias, AliasTable, AliasTarget};
pub use config::{CodeLists, ResolverConfig, StratumConfig};
pub use error::{ConfigError, Result, SourceError};
pub use factory::LayerFactory;
pub use fallback::FallbackBuilder;
pub use layer::{CODE_FALLBACK_ID, DataLayer, LayerListener, MergePolicy, SourceId, Subscription};
pub use view::{AliasLocation, InheritanceReason, InheritanceStep, Resolved, ResolvingView};
