//! Step-by-step account of how a path resolves.

use std::fmt;

use stratum_path::PathKey;
use tracing::warn;

use super::{Hop, ResolvingView, next_hop};
use crate::{Result, SourceError, SourceId};

/// Why a step of a trace was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InheritanceReason {
	/// The layer has a value.
	Value,
	/// The layer holds the inheritance marker and defers to its parent.
	InheritanceMarker,
	/// The layer has nothing at the path.
	Absent,
	/// A root alias rewrote the path.
	Alias,
	/// The named attribute was removed from the path.
	RemovedAttribute(&'static str),
	/// The named attribute was rewritten.
	ChangedAttribute(&'static str),
	/// Nothing supplies a value.
	CodeFallback,
}

impl fmt::Display for InheritanceReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value => f.write_str("value"),
			Self::InheritanceMarker => f.write_str("inheritance marker"),
			Self::Absent => f.write_str("absent"),
			Self::Alias => f.write_str("alias"),
			Self::RemovedAttribute(name) => write!(f, "removed @{name}"),
			Self::ChangedAttribute(name) => write!(f, "changed @{name}"),
			Self::CodeFallback => f.write_str("code fallback"),
		}
	}
}

/// One step of [`ResolvingView::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceStep {
	/// Layer consulted. Root for alias steps, `None` for attribute rewrites.
	pub source: Option<SourceId>,
	/// Path the step applies to. For rewrites this is the path before the
	/// rewrite.
	pub path: PathKey,
	pub reason: InheritanceReason,
}

impl InheritanceStep {
	fn new(source: Option<SourceId>, path: &PathKey, reason: InheritanceReason) -> Self {
		Self {
			source,
			path: path.clone(),
			reason,
		}
	}
}

impl ResolvingView {
	/// Every step a lookup of `path` takes, bypassing the cache.
	///
	/// Every layer of every round is recorded, and rewrites are followed even
	/// after a value was found, so the trace also shows the bailey candidates.
	/// The last step is always [`InheritanceReason::CodeFallback`].
	pub fn trace(&self, path: &PathKey) -> Result<Vec<InheritanceStep>> {
		let marker = self.config.inheritance_marker.as_str();
		let limit = self.config.max_alias_depth;
		let root = self.root().id().clone();
		let mut steps = Vec::new();
		let mut current = path.clone();
		let mut start = 0;
		let mut hops = 0;

		loop {
			for layer in self.walk().skip(start) {
				let reason = layer.inspect(&current, |value| match value {
					Some(v) if v == marker => InheritanceReason::InheritanceMarker,
					Some(_) => InheritanceReason::Value,
					None => InheritanceReason::Absent,
				});
				steps.push(InheritanceStep::new(Some(layer.id().clone()), &current, reason));
			}
			let aliases = self.root().alias_table()?;
			let Some(hop) = next_hop(&aliases, &current)? else {
				steps.push(InheritanceStep::new(Some(SourceId::CodeFallback), &current, InheritanceReason::CodeFallback));
				return Ok(steps);
			};
			hops += 1;
			if hops > limit {
				warn!(locale = %self.locale, %path, limit, "traced alias chain exceeded depth limit");
				return Err(SourceError::AliasDepthExceeded { path: path.clone(), limit });
			}
			(current, start) = match hop {
				Hop::Alias(target) => {
					steps.push(InheritanceStep::new(Some(root.clone()), &current, InheritanceReason::Alias));
					let next_start = self.start_for(target.locale.as_ref(), start);
					(target.path, next_start)
				}
				Hop::RemovedAlt(next) => {
					steps.push(InheritanceStep::new(None, &current, InheritanceReason::RemovedAttribute("alt")));
					(next, start)
				}
				Hop::ChangedCount(next) => {
					steps.push(InheritanceStep::new(None, &current, InheritanceReason::ChangedAttribute("count")));
					(next, start)
				}
			};
		}
	}
}
