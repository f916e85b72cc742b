//! Error types for resolution and configuration.

use std::path::PathBuf;

use stratum_locale::LocaleError;
use stratum_path::{PathError, PathKey};
use thiserror::Error;

use crate::SourceId;

/// Errors raised by layers, alias tables and views.
///
/// Not finding a value is not an error: it resolves to the code-fallback
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
	/// An alias chain did not terminate within the configured depth.
	#[error("alias chain starting at '{path}' exceeded {limit} hops")]
	AliasDepthExceeded { path: PathKey, limit: usize },

	/// The alias closure did not reach a fixed point within the configured depth.
	#[error("alias closure did not converge within {limit} rounds")]
	ClosureDepthExceeded { limit: usize },

	/// An alias changes neither its path nor its locale.
	#[error("alias at '{0}' changes neither path nor locale")]
	AliasWithoutChange(PathKey),

	/// An alias declaration could not be interpreted.
	#[error("malformed alias at '{path}': {reason}")]
	MalformedAlias { path: PathKey, reason: String },

	/// The plural-count rewrite produced the path it started from.
	#[error("count rewrite left '{0}' unchanged")]
	CountRewriteUnchanged(PathKey),

	/// A view was assembled from an unusable layer list.
	#[error("invalid layer chain: {0}")]
	InvalidChain(String),

	/// A frozen layer was mutated.
	#[error("layer '{0}' is frozen")]
	FrozenLayer(SourceId),

	#[error(transparent)]
	Path(#[from] PathError),

	#[error(transparent)]
	Locale(#[from] LocaleError),
}

impl SourceError {
	/// Whether the error reflects inconsistent data rather than bad input.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			Self::AliasDepthExceeded { .. }
				| Self::ClosureDepthExceeded { .. }
				| Self::AliasWithoutChange(_)
				| Self::MalformedAlias { .. }
				| Self::CountRewriteUnchanged(_)
				| Self::InvalidChain(_)
		)
	}
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The locale tables are inconsistent.
	#[error("invalid locale tables: {0}")]
	Locale(#[from] LocaleError),

	/// A value is outside its allowed range.
	#[error("invalid value for '{field}': {reason}")]
	InvalidValue { field: &'static str, reason: String },
}
