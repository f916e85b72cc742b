//! Error types for locale identifiers and locale tables.

use thiserror::Error;

/// Errors raised while parsing locale identifiers or validating locale tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
	/// The first subtag is not a valid language code.
	#[error("invalid language subtag '{subtag}' in locale id '{id}'")]
	InvalidLanguage {
		/// The raw identifier being parsed.
		id: String,
		/// The offending subtag.
		subtag: String,
	},

	/// A subtag after the language could not be classified.
	#[error("invalid subtag '{subtag}' in locale id '{id}'")]
	InvalidSubtag {
		/// The raw identifier being parsed.
		id: String,
		/// The offending subtag.
		subtag: String,
	},

	/// The explicit parent table contains a cycle.
	#[error("explicit parent table contains a cycle through '{0}'")]
	ParentCycle(String),

	/// The explicit parent table assigns a parent to root.
	#[error("root cannot have an explicit parent")]
	RootHasParent,
}

/// Result type for locale operations.
pub type Result<T> = std::result::Result<T, LocaleError>;
