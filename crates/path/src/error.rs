//! Path parsing and rewriting errors.

use thiserror::Error;

/// Errors raised while parsing or rewriting a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	/// The path does not start with `//`.
	#[error("path '{0}' must start with '//'")]
	NotAbsolute(String),

	/// The path could not be parsed.
	#[error("malformed path '{path}' at byte {position}: {reason}")]
	Malformed {
		path: String,
		position: usize,
		reason: &'static str,
	},

	/// An attribute value is missing its closing quote.
	#[error("unterminated attribute value in path '{0}'")]
	UnterminatedQuote(String),

	/// A relative expression climbs above the first element.
	#[error("relative path '{relative}' climbs above the root of '{base}'")]
	RelativeOverflow { base: String, relative: String },
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
