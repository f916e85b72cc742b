//! Locale identifiers and inheritance.
//!
//! Locale data is organized as a tree rooted at [`LocaleId::root`]. Every
//! other locale inherits from exactly one parent, which is normally found by
//! truncating the last subtag of the identifier but can be overridden by data.
//!
//! # Architecture
//!
//! * [`id`]: [`LocaleId`] parsing, canonicalization and subtag access
//! * [`tables`]: [`LocaleTables`], the static explicit-parent and default-script data
//! * [`parent`]: [`ParentResolver`], computing parents and ancestor chains

mod error;
pub mod id;
pub mod parent;
pub mod tables;

pub use error::{LocaleError, Result};
pub use id::{LocaleId, LocaleParts};
pub use parent::{Ancestors, ParentResolver};
pub use tables::LocaleTables;
