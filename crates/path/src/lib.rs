//! Hierarchical data paths.
//!
//! Locale data is keyed by XPath-like strings such as
//! `//ldml/dates/calendars/calendar[@type="gregorian"]/eras/eraAbbr/era[@type="0"]`.
//! A path is a sequence of elements, each with an ordered list of attributes.
//!
//! # Architecture
//!
//! * [`key`]: [`PathKey`], the cheap-to-clone canonical path used as a map key
//! * [`parts`]: [`PathParts`], an editable parsed form with a quote-aware parser
//! * [`distinguishing`]: [`DistinguishingRules`], splitting full paths from
//!   distinguishing paths
//! * [`relative`]: relative addressing (`../`) used by alias declarations
//! * [`rewrite`]: attribute rewrites for the `alt` and `count` fallbacks
//! * [`name_type`]: [`NameType`], key paths of the enumerable display-name tables

pub mod distinguishing;
mod error;
pub mod key;
pub mod name_type;
pub mod parts;
pub mod relative;
pub mod rewrite;

pub use distinguishing::DistinguishingRules;
pub use error::{PathError, Result};
pub use key::PathKey;
pub use name_type::NameType;
pub use parts::{Element, PathParts};
pub use relative::{add_relative, strip_last_element};
