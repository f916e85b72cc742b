//! Parsed path representation.
//!
//! Grammar, with `"` or `'` accepted as the value delimiter:
//!
//! ```text
//! path      = "//" element ( "/" element )*
//! element   = name attribute*
//! attribute = "[@" name "=" quote value quote "]"
//! ```
//!
//! Values may contain `/`, `[` and `]`. Printing always uses `"`.

use std::fmt;

use smallvec::SmallVec;

use crate::{PathError, PathKey, Result};

#[cfg(test)]
mod tests;

/// One element of a path with its attributes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
	pub name: String,
	pub attributes: SmallVec<[(String, String); 2]>,
}

impl Element {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: SmallVec::new(),
		}
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
	}

	/// Sets an attribute, replacing an existing value in place or appending.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|(k, _)| *k == name) {
			Some((_, existing)) => *existing = value,
			None => self.attributes.push((name, value)),
		}
	}

	/// Removes an attribute, returning its value.
	pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
		let index = self.attributes.iter().position(|(k, _)| k == name)?;
		Some(self.attributes.remove(index).1)
	}
}

/// Editable parsed path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParts {
	elements: Vec<Element>,
}

impl PathParts {
	pub fn parse(path: &str) -> Result<Self> {
		let Some(body) = path.strip_prefix("//") else {
			return Err(PathError::NotAbsolute(path.to_string()));
		};
		Parser {
			path,
			bytes: body.as_bytes(),
			offset: 2,
			pos: 0,
		}
		.run()
	}

	pub fn from_elements(elements: Vec<Element>) -> Self {
		Self { elements }
	}

	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	pub fn elements_mut(&mut self) -> &mut [Element] {
		&mut self.elements
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn element(&self, index: usize) -> Option<&Element> {
		self.elements.get(index)
	}

	/// Element counted from the end, `0` being the last.
	pub fn element_from_end(&self, back: usize) -> Option<&Element> {
		self.elements.len().checked_sub(back + 1).and_then(|i| self.elements.get(i))
	}

	/// First value of `name` found scanning from the last element backwards.
	pub fn find_attribute(&self, name: &str) -> Option<&str> {
		self.elements.iter().rev().find_map(|e| e.attribute(name))
	}

	/// Removes every occurrence of `name`, returning whether any was present.
	pub fn remove_attribute_everywhere(&mut self, name: &str) -> bool {
		let mut removed = false;
		for element in &mut self.elements {
			removed |= element.remove_attribute(name).is_some();
		}
		removed
	}

	pub fn push(&mut self, element: Element) {
		self.elements.push(element);
	}

	pub fn truncate(&mut self, len: usize) {
		self.elements.truncate(len);
	}

	pub fn to_key(&self) -> PathKey {
		PathKey::from_trusted(self.to_string())
	}
}

impl fmt::Display for PathParts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("/")?;
		for element in &self.elements {
			write!(f, "/{}", element.name)?;
			for (name, value) in &element.attributes {
				write!(f, "[@{name}=\"{value}\"]")?;
			}
		}
		Ok(())
	}
}

struct Parser<'a> {
	path: &'a str,
	bytes: &'a [u8],
	/// Byte offset of `bytes` within `path`, for error positions.
	offset: usize,
	pos: usize,
}

impl Parser<'_> {
	fn run(mut self) -> Result<PathParts> {
		let mut elements = Vec::new();
		loop {
			elements.push(self.element()?);
			match self.peek() {
				None => break,
				Some(b'/') => self.pos += 1,
				Some(_) => return Err(self.error("expected '/' or '['")),
			}
		}
		Ok(PathParts { elements })
	}

	fn element(&mut self) -> Result<Element> {
		let mut element = Element::new(self.name(&[b'/', b'['])?);
		while self.peek() == Some(b'[') {
			self.pos += 1;
			self.expect(b'@')?;
			let name = self.name(&[b'='])?;
			self.expect(b'=')?;
			let value = self.quoted()?;
			self.expect(b']')?;
			element.attributes.push((name, value));
		}
		Ok(element)
	}

	fn name(&mut self, terminators: &[u8]) -> Result<String> {
		let start = self.pos;
		while let Some(b) = self.peek()
			&& !terminators.contains(&b)
		{
			if matches!(b, b'"' | b'\'' | b']' | b'@') {
				return Err(self.error("unexpected character in name"));
			}
			self.pos += 1;
		}
		if self.pos == start {
			return Err(self.error("empty name"));
		}
		Ok(self.slice(start, self.pos))
	}

	fn quoted(&mut self) -> Result<String> {
		let quote = match self.peek() {
			Some(q @ (b'"' | b'\'')) => q,
			_ => return Err(self.error("expected quoted value")),
		};
		self.pos += 1;
		let start = self.pos;
		let Some(len) = self.bytes[start..].iter().position(|&b| b == quote) else {
			return Err(PathError::UnterminatedQuote(self.path.to_string()));
		};
		self.pos = start + len + 1;
		Ok(self.slice(start, start + len))
	}

	fn expect(&mut self, byte: u8) -> Result<()> {
		if self.peek() == Some(byte) {
			self.pos += 1;
			Ok(())
		} else {
			Err(self.error(match byte {
				b'@' => "expected '@'",
				b'=' => "expected '='",
				_ => "expected ']'",
			}))
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn slice(&self, start: usize, end: usize) -> String {
		String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
	}

	fn error(&self, reason: &'static str) -> PathError {
		PathError::Malformed {
			path: self.path.to_string(),
			position: self.offset + self.pos,
			reason,
		}
	}
}
