use std::fmt;
use std::hash::Hash;

use serde::Serialize;

/// Alphabet element a `MarkovModel` can be trained on.
///
/// `SEPARATOR` is placed between symbols when a state or a generated
/// sequence is rendered as text: nothing for characters, a space for words.
pub trait Token: Clone + Eq + Hash + fmt::Display {
	const SEPARATOR: &'static str = " ";
}

impl Token for char {
	const SEPARATOR: &'static str = "";
}

impl Token for String {}
impl Token for &str {}
impl Token for u8 {}
impl Token for u16 {}
impl Token for u32 {}
impl Token for u64 {}
impl Token for usize {}
impl Token for i32 {}
impl Token for i64 {}

/// A single element of a padded training or generated sequence.
///
/// The sequence boundaries are explicit variants rather than reserved
/// values of `T`, so any character or token may appear in the input.
///
/// # Variants
/// - `Start`: padding placed `order` times before every training sequence.
/// - `End`: placed once after every training sequence; drawing it stops generation.
/// - `Literal(T)`: a symbol taken from the caller's data.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol<T> {
	Start,
	End,
	Literal(T),
}

impl<T> Symbol<T> {
	/// Returns the wrapped literal, or `None` for a sentinel.
	pub fn literal(&self) -> Option<&T> {
		match self {
			Symbol::Literal(value) => Some(value),
			_ => None,
		}
	}
}

impl<T: fmt::Display> fmt::Display for Symbol<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Start => f.write_str("<START>"),
			Symbol::End => f.write_str("<END>"),
			Symbol::Literal(value) => value.fmt(f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sentinels_are_distinct_from_any_literal() {
		assert_ne!(Symbol::Start, Symbol::Literal('\u{2}'));
		assert_ne!(Symbol::End, Symbol::Literal('\u{3}'));
		assert_ne!(Symbol::<char>::Start, Symbol::End);
	}

	#[test]
	fn display_renders_sentinels_with_markers() {
		assert_eq!(Symbol::<char>::Start.to_string(), "<START>");
		assert_eq!(Symbol::<char>::End.to_string(), "<END>");
		assert_eq!(Symbol::Literal('x').to_string(), "x");
		assert_eq!(Symbol::Literal("word".to_owned()).to_string(), "word");
	}

	#[test]
	fn literal_accessor() {
		assert_eq!(Symbol::Literal(7).literal(), Some(&7));
		assert_eq!(Symbol::<i32>::End.literal(), None);
		assert_eq!(Symbol::<i32>::Start.literal(), None);
	}
}
