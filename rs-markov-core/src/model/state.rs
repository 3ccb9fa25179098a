use serde::Serialize;

use super::symbol::{Symbol, Token};

/// Context window of a Markov chain: the last `order` symbols.
///
/// Two states are equal when their symbols are equal element-wise, and the
/// hash is derived from the symbols only, so structurally identical windows
/// built at different times share one table row.
///
/// ## Invariants
/// - The length never changes after construction
/// - A state is never mutated; sliding the window builds a new one
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct State<T> {
	symbols: Box<[Symbol<T>]>,
}

impl<T: Token> State<T> {
	/// Builds a state from an ordered slice of symbols.
	pub fn new(symbols: &[Symbol<T>]) -> Self {
		Self { symbols: symbols.into() }
	}

	/// The state every generation starts from: `order` copies of `Start`.
	pub fn initial(order: usize) -> Self {
		Self { symbols: vec![Symbol::Start; order].into_boxed_slice() }
	}

	/// Returns the window obtained by dropping the oldest symbol and
	/// appending `next`.
	pub fn shifted(&self, next: Symbol<T>) -> Self {
		let symbols: Vec<Symbol<T>> = self.symbols
			.iter()
			.skip(1)
			.cloned()
			.chain(std::iter::once(next))
			.collect();
		Self { symbols: symbols.into_boxed_slice() }
	}

	pub fn symbols(&self) -> &[Symbol<T>] {
		&self.symbols
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Renders the window as text, joining symbols with `T::SEPARATOR`.
	///
	/// Example: `[<START>]`, `[ba]`, `[the cat]`
	pub fn render(&self) -> String {
		let parts: Vec<String> = self.symbols.iter().map(ToString::to_string).collect();
		format!("[{}]", parts.join(T::SEPARATOR))
	}
}

/// An observed `(next symbol, frequency)` pair.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord<T> {
	pub symbol: Symbol<T>,
	pub frequency: usize,
}

/// Outgoing transitions of one state, kept in first-seen order.
///
/// ## Invariants
/// - A symbol appears at most once
/// - Every frequency is >= 1 and only ever grows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transitions<T> {
	records: Vec<TransitionRecord<T>>,
}

impl<T: Token> Transitions<T> {
	pub fn new() -> Self {
		Self { records: Vec::new() }
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its frequency is increased in place.
	/// - Otherwise, a new record is appended with a frequency of 1.
	///
	/// Returns the frequency after the update.
	pub fn add(&mut self, next: Symbol<T>) -> usize {
		match self.records.iter_mut().find(|record| record.symbol == next) {
			Some(record) => {
				record.frequency += 1;
				record.frequency
			}
			None => {
				self.records.push(TransitionRecord { symbol: next, frequency: 1 });
				1
			}
		}
	}

	/// Sum of all frequencies (number of times the owning state was a context).
	pub fn total(&self) -> usize {
		self.records.iter().map(|record| record.frequency).sum()
	}

	pub fn records(&self) -> &[TransitionRecord<T>] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Selects the record covering position `r` of the cumulative
	/// frequency range `[0, total)`.
	///
	/// Records are walked in stored order; the first one whose running sum
	/// exceeds `r` wins. Returns `None` if `r >= total`.
	pub fn select(&self, mut r: usize) -> Option<&Symbol<T>> {
		for record in &self.records {
			if r < record.frequency {
				return Some(&record.symbol);
			}
			r -= record.frequency;
		}
		None
	}
}

impl<T: Token> Default for Transitions<T> {
	fn default() -> Self {
		Self::new()
	}
}
