use indexmap::IndexMap;
use log::{debug, trace};
use rand::Rng;

use super::dump::{TableDump, TableSnapshot};
use super::observer::{NoopObserver, TransitionEvent, TransitionObserver};
use super::state::{State, Transitions};
use super::symbol::{Symbol, Token};
use crate::error::{MarkovError, Result};

/// Discrete-time Markov chain over sequences of `T`.
///
/// The model maps every observed context window (`State`) of length `order`
/// to the list of symbols that followed it, with their frequencies.
///
/// # Responsibilities
/// - Pad training sequences with `order` × `Start` and a single `End`
/// - Slide a window over the padded sequence and count transitions
/// - Generate new sequences by weighted random walk from the all-`Start` state
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Rows and records are only ever added; frequencies only ever grow
/// - Rows keep the order in which their state was first observed
#[derive(Clone, Debug)]
pub struct MarkovModel<T> {
	/// Number of symbols of context.
	order: usize,

	/// Transition table, iterated in insertion order.
	table: IndexMap<State<T>, Transitions<T>>,
}

impl<T: Token> MarkovModel<T> {
	/// Creates an empty model of the given order.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidOrder` if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(MarkovError::InvalidOrder(order));
		}
		Ok(Self { order, table: IndexMap::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct states in the table.
	pub fn state_count(&self) -> usize {
		self.table.len()
	}

	/// Number of `(state, next symbol)` records across all states.
	pub fn transition_count(&self) -> usize {
		self.table.values().map(Transitions::len).sum()
	}

	/// Returns true once the all-`Start` state has been recorded, i.e.
	/// at least one non-empty sequence was trained.
	pub fn is_trained(&self) -> bool {
		self.table.contains_key(&State::initial(self.order))
	}

	/// Returns the recorded transitions of `state`, if any.
	pub fn transitions(&self, state: &State<T>) -> Option<&Transitions<T>> {
		self.table.get(state)
	}

	/// Number of times `state` was observed as a context during training.
	pub fn observations(&self, state: &State<T>) -> usize {
		self.transitions(state).map_or(0, Transitions::total)
	}

	/// Iterates over the table rows in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&State<T>, &Transitions<T>)> {
		self.table.iter()
	}

	/// Trains the model on sequences of tokens.
	///
	/// Empty sequences are skipped. Returns the number of sequences that
	/// were actually recorded.
	pub fn train_sequences<I, S>(&mut self, sequences: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: IntoIterator<Item = T>,
	{
		self.train_sequences_observed(sequences, &mut NoopObserver)
	}

	/// Same as `train_sequences`, notifying `observer` of every table update.
	pub fn train_sequences_observed<I, S, O>(&mut self, sequences: I, observer: &mut O) -> usize
	where
		I: IntoIterator<Item = S>,
		S: IntoIterator<Item = T>,
		O: TransitionObserver + ?Sized,
	{
		let mut recorded = 0;
		let mut skipped = 0;
		for sequence in sequences {
			if self.train_sequence(sequence, observer) {
				recorded += 1;
			} else {
				skipped += 1;
			}
		}
		debug!(
			"Trained order-{} model on {} sequences ({} empty skipped), {} states",
			self.order,
			recorded,
			skipped,
			self.table.len()
		);
		recorded
	}

	/// Records every window of a single sequence.
	///
	/// Returns false (and records nothing) if the sequence is empty.
	fn train_sequence<S, O>(&mut self, sequence: S, observer: &mut O) -> bool
	where
		S: IntoIterator<Item = T>,
		O: TransitionObserver + ?Sized,
	{
		let mut tokens: Vec<Symbol<T>> = vec![Symbol::Start; self.order];
		tokens.extend(sequence.into_iter().map(Symbol::Literal));
		if tokens.len() == self.order {
			return false;
		}
		tokens.push(Symbol::End);

		// Zero iterations when the padded sequence is not longer than `order`
		for i in 0..tokens.len().saturating_sub(self.order) {
			let next = tokens[i + self.order].clone();
			self.update_frequency(&tokens[i..i + self.order], next, observer);
		}
		true
	}

	/// Adds one observation of `next` following the window `context`.
	fn update_frequency<O>(&mut self, context: &[Symbol<T>], next: Symbol<T>, observer: &mut O)
	where
		O: TransitionObserver + ?Sized,
	{
		let state = State::new(context);
		trace!("{} -> {}", state.render(), next);
		let event = match self.table.entry(state).or_default().add(next) {
			1 => TransitionEvent::Added,
			_ => TransitionEvent::Incremented,
		};
		observer.on_transition(event);
	}

	/// Generates one sequence using the thread-local random generator.
	///
	/// # Errors
	/// Returns `MarkovError::MissingState` if the walk reaches a state that
	/// was never recorded (always the case for an untrained model).
	pub fn generate(&self) -> Result<Vec<T>> {
		self.generate_with(&mut rand::rng())
	}

	/// Generates one sequence, drawing from `rng`.
	///
	/// Starting from `order` × `Start`, each step draws `r` uniformly in
	/// `[0, total)` and follows the first record whose cumulative frequency
	/// exceeds `r`. Drawing `End` stops the walk; sentinels are never
	/// part of the output.
	pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<Vec<T>> {
		let mut state = State::initial(self.order);
		let mut output = Vec::new();

		loop {
			let transitions = match self.transitions(&state) {
				Some(transitions) if !transitions.is_empty() => transitions,
				_ => return Err(MarkovError::MissingState { state: state.render() }),
			};

			let r = rng.random_range(0..transitions.total());
			let next = match transitions.select(r) {
				Some(next) => next,
				None => return Err(MarkovError::MissingState { state: state.render() }),
			};

			match next.literal() {
				Some(value) => {
					output.push(value.clone());
					state = state.shifted(next.clone());
				}
				// `End`; `Start` is never recorded as a next symbol
				None => break,
			}
		}

		Ok(output)
	}

	/// Generates one sequence and renders it as text (symbols joined with
	/// `T::SEPARATOR`).
	pub fn generate_text(&self) -> Result<String> {
		self.generate_text_with(&mut rand::rng())
	}

	pub fn generate_text_with<R: Rng>(&self, rng: &mut R) -> Result<String> {
		let tokens = self.generate_with(rng)?;
		Ok(render_sequence(&tokens))
	}

	/// Generates `count` independent sequences as text.
	///
	/// # Errors
	/// Fails on the first generation error.
	pub fn generate_many<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<String>> {
		(0..count).map(|_| self.generate_text_with(rng)).collect()
	}

	/// Returns a displayable listing of the table.
	pub fn table_dump(&self) -> TableDump<'_, T> {
		TableDump::new(self)
	}

	/// Renders the table as text (see `TableDump`).
	pub fn dump(&self) -> String {
		self.table_dump().to_string()
	}

	/// Returns a serializable copy of the table.
	pub fn snapshot(&self) -> TableSnapshot<T> {
		TableSnapshot::new(self)
	}
}

impl MarkovModel<char> {
	/// Trains a character model on strings.
	///
	/// Surrounding whitespace is trimmed; strings left empty are skipped.
	/// Returns the number of strings recorded.
	pub fn train<I, S>(&mut self, sequences: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.train_observed(sequences, &mut NoopObserver)
	}

	/// Same as `train`, notifying `observer` of every table update.
	pub fn train_observed<I, S, O>(&mut self, sequences: I, observer: &mut O) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
		O: TransitionObserver + ?Sized,
	{
		let sequences = sequences
			.into_iter()
			.map(|s| s.as_ref().trim().chars().collect::<Vec<char>>());
		self.train_sequences_observed(sequences, observer)
	}
}

impl MarkovModel<String> {
	/// Trains a word model: each line is split on whitespace into tokens.
	///
	/// Blank lines are skipped. Returns the number of lines recorded.
	pub fn train_words<I, S>(&mut self, lines: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.train_words_observed(lines, &mut NoopObserver)
	}

	/// Same as `train_words`, notifying `observer` of every table update.
	pub fn train_words_observed<I, S, O>(&mut self, lines: I, observer: &mut O) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
		O: TransitionObserver + ?Sized,
	{
		let sequences = lines
			.into_iter()
			.map(|line| line.as_ref().split_whitespace().map(str::to_owned).collect::<Vec<String>>());
		self.train_sequences_observed(sequences, observer)
	}
}

/// Joins generated tokens with `T::SEPARATOR`.
pub fn render_sequence<T: Token>(tokens: &[T]) -> String {
	tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(T::SEPARATOR)
}
