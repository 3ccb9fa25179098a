use std::fmt;

use serde::Serialize;

use super::markov_model::MarkovModel;
use super::state::{State, TransitionRecord};
use super::symbol::Token;

/// Human-readable listing of a model's transition table.
///
/// Rows and records appear in insertion order:
/// ```text
/// Key: [<START>]; Values:
///   (b, 2)
///   (a, 1)
/// ```
pub struct TableDump<'a, T> {
	model: &'a MarkovModel<T>,
}

impl<'a, T: Token> TableDump<'a, T> {
	pub(crate) fn new(model: &'a MarkovModel<T>) -> Self {
		Self { model }
	}
}

impl<T: Token> fmt::Display for TableDump<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (state, transitions) in self.model.iter() {
			writeln!(f, "Key: {}; Values:", state.render())?;
			for record in transitions.records() {
				writeln!(f, "  ({}, {})", record.symbol, record.frequency)?;
			}
		}
		Ok(())
	}
}

/// Serializable copy of a single table row.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RowSnapshot<T> {
	pub state: State<T>,
	pub transitions: Vec<TransitionRecord<T>>,
}

/// Serializable copy of a whole transition table, for diagnostics only.
///
/// Snapshots cannot be loaded back into a model.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TableSnapshot<T> {
	pub order: usize,
	pub rows: Vec<RowSnapshot<T>>,
}

impl<T: Token> TableSnapshot<T> {
	pub(crate) fn new(model: &MarkovModel<T>) -> Self {
		let rows = model
			.iter()
			.map(|(state, transitions)| RowSnapshot {
				state: state.clone(),
				transitions: transitions.records().to_vec(),
			})
			.collect();
		Self { order: model.order(), rows }
	}
}
