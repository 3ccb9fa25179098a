use thiserror::Error;

/// Errors raised by `MarkovModel`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkovError {
	/// The model order must be at least 1.
	#[error("Invalid order {0}: order must be >= 1")]
	InvalidOrder(usize),

	/// Generation reached a state with no recorded transitions.
	///
	/// Usually means the model was never trained (or only on empty input).
	#[error("No transitions recorded for state {state}")]
	MissingState { state: String },
}

pub type Result<T> = std::result::Result<T, MarkovError>;
