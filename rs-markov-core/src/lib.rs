//! Markov chain sequence generation library.
//!
//! This crate provides a discrete-time Markov chain over symbol sequences:
//! - Explicit `Start` / `End` sentinels around every training sequence
//! - Structural state keys of a fixed order
//! - Frequency counting with insertion-ordered transition tables
//! - Weighted random generation with an injectable random generator
//! - Text dump and serializable snapshot of the table for diagnostics

/// Markov model, state keys, symbols and training observers.
pub mod model;

/// Error type shared by the model operations.
pub mod error;

/// Corpus loading helpers.
pub mod io;

pub use error::{MarkovError, Result};
pub use model::markov_model::MarkovModel;
