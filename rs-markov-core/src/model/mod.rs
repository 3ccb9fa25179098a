//! Top-level module for the Markov chain.
//!
//! - Sentinel-aware symbols (`Symbol`, `Token`)
//! - Fixed-order context windows and their transitions (`State`, `Transitions`)
//! - The trainable / sampleable model (`MarkovModel`)
//! - Training observers (`TransitionObserver`, `TransitionStats`)
//! - Diagnostics (`TableDump`, `TableSnapshot`)

/// Symbols of a padded sequence and the `Token` alphabet trait.
pub mod symbol;

/// Context window keys and their outgoing transition records.
///
/// Handles frequency counting and cumulative weighted selection.
pub mod state;

/// Discrete-time Markov model: training and generation.
pub mod markov_model;

/// Callbacks notified of every transition table update during training.
pub mod observer;

/// Text listing and serializable snapshot of a transition table.
pub mod dump;
