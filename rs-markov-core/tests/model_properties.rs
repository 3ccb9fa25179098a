//! Property-based and statistical tests for `MarkovModel`.
//!
//! Covers:
//! 1. Frequency conservation per state
//! 2. Unique next symbols per state
//! 3. Deterministic training
//! 4. Termination of generation on trained tables
//! 5. Weighted sampling bias

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::model::state::State;
use rs_markov_core::model::symbol::Symbol;
use rs_markov_core::{MarkovError, MarkovModel};

/// Counts how often each window was a context, independently of the model.
fn expected_contexts(words: &[String], order: usize) -> HashMap<State<char>, usize> {
	let mut counts = HashMap::new();
	for word in words {
		let word = word.trim();
		if word.is_empty() {
			continue;
		}
		let mut tokens = vec![Symbol::Start; order];
		tokens.extend(word.chars().map(Symbol::Literal));
		tokens.push(Symbol::End);
		for window in tokens.windows(order + 1) {
			*counts.entry(State::new(&window[..order])).or_insert(0) += 1;
		}
	}
	counts
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	#[test]
	fn prop_frequencies_sum_to_context_observations(
		words in prop::collection::vec("[a-d ]{0,8}", 1..10),
		order in 1usize..4,
	) {
		let mut model = MarkovModel::new(order).unwrap();
		model.train(&words);

		let expected = expected_contexts(&words, order);
		prop_assert_eq!(model.state_count(), expected.len());
		for (state, count) in &expected {
			prop_assert_eq!(model.observations(state), *count);
		}
	}

	#[test]
	fn prop_next_symbols_are_unique_per_state(
		words in prop::collection::vec("[a-c]{0,10}", 1..12),
		order in 1usize..4,
	) {
		let mut model = MarkovModel::new(order).unwrap();
		model.train(&words);

		for (state, transitions) in model.iter() {
			prop_assert_eq!(state.len(), order);
			let mut seen = HashSet::new();
			for record in transitions.records() {
				prop_assert!(record.frequency >= 1);
				prop_assert!(seen.insert(record.symbol.clone()), "duplicate {:?}", record.symbol);
			}
		}
	}

	#[test]
	fn prop_training_is_deterministic(
		words in prop::collection::vec("[a-e]{0,8}", 1..10),
		order in 1usize..4,
	) {
		let mut first = MarkovModel::new(order).unwrap();
		let mut second = MarkovModel::new(order).unwrap();
		first.train(&words);
		second.train(&words);
		prop_assert_eq!(first.snapshot(), second.snapshot());
	}

	#[test]
	fn prop_generation_terminates_or_reports_missing_state(
		words in prop::collection::vec("[a-d]{0,6}", 1..8),
		order in 1usize..4,
		seed in any::<u64>(),
	) {
		let mut model = MarkovModel::new(order).unwrap();
		let recorded = model.train(&words);
		let alphabet: HashSet<char> = words.iter().flat_map(|w| w.chars()).collect();

		let mut rng = StdRng::seed_from_u64(seed);
		match model.generate_text_with(&mut rng) {
			Ok(text) => {
				prop_assert!(recorded > 0);
				prop_assert!(text.chars().all(|c| alphabet.contains(&c)));
			}
			Err(MarkovError::MissingState { .. }) => prop_assert_eq!(recorded, 0),
			Err(e) => prop_assert!(false, "unexpected error {}", e),
		}
	}
}

#[test]
fn weighted_sampling_converges_to_frequency_ratio() {
	let mut model = MarkovModel::new(1).unwrap();
	let mut corpus = vec!["a"; 9];
	corpus.push("b");
	model.train(corpus);

	let mut rng = StdRng::seed_from_u64(0x5eed);
	let mut a = 0usize;
	let mut b = 0usize;
	for _ in 0..100_000 {
		match model.generate_text_with(&mut rng).unwrap().as_str() {
			"a" => a += 1,
			"b" => b += 1,
			other => panic!("unexpected output {other}"),
		}
	}

	let ratio = a as f64 / b as f64;
	assert!((8.5..9.5).contains(&ratio), "ratio was {ratio}");
}

#[test]
fn snapshot_serializes_rows_in_insertion_order() {
	let mut model = MarkovModel::new(1).unwrap();
	model.train(["ab"]);

	let json = serde_json::to_value(model.snapshot()).unwrap();
	assert_eq!(
		json,
		serde_json::json!({
			"order": 1,
			"rows": [
				{ "state": ["Start"], "transitions": [{ "symbol": { "Literal": "a" }, "frequency": 1 }] },
				{ "state": [{ "Literal": "a" }], "transitions": [{ "symbol": { "Literal": "b" }, "frequency": 1 }] },
				{ "state": [{ "Literal": "b" }], "transitions": [{ "symbol": "End", "frequency": 1 }] },
			]
		})
	);
}

#[test]
fn order_longer_than_input_records_short_windows_only() {
	let mut model = MarkovModel::new(5).unwrap();
	model.train(["ab"]);
	// [S S S S S] -> a, [S S S S a] -> b, [S S S a b] -> END
	assert_eq!(model.state_count(), 3);
	assert_eq!(model.generate_text().unwrap(), "ab");
}
