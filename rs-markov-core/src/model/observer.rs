use serde::Serialize;

/// Kind of update applied to the transition table.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
	/// A new `(next symbol, 1)` record was appended.
	Added,
	/// An existing record's frequency was incremented.
	Incremented,
}

/// Receives a notification for every frequency update made during training.
///
/// Passed explicitly to `MarkovModel::train_observed`; the model never keeps
/// a reference to it.
pub trait TransitionObserver {
	fn on_transition(&mut self, event: TransitionEvent);
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TransitionObserver for NoopObserver {
	fn on_transition(&mut self, _event: TransitionEvent) {}
}

/// Counts table updates by kind.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionStats {
	pub added: usize,
	pub incremented: usize,
}

impl TransitionStats {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total number of updates (equals the number of training windows).
	pub fn total(&self) -> usize {
		self.added + self.incremented
	}
}

impl TransitionObserver for TransitionStats {
	fn on_transition(&mut self, event: TransitionEvent) {
		match event {
			TransitionEvent::Added => self.added += 1,
			TransitionEvent::Incremented => self.incremented += 1,
		}
	}
}

impl<F: FnMut(TransitionEvent)> TransitionObserver for F {
	fn on_transition(&mut self, event: TransitionEvent) {
		self(event)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stats_count_by_kind() {
		let mut stats = TransitionStats::new();
		stats.on_transition(TransitionEvent::Added);
		stats.on_transition(TransitionEvent::Incremented);
		stats.on_transition(TransitionEvent::Incremented);
		assert_eq!(stats, TransitionStats { added: 1, incremented: 2 });
		assert_eq!(stats.total(), 3);
	}

	#[test]
	fn closures_are_observers() {
		let mut events = Vec::new();
		{
			let mut observer = |event: TransitionEvent| events.push(event);
			observer.on_transition(TransitionEvent::Added);
		}
		assert_eq!(events, vec![TransitionEvent::Added]);
	}
}
