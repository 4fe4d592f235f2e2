use super::{Automaton, DisplayStateSet, StateSet};
use crate::{det::DetAutomaton, util::DisplayChar};
use std::collections::VecDeque;

impl Automaton {
	/// Subset construction.
	///
	/// Each deterministic state is the epsilon-closed set of non deterministic
	/// states it stands for. When no state of a set has a transition on some
	/// symbol, the deterministic state has no transition on it either.
	pub fn determinize(&self) -> DetAutomaton<StateSet> {
		let initial_state = self.epsilon_closure(std::iter::once(self.initial_state));
		let mut result = DetAutomaton::new(initial_state.clone(), self.alphabet.clone());
		if initial_state.contains(&self.final_state) {
			result.set_final(initial_state.clone())
		}

		let mut unmarked = VecDeque::new();
		unmarked.push_back(initial_state);

		while let Some(det_q) = unmarked.pop_front() {
			for c in &self.alphabet {
				let moved = self.move_on(&det_q, *c);
				if moved.is_empty() {
					continue;
				}

				let target = self.epsilon_closure(moved.iter().cloned());
				if result.add_state(target.clone()) {
					if target.contains(&self.final_state) {
						result.set_final(target.clone())
					}

					unmarked.push_back(target.clone())
				}

				log::trace!(
					"{} -{}-> {}",
					DisplayStateSet(&det_q),
					DisplayChar(*c),
					DisplayStateSet(&target)
				);
				result.add(det_q.clone(), *c, target)
			}
		}

		log::debug!("determinized into {} states", result.len());
		result
	}
}
