use super::DetAutomaton;
use btree_slab::BTreeSet;
use std::collections::BTreeMap;

/// Block of a state partition.
type Block<'a, Q> = BTreeSet<&'a Q>;

impl<Q: Ord> DetAutomaton<Q> {
	/// Minimizes the automaton.
	///
	/// States are numbered after the equivalence class they belong to, in
	/// the order classes are left in the final partition.
	// Hopcroft's algorithm.
	// https://en.wikipedia.org/wiki/DFA_minimization
	pub fn minimize(&self) -> DetAutomaton<u32> {
		let mut accepting = Block::new();
		let mut rejecting = Block::new();
		for q in self.states() {
			if self.is_final(q) {
				accepting.insert(q);
			} else {
				rejecting.insert(q);
			}
		}

		let mut partition: Vec<Block<Q>> = Vec::new();
		if !accepting.is_empty() {
			partition.push(accepting)
		}
		if !rejecting.is_empty() {
			partition.push(rejecting)
		}

		let mut working = partition.clone();

		while let Some(a) = working.pop() {
			for c in &self.alphabet {
				let sources: Block<Q> = self
					.transitions
					.iter()
					.filter(|(_, targets)| {
						targets
							.get(c)
							.map(|target| a.contains(&target))
							.unwrap_or(false)
					})
					.map(|(source, _)| source)
					.collect();

				if sources.is_empty() {
					continue;
				}

				let mut refined = Vec::with_capacity(partition.len() + 1);
				for y in partition {
					let intersection: Block<Q> = y.intersection(&sources).cloned().collect();
					if intersection.is_empty() || intersection.len() == y.len() {
						refined.push(y);
						continue;
					}

					let difference: Block<Q> = y.difference(&sources).cloned().collect();
					log::trace!(
						"splitting a block of {} states into {} and {}",
						y.len(),
						intersection.len(),
						difference.len()
					);

					match working.iter().position(|w| *w == y) {
						Some(i) => {
							working.remove(i);
							working.push(intersection.clone());
							working.push(difference.clone());
						}
						None => {
							// on a tie, the intersection goes.
							if intersection.len() <= difference.len() {
								working.push(intersection.clone())
							} else {
								working.push(difference.clone())
							}
						}
					}

					refined.push(intersection);
					refined.push(difference);
				}

				partition = refined;
			}
		}

		let mut map = BTreeMap::new();
		for (i, member) in partition.iter().enumerate() {
			for q in member.iter() {
				map.insert(*q, i as u32);
			}
		}

		let mut result = DetAutomaton::new(map[&self.initial_state], self.alphabet.clone());
		for i in 0..partition.len() as u32 {
			result.add_state(i);
		}

		for (source, transitions) in &self.transitions {
			for (label, target) in transitions {
				result.add(map[source], *label, map[target]);
			}
		}

		for q in &self.final_states {
			result.set_final(map[q]);
		}

		log::debug!("minimized {} states into {}", self.len(), result.len());
		result
	}
}

#[cfg(test)]
mod tests {
	use crate::{det::DetAutomaton, nfa, syntax::parse};
	use std::collections::BTreeSet;

	fn minimal(regex: &str) -> DetAutomaton<u32> {
		let postfix = parse(regex).ok().expect("invalid regex");
		nfa::build(postfix.tokens())
			.expect("construction failed")
			.determinize()
			.minimize()
	}

	#[test]
	fn classic_example() {
		let aut = minimal("(a|b)*abb");
		assert_eq!(aut.len(), 4);
		assert_eq!(aut.final_states().len(), 1);
		assert!(aut.matches("abb"));
		assert!(aut.matches("aabb"));
		assert!(!aut.matches("abab"));
	}

	#[test]
	fn accepting_states_merge() {
		// both final states of the `a|b` automaton have no transition.
		let aut = minimal("a|b");
		assert_eq!(aut.len(), 2);
		let target = aut.next_state(aut.initial_state(), 'a');
		assert_eq!(target, aut.next_state(aut.initial_state(), 'b'));
	}

	#[test]
	fn single_block() {
		let aut = minimal("(a|b)*");
		assert_eq!(aut.len(), 1);
		assert!(aut.is_final(aut.initial_state()));
	}

	#[test]
	fn partial_transitions_are_distinguishing() {
		// `q` has no transition at all, `r` loops: both are final.
		let mut aut = DetAutomaton::new(0u32, BTreeSet::new());
		aut.add(0, 'a', 1);
		aut.add(0, 'b', 2);
		aut.add(2, 'a', 2);
		aut.set_final(1);
		aut.set_final(2);

		let min = aut.minimize();
		assert_eq!(min.len(), 3);
		assert!(min.matches("baa"));
		assert!(!min.matches("aa"));
	}

	#[test]
	fn without_final_states() {
		let mut aut = DetAutomaton::new(0u32, BTreeSet::new());
		aut.add(0, 'a', 1);
		aut.add(1, 'a', 0);

		let min = aut.minimize();
		assert_eq!(min.len(), 1);
		assert!(min.final_states().is_empty());
		assert!(!min.matches("aa"));
	}

	#[test]
	fn idempotent() {
		let once = minimal("a(b|c)*d|ab*");
		let twice = once.minimize();
		assert_eq!(once.len(), twice.len());
		assert_eq!(
			once.transitions().values().map(|t| t.len()).sum::<usize>(),
			twice.transitions().values().map(|t| t.len()).sum::<usize>()
		);
	}
}
