//! Deterministic automata.
use crate::util::DisplayChar;
use itertools::Itertools;
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

mod minimize;

/// Deterministic epsilon-free automaton.
///
/// Transitions are partial: a missing transition rejects the input.
/// States produced by subset construction are sets of non deterministic
/// states, minimized automata are numbered by `u32`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DetAutomaton<Q> {
	initial_state: Q,
	transitions: BTreeMap<Q, BTreeMap<char, Q>>,
	final_states: BTreeSet<Q>,
	alphabet: BTreeSet<char>,
}

impl<Q: Ord> DetAutomaton<Q> {
	/// Creates an automaton with a single state and no transition.
	pub fn new(initial_state: Q, alphabet: BTreeSet<char>) -> Self
	where
		Q: Clone,
	{
		let mut transitions = BTreeMap::new();
		transitions.insert(initial_state.clone(), BTreeMap::new());

		Self {
			initial_state,
			transitions,
			final_states: BTreeSet::new(),
			alphabet,
		}
	}

	pub fn initial_state(&self) -> &Q {
		&self.initial_state
	}

	pub fn alphabet(&self) -> &BTreeSet<char> {
		&self.alphabet
	}

	/// Number of states.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// States, in increasing order.
	pub fn states(&self) -> std::collections::btree_map::Keys<Q, BTreeMap<char, Q>> {
		self.transitions.keys()
	}

	pub fn contains_state(&self, q: &Q) -> bool {
		self.transitions.contains_key(q)
	}

	pub fn is_final(&self, q: &Q) -> bool {
		self.final_states.contains(q)
	}

	pub fn final_states(&self) -> &BTreeSet<Q> {
		&self.final_states
	}

	pub fn transitions(&self) -> &BTreeMap<Q, BTreeMap<char, Q>> {
		&self.transitions
	}

	pub fn successors(&self, q: &Q) -> DetSuccessors<Q> {
		DetSuccessors::new(self.transitions.get(q))
	}

	pub fn next_state(&self, q: &Q, c: char) -> Option<&Q> {
		self.transitions.get(q).and_then(|transitions| transitions.get(&c))
	}

	/// Adds a state with no transition.
	///
	/// Returns `false` if the state was already there.
	pub fn add_state(&mut self, q: Q) -> bool {
		use std::collections::btree_map::Entry;
		match self.transitions.entry(q) {
			Entry::Vacant(entry) => {
				entry.insert(BTreeMap::new());
				true
			}
			Entry::Occupied(_) => false,
		}
	}

	/// Sets the transition of `source` on `label`, replacing any previous one.
	pub fn add(&mut self, source: Q, label: char, target: Q)
	where
		Q: Clone,
	{
		self.add_state(target.clone());
		self.alphabet.insert(label);
		self.transitions
			.entry(source)
			.or_insert_with(BTreeMap::new)
			.insert(label, target);
	}

	pub fn set_final(&mut self, q: Q)
	where
		Q: Clone,
	{
		self.add_state(q.clone());
		self.final_states.insert(q);
	}

	/// Renames every state with `f`.
	///
	/// `f` is called once per state and should be injective, otherwise the
	/// renamed states are merged.
	pub fn map<P, F>(&self, mut f: F) -> DetAutomaton<P>
	where
		P: Clone + Ord,
		F: FnMut(&Q) -> P,
	{
		fn image<'a, Q: Ord, P: Clone, F: FnMut(&Q) -> P>(
			map: &mut BTreeMap<&'a Q, P>,
			f: &mut F,
			q: &'a Q,
		) -> P {
			map.entry(q).or_insert_with(|| f(q)).clone()
		}

		let mut map = BTreeMap::new();
		let initial_state = image(&mut map, &mut f, &self.initial_state);
		let mut result = DetAutomaton::new(initial_state, self.alphabet.clone());

		for (source, transitions) in &self.transitions {
			let source = image(&mut map, &mut f, source);
			result.add_state(source.clone());
			for (label, target) in transitions {
				let target = image(&mut map, &mut f, target);
				result.add(source.clone(), *label, target);
			}
		}

		for q in &self.final_states {
			let q = image(&mut map, &mut f, q);
			result.set_final(q)
		}

		result
	}

	/// Renames states with their rank in [`Self::states`].
	pub fn numbered(&self) -> DetAutomaton<u32> {
		let index: BTreeMap<&Q, u32> = self
			.states()
			.enumerate()
			.map(|(i, q)| (q, i as u32))
			.collect();
		self.map(|q| index[q])
	}

	/// Checks if the automaton accepts the whole input.
	///
	/// Stops at the first symbol without transition.
	pub fn matches(&self, input: &str) -> bool {
		let mut q = &self.initial_state;

		for c in input.chars() {
			match self.next_state(q, c) {
				Some(r) => q = r,
				None => return false,
			}
		}

		self.is_final(q)
	}
}

impl<Q: Ord + fmt::Display> fmt::Display for DetAutomaton<Q> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "initial: {}", self.initial_state)?;
		writeln!(f, "final: {}", self.final_states.iter().format(" "))?;

		for (q, transitions) in &self.transitions {
			write!(f, "{}:", q)?;
			for (i, (label, target)) in transitions.iter().enumerate() {
				if i > 0 {
					write!(f, ";")?
				}

				write!(f, " {} -> {}", DisplayChar(*label), target)?
			}
			writeln!(f)?
		}

		Ok(())
	}
}

pub struct DetSuccessors<'a, Q> {
	inner: Option<std::collections::btree_map::Iter<'a, char, Q>>,
}

impl<'a, Q> DetSuccessors<'a, Q> {
	pub fn new(map: Option<&'a BTreeMap<char, Q>>) -> Self {
		Self {
			inner: map.map(|map| map.iter()),
		}
	}
}

impl<'a, Q> Iterator for DetSuccessors<'a, Q> {
	type Item = (&'a char, &'a Q);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.as_mut().and_then(|inner| inner.next())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// `a(b)*` with states 10, 20.
	fn sample() -> DetAutomaton<u32> {
		let mut aut = DetAutomaton::new(10, BTreeSet::new());
		aut.add(10, 'a', 20);
		aut.add(20, 'b', 20);
		aut.set_final(20);
		aut
	}

	#[test]
	fn matching() {
		let aut = sample();
		assert!(aut.matches("a"));
		assert!(aut.matches("abbb"));
		assert!(!aut.matches(""));
		assert!(!aut.matches("b"));
		assert!(!aut.matches("aba"));
	}

	#[test]
	fn construction() {
		let mut aut = sample();
		assert_eq!(aut.len(), 2);
		assert!(!aut.add_state(20));
		assert!(aut.add_state(30));
		assert_eq!(aut.len(), 3);
		assert_eq!(aut.alphabet().iter().collect::<String>(), "ab");
		assert_eq!(aut.successors(&10).collect::<Vec<_>>(), vec![(&'a', &20)]);
		assert_eq!(aut.successors(&40).count(), 0);
	}

	#[test]
	fn numbering() {
		let aut = sample().numbered();
		assert_eq!(*aut.initial_state(), 0);
		assert_eq!(aut.next_state(&0, 'a'), Some(&1));
		assert_eq!(aut.next_state(&1, 'b'), Some(&1));
		assert!(aut.is_final(&1));
		assert_eq!(aut.to_string(), "initial: 0\nfinal: 1\n0: a -> 1\n1: b -> 1\n");
	}
}
