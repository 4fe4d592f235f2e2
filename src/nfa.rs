//! Non deterministic automata with epsilon transitions.
use crate::{syntax::EPSILON, util::DisplayChar};
use itertools::Itertools;
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

mod build;
mod determinize;

pub use build::{build, Error};

/// State of a non deterministic automaton.
///
/// States are indexes in the automaton they belong to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct State(u32);

impl State {
	pub fn index(&self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "q{}", self.0)
	}
}

/// Set of non deterministic states.
///
/// Ordered, so that equal sets are equal keys whatever the order in which
/// their states were discovered.
pub type StateSet = btree_slab::BTreeSet<State>;

/// Outgoing transitions of a state. The `None` label is epsilon.
type Transitions = BTreeMap<Option<char>, Vec<State>>;

/// Non deterministic automaton with a single initial state and a single
/// final state.
///
/// Built by [`build`], immutable afterwards.
pub struct Automaton {
	transitions: Vec<Transitions>,
	initial_state: State,
	final_state: State,
	alphabet: BTreeSet<char>,
}

impl Automaton {
	/// Number of states.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	pub fn states(&self) -> impl Iterator<Item = State> {
		(0..self.transitions.len() as u32).map(State)
	}

	pub fn initial_state(&self) -> State {
		self.initial_state
	}

	pub fn final_state(&self) -> State {
		self.final_state
	}

	pub fn is_final(&self, q: State) -> bool {
		q == self.final_state
	}

	/// Symbols appearing on transitions.
	pub fn alphabet(&self) -> &BTreeSet<char> {
		&self.alphabet
	}

	pub fn successors(&self, q: State) -> Successors {
		Successors::new(self.transitions.get(q.index()))
	}

	/// Targets of the transitions of `q` with the given label.
	pub fn targets(&self, q: State, label: Option<char>) -> &[State] {
		self.transitions
			.get(q.index())
			.and_then(|transitions| transitions.get(&label))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn epsilon_successors(&self, q: State) -> &[State] {
		self.targets(q, None)
	}

	/// Smallest superset of `states` closed under epsilon transitions.
	pub fn epsilon_closure<I: IntoIterator<Item = State>>(&self, states: I) -> StateSet {
		let mut closure = StateSet::new();
		let mut stack: Vec<State> = states.into_iter().collect();

		while let Some(q) = stack.pop() {
			if closure.insert(q) {
				stack.extend(self.epsilon_successors(q).iter().cloned())
			}
		}

		closure
	}

	/// States reachable from `states` through a single `c` transition.
	pub fn move_on(&self, states: &StateSet, c: char) -> StateSet {
		let mut result = StateSet::new();

		for q in states.iter() {
			for r in self.targets(*q, Some(c)) {
				result.insert(*r);
			}
		}

		result
	}

	/// Runs the automaton on the given input by tracking every reachable
	/// state at once.
	///
	/// This is the reference semantics the deterministic automata are
	/// checked against.
	pub fn simulate(&self, input: &str) -> bool {
		let mut current = self.epsilon_closure(std::iter::once(self.initial_state));

		for c in input.chars() {
			if current.is_empty() {
				return false;
			}

			let moved = self.move_on(&current, c);
			current = self.epsilon_closure(moved.iter().cloned());
		}

		current.contains(&self.final_state)
	}
}

impl fmt::Display for Automaton {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "initial: {}", self.initial_state)?;
		writeln!(f, "final: {}", self.final_state)?;

		for q in self.states() {
			write!(f, "{}:", q)?;
			for (i, (label, targets)) in self.successors(q).enumerate() {
				if i > 0 {
					write!(f, ";")?
				}

				write!(f, " {} -> {}", DisplayLabel(*label), targets.iter().format(" "))?
			}
			writeln!(f)?
		}

		Ok(())
	}
}

/// Transition label, where `None` is epsilon.
pub struct DisplayLabel(pub Option<char>);

impl fmt::Display for DisplayLabel {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.0 {
			Some(c) => DisplayChar(c).fmt(f),
			None => EPSILON.fmt(f),
		}
	}
}

pub struct DisplayStateSet<'a>(pub &'a StateSet);

impl<'a> fmt::Display for DisplayStateSet<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{{}}}", self.0.iter().format(","))
	}
}

pub struct Successors<'a> {
	inner: Option<std::collections::btree_map::Iter<'a, Option<char>, Vec<State>>>,
}

impl<'a> Successors<'a> {
	fn new(map: Option<&'a Transitions>) -> Self {
		Self {
			inner: map.map(|map| map.iter()),
		}
	}
}

impl<'a> Iterator for Successors<'a> {
	type Item = (&'a Option<char>, &'a Vec<State>);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.as_mut().and_then(|inner| inner.next())
	}
}
