use super::{Automaton, State, Transitions};
use crate::syntax::Token;
use std::{collections::BTreeSet, fmt};

/// Construction error.
///
/// Only reachable with a token sequence that did not come out of
/// [`crate::syntax::parse`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
	/// No token at all.
	Empty,

	/// The operator at the given position lacks operands.
	MissingOperand { position: usize, token: Token },

	/// Grouping marks have no meaning in postfix order.
	UnexpectedToken { position: usize, token: Token },

	/// More than one fragment is left once every token is consumed.
	Unreduced(usize),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			Empty => write!(f, "empty postfix sequence"),
			MissingOperand { position, token } => {
				write!(f, "missing operand for `{}` at position {}", token, position)
			}
			UnexpectedToken { position, token } => {
				write!(f, "unexpected `{}` at position {}", token, position)
			}
			Unreduced(n) => write!(f, "{} fragments left, expected one", n),
		}
	}
}

impl std::error::Error for Error {}

/// Automaton fragment.
///
/// The accept state has no outgoing transition until the fragment is
/// composed into a larger one.
#[derive(Clone, Copy)]
struct Fragment {
	start: State,
	accept: State,
}

/// Thompson construction.
struct Builder {
	transitions: Vec<Transitions>,
	alphabet: BTreeSet<char>,
	fragments: Vec<Fragment>,
}

impl Builder {
	fn new() -> Self {
		Self {
			transitions: Vec::new(),
			alphabet: BTreeSet::new(),
			fragments: Vec::new(),
		}
	}

	/// Creates a fresh state.
	fn new_state(&mut self) -> State {
		let q = State(self.transitions.len() as u32);
		self.transitions.push(Transitions::new());
		q
	}

	fn add(&mut self, source: State, label: Option<char>, target: State) {
		let targets = self.transitions[source.index()]
			.entry(label)
			.or_insert_with(Vec::new);
		if !targets.contains(&target) {
			targets.push(target)
		}
	}

	/// Pops the operands of the operator `token` found at `position`.
	fn operands(&mut self, position: usize, token: Token) -> Result<Vec<Fragment>, Error> {
		let arity = token.arity();
		if self.fragments.len() < arity {
			return Err(Error::MissingOperand { position, token });
		}

		let at = self.fragments.len() - arity;
		Ok(self.fragments.split_off(at))
	}

	/// `start -label-> accept`.
	fn literal(&mut self, label: Option<char>) -> Fragment {
		let start = self.new_state();
		let accept = self.new_state();
		self.add(start, label, accept);
		Fragment { start, accept }
	}

	fn concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
		self.add(left.accept, None, right.start);
		Fragment {
			start: left.start,
			accept: right.accept,
		}
	}

	fn alternation(&mut self, left: Fragment, right: Fragment) -> Fragment {
		let start = self.new_state();
		let accept = self.new_state();
		self.add(start, None, left.start);
		self.add(start, None, right.start);
		self.add(left.accept, None, accept);
		self.add(right.accept, None, accept);
		Fragment { start, accept }
	}

	fn star(&mut self, inner: Fragment) -> Fragment {
		let start = self.new_state();
		let accept = self.new_state();
		self.add(start, None, inner.start);
		self.add(start, None, accept);
		self.add(inner.accept, None, inner.start);
		self.add(inner.accept, None, accept);
		Fragment { start, accept }
	}

	fn push(&mut self, position: usize, token: Token) -> Result<(), Error> {
		let fragment = match token {
			Token::Symbol(c) => {
				self.alphabet.insert(c);
				self.literal(Some(c))
			}
			Token::Epsilon => self.literal(None),
			Token::Concat => {
				let operands = self.operands(position, token)?;
				self.concat(operands[0], operands[1])
			}
			Token::Alternation => {
				let operands = self.operands(position, token)?;
				self.alternation(operands[0], operands[1])
			}
			Token::Star => {
				let operands = self.operands(position, token)?;
				self.star(operands[0])
			}
			Token::Open | Token::Close => return Err(Error::UnexpectedToken { position, token }),
		};

		self.fragments.push(fragment);
		Ok(())
	}

	fn finish(self) -> Result<Automaton, Error> {
		match self.fragments.as_slice() {
			[] => Err(Error::Empty),
			[fragment] => Ok(Automaton {
				initial_state: fragment.start,
				final_state: fragment.accept,
				transitions: self.transitions,
				alphabet: self.alphabet,
			}),
			fragments => Err(Error::Unreduced(fragments.len())),
		}
	}
}

/// Builds the non deterministic automaton of a postfix token sequence.
pub fn build(tokens: &[Token]) -> Result<Automaton, Error> {
	let mut builder = Builder::new();

	for (position, token) in tokens.iter().enumerate() {
		builder.push(position, *token)?
	}

	let aut = builder.finish()?;
	log::debug!(
		"built NFA with {} states over {} symbols",
		aut.len(),
		aut.alphabet().len()
	);
	Ok(aut)
}
