//! Regular expressions compiled into minimal deterministic automata.
//!
//! Compilation goes through four stages, each one consuming the whole
//! output of the previous one:
//!
//! 1. [`syntax::parse`] reorders the regular expression into postfix
//!    order, making concatenation explicit;
//! 2. [`nfa::build`] runs the Thompson construction on the postfix tokens;
//! 3. [`nfa::Automaton::determinize`] runs the subset construction;
//! 4. [`DetAutomaton::minimize`] merges indistinguishable states.
//!
//! The minimized automaton then decides in linear time whether a string
//! matches, with [`DetAutomaton::matches`].
//!
//! ```
//! let regex = remin::Regex::new("(a|b)*abb").unwrap();
//! assert_eq!(regex.postfix().to_string(), "a b | * a . b . b .");
//! assert!(regex.is_match("ababb"));
//! assert!(!regex.is_match("ab"));
//! ```
extern crate source_span;

use source_span::Loc;
use std::{fmt, str::FromStr};

pub mod det;
pub mod nfa;
pub mod out;
pub mod syntax;
pub mod util;

pub use det::DetAutomaton;
pub use nfa::build;
pub use syntax::{parse, Postfix, Token};

/// Compilation error.
pub enum Error {
	/// Malformed regular expression.
	Parse(Loc<syntax::Error>),

	/// Postfix sequence not reducing to a single automaton.
	Construction(nfa::Error),
}

impl Error {
	pub fn span(&self) -> Option<source_span::Span> {
		match self {
			Error::Parse(e) => Some(e.span()),
			Error::Construction(_) => None,
		}
	}
}

impl From<Loc<syntax::Error>> for Error {
	fn from(e: Loc<syntax::Error>) -> Self {
		Error::Parse(e)
	}
}

impl From<nfa::Error> for Error {
	fn from(e: nfa::Error) -> Self {
		Error::Construction(e)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Parse(e) => e.as_ref().fmt(f),
			Error::Construction(e) => e.fmt(f),
		}
	}
}

impl fmt::Debug for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Parse(e) => f.debug_tuple("Parse").field(e.as_ref()).finish(),
			Error::Construction(e) => f.debug_tuple("Construction").field(e).finish(),
		}
	}
}

impl std::error::Error for Error {}

/// Compiled regular expression.
///
/// Holds the minimal deterministic automaton of the expression, shared
/// read-only by every match.
pub struct Regex {
	pattern: String,
	postfix: Postfix,
	automaton: DetAutomaton<u32>,
}

impl Regex {
	pub fn new(pattern: &str) -> Result<Regex, Error> {
		let postfix = syntax::parse(pattern)?;
		let nfa = nfa::build(postfix.tokens())?;
		let automaton = nfa.determinize().minimize();

		Ok(Regex {
			pattern: pattern.to_string(),
			postfix,
			automaton,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	pub fn postfix(&self) -> &Postfix {
		&self.postfix
	}

	/// Minimal deterministic automaton.
	pub fn automaton(&self) -> &DetAutomaton<u32> {
		&self.automaton
	}

	pub fn is_match(&self, input: &str) -> bool {
		self.automaton.matches(input)
	}
}

impl FromStr for Regex {
	type Err = Error;

	fn from_str(pattern: &str) -> Result<Regex, Error> {
		Regex::new(pattern)
	}
}

impl fmt::Display for Regex {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.pattern.fmt(f)
	}
}

impl fmt::Debug for Regex {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_tuple("Regex").field(&self.pattern).finish()
	}
}
