use crate::util::DisplayChar;
use source_span::{Loc, Metrics, Span};
use std::fmt;

/// Epsilon literal.
///
/// `#` is accepted as an ASCII spelling of the same literal.
pub const EPSILON: char = 'ε';

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Token {
	/// Literal input symbol.
	Symbol(char),

	/// Epsilon literal, matching the empty string.
	Epsilon,

	/// Concatenation operator `.`.
	///
	/// Usually inserted by the parser between adjacent operands.
	Concat,

	/// Alternation operator `|`.
	Alternation,

	/// Kleene star `*`.
	Star,

	/// Opening parenthesis.
	Open,

	/// Closing parenthesis.
	Close,
}

impl Token {
	/// Binding power of an operator.
	///
	/// Operands and grouping marks have precedence `0`, so no operator ever
	/// reduces past an opening parenthesis.
	pub fn precedence(&self) -> u8 {
		match self {
			Token::Star => 3,
			Token::Concat => 2,
			Token::Alternation => 1,
			_ => 0,
		}
	}

	/// Number of operands consumed by this token in postfix order.
	pub fn arity(&self) -> usize {
		match self {
			Token::Star => 1,
			Token::Concat | Token::Alternation => 2,
			_ => 0,
		}
	}

	pub fn is_operand(&self) -> bool {
		match self {
			Token::Symbol(_) | Token::Epsilon => true,
			_ => false,
		}
	}

	/// Checks if an implicit concatenation goes between `self` and `next`.
	pub fn concatenates_with(&self, next: &Token) -> bool {
		let left = match self {
			Token::Open | Token::Alternation | Token::Concat => false,
			_ => true,
		};

		let right = match next {
			Token::Alternation | Token::Close | Token::Star | Token::Concat => false,
			_ => true,
		};

		left && right
	}
}

impl From<char> for Token {
	fn from(c: char) -> Token {
		match c {
			'(' => Token::Open,
			')' => Token::Close,
			'|' => Token::Alternation,
			'*' => Token::Star,
			'.' => Token::Concat,
			EPSILON | '#' => Token::Epsilon,
			c => Token::Symbol(c),
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Token::Symbol(c) => DisplayChar(*c).fmt(f),
			Token::Epsilon => EPSILON.fmt(f),
			Token::Concat => write!(f, "."),
			Token::Alternation => write!(f, "|"),
			Token::Star => write!(f, "*"),
			Token::Open => write!(f, "("),
			Token::Close => write!(f, ")"),
		}
	}
}

/// Regular expression lexer.
///
/// Every character is a token on its own; the lexer only attaches spans.
pub struct Lexer<I: Iterator<Item = char>, M: Metrics> {
	input: I,
	metrics: M,
	span: Span,
}

impl<I: Iterator<Item = char>, M: Metrics> Lexer<I, M> {
	pub fn new(input: I, metrics: M) -> Lexer<I, M> {
		Lexer {
			input,
			metrics,
			span: Span::default(),
		}
	}
}

impl<I: Iterator<Item = char>, M: Metrics> Iterator for Lexer<I, M> {
	type Item = Loc<Token>;

	fn next(&mut self) -> Option<Loc<Token>> {
		let c = self.input.next()?;
		self.span.clear();
		self.span.push(c, &self.metrics);
		Some(Loc::new(Token::from(c), self.span))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lex(s: &str) -> Vec<Token> {
		Lexer::new(s.chars(), source_span::DEFAULT_METRICS)
			.map(Loc::into_inner)
			.collect()
	}

	#[test]
	fn operators_and_symbols() {
		use Token::*;
		assert_eq!(
			lex("(a|b)*.#ε"),
			vec![
				Open,
				Symbol('a'),
				Alternation,
				Symbol('b'),
				Close,
				Star,
				Concat,
				Epsilon,
				Epsilon
			]
		);
	}

	#[test]
	fn spans_follow_characters() {
		let spans: Vec<Span> = Lexer::new("ab".chars(), source_span::DEFAULT_METRICS)
			.map(|t| t.span())
			.collect();
		assert_eq!(spans.len(), 2);
		assert!(spans[0] != spans[1]);
		assert!(spans[0].end() == spans[1].start());
	}

	#[test]
	fn implicit_concatenation() {
		use Token::*;
		assert!(Symbol('a').concatenates_with(&Symbol('b')));
		assert!(Star.concatenates_with(&Open));
		assert!(Close.concatenates_with(&Epsilon));
		assert!(!Open.concatenates_with(&Symbol('a')));
		assert!(!Alternation.concatenates_with(&Symbol('a')));
		assert!(!Symbol('a').concatenates_with(&Star));
		assert!(!Symbol('a').concatenates_with(&Close));
		assert!(!Symbol('a').concatenates_with(&Concat));
	}
}
