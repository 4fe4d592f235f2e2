//! Regular expression syntax.
//!
//! A regular expression is made of literal symbols, the epsilon literal
//! (`ε` or `#`), alternation `|`, Kleene star `*` and parentheses.
//! Concatenation is implicit, but may also be written `.`.
//! Parsing produces the postfix (reverse polish) form of the expression,
//! consumed by [`crate::nfa::build`].
pub use source_span::{Loc, Span};
use itertools::Itertools;
use std::fmt;

mod error;
pub mod lexer;

pub use error::{Error, Result};
pub use lexer::{Lexer, Token, EPSILON};

/// Token sequence in postfix order.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Postfix(Vec<Token>);

impl Postfix {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<Token> {
		self.0.iter()
	}

	pub fn into_tokens(self) -> Vec<Token> {
		self.0
	}
}

impl From<Vec<Token>> for Postfix {
	fn from(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}
}

impl AsRef<[Token]> for Postfix {
	fn as_ref(&self) -> &[Token] {
		&self.0
	}
}

impl<'a> IntoIterator for &'a Postfix {
	type Item = &'a Token;
	type IntoIter = std::slice::Iter<'a, Token>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl fmt::Display for Postfix {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0.iter().format(" "))
	}
}

/// Parses the given regular expression into postfix order.
pub fn parse(regex: &str) -> Result<Postfix> {
	parse_tokens(Lexer::new(regex.chars(), source_span::DEFAULT_METRICS))
}

/// Parses an infix token stream into postfix order.
///
/// Implicit concatenations are made explicit first, then the operators are
/// reordered by precedence (`*` over `.` over `|`, all left associative).
pub fn parse_tokens<L: Iterator<Item = Loc<Token>>>(lexer: L) -> Result<Postfix> {
	let tokens = with_concatenations(lexer);
	if tokens.is_empty() {
		return Err(Loc::new(Error::Empty, Span::default()));
	}

	let mut output: Vec<Loc<Token>> = Vec::with_capacity(tokens.len());
	let mut stack: Vec<Loc<Token>> = Vec::new();
	let mut previous = None;

	for token in tokens {
		let t = *token.as_ref();
		match t {
			Token::Symbol(_) | Token::Epsilon => output.push(token),
			Token::Open => stack.push(token),
			Token::Close => {
				if previous == Some(Token::Open) {
					return Err(Loc::new(Error::EmptyGroup, token.span()));
				}

				loop {
					match stack.pop() {
						Some(top) if *top.as_ref() == Token::Open => break,
						Some(top) => output.push(top),
						None => return Err(Loc::new(Error::UnmatchedCloser, token.span())),
					}
				}
			}
			op => {
				while let Some(top) = stack.pop() {
					if top.as_ref().precedence() >= op.precedence() {
						output.push(top)
					} else {
						stack.push(top);
						break;
					}
				}

				stack.push(token)
			}
		}

		previous = Some(t);
	}

	while let Some(top) = stack.pop() {
		if *top.as_ref() == Token::Open {
			return Err(Loc::new(Error::MissingCloser, top.span()));
		}

		output.push(top)
	}

	check_operands(&output)?;

	let postfix = Postfix(output.into_iter().map(Loc::into_inner).collect());
	log::debug!("postfix: {}", postfix);
	Ok(postfix)
}

/// Inserts the concatenation operator between adjacent operands.
///
/// The inserted operator is located on its right operand.
fn with_concatenations<L: Iterator<Item = Loc<Token>>>(lexer: L) -> Vec<Loc<Token>> {
	let mut tokens: Vec<Loc<Token>> = Vec::new();

	for token in lexer {
		if let Some(last) = tokens.last() {
			if last.as_ref().concatenates_with(token.as_ref()) {
				tokens.push(Loc::new(Token::Concat, token.span()));
			}
		}

		tokens.push(token)
	}

	tokens
}

/// Checks that the postfix sequence reduces to exactly one expression.
fn check_operands(postfix: &[Loc<Token>]) -> Result<()> {
	let mut depth = 0usize;

	for token in postfix {
		let arity = token.as_ref().arity();
		if depth < arity {
			return Err(Loc::new(Error::MissingOperand(*token.as_ref()), token.span()));
		}

		depth = depth - arity + 1;
	}

	match depth {
		1 => Ok(()),
		0 => Err(Loc::new(Error::Empty, Span::default())),
		_ => {
			// adjacent operands always get a concatenation.
			let last = &postfix[postfix.len() - 1];
			Err(Loc::new(Error::MissingOperand(Token::Concat), last.span()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn postfix(regex: &str) -> String {
		match parse(regex) {
			Ok(postfix) => postfix.to_string(),
			Err(e) => panic!("`{}` failed to parse: {}", regex, e.as_ref()),
		}
	}

	fn error(regex: &str) -> Error {
		match parse(regex) {
			Ok(postfix) => panic!("`{}` parsed as `{}`", regex, postfix),
			Err(e) => e.into_inner(),
		}
	}

	#[test]
	fn alternation() {
		assert_eq!(postfix("a|b"), "a b |");
	}

	#[test]
	fn implicit_concatenation() {
		assert_eq!(postfix("abc"), "a b . c .");
		assert_eq!(postfix("(a|b)*abb"), "a b | * a . b . b .");
	}

	#[test]
	fn precedence() {
		assert_eq!(postfix("ab*"), "a b * .");
		assert_eq!(postfix("a|bc"), "a b c . |");
		assert_eq!(postfix("ab|c"), "a b . c |");
		assert_eq!(postfix("a|b|c"), "a b | c |");
		assert_eq!(postfix("(ab)*"), "a b . *");
		assert_eq!(postfix("a**"), "a * *");
	}

	#[test]
	fn explicit_concatenation() {
		assert_eq!(postfix("a.b"), "a b .");
		assert_eq!(postfix("a.(b|c)"), "a b c | .");
	}

	#[test]
	fn epsilon() {
		assert_eq!(postfix("a|ε"), "a ε |");
		assert_eq!(postfix("a#"), "a ε .");
	}

	#[test]
	fn unbalanced_parentheses() {
		assert_eq!(error("(a|b"), Error::MissingCloser);
		assert_eq!(error("a|b)"), Error::UnmatchedCloser);
		assert_eq!(error(")("), Error::UnmatchedCloser);
		assert_eq!(error("((a)"), Error::MissingCloser);
	}

	#[test]
	fn invalid_input() {
		assert_eq!(error(""), Error::Empty);
		assert_eq!(error("()"), Error::EmptyGroup);
		assert_eq!(error("a|"), Error::MissingOperand(Token::Alternation));
		assert_eq!(error("|a"), Error::MissingOperand(Token::Alternation));
		assert_eq!(error("*"), Error::MissingOperand(Token::Star));
		assert_eq!(error("(|a)"), Error::MissingOperand(Token::Alternation));
		assert_eq!(error("a."), Error::MissingOperand(Token::Concat));
	}

	#[test]
	fn errors_are_located() {
		let e = match parse("ab)") {
			Err(e) => e,
			Ok(_) => panic!("should fail"),
		};
		let (_, span) = e.into_raw_parts();
		let mut expected = Span::default();
		for c in "ab".chars() {
			expected.push(c, &source_span::DEFAULT_METRICS);
		}
		assert!(span.start() == expected.end());
	}
}
