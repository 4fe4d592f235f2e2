use super::lexer::Token;
use crate::out;
use source_span::Loc;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
	/// The regular expression has no operand at all.
	Empty,

	/// `()`.
	EmptyGroup,

	/// A closing parenthesis without an opening one.
	UnmatchedCloser,

	/// An opening parenthesis that is never closed.
	MissingCloser,

	/// An operator without enough operands.
	MissingOperand(Token),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			Empty => write!(f, "empty regular expression"),
			EmptyGroup => write!(f, "empty group"),
			UnmatchedCloser => write!(f, "unmatched closing parenthesis"),
			MissingCloser => write!(f, "missing closing parenthesis"),
			MissingOperand(op) => write!(f, "missing operand for `{}`", op),
		}
	}
}

impl Error {
	pub fn title(&self) -> String {
		match self {
			Error::UnmatchedCloser | Error::MissingCloser => "unbalanced parentheses".to_string(),
			_ => "invalid regular expression".to_string(),
		}
	}

	/// Highlights the error at `span` and adds notes to the given block.
	pub fn fill_block(&self, span: source_span::Span, block: &mut out::Block) {
		block
			.highlights_mut()
			.add(span, Some(self.to_string()), out::ERROR);

		match self {
			Error::Empty => block.add_note(
				out::NoteType::Help,
				"use `ε` (or `#`) to match the empty string",
			),
			Error::EmptyGroup => block.add_note(
				out::NoteType::Help,
				"write `(ε)` to group the empty string",
			),
			Error::UnmatchedCloser => {
				block.add_note(out::NoteType::Note, "no group is open at this point")
			}
			Error::MissingCloser => {
				block.add_note(out::NoteType::Help, "close this group with `)`")
			}
			Error::MissingOperand(Token::Star) => block.add_note(
				out::NoteType::Note,
				"`*` repeats the expression written just before it",
			),
			Error::MissingOperand(op) => block.add_note(
				out::NoteType::Note,
				format!("`{}` needs an expression on both sides", op),
			),
		}
	}
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Loc<Error>>;
