//! Diagnostic blocks.
use source_span::{Metrics, Span};
use std::fmt;
use yansi::Paint;

pub const ERROR: source_span::fmt::Style = source_span::fmt::Style::Error;

/// Error report about some part of a regular expression.
pub struct Block {
	title: String,
	highlights: source_span::fmt::Formatter,
	notes: Vec<Note>,
}

impl Block {
	pub fn new<S: ToString>(title: S) -> Block {
		Block {
			title: title.to_string(),
			highlights: source_span::fmt::Formatter::new(),
			notes: Vec::new(),
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn notes(&self) -> &[Note] {
		&self.notes
	}

	pub fn highlights_mut(&mut self) -> &mut source_span::fmt::Formatter {
		&mut self.highlights
	}

	pub fn add_note<S: ToString>(&mut self, ty: NoteType, content: S) {
		self.notes.push(Note {
			ty,
			content: content.to_string(),
		})
	}

	pub fn render<E, I: Iterator<Item = Result<char, E>>, M: Metrics>(
		&self,
		input: I,
		span: Span,
		metrics: &M,
	) -> Result<Formatted, E> {
		let margin_len = self.highlights.margin_len(&span);

		Ok(Formatted {
			block: self,
			margin_len: if margin_len >= 2 { margin_len - 2 } else { 0 },
			highlights: self.highlights.render(input, span, metrics)?,
		})
	}
}

pub struct Formatted<'a> {
	block: &'a Block,
	margin_len: usize,
	highlights: source_span::fmt::Formatted,
}

impl<'a> fmt::Display for Formatted<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let tab = " ".repeat(self.margin_len);

		writeln!(
			f,
			"{}{} {}",
			Paint::red("error").bold(),
			Paint::new(':').bold(),
			Paint::new(&self.block.title).bold()
		)?;

		write!(f, "{}{}", tab, Paint::blue('|').bold())?;
		self.highlights.fmt(f)?;
		writeln!(f, "{}{}", tab, Paint::blue('|').bold())?;

		for note in &self.block.notes {
			for (i, line) in note.content.lines().enumerate() {
				if i == 0 {
					writeln!(f, "{}= {}: {}", tab, note.ty, line)?;
				} else {
					writeln!(f, "{}  {}", tab, line)?
				}
			}
		}

		Ok(())
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoteType {
	Note,
	Help,
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Note => write!(f, "{}", Paint::new("note").bold()),
			Self::Help => write!(f, "{}", Paint::green("help").bold()),
		}
	}
}

pub struct Note {
	ty: NoteType,
	content: String,
}

impl Note {
	pub fn ty(&self) -> NoteType {
		self.ty
	}

	pub fn content(&self) -> &str {
		&self.content
	}
}
