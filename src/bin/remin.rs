#[macro_use]
extern crate clap;

use remin::{nfa, out, syntax, util::DisplayString, Regex};
use source_span::{Loc, Span};
use std::io::{self, Read};
use utf8_decode::UnsafeDecoder;
use yansi::Paint;

fn main() -> io::Result<()> {
	// Parse options.
	let yaml = load_yaml!("remin.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();

	// Init logger.
	let verbosity = matches.occurrences_of("verbose") as usize;
	stderrlog::new()
		.verbosity(verbosity)
		.init()
		.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

	if matches.is_present("no-color") {
		Paint::disable()
	}

	let success = match matches.subcommand() {
		("postfix", Some(m)) => {
			let regex = m.value_of("REGEX").unwrap_or_default();
			match syntax::parse(regex) {
				Ok(postfix) => {
					println!("{}", postfix);
					true
				}
				Err(e) => {
					report(regex, e)?;
					false
				}
			}
		}
		("table", Some(m)) => {
			let regex = m.value_of("REGEX").unwrap_or_default();
			let stage = m.value_of("stage").unwrap_or("min");
			print_table(regex, stage)?
		}
		("match", Some(m)) => {
			let regex = m.value_of("REGEX").unwrap_or_default();
			let inputs: Vec<String> = match m.values_of("INPUT") {
				Some(values) => values.map(|s| s.to_string()).collect(),
				None => read_inputs()?,
			};
			match_inputs(regex, &inputs)?
		}
		(name, _) => {
			log::error!("unknown command `{}`", name);
			false
		}
	};

	if !success {
		std::process::exit(1)
	}

	Ok(())
}

fn print_table(regex: &str, stage: &str) -> io::Result<bool> {
	let postfix = match syntax::parse(regex) {
		Ok(postfix) => postfix,
		Err(e) => {
			report(regex, e)?;
			return Ok(false);
		}
	};

	let nfa = match nfa::build(postfix.tokens()) {
		Ok(nfa) => nfa,
		Err(e) => {
			eprintln!("{}{} {}", Paint::red("error").bold(), Paint::new(':').bold(), e);
			return Ok(false);
		}
	};

	match stage {
		"nfa" => print!("{}", nfa),
		"dfa" => {
			let dfa = nfa.determinize();
			for (i, q) in dfa.states().enumerate() {
				println!("{} = {}", i, nfa::DisplayStateSet(q))
			}
			print!("{}", dfa.numbered())
		}
		_ => print!("{}", nfa.determinize().minimize()),
	}

	Ok(true)
}

/// Matches every input, returns `true` if they all match.
fn match_inputs(regex: &str, inputs: &[String]) -> io::Result<bool> {
	let regex = match Regex::new(regex) {
		Ok(regex) => regex,
		Err(remin::Error::Parse(e)) => {
			report(regex, e)?;
			return Ok(false);
		}
		Err(e) => {
			eprintln!("{}{} {}", Paint::red("error").bold(), Paint::new(':').bold(), e);
			return Ok(false);
		}
	};

	log::info!("`{}` compiled into {} states", regex, regex.automaton().len());

	let mut all = true;
	for input in inputs {
		let result = if regex.is_match(input) {
			Paint::green("match")
		} else {
			all = false;
			Paint::red("no match")
		};

		println!("{}: {}", DisplayString(input), result)
	}

	Ok(all)
}

/// Reads one input per line on the standard input.
fn read_inputs() -> io::Result<Vec<String>> {
	let stdin = io::stdin();
	let mut inputs = Vec::new();
	let mut line = String::new();

	for c in UnsafeDecoder::new(stdin.lock().bytes()) {
		match c? {
			'\n' => inputs.push(std::mem::take(&mut line)),
			'\r' => (),
			c => line.push(c),
		}
	}

	if !line.is_empty() {
		inputs.push(line)
	}

	Ok(inputs)
}

fn report(regex: &str, e: Loc<syntax::Error>) -> io::Result<()> {
	let metrics = source_span::DEFAULT_METRICS;
	let (error, span) = e.into_raw_parts();

	let mut block = out::Block::new(error.title());
	error.fill_block(span, &mut block);

	let mut regex_span = Span::default();
	for c in regex.chars() {
		regex_span.push(c, &metrics)
	}

	let formatted = block.render(regex.chars().map(Ok::<char, io::Error>), regex_span, &metrics)?;
	eprintln!("{}", formatted);
	Ok(())
}
