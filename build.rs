use proc_macro2::TokenStream;
use quote::quote;
use std::{
	env,
	fs::{self, File},
	io::{self, BufReader, Read, Write},
	path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum Error {
	IO(io::Error),
	Toml(toml::de::Error),
	Data(PathBuf, DataError),
	OutDir,
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Self::IO(e)
	}
}

impl From<toml::de::Error> for Error {
	fn from(e: toml::de::Error) -> Self {
		Self::Toml(e)
	}
}

#[derive(Debug)]
pub enum DataError {
	DocumentNotATable,
	NoRegex,
	RegexNotString,
	PostfixNotString,
	StatesNotInteger,
	ChallengeNotArray,
	ChallengeNotTable,
	ChallengeNoName,
	NameNotString,
	ChallengeNoInput,
	InputNotString,
	ChallengeNoResult,
	MatchesNotBoolean,
}

fn main() -> Result<(), Error> {
	println!("cargo:rerun-if-changed=tests");

	let mut paths = Vec::new();
	foreach_toml_file("tests", |path| {
		println!("cargo:rerun-if-changed={}", path.display());
		paths.push(path);
		Ok(())
	})?;
	paths.sort();

	let mut modules = Vec::new();
	for path in paths {
		let stem = path
			.file_stem()
			.map(|s| s.to_string_lossy().into_owned())
			.unwrap_or_default();
		let contents = read_file(&path)?;
		let toml: toml::Value = contents.parse()?;
		let test = Test::from_toml(&toml).map_err(|e| Error::Data(path.clone(), e))?;
		modules.push(test.generate(&stem));
	}

	let out_dir = env::var_os("OUT_DIR").ok_or(Error::OutDir)?;
	let mut output = PathBuf::from(out_dir);
	output.push("challenges.rs");

	let code = quote! { #(#modules)* };
	write_file(output, format!("{}", code))?;
	Ok(())
}

fn foreach_toml_file<P: AsRef<Path>, F>(dir: P, mut f: F) -> Result<(), Error>
where
	F: FnMut(PathBuf) -> Result<(), Error>,
{
	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		if path.is_file() {
			if let Some(ext) = path.extension() {
				if ext == "toml" {
					f(path)?
				}
			}
		}
	}

	Ok(())
}

fn read_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let file = fs::File::open(path)?;
	let mut buf_reader = BufReader::new(file);
	let mut contents = String::new();
	buf_reader.read_to_string(&mut contents)?;
	Ok(contents)
}

fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
	let mut file = File::create(path)?;
	file.write_all(contents.as_ref())
}

/// Turns a file stem into a module name.
fn module_name(stem: &str) -> String {
	let mut name: String = stem
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
		.collect();

	if name.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(true) {
		name.insert(0, '_')
	}

	name
}

/// Test description.
pub struct Test {
	/// Regular expression.
	regex: String,

	/// Expected postfix form, tokens separated by spaces.
	postfix: Option<String>,

	/// Expected number of states of the minimal automaton.
	states: Option<usize>,

	/// Challenges.
	challenges: Vec<Challenge>,
}

impl Test {
	fn from_toml(toml: &toml::Value) -> Result<Self, DataError> {
		let table = toml.as_table().ok_or(DataError::DocumentNotATable)?;
		let regex = table
			.get("regex")
			.ok_or(DataError::NoRegex)?
			.as_str()
			.ok_or(DataError::RegexNotString)?;
		let postfix = table
			.get("postfix")
			.map(|p| p.as_str().ok_or(DataError::PostfixNotString))
			.transpose()?;
		let states = table
			.get("states")
			.map(|n| n.as_integer().ok_or(DataError::StatesNotInteger))
			.transpose()?;

		let mut challenges = Vec::new();
		if let Some(value) = table.get("challenge") {
			let values = value.as_array().ok_or(DataError::ChallengeNotArray)?;
			for challenge in values {
				challenges.push(Challenge::from_toml(challenge)?)
			}
		}

		Ok(Self {
			regex: regex.to_string(),
			postfix: postfix.map(|p| p.to_string()),
			states: states.map(|n| n as usize),
			challenges,
		})
	}

	fn generate(&self, stem: &str) -> TokenStream {
		let module = quote::format_ident!("{}", module_name(stem));
		let regex = &self.regex;
		let challenges = self.challenges.iter().map(|c| c.generate());

		let postfix = self.postfix.as_ref().map(|postfix| {
			quote! {
				#[test]
				fn postfix_form() {
					assert_eq!(REGEX.postfix().to_string(), #postfix);
				}
			}
		});

		let states = self.states.map(|states| {
			quote! {
				#[test]
				fn minimal_states() {
					assert_eq!(REGEX.automaton().len(), #states);
				}
			}
		});

		quote! {
			mod #module {
				lazy_static::lazy_static! {
					static ref REGEX: remin::Regex = remin::Regex::new(#regex).expect("invalid regex");
				}

				#postfix
				#states
				#(#challenges)*
			}
		}
	}
}

/// Test challenge.
pub struct Challenge {
	/// Challenge name.
	name: String,

	/// Input string.
	input: String,

	/// Expected outcome.
	matches: bool,
}

impl Challenge {
	fn from_toml(toml: &toml::Value) -> Result<Self, DataError> {
		let table = toml.as_table().ok_or(DataError::ChallengeNotTable)?;
		let name = table
			.get("name")
			.ok_or(DataError::ChallengeNoName)?
			.as_str()
			.ok_or(DataError::NameNotString)?;
		let input = table
			.get("input")
			.ok_or(DataError::ChallengeNoInput)?
			.as_str()
			.ok_or(DataError::InputNotString)?;
		let matches = table
			.get("matches")
			.ok_or(DataError::ChallengeNoResult)?
			.as_bool()
			.ok_or(DataError::MatchesNotBoolean)?;

		Ok(Self {
			name: name.to_string(),
			input: input.to_string(),
			matches,
		})
	}

	fn generate(&self) -> TokenStream {
		let id = quote::format_ident!("{}", self.name);
		let input = &self.input;
		let matches = self.matches;

		quote! {
			#[test]
			fn #id() {
				assert_eq!(
					REGEX.is_match(#input),
					#matches,
					"`{}` against `{}`",
					#input,
					REGEX.as_str()
				);
			}
		}
	}
}
