use remin::{nfa, syntax, DetAutomaton, Regex, Token};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

const REGEXES: &[&str] = &[
	"a",
	"ab",
	"a|b",
	"a*",
	"(a|b)*",
	"(a|b)*abb",
	"a(b|c)*",
	"(ab|c)*a",
	"a**",
	"(a*b*)*c",
	"a|ε",
	"(#|a)(b|#)",
	"a.b|c",
	"((a))",
	"(a|b|c)(a|b|c)",
	"a*b|ab*",
];

/// Every string over `alphabet` of length at most `max`.
fn strings(alphabet: &[char], max: usize) -> Vec<String> {
	let mut result = vec![String::new()];
	let mut last = vec![String::new()];

	for _ in 0..max {
		let mut next = Vec::new();
		for s in &last {
			for c in alphabet {
				let mut t = s.clone();
				t.push(*c);
				next.push(t)
			}
		}

		result.extend(next.iter().cloned());
		last = next
	}

	result
}

fn compile(regex: &str) -> (nfa::Automaton, DetAutomaton<u32>) {
	let postfix = syntax::parse(regex).ok().expect("invalid regex");
	let nfa = nfa::build(postfix.tokens()).expect("construction failed");
	let min = nfa.determinize().minimize();
	(nfa, min)
}

/// Checks that both automata are equal up to state renaming.
fn isomorphic(a: &DetAutomaton<u32>, b: &DetAutomaton<u32>) -> bool {
	if a.len() != b.len() {
		return false;
	}

	let mut map: BTreeMap<u32, u32> = BTreeMap::new();
	let mut queue = VecDeque::new();
	map.insert(*a.initial_state(), *b.initial_state());
	queue.push_back((*a.initial_state(), *b.initial_state()));

	while let Some((p, q)) = queue.pop_front() {
		if a.is_final(&p) != b.is_final(&q) {
			return false;
		}

		if a.successors(&p).count() != b.successors(&q).count() {
			return false;
		}

		for (label, p_next) in a.successors(&p) {
			let q_next = match b.next_state(&q, *label) {
				Some(q_next) => *q_next,
				None => return false,
			};

			match map.get(p_next) {
				Some(image) => {
					if *image != q_next {
						return false;
					}
				}
				None => {
					map.insert(*p_next, q_next);
					queue.push_back((*p_next, q_next))
				}
			}
		}
	}

	map.len() == a.len()
}

#[test]
fn stages_agree() {
	for regex in REGEXES {
		let (nfa, min) = compile(regex);
		let compiled = Regex::new(regex).expect("invalid regex");
		let dfa = nfa.determinize();

		let mut alphabet: Vec<char> = nfa.alphabet().iter().cloned().collect();
		alphabet.push('z');

		for input in strings(&alphabet, 5) {
			let expected = nfa.simulate(&input);
			assert_eq!(dfa.matches(&input), expected, "`{}` on {:?}", regex, input);
			assert_eq!(min.matches(&input), expected, "`{}` on {:?}", regex, input);
			assert_eq!(compiled.is_match(&input), expected, "`{}` on {:?}", regex, input);
		}
	}
}

#[test]
fn minimization_is_idempotent() {
	for regex in REGEXES {
		let (_, min) = compile(regex);
		assert!(isomorphic(&min, &min.minimize()), "`{}`", regex);
	}
}

#[test]
fn minimal_states_are_distinguishable() {
	for regex in REGEXES {
		let (_, min) = compile(regex);
		let alphabet: Vec<char> = min.alphabet().iter().cloned().collect();
		let suffixes = strings(&alphabet, min.len());

		let mut signatures = BTreeSet::new();
		for q in min.states() {
			let signature: Vec<bool> = suffixes
				.iter()
				.map(|suffix| {
					let mut r = *q;
					for c in suffix.chars() {
						match min.next_state(&r, c) {
							Some(next) => r = *next,
							None => return false,
						}
					}
					min.is_final(&r)
				})
				.collect();

			assert!(signatures.insert(signature), "`{}`: state {} is redundant", regex, q);
		}
	}
}

#[test]
fn dfa_states_are_epsilon_closed() {
	for regex in REGEXES {
		let (nfa, _) = compile(regex);
		let dfa = nfa.determinize();

		for q in dfa.states() {
			let closure = nfa.epsilon_closure(q.iter().cloned());
			assert!(closure == *q, "`{}`: {} is not closed", regex, nfa::DisplayStateSet(q));
		}
	}
}

#[test]
fn parse_errors_surface() {
	match Regex::new("(a|b") {
		Err(remin::Error::Parse(e)) => {
			assert_eq!(*e.as_ref(), syntax::Error::MissingCloser);
		}
		other => panic!("unexpected result {:?}", other),
	}

	match Regex::new("a)") {
		Err(remin::Error::Parse(e)) => {
			assert_eq!(*e.as_ref(), syntax::Error::UnmatchedCloser);
		}
		other => panic!("unexpected result {:?}", other),
	}

	assert!("".parse::<Regex>().is_err());
}

#[test]
fn construction_errors_surface() {
	let tokens = [Token::Symbol('a'), Token::Symbol('b')];
	assert_eq!(nfa::build(&tokens).err(), Some(nfa::Error::Unreduced(2)));

	let tokens = [Token::Symbol('a'), Token::Alternation];
	match nfa::build(&tokens) {
		Err(nfa::Error::MissingOperand { position, token }) => {
			assert_eq!(position, 1);
			assert_eq!(token, Token::Alternation);
		}
		other => panic!("unexpected result {:?}", other.map(|aut| aut.len())),
	}

	let error: remin::Error = nfa::Error::Empty.into();
	assert!(error.span().is_none());
	assert_eq!(error.to_string(), "empty postfix sequence");
}
