use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::IpsumError;

/// The built-in themed word list.
///
/// Contains at least one word of every length between 1 and 11.
pub const LOBSTER_WORDS: &[&str] = &[
	"a", "ac", "accumsan", "adipiscing", "aenean", "aliquam", "aliquet",
	"amet", "ante", "arcu", "at", "auctor", "augue", "bibendum", "blandit",
	"commodo", "condimentum", "congue", "consectetur", "consequat",
	"convallis", "cras", "cubilia", "curabitur", "curae", "cursus", "dapibus",
	"diam", "dictum", "dignissim", "dolor", "donec", "dui", "duis", "e",
	"egestas", "eget", "eleifend", "elementum", "elit", "enim", "eros", "est",
	"et", "etiam", "eu", "euismod", "facilisis", "fames", "faucibus", "felis",
	"fermentum", "feugiat", "fringilla", "lacus", "laoreet", "lectus", "leo",
	"libero", "ligula", "lobortis", "lorem", "luctus", "maecenas", "magna",
	"malesuada", "massa", "mattis", "mauris", "metus", "mi", "molestie",
	"mollis", "morbi", "nam", "nec", "neque", "netus", "nibh", "nisi", "nisl",
	"non", "nulla", "nullam", "nunc", "odio", "orci", "ornare", "pellentest",
	"pharetra", "phasellus", "placerat", "porta", "porttitor", "posuere",
	"potenti", "praesent", "pretium", "primis", "proin", "pulvinar", "purus",
	"quam", "quis", "quisque", "rhoncus", "risus", "rutrum", "sagittis",
	"sapien", "scelerisque", "sed", "sem", "semper", "senectus", "sit",
	"sodales", "suscipit", "suspendisse", "tellus", "tempor", "tempus",
	"tincidunt", "tortor", "tristique", "truculente", "turpis", "ullamcorper",
	"ultrices", "ultricies", "universita", "urna", "ut", "varius", "vehicula",
	"vel", "velit", "venenatis", "vestibulum", "vitae", "vivamus", "viverra",
	"volutpat", "vulputate",
];

/// An immutable word list indexed by character length.
///
/// # Invariants
/// - Every integer length in `[shortest, longest]` has at least one word
/// - At least two distinct words are short enough to be picked while a
///   sentence still has more budget than `longest`
/// - Words are lowercase, non-empty and contain no whitespace
#[derive(Debug, Clone)]
pub struct Vocabulary {
	/// Words in their original order.
	words: Vec<String>,
	/// Length (in chars) → words of exactly that length.
	by_length: HashMap<usize, Vec<String>>,
	shortest: usize,
	longest: usize,
}

impl Vocabulary {
	/// Builds and validates a vocabulary from any list of words.
	///
	/// Words are lowercased. Lengths are counted in characters.
	///
	/// # Errors
	/// Returns `ConfigurationDefect` if the list is empty, holds an empty or
	/// whitespace-bearing word, leaves a gap in its length coverage, or has
	/// fewer than two distinct words usable before the final word of a
	/// sentence.
	pub fn new<I, S>(words: I) -> Result<Self, IpsumError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut list = Vec::new();
		let mut by_length: HashMap<usize, Vec<String>> = HashMap::new();

		for word in words {
			let word = word.as_ref().to_lowercase();
			if word.is_empty() {
				return Err(IpsumError::defect("the vocabulary contains an empty word"));
			}
			if word.chars().any(char::is_whitespace) {
				return Err(IpsumError::defect(format!("the word '{word}' contains whitespace")));
			}

			by_length.entry(word.chars().count()).or_default().push(word.clone());
			list.push(word);
		}

		let (shortest, longest) = match (by_length.keys().min(), by_length.keys().max()) {
			(Some(min), Some(max)) => (*min, *max),
			_ => return Err(IpsumError::defect("the vocabulary is empty")),
		};

		if let Some(gap) = (shortest..=longest).find(|len| !by_length.contains_key(len)) {
			return Err(IpsumError::defect(format!(
				"no word of length {gap} (every length from {shortest} to {longest} is required)"
			)));
		}

		// Words picked while the budget exceeds `longest` must leave room
		// for a separator and a final word of at least `shortest` chars.
		let greedy_limit = longest.saturating_sub(shortest + 1);
		let greedy: HashSet<&str> = list
			.iter()
			.filter(|w| w.chars().count() <= greedy_limit)
			.map(String::as_str)
			.collect();
		if greedy.len() < 2 {
			return Err(IpsumError::defect(format!(
				"at least two distinct words of length <= {greedy_limit} are required"
			)));
		}

		log::debug!(
			"vocabulary indexed: {} words, lengths {}..={}",
			list.len(),
			shortest,
			longest
		);

		Ok(Self { words: list, by_length, shortest, longest })
	}

	/// Returns the process-wide built-in vocabulary, indexed on first use.
	pub fn builtin() -> Result<&'static Vocabulary, IpsumError> {
		static BUILTIN: OnceLock<Result<Vocabulary, IpsumError>> = OnceLock::new();
		BUILTIN
			.get_or_init(|| Vocabulary::new(LOBSTER_WORDS))
			.as_ref()
			.map_err(Clone::clone)
	}

	/// Length of the shortest word.
	pub fn shortest(&self) -> usize {
		self.shortest
	}

	/// Length of the longest word.
	pub fn longest(&self) -> usize {
		self.longest
	}

	/// Smallest sentence this vocabulary can fill: one word plus a period.
	pub fn min_sentence_length(&self) -> usize {
		self.shortest + 1
	}

	/// Budget that must stay free after a greedy pick: one separator, one
	/// final word of `shortest` chars, and the separator before it.
	pub(crate) fn greedy_reserve(&self) -> usize {
		self.shortest + 2
	}

	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}

	/// Words of exactly `len` characters (empty if none).
	pub fn words_of_length(&self, len: usize) -> &[String] {
		self.by_length.get(&len).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Picks a uniformly random word from the whole list.
	pub(crate) fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		// `words` is never empty once constructed.
		self.words.choose(rng).map(String::as_str).unwrap_or_default()
	}

	/// Picks a uniformly random word of exactly `len` characters.
	///
	/// `avoid` is skipped when another word of that length exists.
	///
	/// # Errors
	/// Returns `ConfigurationDefect` if no word has that length.
	pub(crate) fn random_word_of_length<R: Rng + ?Sized>(
		&self,
		len: usize,
		avoid: Option<&str>,
		rng: &mut R,
	) -> Result<&str, IpsumError> {
		let candidates = self.words_of_length(len);
		let fresh: Vec<&String> = candidates
			.iter()
			.filter(|w| Some(w.as_str()) != avoid)
			.collect();

		let picked = match fresh.choose(rng) {
			Some(word) => Some(word.as_str()),
			None => candidates.choose(rng).map(String::as_str),
		};
		picked.ok_or_else(|| IpsumError::defect(format!("no word of length {len}")))
	}
}
