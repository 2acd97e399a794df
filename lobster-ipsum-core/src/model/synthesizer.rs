use rand::Rng;

use crate::error::IpsumError;
use crate::model::synthesis_input::SynthesisInput;
use crate::model::vocabulary::Vocabulary;

/// Builds sentences and paragraphs of an exact character length.
///
/// # Responsibilities
/// - Greedily pick random words while the remaining budget is larger than the
///   longest word, then close the sentence with one word of the exact
///   remaining length
/// - Split a paragraph budget into random sentence lengths within the bounds
///   of its `SynthesisInput`
///
/// # Invariants
/// - Every produced sentence and paragraph has exactly the requested number
///   of chars
/// - No sentence holds the same word twice in a row
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
	vocabulary: &'a Vocabulary,
	input: SynthesisInput,
}

impl<'a> Synthesizer<'a> {
	/// Pairs a vocabulary with sentence bounds.
	///
	/// # Errors
	/// Returns `ConfigurationDefect` if the shortest sentence a paragraph may
	/// end with (`min_sentence_length - 2`) cannot hold a word and a period, or
	/// if the bounds are too narrow to split a paragraph.
	pub fn new(vocabulary: &'a Vocabulary, input: SynthesisInput) -> Result<Self, IpsumError> {
		let min = input.min_sentence_length();
		let max = input.max_sentence_length();

		if min < vocabulary.min_sentence_length() + 2 {
			return Err(IpsumError::defect(format!(
				"minimum sentence length {min} is too short for words of {} chars",
				vocabulary.shortest()
			)));
		}
		if max < min.saturating_mul(2) {
			return Err(IpsumError::defect(format!(
				"maximum sentence length {max} must be at least twice the minimum ({min})"
			)));
		}

		Ok(Self { vocabulary, input })
	}

	/// Builds a sentence of exactly `target_length` chars using the thread-local rng.
	pub fn build_sentence(&self, target_length: usize) -> Result<String, IpsumError> {
		self.build_sentence_with_rng(target_length, &mut rand::rng())
	}

	/// Builds a sentence of exactly `target_length` chars, period included.
	///
	/// # Behavior
	/// - While more than `longest` chars remain, picks random words, skipping
	///   the previous word and any word that would not leave room for a
	///   separator and a final word.
	/// - Closes with a word whose length is exactly the remaining budget.
	/// - Capitalizes the first word and appends a period.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `target_length` is below
	/// `shortest + 1`.
	pub fn build_sentence_with_rng<R: Rng + ?Sized>(
		&self,
		target_length: usize,
		rng: &mut R,
	) -> Result<String, IpsumError> {
		let vocabulary = self.vocabulary;
		if target_length < vocabulary.min_sentence_length() {
			return Err(IpsumError::invalid(format!(
				"a sentence needs at least {} chars, got {target_length}",
				vocabulary.min_sentence_length()
			)));
		}

		let longest = vocabulary.longest();
		let reserve = vocabulary.greedy_reserve();

		// Budget without the period
		let mut remaining = target_length - 1;
		let mut words: Vec<&str> = Vec::new();

		while remaining > longest {
			// Terminates: the vocabulary holds two distinct words short
			// enough for any budget above `longest`.
			let word = loop {
				let candidate = vocabulary.random_word(rng);
				let fits = candidate.chars().count() + reserve <= remaining;
				if fits && words.last() != Some(&candidate) {
					break candidate;
				}
			};

			remaining -= word.chars().count() + usize::from(!words.is_empty());
			log::trace!("picked '{word}', {remaining} chars left");
			words.push(word);
		}

		let previous = words.last().copied();
		let final_length = remaining - usize::from(previous.is_some());
		words.push(vocabulary.random_word_of_length(final_length, previous, rng)?);

		let mut sentence = String::with_capacity(target_length);
		for (i, word) in words.iter().enumerate() {
			if i == 0 {
				sentence.push_str(&capitalize(word));
			} else {
				sentence.push(' ');
				sentence.push_str(word);
			}
		}
		sentence.push('.');

		Ok(sentence)
	}

	/// Builds a paragraph of exactly `target_length` chars using the thread-local rng.
	pub fn build_paragraph(&self, target_length: usize) -> Result<String, IpsumError> {
		self.build_paragraph_with_rng(target_length, &mut rand::rng())
	}

	/// Builds a paragraph of exactly `target_length` chars.
	///
	/// # Behavior
	/// - While more than `max_sentence_length` chars remain, appends a sentence
	///   of random length in `[min, min(remaining - min, max)]`.
	/// - Spends the rest of the budget on one last sentence.
	/// - Sentences are separated by single spaces, which count toward the
	///   budget.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `target_length` is below `shortest + 1`.
	pub fn build_paragraph_with_rng<R: Rng + ?Sized>(
		&self,
		target_length: usize,
		rng: &mut R,
	) -> Result<String, IpsumError> {
		if target_length < self.vocabulary.min_sentence_length() {
			return Err(IpsumError::invalid(format!(
				"a paragraph needs at least {} chars, got {target_length}",
				self.vocabulary.min_sentence_length()
			)));
		}

		let min = self.input.min_sentence_length();
		let max = self.input.max_sentence_length();

		let mut remaining = target_length;
		let mut sentences: Vec<String> = Vec::new();

		while remaining > max {
			// Leaves at least `min` chars for what follows.
			let max_length = (remaining - min).min(max);
			let sentence_length = rng.random_range(min..=max_length);

			remaining -= sentence_length + usize::from(!sentences.is_empty());
			sentences.push(self.build_sentence_with_rng(sentence_length, rng)?);
		}

		let last_length = remaining - usize::from(!sentences.is_empty());
		sentences.push(self.build_sentence_with_rng(last_length, rng)?);

		log::debug!(
			"paragraph of {target_length} chars built from {} sentences",
			sentences.len()
		);

		Ok(sentences.join(" "))
	}
}

/// Uppercases the first char when that keeps the char count unchanged.
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => {
			let upper = first.to_uppercase();
			if upper.len() == 1 {
				upper.chain(chars).collect()
			} else {
				word.to_owned()
			}
		}
		None => String::new(),
	}
}
