use std::borrow::Cow;

use rand::Rng;

use crate::error::IpsumError;
use crate::model::synthesis_input::SynthesisInput;
use crate::model::synthesizer::Synthesizer;
use crate::model::vocabulary::Vocabulary;

/// Longest paragraph `generate` accepts, in chars.
pub const MAX_LENGTH: usize = 1_000_000;

/// High-level entry point turning a requested length (or length range) into
/// a paragraph of filler text.
///
/// # Responsibilities
/// - Validate `min` / `max` the way callers pass them (numbers or text)
/// - Resolve the target length: `floor(min)`, or a uniform integer in
///   `[min, max]`
/// - Delegate to the paragraph synthesizer
///
/// The built-in vocabulary is borrowed from process-wide state; a custom one
/// is owned by the generator.
#[derive(Debug, Clone)]
pub struct Generator {
	vocabulary: Cow<'static, Vocabulary>,
	input: SynthesisInput,
}

impl Generator {
	/// Creates a generator over the built-in vocabulary with default
	/// sentence bounds.
	///
	/// # Errors
	/// Only if the built-in vocabulary failed to index, which is a defect.
	pub fn new() -> Result<Self, IpsumError> {
		Self::build(Cow::Borrowed(Vocabulary::builtin()?), SynthesisInput::default())
	}

	/// Creates a generator over a custom vocabulary with default sentence
	/// bounds.
	///
	/// # Errors
	/// Returns `ConfigurationDefect` if the default bounds do not suit the
	/// vocabulary's shortest word.
	pub fn with_vocabulary(vocabulary: Vocabulary) -> Result<Self, IpsumError> {
		Self::build(Cow::Owned(vocabulary), SynthesisInput::default())
	}

	fn build(
		vocabulary: Cow<'static, Vocabulary>,
		input: SynthesisInput,
	) -> Result<Self, IpsumError> {
		Synthesizer::new(&vocabulary, input)?;
		Ok(Self { vocabulary, input })
	}

	pub fn synthesis_input(&self) -> &SynthesisInput {
		&self.input
	}

	/// Replaces the sentence bounds.
	///
	/// # Errors
	/// Returns `ConfigurationDefect` if the bounds do not suit the
	/// vocabulary; the current bounds are kept.
	pub fn set_synthesis_input(&mut self, input: SynthesisInput) -> Result<(), IpsumError> {
		Synthesizer::new(&self.vocabulary, input)?;
		self.input = input;
		Ok(())
	}

	/// Smallest accepted `min`: one word of the shortest length plus a period.
	pub fn min_length(&self) -> usize {
		self.vocabulary.min_sentence_length()
	}

	/// Returns the synthesizer backing this generator.
	pub fn synthesizer(&self) -> Result<Synthesizer<'_>, IpsumError> {
		Synthesizer::new(&self.vocabulary, self.input)
	}

	/// Generates a paragraph of `floor(min)` chars, or of a random length in
	/// `[min, max]` when `max` is given.
	///
	/// # Errors
	/// Returns `InvalidArgument` if:
	/// - `min` is not finite or is below `min_length()`
	/// - `max` is not finite or is below `min`
	/// - `min` or `max` is above [`MAX_LENGTH`]
	/// - `[min, max]` holds no whole number
	pub fn generate(&self, min: f64, max: Option<f64>) -> Result<String, IpsumError> {
		self.generate_with_rng(min, max, &mut rand::rng())
	}

	/// Same as [`Generator::generate`] with an explicit random source.
	pub fn generate_with_rng<R: Rng + ?Sized>(
		&self,
		min: f64,
		max: Option<f64>,
		rng: &mut R,
	) -> Result<String, IpsumError> {
		let target_length = self.target_length(min, max, rng)?;
		log::debug!("generating {target_length} chars (min={min}, max={max:?})");
		self.synthesizer()?.build_paragraph_with_rng(target_length, rng)
	}

	/// Same as [`Generator::generate`] for lengths given as text, such as
	/// query parameters or marker captures.
	///
	/// # Errors
	/// Returns `InvalidArgument` if either value does not parse as a number,
	/// then applies the numeric checks.
	pub fn generate_str(&self, min: &str, max: Option<&str>) -> Result<String, IpsumError> {
		let min = parse_number(min).ok_or_else(|| {
			IpsumError::invalid(format!(
				"the first argument is required and must be a number, got '{min}'"
			))
		})?;
		let max = match max {
			None => None,
			Some(text) => Some(parse_number(text).ok_or_else(|| {
				IpsumError::invalid(format!(
					"the optional second argument must be a number, got '{text}'"
				))
			})?),
		};
		self.generate(min, max)
	}

	/// Lenient variant of [`Generator::generate`].
	///
	/// # Behavior
	/// - An unusable `max` (not finite, below `min`, or with no whole number
	///   in `[min, max]`) is ignored: the paragraph is `floor(min)` chars.
	/// - Any remaining error (bad `min`, length above [`MAX_LENGTH`]) is
	///   logged and an empty string is returned.
	pub fn generate_or_empty(&self, min: f64, max: Option<f64>) -> String {
		self.generate_or_empty_with_rng(min, max, &mut rand::rng())
	}

	/// Same as [`Generator::generate_or_empty`] with an explicit random source.
	pub fn generate_or_empty_with_rng<R: Rng + ?Sized>(
		&self,
		min: f64,
		max: Option<f64>,
		rng: &mut R,
	) -> String {
		let max = max.filter(|max| max.is_finite() && max.floor() >= min.ceil());
		match self.generate_with_rng(min, max, rng) {
			Ok(text) => text,
			Err(e) => {
				log::warn!("{e}");
				String::new()
			}
		}
	}

	/// Validates `min` / `max` and resolves the paragraph length.
	fn target_length<R: Rng + ?Sized>(
		&self,
		min: f64,
		max: Option<f64>,
		rng: &mut R,
	) -> Result<usize, IpsumError> {
		if !min.is_finite() {
			return Err(IpsumError::invalid(
				"the first argument is required and must be a number",
			));
		}
		if min < self.min_length() as f64 {
			return Err(IpsumError::invalid(format!(
				"the first argument must be at least one greater than the shortest word \
				 in the vocabulary (>= {})",
				self.min_length()
			)));
		}
		if min >= (MAX_LENGTH + 1) as f64 {
			return Err(IpsumError::invalid(format!(
				"the first argument must be at most {MAX_LENGTH}"
			)));
		}

		let max = match max {
			None => return Ok(min.floor() as usize),
			Some(max) => max,
		};

		if !max.is_finite() {
			return Err(IpsumError::invalid(
				"the optional second argument must be a number",
			));
		}
		if max < min {
			return Err(IpsumError::invalid(
				"the optional second argument must be greater than \
				 or equal to the first argument",
			));
		}

		let low = min.ceil() as usize;
		let high = max.floor() as usize;
		if high < low {
			return Err(IpsumError::invalid(format!(
				"no whole length lies between {min} and {max}"
			)));
		}
		if high > MAX_LENGTH {
			return Err(IpsumError::invalid(format!(
				"the optional second argument must be at most {MAX_LENGTH}"
			)));
		}

		Ok(rng.random_range(low..=high))
	}
}

fn parse_number(text: &str) -> Option<f64> {
	text.trim().parse::<f64>().ok()
}

/// Generates a paragraph with the built-in vocabulary.
///
/// See [`Generator::generate`].
pub fn generate(min: f64, max: Option<f64>) -> Result<String, IpsumError> {
	Generator::new()?.generate(min, max)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn exact_length_without_max() {
		let generator = Generator::new().unwrap();
		for min in [2.0, 20.0, 141.0, 999.0] {
			assert_eq!(generator.generate(min, None).unwrap().chars().count(), min as usize);
		}
	}

	#[test]
	fn fractional_min_is_floored() {
		let generator = Generator::new().unwrap();
		assert_eq!(generator.generate(20.9, None).unwrap().chars().count(), 20);
	}

	#[test]
	fn length_within_range() {
		let generator = Generator::new().unwrap();
		let mut rng = StdRng::seed_from_u64(17);
		let mut seen = std::collections::HashSet::new();
		for _ in 0..300 {
			let text = generator.generate_with_rng(30.0, Some(40.0), &mut rng).unwrap();
			let len = text.chars().count();
			assert!((30..=40).contains(&len), "{len}");
			seen.insert(len);
		}
		// Both ends are reachable.
		assert!(seen.contains(&30));
		assert!(seen.contains(&40));
	}

	#[test]
	fn equal_bounds_give_exact_length() {
		let generator = Generator::new().unwrap();
		let text = generator.generate(150.0, Some(150.0)).unwrap();
		assert_eq!(text.chars().count(), 150);
		assert_eq!(text.matches('.').count(), 2);
	}

	#[test]
	fn invalid_arguments() {
		let generator = Generator::new().unwrap();
		for (min, max) in [
			(0.0, None),
			(1.0, None),
			(1.9, None),
			(f64::NAN, None),
			(f64::INFINITY, None),
			(10.0, Some(5.0)),
			(10.0, Some(f64::NAN)),
			(20.2, Some(20.8)),
		] {
			let err = generator.generate(min, max).unwrap_err();
			assert!(matches!(err, IpsumError::InvalidArgument(_)), "{min} {max:?}");
		}
	}

	#[test]
	fn textual_arguments() {
		let generator = Generator::new().unwrap();
		assert!(matches!(generator.generate_str("abc", None), Err(IpsumError::InvalidArgument(_))));
		assert!(matches!(generator.generate_str("20", Some("x")), Err(IpsumError::InvalidArgument(_))));
		assert!(matches!(generator.generate_str("NaN", None), Err(IpsumError::InvalidArgument(_))));
		assert_eq!(generator.generate_str(" 25 ", None).unwrap().chars().count(), 25);
		let len = generator.generate_str("25", Some("30")).unwrap().chars().count();
		assert!((25..=30).contains(&len));
	}

	#[test]
	fn error_messages_are_prefixed() {
		let err = generate(10.0, Some(5.0)).unwrap_err();
		assert_eq!(
			err.to_string(),
			"lobsteripsum - the optional second argument must be \
			 greater than or equal to the first argument"
		);
	}

	#[test]
	fn lenient_generation_returns_empty_on_bad_min() {
		let generator = Generator::new().unwrap();
		assert_eq!(generator.generate_or_empty(1.0, None), "");
		assert_eq!(generator.generate_or_empty(f64::NAN, Some(30.0)), "");
		assert_eq!(generator.generate_or_empty(1.0, Some(30.0)), "");
		assert_eq!(generator.generate_or_empty(12.0, None).chars().count(), 12);
	}

	#[test]
	fn lenient_generation_ignores_unusable_max() {
		let generator = Generator::new().unwrap();
		assert_eq!(generator.generate_or_empty(10.0, Some(5.0)).chars().count(), 10);
		assert_eq!(generator.generate_or_empty(10.0, Some(f64::NAN)).chars().count(), 10);
		assert_eq!(generator.generate_or_empty(10.0, Some(f64::INFINITY)).chars().count(), 10);
		assert_eq!(generator.generate_or_empty(20.2, Some(20.8)).chars().count(), 20);

		let len = generator.generate_or_empty(10.0, Some(15.0)).chars().count();
		assert!((10..=15).contains(&len));
	}

	#[test]
	fn lengths_above_the_limit_are_rejected() {
		let generator = Generator::new().unwrap();
		for (min, max) in [
			((MAX_LENGTH + 1) as f64, None),
			(1e30, None),
			(10.0, Some((MAX_LENGTH + 1) as f64)),
		] {
			let err = generator.generate(min, max).unwrap_err();
			assert!(matches!(err, IpsumError::InvalidArgument(_)), "{min} {max:?}");
		}
		assert_eq!(generator.generate_or_empty(1e30, None), "");
		assert!(generator.generate(MAX_LENGTH as f64, None).is_ok());
	}

	#[test]
	fn custom_vocabulary_sets_minimum() {
		let vocabulary = Vocabulary::new(["ab", "cd", "efg", "hijk", "lmnop", "qrstuv"]).unwrap();
		let generator = Generator::with_vocabulary(vocabulary).unwrap();
		assert_eq!(generator.min_length(), 3);
		assert!(generator.generate(2.0, None).is_err());
		assert_eq!(generator.generate(3.0, None).unwrap().chars().count(), 3);
		assert_eq!(generator.generate(333.0, None).unwrap().chars().count(), 333);
	}

	#[test]
	fn synthesis_input_is_validated_against_vocabulary() {
		let mut generator = Generator::new().unwrap();
		let narrow = SynthesisInput::new(3, 6).unwrap();
		assert!(generator.set_synthesis_input(narrow).is_err());
		assert_eq!(*generator.synthesis_input(), SynthesisInput::default());

		let wide = SynthesisInput::new(40, 200).unwrap();
		generator.set_synthesis_input(wide).unwrap();
		assert_eq!(generator.generate(500.0, None).unwrap().chars().count(), 500);
	}
}
