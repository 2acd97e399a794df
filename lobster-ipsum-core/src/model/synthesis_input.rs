use serde::{Deserialize, Serialize};

use crate::error::IpsumError;

/// Shortest sentence placed in a multi-sentence paragraph.
pub const DEFAULT_MIN_SENTENCE_LENGTH: usize = 20;

/// Longest sentence placed in a paragraph.
pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 140;

/// Sentence bounds used when splitting a paragraph budget into sentences.
///
/// # Responsibilities
/// - Track the minimum and maximum sentence length (in chars, period included)
/// - Reject bounds that would let the paragraph loop pick an empty range
///
/// # Invariants
/// - `min_sentence_length >= 3`
/// - `max_sentence_length >= 2 * min_sentence_length`
///
/// Bounds that depend on the vocabulary (its shortest word) are checked when
/// a `Synthesizer` is built.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesisInput {
	min_sentence_length: usize,
	max_sentence_length: usize,
}

impl Default for SynthesisInput {
	fn default() -> Self {
		Self {
			min_sentence_length: DEFAULT_MIN_SENTENCE_LENGTH,
			max_sentence_length: DEFAULT_MAX_SENTENCE_LENGTH,
		}
	}
}

impl SynthesisInput {
	/// Creates validated sentence bounds.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the bounds break the invariants above.
	pub fn new(min_sentence_length: usize, max_sentence_length: usize) -> Result<Self, IpsumError> {
		let mut input = Self::default();
		input.set_sentence_lengths(min_sentence_length, max_sentence_length)?;
		Ok(input)
	}

	pub fn min_sentence_length(&self) -> usize {
		self.min_sentence_length
	}

	pub fn max_sentence_length(&self) -> usize {
		self.max_sentence_length
	}

	/// Replaces both bounds at once.
	///
	/// The maximum must be at least twice the minimum: while a paragraph still
	/// has more than `max` chars left, every sentence length in
	/// `[min, remaining - min]` must be a valid pick.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the bounds are rejected; the current bounds
	/// are kept.
	pub fn set_sentence_lengths(&mut self, min: usize, max: usize) -> Result<(), IpsumError> {
		if min < 3 {
			return Err(IpsumError::invalid(format!(
				"the minimum sentence length must be at least 3, got {min}"
			)));
		}
		if max < min.saturating_mul(2) {
			return Err(IpsumError::invalid(format!(
				"the maximum sentence length must be at least twice the minimum ({min}), got {max}"
			)));
		}

		self.min_sentence_length = min;
		self.max_sentence_length = max;
		Ok(())
	}
}
