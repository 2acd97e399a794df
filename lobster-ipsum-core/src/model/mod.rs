//! Text generation components, composed bottom-up:
//! - Word list indexed by length (`Vocabulary`)
//! - Sentence bounds (`SynthesisInput`)
//! - Exact-length sentence and paragraph building (`Synthesizer`)
//! - Argument validation and length resolution (`Generator`)

/// High-level interface validating requested lengths and producing paragraphs.
pub mod generator;

/// Exact-length sentence and paragraph synthesis.
pub mod synthesizer;

/// Sentence length bounds used to split paragraphs.
pub mod synthesis_input;

/// Built-in word list and its length index.
pub mod vocabulary;
