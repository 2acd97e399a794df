//! Exact-length filler text ("lobster ipsum") generation library.
//!
//! This crate provides:
//! - A themed vocabulary indexed by word length
//! - Sentence and paragraph synthesis hitting an exact character count
//! - A `generate(min, max)` entry point with argument validation
//! - Substitution of `lobsteripsum N[-M]` markers in document trees and HTML
//!
//! ```no_run
//! let text = lobster_ipsum_core::generate(120.0, None)?;
//! assert_eq!(text.chars().count(), 120);
//! # Ok::<(), lobster_ipsum_core::IpsumError>(())
//! ```

/// Vocabulary, synthesis and the high-level generator.
pub mod model;

/// Marker parsing and substitution in documents.
pub mod markup;

/// Error type shared by every operation.
pub mod error;

pub use error::IpsumError;
pub use model::generator::{Generator, MAX_LENGTH, generate};
