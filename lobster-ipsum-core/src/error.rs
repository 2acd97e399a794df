use thiserror::Error;

/// Errors raised while building a vocabulary or generating text.
///
/// Both variants are returned synchronously to the immediate caller.
/// `InvalidArgument` is always recoverable; `ConfigurationDefect` points at a
/// word list or sentence bounds that cannot produce exact-length text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpsumError {
	/// A requested length (or its textual form) failed validation.
	#[error("lobsteripsum - {0}")]
	InvalidArgument(String),

	/// The vocabulary or synthesis settings cannot guarantee exact lengths.
	#[error("lobsteripsum configuration defect - {0}")]
	ConfigurationDefect(String),
}

impl IpsumError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		IpsumError::InvalidArgument(message.into())
	}

	pub(crate) fn defect(message: impl Into<String>) -> Self {
		IpsumError::ConfigurationDefect(message.into())
	}
}
