use thiserror::Error;

/// Errors raised while encoding or decoding Neo binary structures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
	/// A read ran past the end of the input buffer.
	#[error("Truncated input: needed {needed} more byte(s)")]
	Truncated { needed: usize },

	/// A var-int announced a length larger than the remaining input.
	#[error("Malformed length: {0}")]
	MalformedLength(String),

	#[error("Invalid encoding: {0}")]
	InvalidEncoding(String),

	#[error("Invalid op code")]
	InvalidOpCode,

	#[error("Invalid format")]
	InvalidFormat,

	#[error("Unexpected value: {0}")]
	UnexpectedValue(String),
}
