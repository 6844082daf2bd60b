use thiserror::Error;

/// Errors raised while constructing or converting core value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
	#[error("Invalid address")]
	InvalidAddress,

	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	#[error("Invalid argument: {0}")]
	InvalidArgError(String),

	#[error("Unexpected returned type: {0}")]
	UnexpectedReturnType(String),
}
