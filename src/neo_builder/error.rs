use thiserror::Error;

use crate::{codec::CodecError, crypto::CryptoError, neo_types::TypeError};

/// Errors raised while building scripts, witnesses and signers.
#[derive(Error, Debug, PartialEq)]
pub enum BuilderError {
	#[error("Illegal argument: {0}")]
	IllegalArgument(String),

	#[error("Illegal state: {0}")]
	IllegalState(String),

	#[error("Signer configuration: {0}")]
	SignerConfiguration(String),

	#[error("Invalid script: {0}")]
	InvalidScript(String),

	#[error(transparent)]
	CodecError(#[from] CodecError),

	#[error(transparent)]
	CryptoError(#[from] CryptoError),

	#[error(transparent)]
	TypeError(#[from] TypeError),
}
