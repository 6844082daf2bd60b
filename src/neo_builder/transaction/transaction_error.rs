use thiserror::Error;

use crate::{
	builder::BuilderError, codec::CodecError, crypto::CryptoError, neo_clients::ProviderError,
	neo_types::StackItem,
};

/// Errors raised while building, signing or submitting transactions.
#[derive(Error, Debug)]
pub enum TransactionError {
	#[error("Transaction configuration: {0}")]
	TransactionConfiguration(String),

	#[error("Illegal state: {0}")]
	IllegalState(String),

	#[error("Script format: {0}")]
	ScriptFormat(String),

	#[error("The transaction requires at least one signer")]
	NoSigners,

	#[error("Transaction signers must be unique by account")]
	DuplicateSigner,

	#[error("A transaction takes at most 16 signers")]
	TooManySigners,

	#[error("The transaction has no script")]
	NoScript,

	#[error("The transaction script is empty")]
	EmptyScript,

	#[error("validUntilBlock must be greater than zero")]
	InvalidBlock,

	#[error("Transaction too large: {size} bytes (max {max})")]
	TooLarge { size: usize, max: usize },

	#[error("The dry run ended in FAULT: {exception}")]
	InvocationFault { exception: String, stack: Vec<StackItem> },

	#[error(transparent)]
	Builder(#[from] BuilderError),

	#[error(transparent)]
	Codec(#[from] CodecError),

	#[error(transparent)]
	Crypto(#[from] CryptoError),

	#[error(transparent)]
	Provider(#[from] ProviderError),
}
