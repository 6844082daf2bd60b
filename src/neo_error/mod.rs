use thiserror::Error;

use crate::{
	builder::{BuilderError, TransactionError},
	codec::CodecError,
	crypto::CryptoError,
	neo_clients::ProviderError,
	neo_protocol::{AccountError, Nep2Error},
	neo_types::TypeError,
	neo_wallets::WalletError,
};

/// The unified error type of the SDK: every domain error converts into
/// it, so applications can bubble a single type.
#[derive(Error, Debug)]
pub enum Neo3Error {
	#[error("Type error: {0}")]
	Type(#[from] TypeError),

	#[error("Serialization error: {0}")]
	Codec(#[from] CodecError),

	#[error("Cryptographic error: {0}")]
	Crypto(#[from] CryptoError),

	#[error("NEP-2 error: {0}")]
	Nep2(#[from] Nep2Error),

	#[error("Builder error: {0}")]
	Builder(#[from] BuilderError),

	#[error("Transaction error: {0}")]
	Transaction(#[from] TransactionError),

	#[error("Provider error: {0}")]
	Provider(#[from] ProviderError),

	#[error("Account error: {0}")]
	Account(#[from] AccountError),

	#[error("Wallet error: {0}")]
	Wallet(#[from] WalletError),

	#[error("Unsupported operation: {0}")]
	UnsupportedOperation(String),

	#[error("{message}")]
	Generic { message: String },
}

/// Result alias for operations surfacing the unified error.
pub type Neo3Result<T> = Result<T, Neo3Error>;

impl From<serde_json::Error> for Neo3Error {
	fn from(err: serde_json::Error) -> Self {
		Neo3Error::Provider(ProviderError::SerdeJson(err))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_domain_errors_convert() {
		fn unified() -> Neo3Result<()> {
			Err(CodecError::InvalidFormat)?
		}
		assert!(matches!(unified(), Err(Neo3Error::Codec(_))));
	}

	#[test]
	fn test_display_carries_context() {
		let err = Neo3Error::from(TypeError::InvalidAddress);
		assert!(err.to_string().contains("Invalid address"));
	}
}
