use thiserror::Error;

/// Errors raised by cryptographic operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
	#[error("Invalid public key")]
	InvalidPublicKey,

	#[error("Invalid private key")]
	InvalidPrivateKey,

	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	#[error("Signing failed")]
	SigningError,

	#[error("Signature verification failed")]
	SignatureVerificationError,

	#[error("Public key recovery failed")]
	RecoveryFailed,

	#[error("Base58 checksum mismatch")]
	ChecksumMismatch,

	#[error("Randomness source failed: {0}")]
	RngError(String),

	#[error(transparent)]
	FromHexError(#[from] hex::FromHexError),
}
