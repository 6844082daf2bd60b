//! # KeyPair
//!
//! An elliptic curve key pair on secp256r1, the account key type of Neo N3.
//! Pairs can be generated fresh, imported from raw bytes or WIF, and used
//! to sign transaction digests and arbitrary messages.

use crate::crypto::{
	wif::{private_key_from_wif, wif_from_private_key},
	CryptoError, Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature,
};

/// An elliptic curve key pair containing a private key and the public key
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
	private_key: Secp256r1PrivateKey,
	public_key: Secp256r1PublicKey,
}

impl KeyPair {
	pub fn new(private_key: Secp256r1PrivateKey, public_key: Secp256r1PublicKey) -> Self {
		Self { private_key, public_key }
	}

	/// Derives the pair from just a private key.
	pub fn from_secret_key(private_key: &Secp256r1PrivateKey) -> Self {
		let public_key = private_key.to_public_key();
		Self::new(private_key.clone(), public_key)
	}

	/// Generates a new pair from the process CSPRNG.
	pub fn new_random() -> Self {
		Self::from_secret_key(&Secp256r1PrivateKey::random())
	}

	/// Imports a 32-byte big-endian private scalar.
	pub fn from_private_key(private_key: &[u8; 32]) -> Result<Self, CryptoError> {
		let secret_key = Secp256r1PrivateKey::from_bytes(private_key)?;
		Ok(Self::from_secret_key(&secret_key))
	}

	/// Imports a private key from its WIF encoding.
	pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
		let private_key = private_key_from_wif(wif)?;
		Ok(Self::from_secret_key(&private_key))
	}

	pub fn private_key(&self) -> &Secp256r1PrivateKey {
		&self.private_key
	}

	pub fn public_key(&self) -> &Secp256r1PublicKey {
		&self.public_key
	}

	/// The raw 32-byte private scalar. The caller owns wiping the copy.
	pub fn private_key_bytes(&self) -> [u8; 32] {
		self.private_key.to_raw_bytes()
	}

	/// The compressed 33-byte public key encoding.
	pub fn public_key_bytes(&self) -> Vec<u8> {
		self.public_key.get_encoded(true)
	}

	/// Exports the private key as WIF.
	pub fn export_as_wif(&self) -> String {
		wif_from_private_key(&self.private_key)
	}

	/// Signs `message` (SHA-256 digest, then ECDSA).
	pub fn sign(&self, message: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		self.private_key.sign_tx(message)
	}

	/// Signs an externally computed digest, e.g. a transaction hash-data.
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		self.private_key.sign_prehash(digest)
	}

	/// Verifies a signature produced by [`KeyPair::sign`].
	pub fn verify_signature(
		&self,
		message: &[u8],
		signature: &Secp256r1Signature,
	) -> Result<(), CryptoError> {
		self.public_key.verify(message, signature)
	}
}
