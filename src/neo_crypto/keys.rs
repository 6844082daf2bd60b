//! # Secp256r1 keys and signatures
//!
//! Wrappers around the `p256` implementation of the NIST P-256 curve, the
//! curve Neo N3 uses for every account key and witness signature.
//!
//! - [`Secp256r1PrivateKey`]: a non-zero scalar below the group order. The
//!   inner `p256::SecretKey` zeroizes its memory on drop.
//! - [`Secp256r1PublicKey`]: a curve point, encoded compressed (33 bytes)
//!   everywhere the protocol carries it.
//! - [`Secp256r1Signature`]: a 64-byte `r || s` pair, normalized to low-S
//!   at signing time so transaction witnesses are canonical.

use core::fmt;
use std::{
	cmp::Ordering,
	fmt::Debug,
	hash::{Hash, Hasher},
};

use p256::{
	ecdsa::{
		signature::{Signer, Verifier},
		Signature, SigningKey, VerifyingKey,
	},
	elliptic_curve::{
		scalar::IsHigh,
		sec1::{FromEncodedPoint, ToEncodedPoint},
	},
	EncodedPoint, FieldBytes, PublicKey, SecretKey,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use signature::hazmat::{PrehashSigner, PrehashVerifier};

use crate::{
	codec::{CodecError, Decoder, Encoder, NeoSerializable},
	crypto::CryptoError,
};

pub const PUBLIC_KEY_SIZE_COMPRESSED: usize = 33;
pub const SIGNATURE_SIZE: usize = 64;

#[derive(Debug, Clone)]
pub struct Secp256r1PublicKey {
	inner: PublicKey,
}

#[derive(Clone)]
pub struct Secp256r1PrivateKey {
	inner: SecretKey,
}

#[derive(Clone)]
pub struct Secp256r1Signature {
	inner: Signature,
}

impl Secp256r1PublicKey {
	/// Constructs a public key from uncompressed x and y coordinates.
	/// Returns `None` when the coordinates are not a point on the curve.
	pub fn new(gx: [u8; 32], gy: [u8; 32]) -> Option<Self> {
		let mut uncompressed = Vec::with_capacity(65);
		uncompressed.push(0x04);
		uncompressed.extend_from_slice(&gx);
		uncompressed.extend_from_slice(&gy);

		let encoded_point = EncodedPoint::from_bytes(&uncompressed).ok()?;
		Option::from(PublicKey::from_encoded_point(&encoded_point))
			.map(|inner| Secp256r1PublicKey { inner })
	}

	/// Parses a SEC1-encoded point (compressed or uncompressed).
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		let encoded_point =
			EncodedPoint::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
		Option::from(PublicKey::from_encoded_point(&encoded_point))
			.map(|inner| Secp256r1PublicKey { inner })
			.ok_or(CryptoError::InvalidPublicKey)
	}

	/// Parses a hex string (optionally `0x`-prefixed) as an encoded point.
	pub fn from_encoded(encoded: &str) -> Option<Self> {
		let encoded = encoded.trim_start_matches("0x");
		let bytes = hex::decode(encoded).ok()?;
		Secp256r1PublicKey::from_bytes(&bytes).ok()
	}

	/// Verifies an ECDSA signature over `message` (hashed with SHA-256).
	pub fn verify(
		&self,
		message: &[u8],
		signature: &Secp256r1Signature,
	) -> Result<(), CryptoError> {
		VerifyingKey::from(&self.inner)
			.verify(message, &signature.inner)
			.map_err(|_| CryptoError::SignatureVerificationError)
	}

	/// Verifies an ECDSA signature over an externally computed digest.
	pub fn verify_prehash(
		&self,
		digest: &[u8],
		signature: &Secp256r1Signature,
	) -> Result<(), CryptoError> {
		VerifyingKey::from(&self.inner)
			.verify_prehash(digest, &signature.inner)
			.map_err(|_| CryptoError::SignatureVerificationError)
	}

	/// The point encoded per SEC1 §2.3.3, compressed or uncompressed.
	pub fn get_encoded(&self, compressed: bool) -> Vec<u8> {
		self.inner.to_encoded_point(compressed).as_bytes().to_vec()
	}

	/// Compressed encoding as lowercase hex without a prefix.
	pub fn get_encoded_compressed_hex(&self) -> String {
		hex::encode(self.get_encoded(true))
	}

	pub(crate) fn from_public_key(inner: PublicKey) -> Self {
		Secp256r1PublicKey { inner }
	}
}

impl Secp256r1PrivateKey {
	/// Draws a fresh key from the process CSPRNG, retrying the negligible
	/// fraction of samples outside `[1, n)`.
	pub fn random() -> Self {
		loop {
			let candidate: [u8; 32] = rand::random();
			if let Ok(key) = Self::from_bytes(&candidate) {
				return key;
			}
		}
	}

	/// Parses a 32-byte big-endian scalar. Rejects zero and values ≥ n.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != 32 {
			return Err(CryptoError::InvalidPrivateKey);
		}
		let field_bytes = FieldBytes::from_slice(bytes);
		let inner =
			SecretKey::from_bytes(field_bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
		Ok(Secp256r1PrivateKey { inner })
	}

	/// The raw 32-byte big-endian scalar. Callers holding this copy are
	/// responsible for wiping it; prefer [`crate::crypto::SecureBytes`].
	pub fn to_raw_bytes(&self) -> [u8; 32] {
		let mut bytes = [0u8; 32];
		bytes.copy_from_slice(self.inner.to_bytes().as_slice());
		bytes
	}

	pub fn to_public_key(&self) -> Secp256r1PublicKey {
		Secp256r1PublicKey { inner: self.inner.public_key() }
	}

	/// Signs `message`: ECDSA over `sha256(message)`, low-S normalized.
	pub fn sign_tx(&self, message: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		let signing_key = SigningKey::from(&self.inner);
		let signature: Signature = signing_key.sign(message);
		Ok(Secp256r1Signature { inner: signature.normalize_s().unwrap_or(signature) })
	}

	/// Signs an externally computed 32-byte digest, low-S normalized.
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		let signing_key = SigningKey::from(&self.inner);
		let signature: Signature =
			PrehashSigner::sign_prehash(&signing_key, digest).map_err(|_| CryptoError::SigningError)?;
		Ok(Secp256r1Signature { inner: signature.normalize_s().unwrap_or(signature) })
	}
}

impl Secp256r1Signature {
	/// Builds a signature from 32-byte big-endian r and s values.
	pub fn from_scalars(r: [u8; 32], s: [u8; 32]) -> Option<Self> {
		let mut bytes = [0u8; 64];
		bytes[..32].copy_from_slice(&r);
		bytes[32..].copy_from_slice(&s);
		Secp256r1Signature::from_bytes(&bytes).ok()
	}

	/// Parses the 64-byte `r || s` form. Rejects zero or out-of-range
	/// scalars.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != SIGNATURE_SIZE {
			return Err(CryptoError::InvalidFormat("Invalid signature length".to_string()));
		}
		let inner = Signature::from_slice(bytes)
			.map_err(|_| CryptoError::InvalidFormat("Invalid signature encoding".to_string()))?;
		Ok(Secp256r1Signature { inner })
	}

	/// The 64-byte `r_be || s_be` encoding used in invocation scripts.
	pub fn to_bytes(&self) -> [u8; 64] {
		let mut bytes = [0u8; 64];
		bytes.copy_from_slice(self.inner.to_bytes().as_slice());
		bytes
	}

	/// Whether `s` is in the lower half of the group order.
	pub fn is_low_s(&self) -> bool {
		!bool::from(self.inner.s().is_high())
	}

	pub(crate) fn from_signature(inner: Signature) -> Self {
		Secp256r1Signature { inner }
	}

	pub(crate) fn inner(&self) -> &Signature {
		&self.inner
	}
}

impl Debug for Secp256r1PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Never print key material.
		write!(f, "Secp256r1PrivateKey")
	}
}

impl Debug for Secp256r1Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1Signature({})", hex::encode(self.to_bytes()))
	}
}

impl fmt::Display for Secp256r1PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1PrivateKey")
	}
}

impl fmt::Display for Secp256r1PublicKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1PublicKey({})", self.get_encoded_compressed_hex())
	}
}

impl Serialize for Secp256r1PublicKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.get_encoded_compressed_hex())
	}
}

impl<'de> Deserialize<'de> for Secp256r1PublicKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let encoded = String::deserialize(deserializer)?;
		Secp256r1PublicKey::from_encoded(&encoded)
			.ok_or_else(|| serde::de::Error::custom("invalid secp256r1 public key"))
	}
}

impl PartialEq for Secp256r1PublicKey {
	fn eq(&self, other: &Secp256r1PublicKey) -> bool {
		self.inner == other.inner
	}
}

impl Eq for Secp256r1PublicKey {}

// Ordering follows the compressed encoding; multi-sig scripts require the
// participant keys sorted this way.
impl Ord for Secp256r1PublicKey {
	fn cmp(&self, other: &Self) -> Ordering {
		self.get_encoded(true).cmp(&other.get_encoded(true))
	}
}

impl PartialOrd for Secp256r1PublicKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Hash for Secp256r1PublicKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.get_encoded(true).hash(state);
	}
}

impl PartialEq for Secp256r1PrivateKey {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl Eq for Secp256r1PrivateKey {}

impl PartialEq for Secp256r1Signature {
	fn eq(&self, other: &Self) -> bool {
		self.to_bytes() == other.to_bytes()
	}
}

impl Eq for Secp256r1Signature {}

impl NeoSerializable for Secp256r1PublicKey {
	type Error = CodecError;

	fn size(&self) -> usize {
		PUBLIC_KEY_SIZE_COMPRESSED
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_bytes(&self.get_encoded(true));
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let point = reader.read_encoded_ec_point()?;
		Secp256r1PublicKey::from_bytes(&point)
			.map_err(|_| CodecError::InvalidEncoding("Invalid EC point".to_string()))
	}
}
