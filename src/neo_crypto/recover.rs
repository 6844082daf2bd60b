//! ECDSA public key recovery.
//!
//! Given a signature, the signed digest and a recovery id in `0..=3`, the
//! signing public key can be reconstructed. Neo transaction witnesses never
//! rely on recovery (the verification script carries the key); this exists
//! for message-signing helpers whose payloads travel without a key.

use ecdsa::RecoveryId;
use p256::ecdsa::VerifyingKey;

use crate::crypto::{CryptoError, Secp256r1PublicKey, Secp256r1Signature};

/// Recovers the compressed public key that produced `signature` over
/// `digest` (a 32-byte hash), for the given recovery id.
pub fn recover_from_prehash(
	rec_id: u8,
	digest: &[u8],
	signature: &Secp256r1Signature,
) -> Result<Secp256r1PublicKey, CryptoError> {
	let recovery_id = RecoveryId::from_byte(rec_id).ok_or(CryptoError::RecoveryFailed)?;
	let verifying_key = VerifyingKey::recover_from_prehash(digest, signature.inner(), recovery_id)
		.map_err(|_| CryptoError::RecoveryFailed)?;
	Ok(Secp256r1PublicKey::from_public_key(verifying_key.into()))
}

/// Tries all four recovery ids and returns the one matching `expected`,
/// if any. Useful when the id was not transmitted alongside the signature.
pub fn find_recovery_id(
	digest: &[u8],
	signature: &Secp256r1Signature,
	expected: &Secp256r1PublicKey,
) -> Option<u8> {
	(0u8..4).find(|rec_id| {
		matches!(recover_from_prehash(*rec_id, digest, signature), Ok(ref key) if key == expected)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::{HashableForVec, KeyPair};

	#[test]
	fn test_recover_matches_signer() {
		let key_pair = KeyPair::new_random();
		let digest = b"recoverable message".hash256();
		let signature = key_pair.sign_prehash(&digest).unwrap();

		let rec_id = find_recovery_id(&digest, &signature, key_pair.public_key())
			.expect("one of the four candidates must match");
		let recovered = recover_from_prehash(rec_id, &digest, &signature).unwrap();
		assert_eq!(&recovered, key_pair.public_key());
	}

	#[test]
	fn test_invalid_recovery_id() {
		let key_pair = KeyPair::new_random();
		let digest = b"msg".hash256();
		let signature = key_pair.sign_prehash(&digest).unwrap();
		assert!(recover_from_prehash(4, &digest, &signature).is_err());
	}
}
