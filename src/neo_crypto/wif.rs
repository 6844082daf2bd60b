//! Wallet Import Format (WIF) encoding of secp256r1 private keys.
//!
//! The compressed-key form Neo uses is
//! `0x80 || key (32 bytes) || 0x01` wrapped in Base58Check, 38 bytes before
//! encoding. The trailing `0x01` marks that the derived public key is
//! compressed.

use crate::crypto::{
	base58_helper::{base58check_decode, base58check_encode},
	CryptoError, Secp256r1PrivateKey,
};

const WIF_PREFIX: u8 = 0x80;
const COMPRESSED_FLAG: u8 = 0x01;
const WIF_PAYLOAD_LEN: usize = 34;

/// Encodes a private key as a compressed-form WIF string.
pub fn wif_from_private_key(private_key: &Secp256r1PrivateKey) -> String {
	let mut payload = Vec::with_capacity(WIF_PAYLOAD_LEN);
	payload.push(WIF_PREFIX);
	payload.extend_from_slice(&private_key.to_raw_bytes());
	payload.push(COMPRESSED_FLAG);
	base58check_encode(&payload)
}

/// Decodes a compressed-form WIF string, enforcing length, framing bytes
/// and the Base58Check checksum.
pub fn private_key_from_wif(wif: &str) -> Result<Secp256r1PrivateKey, CryptoError> {
	let payload = base58check_decode(wif).ok_or(CryptoError::ChecksumMismatch)?;

	if payload.len() != WIF_PAYLOAD_LEN {
		return Err(CryptoError::InvalidFormat(format!(
			"WIF payload must be {WIF_PAYLOAD_LEN} bytes, got {}",
			payload.len()
		)));
	}
	if payload[0] != WIF_PREFIX {
		return Err(CryptoError::InvalidFormat("WIF must start with 0x80".to_string()));
	}
	if payload[33] != COMPRESSED_FLAG {
		return Err(CryptoError::InvalidFormat(
			"WIF must carry the compressed-key flag 0x01".to_string(),
		));
	}

	Secp256r1PrivateKey::from_bytes(&payload[1..33])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_valid_wif_to_private_key() {
		let wif = "KwDidQJHSE67VJ6MWRvbBKAxhD3F48DvqRT6JRqrjd7MHLBjGF7V";
		let expected = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

		let key = private_key_from_wif(wif).unwrap();
		assert_eq!(hex::encode(key.to_raw_bytes()), expected);
	}

	#[test]
	fn test_private_key_to_wif() {
		let key = Secp256r1PrivateKey::from_bytes(
			&hex::decode("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d")
				.unwrap(),
		)
		.unwrap();
		assert_eq!(
			wif_from_private_key(&key),
			"KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"
		);
	}

	#[test]
	fn test_wrongly_sized_wifs() {
		let too_large = "KwDidQJHSE67VJ6MWRvbBKAxhD3F48DvqRT6JRqrjd7MHLBjGF7VEQQqv5";
		let too_small = "KwDidQJHSE67VJ6MWRvbBKAxhD3F48DvqRT6JRqrjd7MHLBj";
		assert!(private_key_from_wif(too_large).is_err());
		assert!(private_key_from_wif(too_small).is_err());
	}

	#[test]
	fn test_wrong_first_byte_wif() {
		// Flipping the leading Base58 character corrupts the checksum.
		let wif = "LwDidQJHSE67VJ6MWRvbBKAxhD3F48DvqRT6JRqrjd7MHLBjGF7V";
		assert!(private_key_from_wif(wif).is_err());
	}
}
