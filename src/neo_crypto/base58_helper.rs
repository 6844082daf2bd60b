use crate::crypto::hash::HashableForVec;

/// Encodes a byte slice as Base58Check: the payload followed by the first
/// four bytes of its double SHA-256, Base58 over the whole.
pub fn base58check_encode(bytes: &[u8]) -> String {
	if bytes.is_empty() {
		return String::new();
	}

	let checksum = &bytes.to_vec().hash256().hash256()[..4];
	let mut payload = bytes.to_vec();
	payload.extend_from_slice(checksum);
	bs58::encode(payload).into_string()
}

/// Decodes a Base58Check string, verifying and stripping the checksum.
/// Returns `None` for invalid Base58 or a checksum mismatch.
pub fn base58check_decode(input: &str) -> Option<Vec<u8>> {
	let decoded = bs58::decode(input).into_vec().ok()?;
	if decoded.len() < 4 {
		return None;
	}

	let (payload, checksum) = decoded.split_at(decoded.len() - 4);
	let expected = &payload.to_vec().hash256().hash256()[..4];
	if checksum != expected {
		return None;
	}

	Some(payload.to_vec())
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID_PAIRS: &[(&str, &str)] = &[
		("", ""),
		("61", "2g"),
		("626262", "a3gV"),
		("636363", "aPEr"),
		("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
		("516b6fcd0f", "ABnLTmg"),
		("bf4f89001e670274dd", "3SEo3LWLoPntC"),
		("572e4794", "3EFU7m"),
		("ecac89cad93923c02321", "EJDM8drfXA6uyA"),
		("10c8511e", "Rt5zm"),
	];

	#[test]
	fn test_base58_encode_decode() {
		for (hex_input, expected) in VALID_PAIRS {
			let bytes = hex::decode(hex_input).unwrap();
			assert_eq!(&bs58::encode(&bytes).into_string(), expected);
			assert_eq!(&bs58::decode(expected).into_vec().unwrap(), &bytes);
		}
	}

	#[test]
	fn test_base58check_round_trip() {
		let data = hex::decode("0123456789abcdef").unwrap();
		let encoded = base58check_encode(&data);
		assert_eq!(base58check_decode(&encoded), Some(data));
	}

	#[test]
	fn test_base58check_rejects_bad_checksum() {
		let encoded = base58check_encode(&[1, 2, 3]);
		let mut tampered = encoded.clone();
		// Flip the last character to break the checksum.
		let last = tampered.pop().unwrap();
		tampered.push(if last == '1' { '2' } else { '1' });
		assert_eq!(base58check_decode(&tampered), None);
	}

	#[test]
	fn test_base58check_rejects_garbage() {
		assert_eq!(base58check_decode("0oO1lL"), None);
		assert_eq!(base58check_decode("x"), None);
	}
}
