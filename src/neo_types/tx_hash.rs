use primitive_types::H256;

use crate::neo_types::TypeError;

/// A 256-bit transaction or block hash. Stored big-endian (display order);
/// binary serialization reverses to little-endian.
pub type TxHash = H256;

/// Conversions for 256-bit hashes mirroring [`crate::neo_types::ScriptHashExtension`].
pub trait HashExtension
where
	Self: Sized,
{
	fn zero() -> Self;

	fn from_slice(slice: &[u8]) -> Result<Self, TypeError>;

	/// Parses big-endian hex, with or without a `0x` prefix.
	fn from_hex(hex: &str) -> Result<Self, TypeError>;

	/// Lowercase big-endian hex without a prefix.
	fn to_hex(&self) -> String;

	/// `0x`-prefixed big-endian hex, the display form.
	fn to_hex_prefixed(&self) -> String;

	fn to_vec(&self) -> Vec<u8>;

	fn to_le_vec(&self) -> Vec<u8>;
}

impl HashExtension for H256 {
	fn zero() -> Self {
		H256::zero()
	}

	fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
		if slice.len() != 32 {
			return Err(TypeError::InvalidFormat(format!(
				"Hash must be 32 bytes, got {}",
				slice.len()
			)));
		}
		let mut arr = [0u8; 32];
		arr.copy_from_slice(slice);
		Ok(Self(arr))
	}

	fn from_hex(hex: &str) -> Result<Self, TypeError> {
		let stripped = hex.strip_prefix("0x").unwrap_or(hex);
		let bytes = hex::decode(stripped)
			.map_err(|e| TypeError::InvalidFormat(format!("Invalid hex: {e}")))?;
		<Self as HashExtension>::from_slice(&bytes)
	}

	fn to_hex(&self) -> String {
		hex::encode(self.0)
	}

	fn to_hex_prefixed(&self) -> String {
		format!("0x{}", hex::encode(self.0))
	}

	fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	fn to_le_vec(&self) -> Vec<u8> {
		let mut bytes = self.0.to_vec();
		bytes.reverse();
		bytes
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_round_trip() {
		let hex_str = "b386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9";
		let hash = H256::from_hex(hex_str).unwrap();
		assert_eq!(HashExtension::to_hex(&hash), hex_str);
		assert_eq!(H256::from_hex(&format!("0x{hex_str}")).unwrap(), hash);
	}

	#[test]
	fn test_le_vec_reverses() {
		let hash =
			H256::from_hex("b386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9")
				.unwrap();
		let mut le = HashExtension::to_le_vec(&hash);
		le.reverse();
		assert_eq!(le, HashExtension::to_vec(&hash));
	}

	#[test]
	fn test_wrong_length_rejected() {
		assert!(H256::from_hex("abcd").is_err());
	}
}
