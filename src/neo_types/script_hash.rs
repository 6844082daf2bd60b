use primitive_types::H160;

use crate::{
	crypto::HashableForVec,
	neo_config::DEFAULT_ADDRESS_VERSION,
	neo_types::TypeError,
};

/// The 160-bit identifier of a script or account. Stored big-endian (the
/// display/hex order); binary serialization and address encoding reverse
/// to little-endian.
pub type ScriptHash = H160;

/// Conversions between script hashes, hex strings, addresses, scripts and
/// public keys.
pub trait ScriptHashExtension
where
	Self: Sized,
{
	/// The zero-value hash.
	fn zero() -> Self;

	/// Builds a hash from exactly 20 big-endian bytes.
	fn from_slice(slice: &[u8]) -> Result<Self, TypeError>;

	/// Parses big-endian hex, with or without a `0x` prefix.
	fn from_hex(hex: &str) -> Result<Self, TypeError>;

	/// Decodes a Base58Check address, validating checksum and version.
	fn from_address(address: &str) -> Result<Self, TypeError>;

	/// Like [`ScriptHashExtension::from_address`] with a custom version
	/// byte.
	fn from_address_with_version(address: &str, version: u8) -> Result<Self, TypeError>;

	/// Encodes as a Base58Check address with the default version byte.
	fn to_address(&self) -> String;

	fn to_address_with_version(&self, version: u8) -> String;

	/// Lowercase big-endian hex without a prefix, as RPC methods expect.
	fn to_hex(&self) -> String;

	/// `0x`-prefixed big-endian hex, the display form.
	fn to_hex_prefixed(&self) -> String;

	/// The 20 big-endian bytes.
	fn to_vec(&self) -> Vec<u8>;

	/// The 20 bytes in little-endian (wire) order.
	fn to_le_vec(&self) -> Vec<u8>;

	/// Hashes a NeoVM script: `ripemd160(sha256(script))`, reversed into
	/// display order.
	fn from_script(script: &[u8]) -> Self;

	/// The script hash of the single-sig verification script for an
	/// encoded public key.
	fn from_public_key(public_key: &[u8]) -> Result<Self, TypeError>;
}

impl ScriptHashExtension for H160 {
	fn zero() -> Self {
		H160::zero()
	}

	fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
		if slice.len() != 20 {
			return Err(TypeError::InvalidFormat(format!(
				"Script hash must be 20 bytes, got {}",
				slice.len()
			)));
		}

		let mut arr = [0u8; 20];
		arr.copy_from_slice(slice);
		Ok(Self(arr))
	}

	fn from_hex(hex: &str) -> Result<Self, TypeError> {
		let stripped = hex.strip_prefix("0x").unwrap_or(hex);
		let bytes = hex::decode(stripped)
			.map_err(|e| TypeError::InvalidFormat(format!("Invalid hex: {e}")))?;
		<Self as ScriptHashExtension>::from_slice(&bytes)
	}

	fn from_address(address: &str) -> Result<Self, TypeError> {
		Self::from_address_with_version(address, DEFAULT_ADDRESS_VERSION)
	}

	fn from_address_with_version(address: &str, version: u8) -> Result<Self, TypeError> {
		let bytes = bs58::decode(address).into_vec().map_err(|_| TypeError::InvalidAddress)?;
		if bytes.len() != 25 {
			return Err(TypeError::InvalidAddress);
		}

		if bytes[0] != version {
			return Err(TypeError::InvalidAddress);
		}
		let payload = &bytes[..21];
		let checksum = &bytes[21..25];
		let expected = &payload.to_vec().hash256().hash256()[..4];
		if checksum != expected {
			return Err(TypeError::InvalidAddress);
		}

		let mut hash = [0u8; 20];
		hash.copy_from_slice(&payload[1..]);
		hash.reverse();
		Ok(Self(hash))
	}

	fn to_address(&self) -> String {
		self.to_address_with_version(DEFAULT_ADDRESS_VERSION)
	}

	fn to_address_with_version(&self, version: u8) -> String {
		let mut data = vec![version];
		data.extend(self.to_le_vec());
		let checksum = &data.hash256().hash256()[..4];
		data.extend_from_slice(checksum);
		bs58::encode(data).into_string()
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

	fn from_script(script: &[u8]) -> Self {
		let mut hash: [u8; 20] = script
			.sha256_ripemd160()
			.try_into()
			.expect("RIPEMD-160 digests are always 20 bytes");
		hash.reverse();
		Self(hash)
	}

	fn from_public_key(public_key: &[u8]) -> Result<Self, TypeError> {
		if public_key.len() != 33 {
			return Err(TypeError::InvalidFormat(
				"Compressed public keys are 33 bytes".to_string(),
			));
		}

		// PUSHDATA1 33 <key> SYSCALL System.Crypto.CheckSig
		let mut script = Vec::with_capacity(40);
		script.push(0x0C);
		script.push(0x21);
		script.extend_from_slice(public_key);
		script.push(0x41);
		let interop_hash = "System.Crypto.CheckSig".as_bytes().hash256();
		script.extend_from_slice(&interop_hash[..4]);

		Ok(Self::from_script(&script))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::neo_codec::{Encoder, NeoSerializable};

	#[test]
	fn test_from_valid_hex() {
		let hash = H160::from_hex("23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap();
		assert_eq!(hash.to_hex(), "23ba2703c53263e8d6e522dc32203339dcd8eee9");

		let prefixed = H160::from_hex("0x23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap();
		assert_eq!(prefixed, hash);
		assert_eq!(prefixed.to_hex_prefixed(), "0x23ba2703c53263e8d6e522dc32203339dcd8eee9");
	}

	#[test]
	fn test_creation_failures() {
		assert!(H160::from_hex("23ba2703c53263e8d6e522dc32203339dcd8eee").is_err());
		assert!(H160::from_hex("g3ba2703c53263e8d6e522dc32203339dcd8eee9").is_err());
		assert!(H160::from_hex("23ba2703c53263e8d6e522dc32203339dcd8ee").is_err());
		assert!(H160::from_hex(
			"c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b"
		)
		.is_err());
	}

	#[test]
	fn test_serialize_reverses_once() {
		let hex_str = "23ba2703c53263e8d6e522dc32203339dcd8eee9";
		let hash = H160::from_hex(hex_str).unwrap();

		let mut buffer = Encoder::new();
		hash.encode(&mut buffer);
		let mut expected = hex::decode(hex_str).unwrap();
		expected.reverse();
		assert_eq!(buffer.to_bytes(), expected);
		assert_eq!(hash.to_le_vec(), expected);
	}

	#[test]
	fn test_bytes_round_trip() {
		let hash = H160::from_hex("23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap();
		assert_eq!(
			<H160 as ScriptHashExtension>::from_slice(&ScriptHashExtension::to_vec(&hash))
				.unwrap(),
			hash
		);
	}

	#[test]
	fn test_from_script() {
		let hash1 = H160::from_script(&hex::decode("01a402d8").unwrap());
		let hash2 = H160::from_script(&hex::decode("d802a401").unwrap());
		assert_ne!(hash1, hash2);

		let script = hex::decode("01a402d8").unwrap();
		let mut expected = script.sha256_ripemd160();
		expected.reverse();
		assert_eq!(hash1.to_vec(), expected);
	}

	#[test]
	fn test_from_public_key() {
		let public_key =
			hex::decode("02028a99826edc0c97d18e22b6932373d908d323aa7f92656a77ec26e8861699ef")
				.unwrap();
		let hash = H160::from_public_key(&public_key).unwrap();
		assert_eq!(hash.to_hex(), "a7cbfee3f01f89d58c042644b0b6df2d59a6eb26");
	}

	#[test]
	fn test_address_round_trip() {
		let public_key =
			hex::decode("02028a99826edc0c97d18e22b6932373d908d323aa7f92656a77ec26e8861699ef")
				.unwrap();
		let hash = H160::from_public_key(&public_key).unwrap();

		let address = hash.to_address();
		assert_eq!(address, "NPTmAHDxo6Pkyic8Nvu3kwyXoYJCvcCB6i");
		assert_eq!(address.len(), 34);
		assert!(address.starts_with('N'));
		assert_eq!(H160::from_address(&address).unwrap(), hash);
	}

	#[test]
	fn test_zero_hash_address() {
		let address = <H160 as ScriptHashExtension>::zero().to_address();
		assert_eq!(address, "NKuyBkoGdZZSLyPbJEetheRhMjeznFZszf");
		assert_eq!(H160::from_address(&address).unwrap(), H160::zero());
	}

	#[test]
	fn test_from_invalid_address() {
		assert_eq!(
			H160::from_address("NLnyLtep7jwyq1qhNPkwXbJpurC4jUT8keas"),
			Err(TypeError::InvalidAddress)
		);
		assert_eq!(H160::from_address("not-an-address"), Err(TypeError::InvalidAddress));
	}

	#[test]
	fn test_wrong_version_byte_rejected() {
		let address = <H160 as ScriptHashExtension>::zero().to_address_with_version(0x17);
		assert!(H160::from_address(&address).is_err());
		assert!(H160::from_address_with_version(&address, 0x17).is_ok());
	}
}
