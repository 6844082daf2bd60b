use base64::{engine::general_purpose, Engine};

use crate::crypto::CryptoError;

/// Hex encoding for byte containers.
pub trait ToHexString {
	fn to_hex_string(&self) -> String;
}

impl ToHexString for [u8] {
	fn to_hex_string(&self) -> String {
		hex::encode(self)
	}
}

impl ToHexString for Vec<u8> {
	fn to_hex_string(&self) -> String {
		hex::encode(self)
	}
}

impl<const N: usize> ToHexString for [u8; N] {
	fn to_hex_string(&self) -> String {
		hex::encode(self)
	}
}

/// Hex decoding for strings; tolerates a leading `0x`.
pub trait FromHexString {
	fn from_hex_string(&self) -> Result<Vec<u8>, hex::FromHexError>;
}

impl FromHexString for str {
	fn from_hex_string(&self) -> Result<Vec<u8>, hex::FromHexError> {
		hex::decode(self.trim_start_matches("0x"))
	}
}

impl FromHexString for String {
	fn from_hex_string(&self) -> Result<Vec<u8>, hex::FromHexError> {
		self.as_str().from_hex_string()
	}
}

/// Base64 (standard alphabet, padded) decoding for strings.
pub trait FromBase64String {
	fn from_base64_string(&self) -> Result<Vec<u8>, base64::DecodeError>;
}

impl FromBase64String for str {
	fn from_base64_string(&self) -> Result<Vec<u8>, base64::DecodeError> {
		general_purpose::STANDARD.decode(self)
	}
}

impl FromBase64String for String {
	fn from_base64_string(&self) -> Result<Vec<u8>, base64::DecodeError> {
		self.as_str().from_base64_string()
	}
}

/// Base64 (standard alphabet, padded) encoding for byte slices.
pub trait ToBase64String {
	fn to_base64_string(&self) -> String;
}

impl ToBase64String for [u8] {
	fn to_base64_string(&self) -> String {
		general_purpose::STANDARD.encode(self)
	}
}

impl ToBase64String for Vec<u8> {
	fn to_base64_string(&self) -> String {
		general_purpose::STANDARD.encode(self)
	}
}

pub trait ToArray32 {
	fn to_array32(&self) -> Result<[u8; 32], CryptoError>;
}

macro_rules! impl_to_array32 {
	($type:ty) => {
		impl ToArray32 for $type {
			fn to_array32(&self) -> Result<[u8; 32], CryptoError> {
				if self.len() != 32 {
					return Err(CryptoError::InvalidFormat(
						"Vector does not contain exactly 32 elements".to_string(),
					));
				}

				let mut array = [0u8; 32];
				array.copy_from_slice(&self[..32]);
				Ok(array)
			}
		}
	};
}

impl_to_array32!(Vec<u8>);
impl_to_array32!(&[u8]);
