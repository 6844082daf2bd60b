use primitive_types::{H160, H256};

use crate::codec::{CodecError, Decoder, Encoder};

/// Structures that serialize to and from the Neo wire format.
///
/// `encode` must emit exactly `size()` bytes; `decode` is its inverse.
pub trait NeoSerializable {
	type Error: std::error::Error + From<CodecError>;

	fn size(&self) -> usize;

	fn encode(&self, writer: &mut Encoder);

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error>
	where
		Self: Sized;

	fn to_array(&self) -> Vec<u8> {
		let mut writer = Encoder::new();
		self.encode(&mut writer);
		writer.into_bytes()
	}

	fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>
	where
		Self: Sized,
	{
		let mut reader = Decoder::new(bytes);
		Self::decode(&mut reader)
	}
}

/// Number of bytes the var-int prefix for `value` occupies.
pub fn var_size(value: u64) -> usize {
	if value < 0xFD {
		1
	} else if value <= 0xFFFF {
		3
	} else if value <= 0xFFFF_FFFF {
		5
	} else {
		9
	}
}

/// Serialized size of a value including its var-int length prefix.
pub trait VarSizeTrait {
	fn var_size(&self) -> usize;
}

impl<T: NeoSerializable> VarSizeTrait for Vec<T> {
	fn var_size(&self) -> usize {
		var_size(self.len() as u64) + self.iter().map(|item| item.size()).sum::<usize>()
	}
}

impl<T: NeoSerializable> VarSizeTrait for [T] {
	fn var_size(&self) -> usize {
		var_size(self.len() as u64) + self.iter().map(|item| item.size()).sum::<usize>()
	}
}

impl VarSizeTrait for Vec<u8> {
	fn var_size(&self) -> usize {
		var_size(self.len() as u64) + self.len()
	}
}

impl VarSizeTrait for [u8] {
	fn var_size(&self) -> usize {
		var_size(self.len() as u64) + self.len()
	}
}

impl VarSizeTrait for String {
	fn var_size(&self) -> usize {
		var_size(self.len() as u64) + self.len()
	}
}

// Hashes travel in little-endian byte order on the wire, the reverse of
// their big-endian in-memory and display form.

impl NeoSerializable for H160 {
	type Error = CodecError;

	fn size(&self) -> usize {
		20
	}

	fn encode(&self, writer: &mut Encoder) {
		let mut bytes = self.0;
		bytes.reverse();
		writer.write_bytes(&bytes);
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let mut bytes: [u8; 20] =
			reader.read_bytes(20)?.try_into().map_err(|_| CodecError::InvalidFormat)?;
		bytes.reverse();
		Ok(H160(bytes))
	}
}

impl NeoSerializable for H256 {
	type Error = CodecError;

	fn size(&self) -> usize {
		32
	}

	fn encode(&self, writer: &mut Encoder) {
		let mut bytes = self.0;
		bytes.reverse();
		writer.write_bytes(&bytes);
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let mut bytes: [u8; 32] =
			reader.read_bytes(32)?.try_into().map_err(|_| CodecError::InvalidFormat)?;
		bytes.reverse();
		Ok(H256(bytes))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_var_size() {
		assert_eq!(var_size(0), 1);
		assert_eq!(var_size(0xFC), 1);
		assert_eq!(var_size(0xFD), 3);
		assert_eq!(var_size(0xFFFF), 3);
		assert_eq!(var_size(0x10000), 5);
		assert_eq!(var_size(0xFFFF_FFFF), 5);
		assert_eq!(var_size(0x1_0000_0000), 9);
	}

	#[test]
	fn test_h160_round_trip_reverses_once() {
		let hash = H160::from_slice(&hex::decode("23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap());
		let encoded = hash.to_array();
		assert_eq!(encoded, hex::decode("e9eed8dc39332032dc22e5d6e86332c50327ba23").unwrap());
		assert_eq!(H160::from_bytes(&encoded).unwrap(), hash);
	}

	#[test]
	fn test_h256_round_trip() {
		let hash = H256::from_slice(
			&hex::decode("b386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9")
				.unwrap(),
		);
		assert_eq!(H256::from_bytes(&hash.to_array()).unwrap(), hash);
	}
}
