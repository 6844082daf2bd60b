use num_bigint::BigInt;

use crate::codec::{CodecError, NeoSerializable};

/// A binary decoder reading the Neo wire format from a byte slice.
///
/// Every read is bounds-checked: running past the end of the input yields
/// [`CodecError::Truncated`], a var-int length exceeding the remaining
/// input yields [`CodecError::MalformedLength`].
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
	data: &'a [u8],
	pointer: usize,
	marker: usize,
}

impl<'a> Decoder<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pointer: 0, marker: 0 }
	}

	pub fn pointer(&self) -> usize {
		self.pointer
	}

	pub fn available(&self) -> usize {
		self.data.len() - self.pointer
	}

	pub fn read_bool(&mut self) -> Result<bool, CodecError> {
		Ok(self.read_u8()? == 1)
	}

	pub fn read_u8(&mut self) -> Result<u8, CodecError> {
		if self.pointer >= self.data.len() {
			return Err(CodecError::Truncated { needed: 1 });
		}
		let val = self.data[self.pointer];
		self.pointer += 1;
		Ok(val)
	}

	pub fn read_u16(&mut self) -> Result<u16, CodecError> {
		let bytes: [u8; 2] = self.read_array()?;
		Ok(u16::from_le_bytes(bytes))
	}

	pub fn read_i16(&mut self) -> Result<i16, CodecError> {
		let bytes: [u8; 2] = self.read_array()?;
		Ok(i16::from_le_bytes(bytes))
	}

	pub fn read_u32(&mut self) -> Result<u32, CodecError> {
		let bytes: [u8; 4] = self.read_array()?;
		Ok(u32::from_le_bytes(bytes))
	}

	pub fn read_i32(&mut self) -> Result<i32, CodecError> {
		let bytes: [u8; 4] = self.read_array()?;
		Ok(i32::from_le_bytes(bytes))
	}

	pub fn read_u64(&mut self) -> Result<u64, CodecError> {
		let bytes: [u8; 8] = self.read_array()?;
		Ok(u64::from_le_bytes(bytes))
	}

	pub fn read_i64(&mut self) -> Result<i64, CodecError> {
		let bytes: [u8; 8] = self.read_array()?;
		Ok(i64::from_le_bytes(bytes))
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
		if self.available() < N {
			return Err(CodecError::Truncated { needed: N - self.available() });
		}
		let mut out = [0u8; N];
		out.copy_from_slice(&self.data[self.pointer..self.pointer + N]);
		self.pointer += N;
		Ok(out)
	}

	pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, CodecError> {
		if self.available() < length {
			return Err(CodecError::Truncated { needed: length - self.available() });
		}
		let result = self.data[self.pointer..self.pointer + length].to_vec();
		self.pointer += length;
		Ok(result)
	}

	/// Reads a var-int. Rejects lengths announcing more bytes than remain
	/// in the buffer so malformed prefixes fail before any allocation.
	pub fn read_var_int(&mut self) -> Result<u64, CodecError> {
		let first = self.read_u8()?;
		match first {
			0xFD => self.read_u16().map(u64::from),
			0xFE => self.read_u32().map(u64::from),
			0xFF => self.read_u64(),
			_ => Ok(first as u64),
		}
	}

	pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		let len = self.read_var_int()?;
		if len > self.available() as u64 {
			return Err(CodecError::MalformedLength(format!(
				"var-int announces {len} bytes but only {} remain",
				self.available()
			)));
		}
		self.read_bytes(len as usize)
	}

	pub fn read_var_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_var_bytes()?;
		String::from_utf8(bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
	}

	/// Reads a compressed EC point (tag 0x02 or 0x03 followed by the
	/// 32-byte x coordinate), returning all 33 bytes.
	pub fn read_encoded_ec_point(&mut self) -> Result<Vec<u8>, CodecError> {
		let tag = self.read_u8()?;
		match tag {
			0x02 | 0x03 => {
				let mut point = vec![tag];
				point.extend(self.read_bytes(32)?);
				Ok(point)
			},
			_ => Err(CodecError::InvalidEncoding("Invalid encoded EC point".to_string())),
		}
	}

	/// Reads a PUSHDATA-prefixed byte string from a NeoVM script.
	pub fn read_push_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		use crate::neo_types::OpCode;
		let opcode = self.read_u8()?;
		let len = match OpCode::try_from(opcode).map_err(|_| CodecError::InvalidOpCode)? {
			OpCode::PushData1 => self.read_u8()? as usize,
			OpCode::PushData2 => self.read_u16()? as usize,
			OpCode::PushData4 => self.read_u32()? as usize,
			_ => return Err(CodecError::InvalidOpCode),
		};
		self.read_bytes(len)
	}

	/// Reads a PUSHINT-or-constant integer from a NeoVM script.
	pub fn read_push_int(&mut self) -> Result<BigInt, CodecError> {
		use crate::neo_types::OpCode;
		let byte = self.read_u8()?;

		if (OpCode::PushM1 as u8..=OpCode::Push16 as u8).contains(&byte) {
			return Ok(BigInt::from(byte as i16 - OpCode::Push0 as i16));
		}

		let count = match OpCode::try_from(byte).map_err(|_| CodecError::InvalidOpCode)? {
			OpCode::PushInt8 => 1,
			OpCode::PushInt16 => 2,
			OpCode::PushInt32 => 4,
			OpCode::PushInt64 => 8,
			OpCode::PushInt128 => 16,
			OpCode::PushInt256 => 32,
			_ =>
				return Err(CodecError::InvalidEncoding(
					"Couldn't parse PUSHINT op code".to_string(),
				)),
		};

		let bytes = self.read_bytes(count)?;
		Ok(BigInt::from_signed_bytes_le(&bytes))
	}

	pub fn read_push_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_push_bytes()?;
		String::from_utf8(bytes)
			.map_err(|_| CodecError::InvalidEncoding("Invalid UTF-8".to_string()))
	}

	pub fn read_serializable<T: NeoSerializable>(&mut self) -> Result<T, CodecError> {
		T::decode(self).map_err(|_| CodecError::InvalidFormat)
	}

	/// Reads a var-int element count followed by that many fixed-layout
	/// elements.
	pub fn read_serializable_list<T: NeoSerializable>(&mut self) -> Result<Vec<T>, CodecError> {
		let len = self.read_var_int()?;
		if len > self.available() as u64 {
			return Err(CodecError::MalformedLength(format!(
				"var-int announces {len} elements but only {} bytes remain",
				self.available()
			)));
		}
		let mut list = Vec::with_capacity(len as usize);
		for _ in 0..len {
			list.push(T::decode(self).map_err(|_| CodecError::InvalidFormat)?);
		}
		Ok(list)
	}

	pub fn mark(&mut self) {
		self.marker = self.pointer;
	}

	pub fn reset(&mut self) {
		self.pointer = self.marker;
	}
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;

	use crate::codec::{CodecError, Decoder};

	#[test]
	fn test_read_push_data_bytes() {
		let prefix_count_map = [
			(hex::decode("0c01").unwrap(), 1),
			(hex::decode("0cff").unwrap(), 255),
			(hex::decode("0d0001").unwrap(), 256),
			(hex::decode("0d0010").unwrap(), 4096),
			(hex::decode("0e00000100").unwrap(), 65536),
		];

		for (prefix, count) in prefix_count_map {
			let bytes = vec![1u8; count];
			let data = [prefix.as_slice(), bytes.as_slice()].concat();
			assert_eq!(Decoder::new(&data).read_push_bytes().unwrap(), bytes);
		}
	}

	#[test]
	fn test_fail_read_push_data() {
		let data = hex::decode("4b010000").unwrap();
		let err = Decoder::new(&data).read_push_bytes().unwrap_err();
		assert_eq!(err, CodecError::InvalidOpCode);
	}

	#[test]
	fn test_read_push_data_string() {
		let empty = hex::decode("0c00").unwrap();
		assert_eq!(Decoder::new(&empty).read_push_string().unwrap(), "");

		let a = hex::decode("0c0161").unwrap();
		assert_eq!(Decoder::new(&a).read_push_string().unwrap(), "a");
	}

	#[test]
	fn test_read_push_int() {
		let zero = hex::decode("10").unwrap();
		assert_eq!(Decoder::new(&zero).read_push_int().unwrap(), BigInt::from(0));

		let one = hex::decode("11").unwrap();
		assert_eq!(Decoder::new(&one).read_push_int().unwrap(), BigInt::from(1));

		let minus_one = hex::decode("0f").unwrap();
		assert_eq!(Decoder::new(&minus_one).read_push_int().unwrap(), BigInt::from(-1));

		let sixteen = hex::decode("20").unwrap();
		assert_eq!(Decoder::new(&sixteen).read_push_int().unwrap(), BigInt::from(16));

		let two_fifty_five = hex::decode("00ff").unwrap();
		assert_eq!(Decoder::new(&two_fifty_five).read_push_int().unwrap(), BigInt::from(-1));

		let int16 = hex::decode("01ff00").unwrap();
		assert_eq!(Decoder::new(&int16).read_push_int().unwrap(), BigInt::from(255));
	}

	#[test]
	fn test_read_u32() {
		let max = [0xffu8; 4];
		assert_eq!(Decoder::new(&max).read_u32().unwrap(), 4_294_967_295);

		let one = hex::decode("01000000").unwrap();
		assert_eq!(Decoder::new(&one).read_u32().unwrap(), 1);

		let custom = hex::decode("8cae0000ff").unwrap();
		assert_eq!(Decoder::new(&custom).read_u32().unwrap(), 44_684);
	}

	#[test]
	fn test_read_i64() {
		let min = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
		assert_eq!(Decoder::new(&min).read_i64().unwrap(), i64::MIN);

		let max = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
		assert_eq!(Decoder::new(&max).read_i64().unwrap(), i64::MAX);
	}

	#[test]
	fn test_truncated_reads() {
		let mut reader = Decoder::new(&[0x01]);
		assert!(matches!(reader.read_u32(), Err(CodecError::Truncated { .. })));

		// var-int length larger than remaining input
		let data = [0xFDu8, 0xFF, 0xFF, 0x00];
		let mut reader = Decoder::new(&data);
		assert!(matches!(reader.read_var_bytes(), Err(CodecError::MalformedLength(_))));
	}
}
