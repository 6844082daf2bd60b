use crate::codec::{CodecError, NeoSerializable};

/// A binary encoder that writes primitive values and serializable objects
/// into a growing byte vector, using the little-endian layouts Neo expects.
///
/// # Examples
///
/// ```
/// use neo3_core::neo_codec::Encoder;
///
/// let mut encoder = Encoder::new();
/// encoder.write_u8(0x12);
/// encoder.write_u32(0xDEADBEEF);
/// encoder.write_var_string("hello").unwrap();
/// let bytes = encoder.to_bytes();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Encoder {
	data: Vec<u8>,
}

impl Encoder {
	pub fn new() -> Self {
		Self { data: Vec::new() }
	}

	pub fn size(&self) -> usize {
		self.data.len()
	}

	pub fn write_bool(&mut self, value: bool) {
		self.write_u8(if value { 1 } else { 0 });
	}

	pub fn write_u8(&mut self, value: u8) {
		self.data.push(value);
	}

	pub fn write_u16(&mut self, v: u16) {
		self.data.extend_from_slice(&v.to_le_bytes());
	}

	pub fn write_u32(&mut self, v: u32) {
		self.data.extend_from_slice(&v.to_le_bytes());
	}

	pub fn write_u64(&mut self, v: u64) {
		self.data.extend_from_slice(&v.to_le_bytes());
	}

	pub fn write_i16(&mut self, v: i16) {
		self.write_u16(v as u16);
	}

	pub fn write_i32(&mut self, v: i32) {
		self.write_u32(v as u32);
	}

	pub fn write_i64(&mut self, v: i64) {
		self.data.extend_from_slice(&v.to_le_bytes());
	}

	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.data.extend_from_slice(bytes);
	}

	/// Writes a var-int in its canonical 1/3/5/9-byte form.
	pub fn write_var_int(&mut self, value: i64) -> Result<(), CodecError> {
		if value < 0 {
			return Err(CodecError::UnexpectedValue(format!(
				"Var-int value may not be negative: {value}"
			)));
		}

		let value = value as u64;
		if value < 0xFD {
			self.write_u8(value as u8);
		} else if value <= 0xFFFF {
			self.write_u8(0xFD);
			self.write_u16(value as u16);
		} else if value <= 0xFFFF_FFFF {
			self.write_u8(0xFE);
			self.write_u32(value as u32);
		} else {
			self.write_u8(0xFF);
			self.write_u64(value);
		}
		Ok(())
	}

	pub fn write_var_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
		self.write_var_int(bytes.len() as i64)?;
		self.write_bytes(bytes);
		Ok(())
	}

	pub fn write_var_string(&mut self, v: &str) -> Result<(), CodecError> {
		self.write_var_bytes(v.as_bytes())
	}

	pub fn write_serializable_fixed<S: NeoSerializable>(&mut self, value: &S) {
		value.encode(self);
	}

	pub fn write_serializable_list_fixed<S: NeoSerializable>(&mut self, values: &[S]) {
		values.iter().for_each(|v| v.encode(self));
	}

	/// Writes a var-int element count followed by each element's fixed
	/// serialization.
	pub fn write_serializable_variable_list<S: NeoSerializable>(
		&mut self,
		values: &[S],
	) -> Result<(), CodecError> {
		self.write_var_int(values.len() as i64)?;
		self.write_serializable_list_fixed(values);
		Ok(())
	}

	pub fn reset(&mut self) {
		self.data.clear();
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}
}

#[cfg(test)]
mod tests {
	use crate::codec::Encoder;

	#[test]
	fn test_write_u32() {
		let mut writer = Encoder::new();

		writer.write_u32(u32::MAX);
		assert_eq!(writer.to_bytes(), vec![0xff; 4]);

		writer.reset();
		writer.write_u32(0);
		assert_eq!(writer.to_bytes(), vec![0; 4]);

		writer.reset();
		writer.write_u32(12345);
		assert_eq!(writer.to_bytes(), vec![0x39, 0x30, 0, 0]);
	}

	#[test]
	fn test_write_i64() {
		let mut writer = Encoder::new();

		writer.write_i64(0x1234_5678_9012_3456_i64);
		assert_eq!(writer.to_bytes(), [0x56, 0x34, 0x12, 0x90, 0x78, 0x56, 0x34, 0x12]);

		writer.reset();
		writer.write_i64(i64::MAX);
		assert_eq!(writer.to_bytes(), [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]);

		writer.reset();
		writer.write_i64(i64::MIN);
		assert_eq!(writer.to_bytes(), [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]);

		writer.reset();
		writer.write_i64(1_234_567_890);
		assert_eq!(writer.to_bytes(), vec![0xd2, 0x02, 0x96, 0x49, 0, 0, 0, 0]);
	}

	#[test]
	fn test_write_var_int() {
		let mut writer = Encoder::new();

		writer.write_var_int(0).unwrap();
		assert_eq!(writer.to_bytes(), vec![0]);

		writer.reset();
		writer.write_var_int(252).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xfc]);

		writer.reset();
		writer.write_var_int(253).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xfd, 0xfd, 0]);

		writer.reset();
		writer.write_var_int(65_534).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xfd, 0xfe, 0xff]);

		writer.reset();
		writer.write_var_int(65_536).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xfe, 0, 0, 1, 0]);

		writer.reset();
		writer.write_var_int(4_294_967_295).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xfe, 0xff, 0xff, 0xff, 0xff]);

		writer.reset();
		writer.write_var_int(4_294_967_296).unwrap();
		assert_eq!(writer.to_bytes(), vec![0xff, 0, 0, 0, 0, 1, 0, 0, 0]);

		writer.reset();
		assert!(writer.write_var_int(-1).is_err());
	}

	#[test]
	fn test_write_var_bytes() {
		let mut writer = Encoder::new();

		let bytes = hex::decode("010203").unwrap();
		writer.write_var_bytes(&bytes).unwrap();
		assert_eq!(writer.to_bytes(), hex::decode("03010203").unwrap());
	}

	#[test]
	fn test_write_var_string() {
		let mut writer = Encoder::new();

		writer.write_var_string("hello, world!").unwrap();
		assert_eq!(writer.to_bytes(), hex::decode("0d68656c6c6f2c20776f726c6421").unwrap());
	}
}
