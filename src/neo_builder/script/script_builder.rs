use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use primitive_types::H160;

use crate::{
	builder::{BuilderError, CallFlags, InteropService},
	codec::Encoder,
	crypto::Secp256r1PublicKey,
	neo_config::NeoConstants,
	neo_types::{Bytes, ContractParameter, ContractParameterType, OpCode, ParameterValue,
		ScriptHashExtension},
};

/// A builder for NeoVM scripts.
///
/// The `ScriptBuilder` emits op codes, pushes data and integers in their
/// minimal encodings, and composes the invocation, verification and
/// iterator-unwrap scripts the SDK needs.
///
/// # Examples
///
/// ```rust
/// use neo3_core::neo_builder::ScriptBuilder;
/// use num_bigint::BigInt;
///
/// let mut builder = ScriptBuilder::new();
/// builder.push_integer(BigInt::from(42)).unwrap()
///        .push_data("Hello, Neo!".as_bytes().to_vec());
/// let script = builder.to_bytes();
/// ```
#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct ScriptBuilder {
	script: Encoder,
}

impl ScriptBuilder {
	pub fn new() -> Self {
		Self { script: Encoder::new() }
	}

	/// Appends op codes without operands.
	pub fn op_code(&mut self, op_codes: &[OpCode]) -> &mut Self {
		for opcode in op_codes {
			self.script.write_u8(opcode.opcode());
		}
		self
	}

	/// Appends an op code followed by its operand bytes.
	pub fn op_code_with_arg(&mut self, opcode: OpCode, argument: Bytes) -> &mut Self {
		self.script.write_u8(opcode.opcode());
		self.script.write_bytes(&argument);
		self
	}

	/// Appends a `System.Contract.Call` invocation: the parameter array,
	/// call flags, method name and the contract hash in little-endian
	/// order, then the syscall.
	pub fn contract_call(
		&mut self,
		hash160: &H160,
		method: &str,
		params: &[ContractParameter],
		call_flags: Option<CallFlags>,
	) -> Result<&mut Self, BuilderError> {
		if method.is_empty() {
			return Err(BuilderError::IllegalArgument(
				"The invoked method must not be empty".to_string(),
			));
		}

		self.push_array(params)?
			.push_integer(BigInt::from(call_flags.unwrap_or(CallFlags::All).value()))?
			.push_data(method.as_bytes().to_vec())
			.push_data(hash160.to_le_vec());
		Ok(self.sys_call(InteropService::SystemContractCall))
	}

	/// Appends a `SYSCALL` for the given interop service.
	pub fn sys_call(&mut self, operation: InteropService) -> &mut Self {
		self.op_code_with_arg(OpCode::Syscall, operation.descriptor().to_vec())
	}

	/// Pushes a single parameter in its NeoVM encoding.
	pub fn push_param(&mut self, param: &ContractParameter) -> Result<&mut Self, BuilderError> {
		if param.get_type() == ContractParameterType::Any
			|| param.get_type() == ContractParameterType::Void
		{
			self.op_code(&[OpCode::PushNull]);
			return Ok(self);
		}

		match param.value.as_ref().ok_or_else(|| {
			BuilderError::IllegalArgument("Parameter value is None".to_string())
		})? {
			ParameterValue::Boolean(b) => self.push_bool(*b),
			ParameterValue::Integer(i) => self.push_integer(i.clone())?,
			ParameterValue::ByteArray(b) | ParameterValue::Signature(b) |
			ParameterValue::PublicKey(b) => self.push_data(b.clone()),
			ParameterValue::H160(h) => self.push_data(h.to_le_vec()),
			ParameterValue::H256(h) => {
				let mut bytes = h.as_bytes().to_vec();
				bytes.reverse();
				self.push_data(bytes)
			},
			ParameterValue::String(s) => self.push_data(s.as_bytes().to_vec()),
			ParameterValue::Array(arr) => self.push_array(arr)?,
			ParameterValue::Map(map) => self.push_map(map.0.as_slice())?,
		};

		Ok(self)
	}

	/// Pushes an integer in its minimal encoding: the single-byte
	/// constants for -1..=16, otherwise the smallest `PUSHINT*` whose
	/// two's-complement little-endian form fits. Values beyond 32 bytes
	/// are rejected.
	pub fn push_integer(&mut self, i: BigInt) -> Result<&mut Self, BuilderError> {
		if i >= BigInt::from(-1) && i <= BigInt::from(16) {
			let n = i.to_i32().expect("value fits i32 inside -1..=16");
			self.script.write_u8((OpCode::Push0 as i32 + n) as u8);
			return Ok(self);
		}

		let negative = i.sign() == Sign::Minus;
		let bytes = i.to_signed_bytes_le();
		match bytes.len() {
			1 => self.push_opcode_bytes(OpCode::PushInt8, bytes),
			2 => self.push_opcode_bytes(OpCode::PushInt16, bytes),
			len if len <= 4 =>
				self.push_opcode_bytes(OpCode::PushInt32, Self::pad_right(&bytes, 4, negative)),
			len if len <= 8 =>
				self.push_opcode_bytes(OpCode::PushInt64, Self::pad_right(&bytes, 8, negative)),
			len if len <= 16 =>
				self.push_opcode_bytes(OpCode::PushInt128, Self::pad_right(&bytes, 16, negative)),
			len if len <= 32 =>
				self.push_opcode_bytes(OpCode::PushInt256, Self::pad_right(&bytes, 32, negative)),
			_ =>
				return Err(BuilderError::IllegalArgument(
					"NeoVM integers are at most 256 bits wide".to_string(),
				)),
		};
		Ok(self)
	}

	/// Appends an op code and raw operand bytes.
	pub fn push_opcode_bytes(&mut self, opcode: OpCode, argument: Vec<u8>) -> &mut ScriptBuilder {
		self.script.write_u8(opcode.opcode());
		self.script.write_bytes(&argument);
		self
	}

	fn pad_right(bytes: &[u8], size: usize, negative: bool) -> Vec<u8> {
		let mut padded = bytes.to_vec();
		padded.resize(size, if negative { 0xFF } else { 0x00 });
		padded
	}

	/// Pushes data behind the smallest `PUSHDATA*` prefix that fits.
	pub fn push_data(&mut self, data: Vec<u8>) -> &mut Self {
		match data.len() {
			0..=0xFF => {
				self.op_code(&[OpCode::PushData1]);
				self.script.write_u8(data.len() as u8);
			},
			0x100..=0xFFFF => {
				self.op_code(&[OpCode::PushData2]);
				self.script.write_u16(data.len() as u16);
			},
			_ => {
				self.op_code(&[OpCode::PushData4]);
				self.script.write_u32(data.len() as u32);
			},
		}
		self.script.write_bytes(&data);
		self
	}

	/// NeoVM booleans are the integer constants 0 and 1.
	pub fn push_bool(&mut self, b: bool) -> &mut Self {
		self.op_code(&[if b { OpCode::Push1 } else { OpCode::Push0 }])
	}

	/// Pushes the elements in reverse order, then the count, then `PACK`.
	pub fn push_array(&mut self, arr: &[ContractParameter]) -> Result<&mut Self, BuilderError> {
		if arr.is_empty() {
			self.op_code(&[OpCode::NewArray0]);
			return Ok(self);
		}
		for param in arr.iter().rev() {
			self.push_param(param)?;
		}
		Ok(self.push_integer(BigInt::from(arr.len()))?.op_code(&[OpCode::Pack]))
	}

	/// Pushes value then key for each entry, then the count, then
	/// `PACKMAP`.
	pub fn push_map(
		&mut self,
		map: &[(ContractParameter, ContractParameter)],
	) -> Result<&mut Self, BuilderError> {
		for (key, value) in map {
			self.push_param(value)?;
			self.push_param(key)?;
		}
		Ok(self.push_integer(BigInt::from(map.len()))?.op_code(&[OpCode::PackMap]))
	}

	pub fn pack(&mut self) -> &mut Self {
		self.op_code(&[OpCode::Pack])
	}

	pub fn to_bytes(&self) -> Bytes {
		self.script.to_bytes()
	}

	/// The current script length, used for computing jump offsets.
	pub fn len(&self) -> usize {
		self.script.size()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The single-sig verification script for a public key:
	/// `PUSHDATA1 33 <key> SYSCALL System.Crypto.CheckSig`.
	pub fn build_verification_script(pub_key: &Secp256r1PublicKey) -> Bytes {
		let mut sb = ScriptBuilder::new();
		sb.push_data(pub_key.get_encoded(true)).sys_call(InteropService::SystemCryptoCheckSig);
		sb.to_bytes()
	}

	/// The m-of-n multi-sig verification script. Keys are sorted by their
	/// compressed encoding, a protocol requirement; duplicates are
	/// rejected.
	pub fn build_multi_sig_script(
		pubkeys: &[Secp256r1PublicKey],
		threshold: u32,
	) -> Result<Bytes, BuilderError> {
		let n = pubkeys.len() as u32;
		if threshold < 1 || threshold > n {
			return Err(BuilderError::IllegalArgument(format!(
				"Signing threshold must be in 1..={n}, got {threshold}"
			)));
		}
		if n > NeoConstants::MAX_PUBLIC_KEYS_PER_MULTI_SIG_ACCOUNT {
			return Err(BuilderError::IllegalArgument(format!(
				"At most {} public keys per multi-sig account",
				NeoConstants::MAX_PUBLIC_KEYS_PER_MULTI_SIG_ACCOUNT
			)));
		}

		let mut sorted = pubkeys.to_vec();
		sorted.sort();
		if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
			return Err(BuilderError::IllegalArgument(
				"Duplicate public keys in multi-sig script".to_string(),
			));
		}

		let mut sb = ScriptBuilder::new();
		sb.push_integer(BigInt::from(threshold))?;
		for pk in &sorted {
			sb.push_data(pk.get_encoded(true));
		}
		sb.push_integer(BigInt::from(n))?;
		sb.sys_call(InteropService::SystemCryptoCheckMultiSig);
		Ok(sb.to_bytes())
	}

	/// The deployment-time script a contract hash is derived from:
	/// `ABORT <sender LE> <NEF checksum> <name>`. Only ever fed to
	/// `H160::from_script`.
	pub fn build_contract_script(
		sender: &H160,
		nef_checksum: u32,
		name: &str,
	) -> Result<Bytes, BuilderError> {
		let mut sb = ScriptBuilder::new();
		sb.op_code(&[OpCode::Abort]).push_data(sender.to_le_vec());
		sb.push_integer(BigInt::from(nef_checksum))?;
		sb.push_data(name.as_bytes().to_vec());
		Ok(sb.to_bytes())
	}

	/// Calls a contract method returning an iterator and unwraps up to
	/// `max_items` values into an array on the VM, for nodes with
	/// sessions disabled.
	pub fn build_contract_call_and_unwrap_iterator(
		contract_hash: &H160,
		method: &str,
		params: &[ContractParameter],
		max_items: u32,
		call_flags: Option<CallFlags>,
	) -> Result<Bytes, BuilderError> {
		let mut sb = Self::new();
		sb.push_integer(BigInt::from(max_items))?;

		sb.contract_call(contract_hash, method, params, call_flags)?;
		sb.op_code(&[OpCode::NewArray0]);

		// Stack: [max_items, iterator, array]
		let cycle_start = sb.len();
		sb.op_code(&[OpCode::Over]);
		sb.sys_call(InteropService::SystemIteratorNext);

		let jmp_if_not = sb.len();
		sb.op_code_with_arg(OpCode::JmpIfNot, vec![0]);

		sb.op_code(&[OpCode::Dup, OpCode::Push2, OpCode::Pick])
			.sys_call(InteropService::SystemIteratorValue)
			.op_code(&[
				OpCode::Append,
				OpCode::Dup,
				OpCode::Size,
				OpCode::Push3,
				OpCode::Pick,
				OpCode::Ge,
			]);

		let jmp_if_max = sb.len();
		sb.op_code_with_arg(OpCode::JmpIf, vec![0]);

		let jmp_offset = sb.len();
		let jmp_bytes = (cycle_start as i32 - jmp_offset as i32) as i8;
		sb.op_code_with_arg(OpCode::Jmp, vec![jmp_bytes as u8]);

		let load_result = sb.len();
		sb.op_code(&[OpCode::Nip, OpCode::Nip]);

		// Patch the forward jumps now that the exit offset is known.
		let mut script = sb.to_bytes();
		script[jmp_if_not + 1] = (load_result - jmp_if_not) as i8 as u8;
		script[jmp_if_max + 1] = (load_result - jmp_if_max) as i8 as u8;

		Ok(script)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_builder(builder: &ScriptBuilder, expected: &[u8]) {
		assert_eq!(builder.to_bytes(), expected);
	}

	#[test]
	fn test_push_empty_array() {
		let mut builder = ScriptBuilder::new();
		builder.push_array(&[]).unwrap();
		assert_builder(&builder, &[OpCode::NewArray0 as u8]);
	}

	#[test]
	fn test_push_byte_array() {
		let mut builder = ScriptBuilder::new();
		let data = vec![0x01, 0x02, 0x03];
		builder.push_data(data.clone());

		let mut expected = vec![OpCode::PushData1 as u8, data.len() as u8];
		expected.extend(data);
		assert_builder(&builder, &expected);
	}

	#[test]
	fn test_push_data_prefix_widths() {
		let mut builder = ScriptBuilder::new();
		builder.push_data(vec![0xAA; 256]);
		let bytes = builder.to_bytes();
		assert_eq!(bytes[0], OpCode::PushData2 as u8);
		assert_eq!(&bytes[1..3], &[0x00, 0x01]);

		let mut builder = ScriptBuilder::new();
		builder.push_data(vec![0xAA; 0x1_0000]);
		let bytes = builder.to_bytes();
		assert_eq!(bytes[0], OpCode::PushData4 as u8);
		assert_eq!(&bytes[1..5], &[0x00, 0x00, 0x01, 0x00]);
	}

	#[test]
	fn test_push_integer_constants() {
		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(0)).unwrap();
		assert_builder(&builder, &[OpCode::Push0 as u8]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(-1)).unwrap();
		assert_builder(&builder, &[OpCode::PushM1 as u8]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(16)).unwrap();
		assert_builder(&builder, &[OpCode::Push16 as u8]);
	}

	#[test]
	fn test_push_integer_minimal_widths() {
		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(17)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt8 as u8, 17]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(127)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt8 as u8, 0x7F]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(-128)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt8 as u8, 0x80]);

		// 255 needs a sign byte, so it widens to PUSHINT16.
		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(255)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt16 as u8, 0xFF, 0x00]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(65535)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt32 as u8, 0xFF, 0xFF, 0x00, 0x00]);

		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(-100_000i64)).unwrap();
		assert_builder(&builder, &[OpCode::PushInt32 as u8, 0x60, 0x79, 0xFE, 0xFF]);
	}

	#[test]
	fn test_push_integer_rejects_over_256_bits() {
		let huge = BigInt::from(1) << 256;
		assert!(ScriptBuilder::new().push_integer(huge).is_err());
	}

	#[test]
	fn test_verification_script() {
		let public_key = Secp256r1PublicKey::from_bytes(
			&hex::decode("035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50")
				.unwrap(),
		)
		.unwrap();

		let script = ScriptBuilder::build_verification_script(&public_key);

		let mut expected = vec![0x0c, 0x21];
		expected.extend_from_slice(
			&hex::decode("035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50")
				.unwrap(),
		);
		expected.push(0x41);
		expected.extend_from_slice(&hex::decode("56e7b327").unwrap());
		assert_eq!(script, expected);
	}

	#[test]
	fn test_multi_sig_script_sorts_keys() {
		let key_a = Secp256r1PublicKey::from_encoded(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		)
		.unwrap();
		let key_b = Secp256r1PublicKey::from_encoded(
			"03b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816",
		)
		.unwrap();

		// Hand the keys over in descending order; the builder must sort.
		let script =
			ScriptBuilder::build_multi_sig_script(&[key_b.clone(), key_a.clone()], 2).unwrap();

		let mut expected = vec![OpCode::Push2 as u8];
		expected.extend([0x0c, 0x21]);
		expected.extend(key_a.get_encoded(true));
		expected.extend([0x0c, 0x21]);
		expected.extend(key_b.get_encoded(true));
		expected.push(OpCode::Push2 as u8);
		expected.push(0x41);
		expected.extend(hex::decode("9ed0dc3a").unwrap());
		assert_eq!(script, expected);
	}

	#[test]
	fn test_multi_sig_script_rejects_duplicates_and_bad_threshold() {
		let key = Secp256r1PublicKey::from_encoded(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		)
		.unwrap();
		assert!(ScriptBuilder::build_multi_sig_script(&[key.clone(), key.clone()], 1).is_err());
		assert!(ScriptBuilder::build_multi_sig_script(&[key.clone()], 0).is_err());
		assert!(ScriptBuilder::build_multi_sig_script(&[key], 2).is_err());
	}

	#[test]
	fn test_contract_call_layout() {
		let gas = H160::from_hex("d2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
		let mut sb = ScriptBuilder::new();
		sb.contract_call(&gas, "symbol", &[], None).unwrap();
		let script = sb.to_bytes();

		let mut expected = vec![OpCode::NewArray0 as u8];
		expected.extend([OpCode::PushInt8 as u8, CallFlags::All.value()]);
		expected.extend([0x0c, 0x06]);
		expected.extend(b"symbol");
		expected.extend([0x0c, 0x14]);
		expected.extend(gas.to_le_vec());
		expected.push(0x41);
		expected.extend(hex::decode("627d5b52").unwrap());
		assert_eq!(script, expected);
	}

	#[test]
	fn test_push_array_reverses_elements() {
		let mut sb = ScriptBuilder::new();
		sb.push_array(&[
			ContractParameter::integer(1),
			ContractParameter::integer(2),
			ContractParameter::integer(3),
		])
		.unwrap();

		let expected = vec![
			OpCode::Push3 as u8,
			OpCode::Push2 as u8,
			OpCode::Push1 as u8,
			OpCode::Push3 as u8, // element count
			OpCode::Pack as u8,
		];
		assert_builder(&sb, &expected);
	}

	#[test]
	fn test_push_map_layout() {
		let mut sb = ScriptBuilder::new();
		sb.push_map(&[(
			ContractParameter::from("first"),
			ContractParameter::byte_array(hex::decode("7365636f6e64").unwrap()),
		)])
		.unwrap();

		let mut expected = ScriptBuilder::new();
		expected
			.push_data(hex::decode("7365636f6e64").unwrap())
			.push_data("first".as_bytes().to_vec());
		expected.push_integer(BigInt::from(1)).unwrap();
		expected.op_code(&[OpCode::PackMap]);

		assert_eq!(sb.to_bytes(), expected.to_bytes());
	}

	#[test]
	fn test_iterator_unwrap_script_jumps_are_patched() {
		let hash = H160::from_hex("d2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
		let script = ScriptBuilder::build_contract_call_and_unwrap_iterator(
			&hash,
			"getAll",
			&[],
			100,
			None,
		)
		.unwrap();

		// No placeholder zero-offset jumps may survive patching.
		let jmp_if_not_positions: Vec<usize> = script
			.iter()
			.enumerate()
			.filter(|(_, byte)| **byte == OpCode::JmpIfNot as u8)
			.map(|(i, _)| i)
			.collect();
		assert!(!jmp_if_not_positions.is_empty());
		for pos in jmp_if_not_positions {
			assert_ne!(script[pos + 1], 0);
		}
		// The script ends with the cleanup NIPs.
		assert_eq!(&script[script.len() - 2..], &[OpCode::Nip as u8, OpCode::Nip as u8]);
	}
}
