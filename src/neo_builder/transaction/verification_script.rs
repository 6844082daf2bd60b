use serde::{Deserialize, Serialize};

use crate::{
	builder::{BuilderError, InteropService, ScriptBuilder},
	codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	crypto::Secp256r1PublicKey,
	neo_types::{Bytes, OpCode},
};

/// A witness verification script: either the single-sig `CheckSig` form,
/// the m-of-n `CheckMultisig` form, or an arbitrary contract script.
///
/// Multi-sig parameters (`m`, `n`, the participant keys) are recovered
/// from the script bytes by static analysis; nothing is cached beside
/// the script itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationScript {
	script: Bytes,
}

impl VerificationScript {
	pub fn new() -> Self {
		Self { script: Bytes::new() }
	}

	pub fn from(script: Bytes) -> Self {
		Self { script }
	}

	pub fn from_public_key(public_key: &Secp256r1PublicKey) -> Self {
		Self { script: ScriptBuilder::build_verification_script(public_key) }
	}

	pub fn from_multi_sig(
		public_keys: &[Secp256r1PublicKey],
		threshold: u32,
	) -> Result<Self, BuilderError> {
		Ok(Self { script: ScriptBuilder::build_multi_sig_script(public_keys, threshold)? })
	}

	pub fn script(&self) -> &Bytes {
		&self.script
	}

	pub fn is_empty(&self) -> bool {
		self.script.is_empty()
	}

	/// The script hash, in display (big-endian) order.
	pub fn hash(&self) -> primitive_types::H160 {
		use crate::neo_types::ScriptHashExtension;
		primitive_types::H160::from_script(&self.script)
	}

	/// Whether the script is the canonical single-sig `CheckSig` form.
	pub fn is_single_sig(&self) -> bool {
		self.script.len() == 40
			&& self.script[0] == OpCode::PushData1 as u8
			&& self.script[1] == 33
			&& self.script[35] == OpCode::Syscall as u8
			&& self.script[36..40] == InteropService::SystemCryptoCheckSig.descriptor()
	}

	/// Whether the script matches
	/// `PUSHINT(m) (PUSHDATA1 33 key)* PUSHINT(n) SYSCALL CheckMultisig`
	/// with the keys in ascending order.
	pub fn is_multi_sig(&self) -> bool {
		self.parse_multi_sig().is_ok()
	}

	fn parse_multi_sig(&self) -> Result<(u32, Vec<Secp256r1PublicKey>), BuilderError> {
		let mut reader = Decoder::new(&self.script);

		let threshold: u32 = reader
			.read_push_int()
			.map_err(|_| BuilderError::InvalidScript("No signing threshold".to_string()))?
			.try_into()
			.map_err(|_| BuilderError::InvalidScript("Invalid signing threshold".to_string()))?;

		let mut keys: Vec<Secp256r1PublicKey> = Vec::new();
		while reader.available() > 0 && self.script[reader.pointer()] == OpCode::PushData1 as u8 {
			let encoded = reader
				.read_push_bytes()
				.map_err(|_| BuilderError::InvalidScript("Truncated public key".to_string()))?;
			let key = Secp256r1PublicKey::from_bytes(&encoded).map_err(|_| {
				BuilderError::InvalidScript("Invalid public key in script".to_string())
			})?;
			keys.push(key);
		}

		let n: u32 = reader
			.read_push_int()
			.map_err(|_| BuilderError::InvalidScript("No key count".to_string()))?
			.try_into()
			.map_err(|_| BuilderError::InvalidScript("Invalid key count".to_string()))?;

		if keys.len() as u32 != n || threshold < 1 || threshold > n {
			return Err(BuilderError::InvalidScript(
				"Key count does not match the script".to_string(),
			));
		}
		if keys.windows(2).any(|pair| pair[0] >= pair[1]) {
			return Err(BuilderError::InvalidScript(
				"Public keys are not in ascending order".to_string(),
			));
		}

		let syscall = reader
			.read_bytes(5)
			.map_err(|_| BuilderError::InvalidScript("Missing syscall".to_string()))?;
		if syscall[0] != OpCode::Syscall as u8
			|| syscall[1..5] != InteropService::SystemCryptoCheckMultiSig.descriptor()
			|| reader.available() != 0
		{
			return Err(BuilderError::InvalidScript(
				"Script does not end in CheckMultisig".to_string(),
			));
		}

		Ok((threshold, keys))
	}

	/// The number of signatures this script requires.
	pub fn get_signing_threshold(&self) -> Result<u32, BuilderError> {
		if self.is_single_sig() {
			return Ok(1);
		}
		self.parse_multi_sig().map(|(threshold, _)| threshold)
	}

	/// The number of participating accounts (1 for single-sig).
	pub fn get_nr_of_accounts(&self) -> Result<u32, BuilderError> {
		if self.is_single_sig() {
			return Ok(1);
		}
		self.parse_multi_sig().map(|(_, keys)| keys.len() as u32)
	}

	/// The public keys encoded in the script, in script order.
	pub fn get_public_keys(&self) -> Result<Vec<Secp256r1PublicKey>, BuilderError> {
		if self.is_single_sig() {
			let key = Secp256r1PublicKey::from_bytes(&self.script[2..35]).map_err(|_| {
				BuilderError::InvalidScript("Invalid public key in script".to_string())
			})?;
			return Ok(vec![key]);
		}
		self.parse_multi_sig().map(|(_, keys)| keys)
	}
}

impl NeoSerializable for VerificationScript {
	type Error = CodecError;

	fn size(&self) -> usize {
		self.script.var_size()
	}

	fn encode(&self, writer: &mut Encoder) {
		writer
			.write_var_bytes(&self.script)
			.expect("verification scripts are bounded well below var-int limits");
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		Ok(Self { script: reader.read_var_bytes()? })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(hex_str: &str) -> Secp256r1PublicKey {
		Secp256r1PublicKey::from_encoded(hex_str).unwrap()
	}

	#[test]
	fn test_single_sig_introspection() {
		let script = VerificationScript::from_public_key(&key(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		));
		assert!(script.is_single_sig());
		assert!(!script.is_multi_sig());
		assert_eq!(script.get_signing_threshold().unwrap(), 1);
		assert_eq!(script.get_nr_of_accounts().unwrap(), 1);
		assert_eq!(
			script.get_public_keys().unwrap()[0].get_encoded_compressed_hex(),
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50"
		);
	}

	#[test]
	fn test_multi_sig_parse_recovers_parameters() {
		let keys = vec![
			key("02b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816"),
			key("035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50"),
			key("03b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816"),
		];
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();

		assert!(script.is_multi_sig());
		assert!(!script.is_single_sig());
		assert_eq!(script.get_signing_threshold().unwrap(), 2);
		assert_eq!(script.get_nr_of_accounts().unwrap(), 3);

		let mut sorted = keys.clone();
		sorted.sort();
		assert_eq!(script.get_public_keys().unwrap(), sorted);
	}

	#[test]
	fn test_multi_sig_parse_and_rebuild_is_identity() {
		let keys = vec![
			key("02b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816"),
			key("03b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816"),
		];
		let script = VerificationScript::from_multi_sig(&keys, 1).unwrap();
		let recovered = script.get_public_keys().unwrap();
		let rebuilt =
			VerificationScript::from_multi_sig(&recovered, script.get_signing_threshold().unwrap())
				.unwrap();
		assert_eq!(script, rebuilt);
	}

	#[test]
	fn test_garbage_is_neither() {
		let script = VerificationScript::from(vec![0x01, 0x02, 0x03]);
		assert!(!script.is_single_sig());
		assert!(!script.is_multi_sig());
		assert!(script.get_signing_threshold().is_err());
	}

	#[test]
	fn test_serialization_round_trip() {
		let script = VerificationScript::from_public_key(&key(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		));
		let bytes = script.to_array();
		assert_eq!(bytes[0], 40);
		assert_eq!(VerificationScript::from_bytes(&bytes).unwrap(), script);
	}
}
