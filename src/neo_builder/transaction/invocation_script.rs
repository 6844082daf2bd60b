use serde::{Deserialize, Serialize};

use crate::{
	builder::BuilderError,
	codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	crypto::{KeyPair, Secp256r1Signature},
	neo_types::{Bytes, OpCode},
};

/// A witness invocation script, typically one `PUSHDATA1 64 <signature>`
/// per required signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationScript {
	script: Bytes,
}

impl InvocationScript {
	pub fn new() -> Self {
		Self { script: Bytes::new() }
	}

	pub fn from(script: Bytes) -> Self {
		Self { script }
	}

	pub fn script(&self) -> &Bytes {
		&self.script
	}

	pub fn is_empty(&self) -> bool {
		self.script.is_empty()
	}

	pub fn from_signature(signature: &Secp256r1Signature) -> Self {
		let mut script = Vec::with_capacity(66);
		script.push(OpCode::PushData1 as u8);
		script.push(64);
		script.extend_from_slice(&signature.to_bytes());
		Self { script }
	}

	/// Signs `message` (usually the network-magic-prefixed transaction
	/// digest) and wraps the signature.
	pub fn from_message_and_key_pair(
		message: &[u8],
		key_pair: &KeyPair,
	) -> Result<Self, BuilderError> {
		let signature = key_pair.sign(message)?;
		Ok(Self::from_signature(&signature))
	}

	/// Concatenates the signature pushes of a multi-sig invocation
	/// script. The order must match the sorted key order of the
	/// verification script.
	pub fn from_signatures(signatures: &[Secp256r1Signature]) -> Self {
		let mut script = Vec::with_capacity(66 * signatures.len());
		for signature in signatures {
			script.push(OpCode::PushData1 as u8);
			script.push(64);
			script.extend_from_slice(&signature.to_bytes());
		}
		Self { script }
	}

	/// Extracts the 64-byte signatures pushed by this script.
	pub fn get_signatures(&self) -> Result<Vec<Secp256r1Signature>, BuilderError> {
		let mut reader = Decoder::new(&self.script);
		let mut signatures = Vec::new();
		while reader.available() > 0 {
			let bytes = reader
				.read_push_bytes()
				.map_err(|_| BuilderError::InvalidScript("Malformed signature push".to_string()))?;
			signatures.push(Secp256r1Signature::from_bytes(&bytes)?);
		}
		Ok(signatures)
	}
}

impl NeoSerializable for InvocationScript {
	type Error = CodecError;

	fn size(&self) -> usize {
		self.script.var_size()
	}

	fn encode(&self, writer: &mut Encoder) {
		writer
			.write_var_bytes(&self.script)
			.expect("invocation scripts are bounded well below var-int limits");
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		Ok(Self { script: reader.read_var_bytes()? })
	}
}
