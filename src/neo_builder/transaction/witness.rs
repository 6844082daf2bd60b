use serde::{Deserialize, Serialize};

use crate::{
	builder::{BuilderError, InvocationScript, ScriptBuilder, VerificationScript},
	codec::{CodecError, Decoder, Encoder, NeoSerializable},
	crypto::{KeyPair, Secp256r1PublicKey, Secp256r1Signature},
	neo_types::{Bytes, ContractParameter},
};

/// A transaction witness: the invocation script (signatures) paired with
/// the verification script consuming them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Witness {
	#[serde(rename = "invocation")]
	pub invocation_script: InvocationScript,
	#[serde(rename = "verification")]
	pub verification_script: VerificationScript,
}

impl Witness {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_scripts(invocation: Bytes, verification: Bytes) -> Self {
		Self {
			invocation_script: InvocationScript::from(invocation),
			verification_script: VerificationScript::from(verification),
		}
	}

	/// Signs `message_digest` (the network-magic-prefixed transaction
	/// hash data) and builds the single-sig witness for the key.
	pub fn create(message_digest: &[u8], key_pair: &KeyPair) -> Result<Self, BuilderError> {
		Ok(Self {
			invocation_script: InvocationScript::from_message_and_key_pair(
				message_digest,
				key_pair,
			)?,
			verification_script: VerificationScript::from_public_key(key_pair.public_key()),
		})
	}

	/// Assembles a multi-sig witness from already ordered signatures.
	/// Exactly `m` signatures are required, ordered like the sorted keys
	/// of the verification script.
	pub fn create_multi_sig_witness(
		signatures: Vec<Secp256r1Signature>,
		verification_script: VerificationScript,
	) -> Result<Self, BuilderError> {
		let threshold = verification_script.get_signing_threshold()?;
		if signatures.len() as u32 != threshold {
			return Err(BuilderError::SignerConfiguration(format!(
				"A {threshold}-of-n witness takes exactly {threshold} signatures, got {}",
				signatures.len()
			)));
		}
		Ok(Self {
			invocation_script: InvocationScript::from_signatures(&signatures),
			verification_script,
		})
	}

	/// Assembles a multi-sig witness from per-key signatures, ordering
	/// them by the verification script's sorted key order regardless of
	/// collection order.
	pub fn create_multi_sig_witness_from_keys(
		signatures: Vec<(Secp256r1PublicKey, Secp256r1Signature)>,
		verification_script: VerificationScript,
	) -> Result<Self, BuilderError> {
		let threshold = verification_script.get_signing_threshold()? as usize;
		let script_keys = verification_script.get_public_keys()?;

		let mut ordered = Vec::with_capacity(threshold);
		for key in &script_keys {
			if let Some((_, signature)) = signatures.iter().find(|(k, _)| k == key) {
				ordered.push(signature.clone());
				if ordered.len() == threshold {
					break;
				}
			}
		}
		Self::create_multi_sig_witness(ordered, verification_script)
	}

	/// The witness attached for a contract signer: pushed parameters and
	/// an empty verification script (the chain runs the contract's own
	/// `verify`).
	pub fn create_contract_witness(params: &[ContractParameter]) -> Result<Self, BuilderError> {
		if params.is_empty() {
			return Ok(Self::new());
		}

		let mut builder = ScriptBuilder::new();
		for param in params {
			builder.push_param(param)?;
		}

		Ok(Self {
			invocation_script: InvocationScript::from(builder.to_bytes()),
			verification_script: VerificationScript::new(),
		})
	}
}

impl NeoSerializable for Witness {
	type Error = CodecError;

	fn size(&self) -> usize {
		self.invocation_script.size() + self.verification_script.size()
	}

	fn encode(&self, writer: &mut Encoder) {
		self.invocation_script.encode(writer);
		self.verification_script.encode(writer);
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		Ok(Self {
			invocation_script: InvocationScript::decode(reader)?,
			verification_script: VerificationScript::decode(reader)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::HashableForVec;

	#[test]
	fn test_create_single_sig_witness_verifies() {
		let key_pair = KeyPair::new_random();
		let digest = b"transaction hash data".to_vec();

		let witness = Witness::create(&digest, &key_pair).unwrap();
		let signatures = witness.invocation_script.get_signatures().unwrap();
		assert_eq!(signatures.len(), 1);
		assert!(key_pair.public_key().verify(&digest, &signatures[0]).is_ok());
		assert!(witness.verification_script.is_single_sig());
	}

	#[test]
	fn test_multi_sig_witness_orders_signatures() {
		let pairs: Vec<KeyPair> = (0..3).map(|_| KeyPair::new_random()).collect();
		let keys: Vec<Secp256r1PublicKey> =
			pairs.iter().map(|p| p.public_key().clone()).collect();
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();

		let digest = b"digest".to_vec().hash256();
		// Collect signatures in reverse key order on purpose.
		let mut collected: Vec<(Secp256r1PublicKey, Secp256r1Signature)> = pairs
			.iter()
			.map(|pair| {
				(pair.public_key().clone(), pair.sign_prehash(&digest).unwrap())
			})
			.collect();
		collected.sort_by(|a, b| b.0.cmp(&a.0));

		let witness =
			Witness::create_multi_sig_witness_from_keys(collected, script.clone()).unwrap();

		let ordered_keys = script.get_public_keys().unwrap();
		let signatures = witness.invocation_script.get_signatures().unwrap();
		assert_eq!(signatures.len(), 2);
		// Each embedded signature must verify under the key at the same
		// position of the sorted script keys.
		for (key, signature) in ordered_keys.iter().zip(signatures.iter()) {
			assert!(key.verify_prehash(&digest, signature).is_ok());
		}
	}

	#[test]
	fn test_multi_sig_witness_rejects_wrong_count() {
		let pairs: Vec<KeyPair> = (0..3).map(|_| KeyPair::new_random()).collect();
		let keys: Vec<Secp256r1PublicKey> =
			pairs.iter().map(|p| p.public_key().clone()).collect();
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();

		let digest = b"digest".to_vec().hash256();
		let one_sig = vec![pairs[0].sign_prehash(&digest).unwrap()];
		assert!(Witness::create_multi_sig_witness(one_sig, script).is_err());
	}

	#[test]
	fn test_serialization_round_trip() {
		let key_pair = KeyPair::new_random();
		let witness = Witness::create(b"digest", &key_pair).unwrap();
		let bytes = witness.to_array();
		assert_eq!(Witness::from_bytes(&bytes).unwrap(), witness);
	}

	#[test]
	fn test_contract_witness_has_empty_verification() {
		let witness =
			Witness::create_contract_witness(&[ContractParameter::integer(7)]).unwrap();
		assert!(witness.verification_script.is_empty());
		assert!(!witness.invocation_script.is_empty());
	}
}
