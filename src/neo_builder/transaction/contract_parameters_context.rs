use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
	builder::{BuilderError, VerificationScript, Witness},
	crypto::{
		FromBase64String, HashableForVec, KeyPair, Secp256r1PublicKey, Secp256r1Signature,
		ToBase64String,
	},
	neo_types::{Bytes, ContractParameter, ScriptHashExtension},
};

/// The JSON document used for offline and multi-party signing: the
/// unsigned transaction bytes plus the signatures collected so far, per
/// witness script hash.
///
/// Signatures can be gathered in any order and from different machines;
/// [`ContractParametersContext::get_witness`] orders them by the sorted
/// key order of the verification script when assembling the final
/// multi-sig witness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractParametersContext {
	#[serde(rename = "type")]
	pub context_type: String,

	/// The transaction id, `0x`-prefixed display hex.
	pub hash: String,

	/// The unsigned transaction bytes, base64.
	pub data: String,

	/// Per-script-hash signing state, keyed `0x<big-endian hex>`.
	pub items: HashMap<String, ContextItem>,

	/// The network magic the signatures commit to.
	pub network: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextItem {
	/// The verification script, base64.
	pub script: String,

	/// One `Signature` parameter slot per required signature.
	pub parameters: Vec<ContractParameter>,

	/// Collected signatures: compressed public key hex → base64
	/// signature.
	pub signatures: HashMap<String, String>,
}

impl ContractParametersContext {
	pub const TRANSACTION_TYPE: &'static str = "Neo.Network.P2P.Payloads.Transaction";

	/// Starts a context from unsigned transaction bytes.
	pub fn new(unsigned_tx: &[u8], network: u32) -> Self {
		let mut tx_id = unsigned_tx.hash256();
		tx_id.reverse();

		Self {
			context_type: Self::TRANSACTION_TYPE.to_string(),
			hash: format!("0x{}", hex::encode(tx_id)),
			data: unsigned_tx.to_base64_string(),
			items: HashMap::new(),
			network,
		}
	}

	/// The unsigned transaction bytes this context is about.
	pub fn unsigned_tx(&self) -> Result<Bytes, BuilderError> {
		self.data
			.from_base64_string()
			.map_err(|e| BuilderError::IllegalState(format!("Corrupt context data: {e}")))
	}

	/// The digest the signatures commit to:
	/// `u32le(network) || sha256(unsigned bytes)`.
	pub fn hash_data(&self) -> Result<Bytes, BuilderError> {
		let mut data = self.network.to_le_bytes().to_vec();
		data.extend(self.unsigned_tx()?.hash256());
		Ok(data)
	}

	/// Signs the context with a key and folds the signature in. The key
	/// must participate in the given verification script.
	pub fn sign_with(
		&mut self,
		key_pair: &KeyPair,
		verification_script: &VerificationScript,
	) -> Result<(), BuilderError> {
		let signature = key_pair.sign(&self.hash_data()?)?;
		self.add_signature(verification_script, key_pair.public_key(), &signature)
	}

	/// Adds a caller-supplied signature for one participant.
	pub fn add_signature(
		&mut self,
		verification_script: &VerificationScript,
		public_key: &Secp256r1PublicKey,
		signature: &Secp256r1Signature,
	) -> Result<(), BuilderError> {
		let script_keys = verification_script.get_public_keys()?;
		if !script_keys.contains(public_key) {
			return Err(BuilderError::IllegalArgument(
				"The public key does not participate in the verification script".to_string(),
			));
		}

		let threshold = verification_script.get_signing_threshold()? as usize;
		let key = format!("0x{}", verification_script.hash().to_hex());
		let item = self.items.entry(key).or_insert_with(|| ContextItem {
			script: verification_script.script().to_base64_string(),
			parameters: vec![ContractParameter::any(); threshold],
			signatures: HashMap::new(),
		});

		item.signatures.insert(
			public_key.get_encoded_compressed_hex(),
			signature.to_bytes().to_base64_string(),
		);
		Ok(())
	}

	/// Whether enough signatures were collected for the script.
	pub fn is_complete(&self, verification_script: &VerificationScript) -> Result<bool, BuilderError> {
		let threshold = verification_script.get_signing_threshold()? as usize;
		let key = format!("0x{}", verification_script.hash().to_hex());
		Ok(self
			.items
			.get(&key)
			.map(|item| item.signatures.len() >= threshold)
			.unwrap_or(false))
	}

	/// Assembles the witness for a script once its threshold is met.
	/// Multi-sig signatures are ordered by the script's sorted key
	/// order, regardless of collection order.
	pub fn get_witness(
		&self,
		verification_script: &VerificationScript,
	) -> Result<Witness, BuilderError> {
		let key = format!("0x{}", verification_script.hash().to_hex());
		let item = self.items.get(&key).ok_or_else(|| {
			BuilderError::IllegalState("No signatures collected for this script".to_string())
		})?;

		let mut keyed: Vec<(Secp256r1PublicKey, Secp256r1Signature)> = Vec::new();
		for (pub_key_hex, signature_b64) in &item.signatures {
			let public_key = Secp256r1PublicKey::from_encoded(pub_key_hex).ok_or_else(|| {
				BuilderError::IllegalState("Corrupt public key in context".to_string())
			})?;
			let signature_bytes = signature_b64
				.from_base64_string()
				.map_err(|e| BuilderError::IllegalState(format!("Corrupt signature: {e}")))?;
			keyed.push((public_key, Secp256r1Signature::from_bytes(&signature_bytes)?));
		}

		if verification_script.is_single_sig() {
			let (_, signature) = keyed.pop().ok_or_else(|| {
				BuilderError::IllegalState("No signature collected for this script".to_string())
			})?;
			return Ok(Witness {
				invocation_script: crate::builder::InvocationScript::from_signature(&signature),
				verification_script: verification_script.clone(),
			});
		}

		Witness::create_multi_sig_witness_from_keys(keyed, verification_script.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::KeyPair;

	fn multi_sig_setup() -> (Vec<KeyPair>, VerificationScript) {
		let pairs: Vec<KeyPair> = (0..3).map(|_| KeyPair::new_random()).collect();
		let keys: Vec<Secp256r1PublicKey> =
			pairs.iter().map(|p| p.public_key().clone()).collect();
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();
		(pairs, script)
	}

	#[test]
	fn test_collects_until_threshold() {
		let (pairs, script) = multi_sig_setup();
		let mut context = ContractParametersContext::new(&[0x01, 0x02, 0x03], 860_833_102);

		assert!(!context.is_complete(&script).unwrap());
		context.sign_with(&pairs[2], &script).unwrap();
		assert!(!context.is_complete(&script).unwrap());
		context.sign_with(&pairs[0], &script).unwrap();
		assert!(context.is_complete(&script).unwrap());
	}

	#[test]
	fn test_witness_signatures_follow_script_key_order() {
		let (pairs, script) = multi_sig_setup();
		let unsigned = vec![0xAAu8; 40];
		let mut context = ContractParametersContext::new(&unsigned, 894_710_606);

		// Sign in an order unrelated to the script's sorted keys.
		context.sign_with(&pairs[2], &script).unwrap();
		context.sign_with(&pairs[0], &script).unwrap();

		let witness = context.get_witness(&script).unwrap();
		let signatures = witness.invocation_script.get_signatures().unwrap();
		assert_eq!(signatures.len(), 2);

		let hash_data = context.hash_data().unwrap();
		let ordered_keys = script.get_public_keys().unwrap();
		let mut checked = 0;
		for key in &ordered_keys {
			if key.verify(&hash_data, &signatures[checked]).is_ok() {
				checked += 1;
				if checked == signatures.len() {
					break;
				}
			}
		}
		assert_eq!(checked, signatures.len());
	}

	#[test]
	fn test_rejects_foreign_key() {
		let (_, script) = multi_sig_setup();
		let outsider = KeyPair::new_random();
		let mut context = ContractParametersContext::new(&[0x00], 0);
		assert!(context.sign_with(&outsider, &script).is_err());
	}

	#[test]
	fn test_json_round_trip() {
		let (pairs, script) = multi_sig_setup();
		let mut context = ContractParametersContext::new(&[0x01], 860_833_102);
		context.sign_with(&pairs[1], &script).unwrap();

		let json = serde_json::to_string(&context).unwrap();
		assert!(json.contains(ContractParametersContext::TRANSACTION_TYPE));
		let decoded: ContractParametersContext = serde_json::from_str(&json).unwrap();
		assert_eq!(decoded, context);
	}

	#[test]
	fn test_single_sig_witness() {
		let pair = KeyPair::new_random();
		let script = VerificationScript::from_public_key(pair.public_key());
		let mut context = ContractParametersContext::new(&[0x40], 860_833_102);
		context.sign_with(&pair, &script).unwrap();

		let witness = context.get_witness(&script).unwrap();
		let signature = &witness.invocation_script.get_signatures().unwrap()[0];
		assert!(pair.public_key().verify(&context.hash_data().unwrap(), signature).is_ok());
	}
}
