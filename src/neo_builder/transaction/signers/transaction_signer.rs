use primitive_types::H160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
	builder::{SignerTrait, SignerType, WitnessRule, WitnessScope},
	crypto::Secp256r1PublicKey,
	neo_types::{deserialize_script_hash, serialize_script_hash},
};

/// The plain data form of a signer, as it travels in RPC parameters and
/// on the wire: an account hash, scopes and the scope-dependent lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSigner {
	#[serde(
		rename = "account",
		serialize_with = "serialize_script_hash",
		deserialize_with = "deserialize_script_hash"
	)]
	pub account: H160,

	#[serde(
		rename = "scopes",
		serialize_with = "serialize_scopes",
		deserialize_with = "deserialize_scopes"
	)]
	pub scopes: Vec<WitnessScope>,

	#[serde(rename = "allowedcontracts", default, skip_serializing_if = "Vec::is_empty")]
	#[serde(
		serialize_with = "serialize_script_hashes",
		deserialize_with = "deserialize_script_hashes"
	)]
	pub allowed_contracts: Vec<H160>,

	#[serde(rename = "allowedgroups", default, skip_serializing_if = "Vec::is_empty")]
	pub allowed_groups: Vec<Secp256r1PublicKey>,

	#[serde(rename = "rules", default, skip_serializing_if = "Vec::is_empty")]
	pub rules: Vec<WitnessRule>,
}

fn serialize_scopes<S>(scopes: &[WitnessScope], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let joined =
		scopes.iter().map(WitnessScope::to_string).collect::<Vec<String>>().join(",");
	serializer.serialize_str(&joined)
}

fn deserialize_scopes<'de, D>(deserializer: D) -> Result<Vec<WitnessScope>, D::Error>
where
	D: Deserializer<'de>,
{
	use std::str::FromStr;
	let joined = String::deserialize(deserializer)?;
	joined
		.split(',')
		.map(|scope| WitnessScope::from_str(scope.trim()).map_err(serde::de::Error::custom))
		.collect()
}

fn serialize_script_hashes<S>(hashes: &[H160], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	use crate::neo_types::ScriptHashExtension;
	use serde::ser::SerializeSeq;
	let mut seq = serializer.serialize_seq(Some(hashes.len()))?;
	for hash in hashes {
		seq.serialize_element(&hash.to_hex_prefixed())?;
	}
	seq.end()
}

fn deserialize_script_hashes<'de, D>(deserializer: D) -> Result<Vec<H160>, D::Error>
where
	D: Deserializer<'de>,
{
	use crate::neo_types::ScriptHashExtension;
	let raw: Vec<String> = Vec::deserialize(deserializer)?;
	raw.iter()
		.map(|value| H160::from_hex(value).map_err(serde::de::Error::custom))
		.collect()
}

impl TransactionSigner {
	pub fn new(account: H160, scopes: Vec<WitnessScope>) -> Self {
		Self {
			account,
			scopes,
			allowed_contracts: Vec::new(),
			allowed_groups: Vec::new(),
			rules: Vec::new(),
		}
	}

	pub fn new_full(
		account: H160,
		scopes: Vec<WitnessScope>,
		allowed_contracts: Vec<H160>,
		allowed_groups: Vec<Secp256r1PublicKey>,
		rules: Vec<WitnessRule>,
	) -> Self {
		Self { account, scopes, allowed_contracts, allowed_groups, rules }
	}
}

impl SignerTrait for TransactionSigner {
	fn get_type(&self) -> SignerType {
		SignerType::TransactionSigner
	}

	fn get_signer_hash(&self) -> &H160 {
		&self.account
	}

	fn get_scopes(&self) -> &Vec<WitnessScope> {
		&self.scopes
	}

	fn get_allowed_contracts(&self) -> &Vec<H160> {
		&self.allowed_contracts
	}

	fn get_allowed_groups(&self) -> &Vec<Secp256r1PublicKey> {
		&self.allowed_groups
	}

	fn get_rules(&self) -> &Vec<WitnessRule> {
		&self.rules
	}

	fn scopes_mut(&mut self) -> &mut Vec<WitnessScope> {
		&mut self.scopes
	}

	fn allowed_contracts_mut(&mut self) -> &mut Vec<H160> {
		&mut self.allowed_contracts
	}

	fn allowed_groups_mut(&mut self) -> &mut Vec<Secp256r1PublicKey> {
		&mut self.allowed_groups
	}

	fn rules_mut(&mut self) -> &mut Vec<WitnessRule> {
		&mut self.rules
	}
}
