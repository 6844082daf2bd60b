use primitive_types::H256;
use serde::{Deserialize, Serialize};

use crate::{
	builder::TransactionSigner,
	neo_types::{deserialize_h256, serialize_h256},
};

/// The `sendrawtransaction` echo: the accepted transaction's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
	#[serde(serialize_with = "serialize_h256", deserialize_with = "deserialize_h256")]
	pub hash: H256,
}

/// A witness as it appears in verbose RPC responses, both scripts
/// base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoWitness {
	pub invocation: String,
	pub verification: String,
}

/// A transaction as returned by `getrawtransaction` in verbose mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RTransaction {
	#[serde(serialize_with = "serialize_h256", deserialize_with = "deserialize_h256")]
	pub hash: H256,

	#[serde(default)]
	pub size: u32,

	#[serde(default)]
	pub version: u8,

	#[serde(default)]
	pub nonce: u32,

	#[serde(default)]
	pub sender: String,

	/// Fees come back as decimal strings of GAS fractions.
	#[serde(rename = "sysfee", default)]
	pub sys_fee: String,

	#[serde(rename = "netfee", default)]
	pub net_fee: String,

	#[serde(rename = "validuntilblock", default)]
	pub valid_until_block: u32,

	#[serde(default)]
	pub signers: Vec<TransactionSigner>,

	#[serde(default)]
	pub attributes: serde_json::Value,

	/// Base64-encoded script.
	#[serde(default)]
	pub script: String,

	#[serde(default)]
	pub witnesses: Vec<NeoWitness>,

	#[serde(rename = "blockhash", default)]
	pub block_hash: Option<String>,

	#[serde(default)]
	pub confirmations: Option<u32>,

	#[serde(rename = "blocktime", default)]
	pub block_time: Option<u64>,
}
