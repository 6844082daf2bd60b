use primitive_types::H256;
use serde::{Deserialize, Serialize};

use crate::{
	neo_protocol::{NeoWitness, RTransaction},
	neo_types::{deserialize_h256, deserialize_h256_option, serialize_h256, serialize_h256_option},
};

/// A block (or block header) as returned by `getblock` /
/// `getblockheader` in verbose mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoBlock {
	#[serde(serialize_with = "serialize_h256", deserialize_with = "deserialize_h256")]
	pub hash: H256,

	#[serde(default)]
	pub size: u32,

	#[serde(default)]
	pub version: u32,

	#[serde(
		rename = "previousblockhash",
		serialize_with = "serialize_h256",
		deserialize_with = "deserialize_h256"
	)]
	pub prev_block_hash: H256,

	#[serde(
		rename = "merkleroot",
		serialize_with = "serialize_h256",
		deserialize_with = "deserialize_h256"
	)]
	pub merkle_root_hash: H256,

	#[serde(default)]
	pub time: u64,

	#[serde(default)]
	pub index: u32,

	#[serde(rename = "nextconsensus", default)]
	pub next_consensus: String,

	#[serde(default)]
	pub witnesses: Option<Vec<NeoWitness>>,

	#[serde(default)]
	pub tx: Option<Vec<RTransaction>>,

	#[serde(default)]
	pub confirmations: Option<u32>,

	#[serde(
		rename = "nextblockhash",
		default,
		serialize_with = "serialize_h256_option",
		deserialize_with = "deserialize_h256_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub next_block_hash: Option<H256>,
}
