use serde::{Deserialize, Serialize};

use crate::neo_types::deserialize_u64_from_string_or_number;

/// The `getversion` response: node identity plus the protocol settings
/// of the chain it serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoVersion {
	#[serde(rename = "tcpport", default)]
	pub tcp_port: Option<u16>,

	#[serde(rename = "wsport", default)]
	pub ws_port: Option<u16>,

	#[serde(default)]
	pub nonce: u64,

	#[serde(rename = "useragent", default)]
	pub user_agent: String,

	#[serde(default)]
	pub protocol: Option<Protocol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
	/// The network magic, mixed into every signing digest.
	pub network: u32,

	#[serde(rename = "validatorscount", default)]
	pub validators_count: Option<u32>,

	#[serde(rename = "msperblock", default)]
	pub ms_per_block: u32,

	#[serde(rename = "maxvaliduntilblockincrement", default)]
	pub max_valid_until_block_increment: u32,

	#[serde(rename = "maxtraceableblocks", default)]
	pub max_traceable_blocks: u32,

	#[serde(rename = "addressversion", default)]
	pub address_version: u8,

	#[serde(rename = "maxtransactionsperblock", default)]
	pub max_transactions_per_block: u32,

	#[serde(rename = "memorypoolmaxtransactions", default)]
	pub memory_pool_max_transactions: u32,

	#[serde(
		rename = "initialgasdistribution",
		default,
		deserialize_with = "deserialize_u64_from_string_or_number"
	)]
	pub initial_gas_distribution: u64,
}

impl Default for NeoVersion {
	fn default() -> Self {
		Self {
			tcp_port: None,
			ws_port: None,
			nonce: 0,
			user_agent: String::new(),
			protocol: None,
		}
	}
}
