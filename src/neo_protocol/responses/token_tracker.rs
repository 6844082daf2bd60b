use num_bigint::BigInt;
use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::neo_types::{
	deserialize_bigint_from_string_or_number, deserialize_script_hash, serialize_script_hash,
};

/// The `getnep17balances` response. The account travels as an address;
/// balances are arbitrary-precision since token supplies can exceed
/// 2^53.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nep17Balances {
	pub address: String,

	#[serde(rename = "balance", default)]
	pub balances: Vec<Nep17Balance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nep17Balance {
	#[serde(
		rename = "assethash",
		serialize_with = "serialize_script_hash",
		deserialize_with = "deserialize_script_hash"
	)]
	pub asset_hash: H160,

	#[serde(default)]
	pub name: Option<String>,

	#[serde(default)]
	pub symbol: Option<String>,

	#[serde(default)]
	pub decimals: Option<String>,

	#[serde(
		serialize_with = "crate::neo_types::serialize_bigint_lossless",
		deserialize_with = "deserialize_bigint_from_string_or_number"
	)]
	pub amount: BigInt,

	#[serde(rename = "lastupdatedblock", default)]
	pub last_updated_block: u64,
}

/// The `getnep17transfers` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nep17Transfers {
	pub address: String,

	#[serde(default)]
	pub sent: Vec<Nep17Transfer>,

	#[serde(default)]
	pub received: Vec<Nep17Transfer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nep17Transfer {
	pub timestamp: u64,

	#[serde(
		rename = "assethash",
		serialize_with = "serialize_script_hash",
		deserialize_with = "deserialize_script_hash"
	)]
	pub asset_hash: H160,

	#[serde(rename = "transferaddress", default)]
	pub transfer_address: Option<String>,

	#[serde(
		serialize_with = "crate::neo_types::serialize_bigint_lossless",
		deserialize_with = "deserialize_bigint_from_string_or_number"
	)]
	pub amount: BigInt,

	#[serde(rename = "blockindex", default)]
	pub block_index: u64,

	#[serde(rename = "transfernotifyindex", default)]
	pub transfer_notify_index: u64,

	#[serde(rename = "txhash", default)]
	pub tx_hash: Option<String>,
}

/// The `getunclaimedgas` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnclaimedGas {
	/// GAS fractions as a decimal string.
	pub unclaimed: String,
	pub address: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_balances_beyond_f64() {
		let json = r#"{
			"address": "NPTmAHDxo6Pkyic8Nvu3kwyXoYJCvcCB6i",
			"balance": [{
				"assethash": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
				"amount": "123456789012345678901234",
				"lastupdatedblock": 5162
			}]
		}"#;
		let balances: Nep17Balances = serde_json::from_str(json).unwrap();
		assert_eq!(
			balances.balances[0].amount.to_string(),
			"123456789012345678901234"
		);
	}

	#[test]
	fn test_decode_amount_as_number() {
		let json = r#"{
			"address": "NPTmAHDxo6Pkyic8Nvu3kwyXoYJCvcCB6i",
			"balance": [{
				"assethash": "d2a4cff31913016155e38e474a2c06d08be276cf",
				"amount": 500,
				"lastupdatedblock": 1
			}]
		}"#;
		let balances: Nep17Balances = serde_json::from_str(json).unwrap();
		assert_eq!(balances.balances[0].amount, BigInt::from(500));
	}
}
