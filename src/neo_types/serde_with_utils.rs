//! Serde helpers for fixed-width hash types and lenient numeric fields.
//!
//! `primitive-types` hashes serialize here as `0x`-prefixed big-endian hex
//! and deserialize with or without the prefix. Numeric RPC fields that
//! nodes emit either as JSON numbers or as decimal strings go through the
//! lenient `*_from_string_or_number` deserializers.

use num_bigint::BigInt;
use primitive_types::{H160, H256};
use serde::{Deserialize, Deserializer, Serializer};

use crate::neo_types::{HashExtension, ScriptHashExtension};

pub fn serialize_script_hash<S>(hash: &H160, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&hash.to_hex_prefixed())
}

pub fn deserialize_script_hash<'de, D>(deserializer: D) -> Result<H160, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	H160::from_hex(&raw).map_err(serde::de::Error::custom)
}

pub fn serialize_script_hash_option<S>(
	hash: &Option<H160>,
	serializer: S,
) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match hash {
		Some(hash) => serialize_script_hash(hash, serializer),
		None => serializer.serialize_none(),
	}
}

pub fn deserialize_script_hash_option<'de, D>(deserializer: D) -> Result<Option<H160>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw: Option<String> = Option::deserialize(deserializer)?;
	raw.map(|value| H160::from_hex(&value).map_err(serde::de::Error::custom)).transpose()
}

pub fn serialize_h256<S>(hash: &H256, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&hash.to_hex_prefixed())
}

pub fn deserialize_h256<'de, D>(deserializer: D) -> Result<H256, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	H256::from_hex(&raw).map_err(serde::de::Error::custom)
}

pub fn serialize_h256_option<S>(hash: &Option<H256>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match hash {
		Some(hash) => serialize_h256(hash, serializer),
		None => serializer.serialize_none(),
	}
}

pub fn deserialize_h256_option<'de, D>(deserializer: D) -> Result<Option<H256>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw: Option<String> = Option::deserialize(deserializer)?;
	raw.map(|value| H256::from_hex(&value).map_err(serde::de::Error::custom)).transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
	Number(serde_json::Number),
	String(String),
}

/// Accepts `123`, `"123"` or `"-123"`.
pub fn deserialize_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
	D: Deserializer<'de>,
{
	match StringOrNumber::deserialize(deserializer)? {
		StringOrNumber::Number(n) =>
			n.as_i64().ok_or_else(|| serde::de::Error::custom("number out of i64 range")),
		StringOrNumber::String(s) => s.parse::<i64>().map_err(serde::de::Error::custom),
	}
}

pub fn deserialize_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	match StringOrNumber::deserialize(deserializer)? {
		StringOrNumber::Number(n) =>
			n.as_u64().ok_or_else(|| serde::de::Error::custom("number out of u64 range")),
		StringOrNumber::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
	}
}

/// Arbitrary-precision decode for fees, supplies and balances that can
/// exceed 2^53.
pub fn deserialize_bigint_from_string_or_number<'de, D>(
	deserializer: D,
) -> Result<BigInt, D::Error>
where
	D: Deserializer<'de>,
{
	match StringOrNumber::deserialize(deserializer)? {
		StringOrNumber::Number(n) => n.to_string().parse::<BigInt>().map_err(serde::de::Error::custom),
		StringOrNumber::String(s) => s.parse::<BigInt>().map_err(serde::de::Error::custom),
	}
}

/// Encodes an outgoing amount as a JSON number when it fits the f64-exact
/// integer range, as a decimal string otherwise.
pub fn serialize_bigint_lossless<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
	if let Ok(small) = i64::try_from(value.clone()) {
		if small.abs() <= MAX_SAFE_INTEGER {
			return serializer.serialize_i64(small);
		}
	}
	serializer.serialize_str(&value.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Serialize;

	#[derive(Serialize, Deserialize)]
	struct Wrapper {
		#[serde(
			serialize_with = "serialize_script_hash",
			deserialize_with = "deserialize_script_hash"
		)]
		hash: H160,
		#[serde(deserialize_with = "deserialize_i64_from_string_or_number")]
		fee: i64,
	}

	#[test]
	fn test_script_hash_round_trip() {
		let json = r#"{"hash":"0x23ba2703c53263e8d6e522dc32203339dcd8eee9","fee":"1234"}"#;
		let wrapper: Wrapper = serde_json::from_str(json).unwrap();
		assert_eq!(wrapper.hash.to_hex(), "23ba2703c53263e8d6e522dc32203339dcd8eee9");
		assert_eq!(wrapper.fee, 1234);

		let back = serde_json::to_string(&wrapper).unwrap();
		assert!(back.contains("0x23ba2703c53263e8d6e522dc32203339dcd8eee9"));
	}

	#[test]
	fn test_fee_as_number() {
		let json = r#"{"hash":"23ba2703c53263e8d6e522dc32203339dcd8eee9","fee":42}"#;
		let wrapper: Wrapper = serde_json::from_str(json).unwrap();
		assert_eq!(wrapper.fee, 42);
	}

	#[test]
	fn test_bigint_beyond_f64() {
		#[derive(Deserialize)]
		struct Big {
			#[serde(deserialize_with = "deserialize_bigint_from_string_or_number")]
			value: BigInt,
		}
		let big: Big = serde_json::from_str(r#"{"value":"123456789012345678901234567890"}"#).unwrap();
		assert_eq!(big.value.to_string(), "123456789012345678901234567890");
	}
}
