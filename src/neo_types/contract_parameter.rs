use std::fmt;

use num_bigint::BigInt;
use primitive_types::{H160, H256};
use serde::{
	de::{self, Deserializer, MapAccess, Visitor},
	ser::{SerializeMap, Serializer},
	Deserialize, Serialize,
};
use strum_macros::{Display, EnumString};

use crate::{
	crypto::{FromBase64String, Secp256r1PublicKey, ToBase64String},
	neo_types::{HashExtension, ScriptHashExtension, TypeError},
};

/// The Neo ABI parameter types.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum ContractParameterType {
	Any,
	Boolean,
	Integer,
	ByteArray,
	String,
	Hash160,
	Hash256,
	PublicKey,
	Signature,
	Array,
	Map,
	InteropInterface,
	Void,
}

impl ContractParameterType {
	/// The byte tag used in contract manifests and NEF files.
	pub fn as_byte(&self) -> u8 {
		match self {
			ContractParameterType::Any => 0x00,
			ContractParameterType::Boolean => 0x10,
			ContractParameterType::Integer => 0x11,
			ContractParameterType::ByteArray => 0x12,
			ContractParameterType::String => 0x13,
			ContractParameterType::Hash160 => 0x14,
			ContractParameterType::Hash256 => 0x15,
			ContractParameterType::PublicKey => 0x16,
			ContractParameterType::Signature => 0x17,
			ContractParameterType::Array => 0x20,
			ContractParameterType::Map => 0x22,
			ContractParameterType::InteropInterface => 0x30,
			ContractParameterType::Void => 0xff,
		}
	}
}

/// An ordered list of key/value parameter pairs.
///
/// Map keys may not themselves be `Array` or `Map` parameters; the
/// constructor enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContractParameterMap(pub Vec<(ContractParameter, ContractParameter)>);

impl ContractParameterMap {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	pub fn insert(
		&mut self,
		key: ContractParameter,
		value: ContractParameter,
	) -> Result<(), TypeError> {
		match key.typ {
			ContractParameterType::Array | ContractParameterType::Map =>
				Err(TypeError::InvalidArgError(
					"Map keys cannot be Array or Map parameters".to_string(),
				)),
			_ => {
				self.0.push((key, value));
				Ok(())
			},
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// The value carried by a [`ContractParameter`]. `Any`, `Void` and
/// `InteropInterface` parameters carry no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterValue {
	Boolean(bool),
	Integer(BigInt),
	ByteArray(Vec<u8>),
	String(String),
	H160(H160),
	H256(H256),
	PublicKey(Vec<u8>),
	Signature(Vec<u8>),
	Array(Vec<ContractParameter>),
	Map(ContractParameterMap),
}

/// A parameter of a smart contract invocation.
///
/// The JSON form is `{"type": <name>, "value": <encoded>}` with the
/// encodings the Neo RPC interface expects: base64 for byte arrays and
/// signatures, lowercase hex for hashes and public keys, decimal strings
/// for integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractParameter {
	pub name: Option<String>,
	pub typ: ContractParameterType,
	pub value: Option<ParameterValue>,
}

impl ContractParameter {
	fn with_value(typ: ContractParameterType, value: ParameterValue) -> Self {
		Self { name: None, typ, value: Some(value) }
	}

	pub fn get_type(&self) -> ContractParameterType {
		self.typ
	}

	pub fn any() -> Self {
		Self { name: None, typ: ContractParameterType::Any, value: None }
	}

	pub fn void() -> Self {
		Self { name: None, typ: ContractParameterType::Void, value: None }
	}

	pub fn bool(value: bool) -> Self {
		Self::with_value(ContractParameterType::Boolean, ParameterValue::Boolean(value))
	}

	pub fn integer(value: impl Into<BigInt>) -> Self {
		Self::with_value(ContractParameterType::Integer, ParameterValue::Integer(value.into()))
	}

	pub fn byte_array(bytes: Vec<u8>) -> Self {
		Self::with_value(ContractParameterType::ByteArray, ParameterValue::ByteArray(bytes))
	}

	pub fn string(value: String) -> Self {
		Self::with_value(ContractParameterType::String, ParameterValue::String(value))
	}

	pub fn h160(value: &H160) -> Self {
		Self::with_value(ContractParameterType::Hash160, ParameterValue::H160(*value))
	}

	pub fn h256(value: &H256) -> Self {
		Self::with_value(ContractParameterType::Hash256, ParameterValue::H256(*value))
	}

	pub fn public_key(key: &Secp256r1PublicKey) -> Self {
		Self::with_value(
			ContractParameterType::PublicKey,
			ParameterValue::PublicKey(key.get_encoded(true)),
		)
	}

	/// Validates the 33-byte compressed encoding.
	pub fn public_key_from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
		Secp256r1PublicKey::from_bytes(bytes)
			.map_err(|_| TypeError::InvalidArgError("Invalid public key encoding".to_string()))?;
		if bytes.len() != 33 {
			return Err(TypeError::InvalidArgError(
				"Public key parameters must be 33 bytes".to_string(),
			));
		}
		Ok(Self::with_value(
			ContractParameterType::PublicKey,
			ParameterValue::PublicKey(bytes.to_vec()),
		))
	}

	/// Validates the 64-byte `r || s` length.
	pub fn signature(bytes: Vec<u8>) -> Result<Self, TypeError> {
		if bytes.len() != 64 {
			return Err(TypeError::InvalidArgError(
				"Signature parameters must be 64 bytes".to_string(),
			));
		}
		Ok(Self::with_value(ContractParameterType::Signature, ParameterValue::Signature(bytes)))
	}

	pub fn array(values: Vec<ContractParameter>) -> Self {
		Self::with_value(ContractParameterType::Array, ParameterValue::Array(values))
	}

	pub fn map(map: ContractParameterMap) -> Self {
		Self::with_value(ContractParameterType::Map, ParameterValue::Map(map))
	}
}

impl From<bool> for ContractParameter {
	fn from(value: bool) -> Self {
		Self::bool(value)
	}
}

impl From<i32> for ContractParameter {
	fn from(value: i32) -> Self {
		Self::integer(value)
	}
}

impl From<i64> for ContractParameter {
	fn from(value: i64) -> Self {
		Self::integer(value)
	}
}

impl From<u32> for ContractParameter {
	fn from(value: u32) -> Self {
		Self::integer(value)
	}
}

impl From<&str> for ContractParameter {
	fn from(value: &str) -> Self {
		Self::string(value.to_string())
	}
}

impl From<String> for ContractParameter {
	fn from(value: String) -> Self {
		Self::string(value)
	}
}

impl From<&[u8]> for ContractParameter {
	fn from(value: &[u8]) -> Self {
		Self::byte_array(value.to_vec())
	}
}

impl From<Vec<u8>> for ContractParameter {
	fn from(value: Vec<u8>) -> Self {
		Self::byte_array(value)
	}
}

impl From<&H160> for ContractParameter {
	fn from(value: &H160) -> Self {
		Self::h160(value)
	}
}

impl From<H160> for ContractParameter {
	fn from(value: H160) -> Self {
		Self::h160(&value)
	}
}

impl From<&H256> for ContractParameter {
	fn from(value: &H256) -> Self {
		Self::h256(value)
	}
}

impl From<&Secp256r1PublicKey> for ContractParameter {
	fn from(value: &Secp256r1PublicKey) -> Self {
		Self::public_key(value)
	}
}

impl From<Vec<ContractParameter>> for ContractParameter {
	fn from(value: Vec<ContractParameter>) -> Self {
		Self::array(value)
	}
}

impl Serialize for ContractParameter {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let entries = 1 + self.name.is_some() as usize + 1;
		let mut map = serializer.serialize_map(Some(entries))?;
		if let Some(name) = &self.name {
			map.serialize_entry("name", name)?;
		}
		map.serialize_entry("type", &self.typ)?;
		match &self.value {
			None => map.serialize_entry("value", &serde_json::Value::Null)?,
			Some(ParameterValue::Boolean(b)) => map.serialize_entry("value", b)?,
			Some(ParameterValue::Integer(i)) => map.serialize_entry("value", &i.to_string())?,
			Some(ParameterValue::ByteArray(bytes)) =>
				map.serialize_entry("value", &bytes.to_base64_string())?,
			Some(ParameterValue::Signature(bytes)) =>
				map.serialize_entry("value", &bytes.to_base64_string())?,
			Some(ParameterValue::String(s)) => map.serialize_entry("value", s)?,
			Some(ParameterValue::H160(h)) => map.serialize_entry("value", &h.to_hex())?,
			Some(ParameterValue::H256(h)) =>
				map.serialize_entry("value", &HashExtension::to_hex(h))?,
			Some(ParameterValue::PublicKey(bytes)) =>
				map.serialize_entry("value", &hex::encode(bytes))?,
			Some(ParameterValue::Array(values)) => map.serialize_entry("value", values)?,
			Some(ParameterValue::Map(entries)) => {
				#[derive(Serialize)]
				struct Entry<'a> {
					key: &'a ContractParameter,
					value: &'a ContractParameter,
				}
				let encoded: Vec<Entry> =
					entries.0.iter().map(|(key, value)| Entry { key, value }).collect();
				map.serialize_entry("value", &encoded)?;
			},
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for ContractParameter {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct ParamVisitor;

		impl<'de> Visitor<'de> for ParamVisitor {
			type Value = ContractParameter;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a contract parameter object")
			}

			fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut name: Option<String> = None;
				let mut typ: Option<ContractParameterType> = None;
				let mut raw_value: Option<serde_json::Value> = None;

				while let Some(key) = access.next_key::<String>()? {
					match key.as_str() {
						"name" => name = access.next_value()?,
						"type" => typ = Some(access.next_value()?),
						"value" => raw_value = Some(access.next_value()?),
						_ => {
							let _: serde_json::Value = access.next_value()?;
						},
					}
				}

				let typ = typ.ok_or_else(|| de::Error::missing_field("type"))?;
				let value = decode_value(typ, raw_value).map_err(de::Error::custom)?;
				Ok(ContractParameter { name, typ, value })
			}
		}

		deserializer.deserialize_map(ParamVisitor)
	}
}

fn decode_value(
	typ: ContractParameterType,
	raw: Option<serde_json::Value>,
) -> Result<Option<ParameterValue>, String> {
	use serde_json::Value;

	let raw = match raw {
		None | Some(Value::Null) => return Ok(None),
		Some(raw) => raw,
	};

	let string_of = |raw: &Value| -> Result<String, String> {
		raw.as_str().map(str::to_string).ok_or_else(|| format!("expected string for {typ}"))
	};

	let value = match typ {
		ContractParameterType::Any | ContractParameterType::Void |
		ContractParameterType::InteropInterface => return Ok(None),
		ContractParameterType::Boolean => match raw {
			Value::Bool(b) => ParameterValue::Boolean(b),
			Value::String(s) => ParameterValue::Boolean(s == "true"),
			_ => return Err("expected boolean".to_string()),
		},
		ContractParameterType::Integer => {
			let text = match &raw {
				Value::Number(n) => n.to_string(),
				Value::String(s) => s.clone(),
				_ => return Err("expected integer".to_string()),
			};
			ParameterValue::Integer(text.parse::<BigInt>().map_err(|e| e.to_string())?)
		},
		ContractParameterType::ByteArray => ParameterValue::ByteArray(
			string_of(&raw)?.from_base64_string().map_err(|e| e.to_string())?,
		),
		ContractParameterType::Signature => {
			let bytes = string_of(&raw)?.from_base64_string().map_err(|e| e.to_string())?;
			if bytes.len() != 64 {
				return Err(format!("signature must be 64 bytes, got {}", bytes.len()));
			}
			ParameterValue::Signature(bytes)
		},
		ContractParameterType::String => ParameterValue::String(string_of(&raw)?),
		ContractParameterType::Hash160 => ParameterValue::H160(
			H160::from_hex(&string_of(&raw)?).map_err(|e| e.to_string())?,
		),
		ContractParameterType::Hash256 => ParameterValue::H256(
			H256::from_hex(&string_of(&raw)?).map_err(|e| e.to_string())?,
		),
		ContractParameterType::PublicKey => {
			let bytes = hex::decode(string_of(&raw)?).map_err(|e| e.to_string())?;
			if bytes.len() != 33 {
				return Err(format!("public key must be 33 bytes, got {}", bytes.len()));
			}
			ParameterValue::PublicKey(bytes)
		},
		ContractParameterType::Array => {
			let values: Vec<ContractParameter> =
				serde_json::from_value(raw).map_err(|e| e.to_string())?;
			ParameterValue::Array(values)
		},
		ContractParameterType::Map => {
			#[derive(Deserialize)]
			struct Entry {
				key: ContractParameter,
				value: ContractParameter,
			}
			let entries: Vec<Entry> = serde_json::from_value(raw).map_err(|e| e.to_string())?;
			let mut map = ContractParameterMap::new();
			for entry in entries {
				map.insert(entry.key, entry.value).map_err(|e| e.to_string())?;
			}
			ParameterValue::Map(map)
		},
	};

	Ok(Some(value))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn round_trip(param: &ContractParameter) -> ContractParameter {
		let json = serde_json::to_string(param).unwrap();
		serde_json::from_str(&json).unwrap()
	}

	#[test]
	fn test_integer_encoding_is_decimal_string() {
		let param = ContractParameter::integer(1_0000_0000i64);
		let json = serde_json::to_value(&param).unwrap();
		assert_eq!(json["type"], "Integer");
		assert_eq!(json["value"], "100000000");
		assert_eq!(round_trip(&param), param);
	}

	#[test]
	fn test_byte_array_encoding_is_base64() {
		let param = ContractParameter::byte_array(vec![0x01, 0x02, 0x03]);
		let json = serde_json::to_value(&param).unwrap();
		assert_eq!(json["value"], "AQID");
		assert_eq!(round_trip(&param), param);
	}

	#[test]
	fn test_hash_encoding_is_plain_hex() {
		let hash = H160::from_hex("23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap();
		let param = ContractParameter::h160(&hash);
		let json = serde_json::to_value(&param).unwrap();
		assert_eq!(json["value"], "23ba2703c53263e8d6e522dc32203339dcd8eee9");
		assert_eq!(round_trip(&param), param);
	}

	#[test]
	fn test_signature_length_enforced() {
		assert!(ContractParameter::signature(vec![0u8; 63]).is_err());
		assert!(ContractParameter::signature(vec![0u8; 64]).is_ok());
	}

	#[test]
	fn test_public_key_length_enforced() {
		assert!(ContractParameter::public_key_from_bytes(&[2u8; 20]).is_err());
	}

	#[test]
	fn test_map_rejects_nested_container_keys() {
		let mut map = ContractParameterMap::new();
		assert!(map
			.insert(ContractParameter::array(vec![]), ContractParameter::integer(1))
			.is_err());
		assert!(map
			.insert(ContractParameter::string("ok".to_string()), ContractParameter::integer(1))
			.is_ok());
	}

	#[test]
	fn test_map_round_trip() {
		let mut map = ContractParameterMap::new();
		map.insert(ContractParameter::string("first".to_string()), ContractParameter::bool(true))
			.unwrap();
		let param = ContractParameter::map(map);
		assert_eq!(round_trip(&param), param);
	}

	#[test]
	fn test_any_carries_null_value() {
		let json = serde_json::to_value(ContractParameter::any()).unwrap();
		assert!(json["value"].is_null());
	}

	#[test]
	fn test_nested_array_round_trip() {
		let param = ContractParameter::array(vec![
			ContractParameter::integer(-1),
			ContractParameter::array(vec![ContractParameter::from("inner")]),
			ContractParameter::any(),
		]);
		assert_eq!(round_trip(&param), param);
	}
}
