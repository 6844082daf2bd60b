use num_bigint::BigInt;
use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::{
	crypto::FromBase64String,
	neo_types::{ScriptHashExtension, TypeError},
};

/// A NeoVM stack item as returned in invocation results and application
/// logs, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StackItem {
	Any {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		value: Option<serde_json::Value>,
	},
	Pointer {
		value: i64,
	},
	Boolean {
		value: bool,
	},
	/// The VM integer travels as a decimal string.
	Integer {
		value: String,
	},
	/// Base64-encoded bytes.
	ByteString {
		value: String,
	},
	/// Base64-encoded bytes.
	Buffer {
		value: String,
	},
	Array {
		value: Vec<StackItem>,
	},
	Struct {
		value: Vec<StackItem>,
	},
	Map {
		value: Vec<MapEntry>,
	},
	InteropInterface {
		interface: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		id: Option<String>,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
	pub key: StackItem,
	pub value: StackItem,
}

impl StackItem {
	pub fn new_integer(value: impl Into<BigInt>) -> Self {
		StackItem::Integer { value: value.into().to_string() }
	}

	pub fn new_byte_string(bytes: &[u8]) -> Self {
		use base64::{engine::general_purpose, Engine};
		StackItem::ByteString { value: general_purpose::STANDARD.encode(bytes) }
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			StackItem::Boolean { value } => Some(*value),
			StackItem::Integer { value } => value.parse::<BigInt>().ok().map(|i| i != BigInt::from(0)),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			StackItem::Integer { value } => value.parse::<i64>().ok(),
			StackItem::Boolean { value } => Some(*value as i64),
			_ => None,
		}
	}

	pub fn as_big_int(&self) -> Option<BigInt> {
		match self {
			StackItem::Integer { value } => value.parse::<BigInt>().ok(),
			StackItem::Boolean { value } => Some(BigInt::from(*value as i64)),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<Vec<u8>> {
		match self {
			StackItem::ByteString { value } | StackItem::Buffer { value } =>
				value.from_base64_string().ok(),
			StackItem::Integer { value } =>
				value.parse::<BigInt>().ok().map(|i| i.to_signed_bytes_le()),
			_ => None,
		}
	}

	/// Bytes interpreted as UTF-8.
	pub fn as_string(&self) -> Option<String> {
		match self {
			StackItem::ByteString { value } | StackItem::Buffer { value } =>
				value.from_base64_string().ok().and_then(|b| String::from_utf8(b).ok()),
			StackItem::Integer { value } => Some(value.clone()),
			StackItem::Boolean { value } => Some(value.to_string()),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[StackItem]> {
		match self {
			StackItem::Array { value } | StackItem::Struct { value } => Some(value),
			_ => None,
		}
	}

	/// A 20-byte item read as a little-endian script hash and converted
	/// to an address.
	pub fn as_address(&self) -> Result<String, TypeError> {
		let mut bytes = self
			.as_bytes()
			.ok_or_else(|| TypeError::UnexpectedReturnType("not a byte item".to_string()))?;
		if bytes.len() != 20 {
			return Err(TypeError::UnexpectedReturnType(format!(
				"expected 20 bytes, got {}",
				bytes.len()
			)));
		}
		bytes.reverse();
		Ok(<H160 as ScriptHashExtension>::from_slice(&bytes)?.to_address())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, StackItem::Any { value: None })
	}
}
