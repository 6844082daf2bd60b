use serde::{Deserialize, Serialize};

use crate::neo_types::deserialize_i64_from_string_or_number;

/// One entry of the `listplugins` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
	pub name: String,
	pub version: String,
	#[serde(default)]
	pub interfaces: Vec<String>,
}

/// The `validateaddress` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateAddress {
	pub address: String,
	#[serde(rename = "isvalid")]
	pub is_valid: bool,
}

/// The `calculatenetworkfee` response. Nodes emit the fee as a decimal
/// string or a number depending on version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoNetworkFee {
	#[serde(
		rename = "networkfee",
		deserialize_with = "deserialize_i64_from_string_or_number"
	)]
	pub network_fee: i64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_network_fee_decodes_string_and_number() {
		let from_string: NeoNetworkFee =
			serde_json::from_str(r#"{"networkfee": "1230610"}"#).unwrap();
		let from_number: NeoNetworkFee =
			serde_json::from_str(r#"{"networkfee": 1230610}"#).unwrap();
		assert_eq!(from_string.network_fee, 1_230_610);
		assert_eq!(from_string, from_number);
	}

	#[test]
	fn test_decode_plugins() {
		let json = r#"[{
			"name": "TokensTracker",
			"version": "3.6.0",
			"interfaces": ["IPersistencePlugin"]
		}]"#;
		let plugins: Vec<Plugin> = serde_json::from_str(json).unwrap();
		assert_eq!(plugins[0].name, "TokensTracker");
	}
}
