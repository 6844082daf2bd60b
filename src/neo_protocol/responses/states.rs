use serde::{Deserialize, Serialize};

use crate::neo_protocol::NeoWitness;

/// The `getstateroot` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRoot {
	#[serde(default)]
	pub version: u32,

	pub index: u32,

	#[serde(rename = "roothash")]
	pub root_hash: String,

	#[serde(default)]
	pub witnesses: Vec<NeoWitness>,
}

/// The `findstates` response. Keys, values and proofs are base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct States {
	#[serde(rename = "firstProof", default)]
	pub first_proof: Option<String>,

	#[serde(rename = "lastProof", default)]
	pub last_proof: Option<String>,

	#[serde(default)]
	pub truncated: bool,

	#[serde(default)]
	pub results: Vec<StateResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResult {
	pub key: String,
	pub value: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_find_states() {
		let json = r#"{
			"truncated": true,
			"results": [
				{"key": "AQ==", "value": "Ag=="}
			]
		}"#;
		let states: States = serde_json::from_str(json).unwrap();
		assert!(states.truncated);
		assert_eq!(states.results.len(), 1);
	}
}
