use primitive_types::{H160, H256};
use serde::{Deserialize, Serialize};

use crate::neo_types::{
	deserialize_h256, deserialize_script_hash, serialize_h256, serialize_script_hash, StackItem,
	VMState,
};

/// The `getapplicationlog` response: one execution record per trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLog {
	#[serde(
		rename = "txid",
		serialize_with = "serialize_h256",
		deserialize_with = "deserialize_h256"
	)]
	pub transaction_id: H256,

	#[serde(default)]
	pub executions: Vec<Execution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
	#[serde(default)]
	pub trigger: String,

	#[serde(rename = "vmstate")]
	pub state: VMState,

	#[serde(default)]
	pub exception: Option<String>,

	#[serde(rename = "gasconsumed", default)]
	pub gas_consumed: String,

	#[serde(default)]
	pub stack: Vec<StackItem>,

	#[serde(default)]
	pub notifications: Vec<Notification>,
}

/// An event a contract raised during execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
	#[serde(
		serialize_with = "serialize_script_hash",
		deserialize_with = "deserialize_script_hash"
	)]
	pub contract: H160,

	#[serde(rename = "eventname")]
	pub event_name: String,

	pub state: StackItem,
}

impl ApplicationLog {
	pub fn first_execution(&self) -> Option<&Execution> {
		self.executions.first()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_application_log() {
		let json = r#"{
			"txid": "0xb386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9",
			"executions": [{
				"trigger": "Application",
				"vmstate": "HALT",
				"exception": null,
				"gasconsumed": "9977780",
				"stack": [],
				"notifications": [{
					"contract": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
					"eventname": "Transfer",
					"state": {
						"type": "Array",
						"value": [
							{"type": "Any", "value": null},
							{"type": "ByteString", "value": "JuumWS2ftrBEJgSM1Ykf8OP+y6c="},
							{"type": "Integer", "value": "100000000"}
						]
					}
				}]
			}]
		}"#;
		let log: ApplicationLog = serde_json::from_str(json).unwrap();
		let execution = log.first_execution().unwrap();
		assert_eq!(execution.state, VMState::Halt);
		assert_eq!(execution.notifications.len(), 1);
		assert_eq!(execution.notifications[0].event_name, "Transfer");
		let transferred = execution.notifications[0].state.as_array().unwrap()[2].as_int();
		assert_eq!(transferred, Some(100_000_000));
	}
}
