use serde::{Deserialize, Serialize};

use crate::neo_types::{StackItem, VMState};

/// The result of `invokescript` / `invokefunction`: the VM terminal state,
/// gas consumed by the dry run and the result stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
	#[serde(default)]
	pub script: String,

	pub state: VMState,

	/// GAS fractions consumed; nodes emit this as a decimal string.
	#[serde(rename = "gasconsumed")]
	pub gas_consumed: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exception: Option<String>,

	#[serde(default)]
	pub stack: Vec<StackItem>,

	/// Server-side iterator session, present when the node has sessions
	/// enabled and the stack contains an iterator.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub diagnostics: Option<serde_json::Value>,

	/// Base64 transaction bytes, populated by wallet-enabled nodes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tx: Option<String>,
}

impl InvocationResult {
	pub fn has_state_fault(&self) -> bool {
		self.state == VMState::Fault
	}

	/// Gas consumed parsed into fee fractions.
	pub fn gas_consumed_fractions(&self) -> i64 {
		self.gas_consumed.parse::<i64>().unwrap_or(0)
	}

	pub fn first_stack_item(&self) -> Option<&StackItem> {
		self.stack.first()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_halt_result() {
		let json = r#"{
			"script": "EMAMCGRlY2ltYWxzDBTPduiL0AYsSkeO41VhARMZ88+k0kFifVtS",
			"state": "HALT",
			"gasconsumed": "999972",
			"exception": null,
			"stack": [{"type": "Integer", "value": "8"}]
		}"#;
		let result: InvocationResult = serde_json::from_str(json).unwrap();
		assert!(!result.has_state_fault());
		assert_eq!(result.gas_consumed_fractions(), 999_972);
		assert_eq!(result.first_stack_item().unwrap().as_int(), Some(8));
	}

	#[test]
	fn test_decode_fault_result() {
		let json = r#"{
			"script": "EA==",
			"state": "FAULT",
			"gasconsumed": "180",
			"exception": "Object reference not set to an instance of an object.",
			"stack": []
		}"#;
		let result: InvocationResult = serde_json::from_str(json).unwrap();
		assert!(result.has_state_fault());
		assert!(result.exception.is_some());
	}

	#[test]
	fn test_decode_session_id() {
		let json = r#"{
			"script": "AA==",
			"state": "HALT",
			"gasconsumed": "1",
			"stack": [],
			"session": "c5b6b942-34eb-40d9-9c4f-d0b337f44a21"
		}"#;
		let result: InvocationResult = serde_json::from_str(json).unwrap();
		assert_eq!(result.session.as_deref(), Some("c5b6b942-34eb-40d9-9c4f-d0b337f44a21"));
	}
}
