use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::neo_types::TypeError;

/// A JSON-RPC 2.0 error object returned by a Neo node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
	pub code: i64,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
}

impl fmt::Display for JsonRpcError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(code: {}, message: {}, data: {:?})", self.code, self.message, self.data)
	}
}

/// Errors surfaced by the RPC envelope and the bundled transports.
#[derive(Error, Debug)]
pub enum ProviderError {
	/// The node answered with a JSON-RPC error object.
	#[error("JSON-RPC error: {0}")]
	RpcError(JsonRpcError),

	/// The transport failed before a JSON-RPC answer arrived. Retriable.
	#[error("Transport error: {0}")]
	TransportError(String),

	/// The RPC requires a plugin the node does not advertise.
	#[error("Unsupported operation: {0}")]
	UnsupportedOperation(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Illegal state: {0}")]
	IllegalState(String),

	#[error("Invalid address")]
	InvalidAddress,

	#[error("The node's getversion response carries no protocol section")]
	ProtocolNotFound,

	#[error("Network magic not configured and not discoverable")]
	NetworkNotFound,

	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),

	#[error(transparent)]
	TypeError(#[from] TypeError),

	#[error("Custom error: {0}")]
	CustomError(String),
}

impl ProviderError {
	/// Whether the JSON-RPC error says the method is missing, i.e. the
	/// backing plugin is not loaded.
	pub fn is_method_not_found(&self) -> bool {
		matches!(self, ProviderError::RpcError(err) if err.code == -32601)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rpc_error_decodes_with_and_without_data() {
		let with_data: JsonRpcError = serde_json::from_str(
			r#"{"code": -32602, "message": "Invalid params", "data": "details"}"#,
		)
		.unwrap();
		assert_eq!(with_data.code, -32602);
		assert!(with_data.data.is_some());

		let without: JsonRpcError =
			serde_json::from_str(r#"{"code": -32601, "message": "Method not found"}"#).unwrap();
		assert!(ProviderError::RpcError(without).is_method_not_found());
	}
}
