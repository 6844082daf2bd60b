use serde::{Deserialize, Serialize};

use crate::neo_clients::JsonRpcError;

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct Request<'a, T> {
	pub jsonrpc: &'static str,
	pub method: &'a str,
	pub params: T,
	pub id: u64,
}

impl<'a, T> Request<'a, T> {
	pub fn new(id: u64, method: &'a str, params: T) -> Self {
		Self { jsonrpc: "2.0", method, params, id }
	}
}

/// A JSON-RPC 2.0 response envelope: either a `result` or an `error`.
#[derive(Debug, Deserialize)]
pub struct Response<T> {
	#[serde(default)]
	pub id: Option<u64>,
	#[serde(default)]
	pub jsonrpc: Option<String>,
	#[serde(flatten)]
	pub data: ResponseData<T>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseData<T> {
	Error { error: JsonRpcError },
	Success { result: T },
}

impl<T> ResponseData<T> {
	pub fn into_result(self) -> Result<T, JsonRpcError> {
		match self {
			ResponseData::Success { result } => Ok(result),
			ResponseData::Error { error } => Err(error),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_request_shape() {
		let request = Request::new(7, "getblockcount", Vec::<u32>::new());
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["jsonrpc"], "2.0");
		assert_eq!(json["method"], "getblockcount");
		assert_eq!(json["id"], 7);
		assert!(json["params"].as_array().unwrap().is_empty());
	}

	#[test]
	fn test_success_response() {
		let response: Response<u32> =
			serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":42}"#).unwrap();
		assert_eq!(response.data.into_result().unwrap(), 42);
	}

	#[test]
	fn test_error_response() {
		let response: Response<u32> = serde_json::from_str(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#,
		)
		.unwrap();
		let error = response.data.into_result().unwrap_err();
		assert_eq!(error.code, -32601);
	}

	#[test]
	fn test_unknown_fields_ignored() {
		let response: Response<u32> =
			serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":5,"extra":"field"}"#)
				.unwrap();
		assert_eq!(response.data.into_result().unwrap(), 5);
	}
}
