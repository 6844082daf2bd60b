use std::{
	collections::{HashMap, VecDeque},
	sync::Mutex,
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::neo_clients::{rpc::JsonRpcProvider, JsonRpcError, ProviderError};

/// An in-process transport for tests: responses are queued per method
/// and every request is recorded for later assertions.
///
/// ```rust
/// use neo3_core::neo_clients::{MockProvider, RpcClient};
/// use serde_json::json;
///
/// # async fn example() {
/// let provider = MockProvider::new();
/// provider.mock_response("getblockcount", json!(123456));
/// let client = RpcClient::new(provider);
/// assert_eq!(client.get_block_count().await.unwrap(), 123456);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockProvider {
	responses: Mutex<HashMap<String, VecDeque<Result<serde_json::Value, JsonRpcError>>>>,
	requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a successful result for the next call of `method`.
	pub fn mock_response(&self, method: &str, result: serde_json::Value) {
		self.responses
			.lock()
			.expect("mock provider poisoned")
			.entry(method.to_string())
			.or_default()
			.push_back(Ok(result));
	}

	/// Queues a JSON-RPC error for the next call of `method`.
	pub fn mock_error(&self, method: &str, code: i64, message: &str) {
		self.responses
			.lock()
			.expect("mock provider poisoned")
			.entry(method.to_string())
			.or_default()
			.push_back(Err(JsonRpcError { code, message: message.to_string(), data: None }));
	}

	/// Every `(method, params)` pair seen so far, in call order.
	pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
		self.requests.lock().expect("mock provider poisoned").clone()
	}

	/// The recorded parameters of the latest call of `method`.
	pub fn last_params_of(&self, method: &str) -> Option<serde_json::Value> {
		self.requests()
			.into_iter()
			.rev()
			.find(|(m, _)| m == method)
			.map(|(_, params)| params)
	}
}

#[async_trait]
impl JsonRpcProvider for MockProvider {
	type Error = ProviderError;

	async fn fetch<T: Serialize + Send + Sync, R: DeserializeOwned>(
		&self,
		method: &str,
		params: T,
	) -> Result<R, Self::Error> {
		let params_value = serde_json::to_value(&params)?;
		self.requests
			.lock()
			.expect("mock provider poisoned")
			.push((method.to_string(), params_value));

		let queued = self
			.responses
			.lock()
			.expect("mock provider poisoned")
			.get_mut(method)
			.and_then(VecDeque::pop_front);

		match queued {
			Some(Ok(result)) => serde_json::from_value(result).map_err(ProviderError::SerdeJson),
			Some(Err(error)) => Err(ProviderError::RpcError(error)),
			None => Err(ProviderError::TransportError(format!(
				"no mocked response queued for '{method}'"
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::neo_clients::RpcClient;

	#[tokio::test]
	async fn test_queued_responses_and_recording() {
		let provider = MockProvider::new();
		provider.mock_response("getblockcount", json!(10));
		provider.mock_response("getblockcount", json!(11));

		let client = RpcClient::new(provider);
		assert_eq!(client.get_block_count().await.unwrap(), 10);
		assert_eq!(client.get_block_count().await.unwrap(), 11);
		assert!(client.get_block_count().await.is_err());

		assert_eq!(client.as_ref().requests().len(), 3);
	}

	#[tokio::test]
	async fn test_method_not_found_maps_to_unsupported_operation() {
		let provider = MockProvider::new();
		provider.mock_error("getnep17balances", -32601, "Method not found");

		let client = RpcClient::new(provider);
		let err = client.get_nep17_balances(primitive_types::H160::zero()).await.unwrap_err();
		assert!(matches!(err, ProviderError::UnsupportedOperation(method) if method == "getnep17balances"));
	}
}
