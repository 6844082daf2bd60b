use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use url::Url;

use crate::neo_clients::{
	rpc::{JsonRpcProvider, Request, Response},
	JsonRpcError, ProviderError,
};

/// The bundled HTTP transport: JSON-RPC 2.0 over `reqwest`, one request
/// id counter per provider so concurrent calls never share an id.
#[derive(Debug)]
pub struct Http {
	id: AtomicU64,
	client: Client,
	url: Url,
}

/// Errors the HTTP transport can produce.
#[derive(Error, Debug)]
pub enum HttpClientError {
	#[error(transparent)]
	ReqwestError(#[from] reqwest::Error),

	#[error("JSON-RPC error: {0}")]
	JsonRpcError(JsonRpcError),

	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}

impl From<HttpClientError> for ProviderError {
	fn from(error: HttpClientError) -> Self {
		match error {
			HttpClientError::JsonRpcError(err) => ProviderError::RpcError(err),
			HttpClientError::ReqwestError(err) => ProviderError::TransportError(err.to_string()),
			HttpClientError::SerdeJson(err) => ProviderError::SerdeJson(err),
		}
	}
}

impl Http {
	/// Creates a transport for the given node URL.
	pub fn new(url: impl AsRef<str>) -> Result<Self, ProviderError> {
		let url = Url::parse(url.as_ref())
			.map_err(|e| ProviderError::ParseError(format!("Invalid node URL: {e}")))?;
		Ok(Self { id: AtomicU64::new(1), client: Client::new(), url })
	}

	pub fn with_client(url: Url, client: Client) -> Self {
		Self { id: AtomicU64::new(1), client, url }
	}

	pub fn url(&self) -> &Url {
		&self.url
	}
}

impl Clone for Http {
	fn clone(&self) -> Self {
		Self {
			id: AtomicU64::new(self.id.load(Ordering::SeqCst)),
			client: self.client.clone(),
			url: self.url.clone(),
		}
	}
}

#[async_trait]
impl JsonRpcProvider for Http {
	type Error = HttpClientError;

	async fn fetch<T: Serialize + Send + Sync, R: DeserializeOwned>(
		&self,
		method: &str,
		params: T,
	) -> Result<R, Self::Error> {
		let next_id = self.id.fetch_add(1, Ordering::SeqCst);
		let payload = Request::new(next_id, method, params);

		let res = self.client.post(self.url.clone()).json(&payload).send().await?;
		let body = res.bytes().await?;

		let response: Response<R> = serde_json::from_slice(&body)?;
		response.data.into_result().map_err(HttpClientError::JsonRpcError)
	}
}
