pub use common::*;
pub use http_provider::*;
pub use iterator::*;
pub use rpc_client::*;

mod common;
mod http_provider;
mod iterator;
mod rpc_client;

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::neo_clients::ProviderError;

/// The transport a [`RpcClient`] speaks through: one method exchanging a
/// request for a response. This is the only suspension point of the
/// crate; everything above it is synchronous.
///
/// Implementations must tolerate concurrent invocations and issue a
/// unique request id per call.
#[async_trait]
pub trait JsonRpcProvider: Debug + Send + Sync {
	type Error: Into<ProviderError> + Send + Sync + std::error::Error;

	async fn fetch<T: Serialize + Send + Sync, R: DeserializeOwned>(
		&self,
		method: &str,
		params: T,
	) -> Result<R, Self::Error>;
}
