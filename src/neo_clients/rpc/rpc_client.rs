use std::{fmt::Debug, sync::Arc};

use futures_util::lock::Mutex;
use primitive_types::{H160, H256};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::trace;
use tracing_futures::Instrument;

use crate::{
	builder::{Signer, TransactionSigner},
	crypto::ToBase64String,
	neo_clients::{rpc::JsonRpcProvider, ProviderError},
	neo_config::{NeoConfig, RawBlockEncoding},
	neo_protocol::{
		ApplicationLog, NeoBlock, NeoNetworkFee, NeoVersion, Nep17Balances, Nep17Transfers,
		Plugin, RTransaction, RawTransaction, StateRoot, States, UnclaimedGas, ValidateAddress,
	},
	neo_types::{ContractParameter, HashExtension, InvocationResult, ScriptHashExtension,
		StackItem},
};

/// A client for the Neo JSON-RPC API, generic over the transport it
/// speaks through.
///
/// # Example
///
/// ```no_run
/// use neo3_core::neo_clients::{Http, RpcClient};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = Http::new("https://testnet1.neo.org:443")?;
///     let client = RpcClient::new(provider);
///
///     let count = client.get_block_count().await?;
///     println!("height: {count}");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct RpcClient<P> {
	provider: P,
	config: NeoConfig,
	// getversion-discovered network magic, fetched once per client.
	magic: Arc<Mutex<Option<u32>>>,
}

impl<P: Clone> Clone for RpcClient<P> {
	fn clone(&self) -> Self {
		Self {
			provider: self.provider.clone(),
			config: self.config.clone(),
			magic: Arc::clone(&self.magic),
		}
	}
}

impl<P> AsRef<P> for RpcClient<P> {
	fn as_ref(&self) -> &P {
		&self.provider
	}
}

impl<P: JsonRpcProvider> RpcClient<P> {
	/// Instantiates a new client with the default configuration.
	pub fn new(provider: P) -> Self {
		Self::with_config(provider, NeoConfig::default())
	}

	pub fn with_config(provider: P, config: NeoConfig) -> Self {
		Self { provider, config, magic: Arc::new(Mutex::new(None)) }
	}

	pub fn config(&self) -> &NeoConfig {
		&self.config
	}

	pub fn address_version(&self) -> u8 {
		self.config.address_version
	}

	pub fn max_valid_until_block_increment(&self) -> u32 {
		self.config.max_valid_until_block_increment
	}

	pub fn allows_transmission_on_fault(&self) -> bool {
		self.config.allow_transmission_on_fault
	}

	/// Makes an RPC request and decodes the result.
	///
	/// A JSON-RPC "method not found" answer surfaces as
	/// [`ProviderError::UnsupportedOperation`] carrying the method name,
	/// since it means the backing plugin is not loaded on the node.
	pub async fn request<T, R>(&self, method: &str, params: T) -> Result<R, ProviderError>
	where
		T: Debug + Serialize + Send + Sync,
		R: DeserializeOwned + Send,
	{
		let span =
			tracing::trace_span!("rpc", method = method, params = ?serde_json::to_string(&params));
		async move {
			let result: Result<R, ProviderError> =
				self.provider.fetch(method, params).await.map_err(Into::into);
			match result {
				Err(ref err) if err.is_method_not_found() =>
					Err(ProviderError::UnsupportedOperation(method.to_string())),
				other => {
					trace!(ok = other.is_ok());
					other
				},
			}
		}
		.instrument(span)
		.await
	}

	/// The network magic mixed into signing digests: the configured
	/// value if set, otherwise discovered once via `getversion`.
	pub async fn network(&self) -> Result<u32, ProviderError> {
		if let Some(magic) = self.config.network_magic {
			return Ok(magic);
		}

		let mut cached = self.magic.lock().await;
		if let Some(magic) = *cached {
			return Ok(magic);
		}

		let version = self.get_version().await?;
		let protocol = version.protocol.ok_or(ProviderError::ProtocolNotFound)?;
		*cached = Some(protocol.network);
		Ok(protocol.network)
	}

	// Blockchain methods

	pub async fn get_best_block_hash(&self) -> Result<H256, ProviderError> {
		let hash: String = self.request("getbestblockhash", Vec::<u32>::new()).await?;
		H256::from_hex(&hash).map_err(Into::into)
	}

	pub async fn get_block_hash(&self, block_index: u32) -> Result<H256, ProviderError> {
		let hash: String = self.request("getblockhash", [json!(block_index)].to_vec()).await?;
		H256::from_hex(&hash).map_err(Into::into)
	}

	/// Fetches a block, with full transaction objects or just the
	/// header.
	pub async fn get_block(
		&self,
		block_hash: H256,
		full_tx: bool,
	) -> Result<NeoBlock, ProviderError> {
		if full_tx {
			self.request("getblock", json!([block_hash.to_hex(), 1])).await
		} else {
			self.get_block_header(block_hash).await
		}
	}

	pub async fn get_block_by_index(
		&self,
		index: u32,
		full_tx: bool,
	) -> Result<NeoBlock, ProviderError> {
		let verbose = if full_tx { "getblock" } else { "getblockheader" };
		self.request(verbose, json!([index, 1])).await
	}

	pub async fn get_block_header(&self, block_hash: H256) -> Result<NeoBlock, ProviderError> {
		self.request("getblockheader", json!([block_hash.to_hex(), 1])).await
	}

	/// The serialized block as base64.
	pub async fn get_raw_block(&self, block_hash: H256) -> Result<String, ProviderError> {
		self.request("getblock", json!([block_hash.to_hex(), 0])).await
	}

	pub async fn get_block_count(&self) -> Result<u32, ProviderError> {
		self.request("getblockcount", Vec::<u32>::new()).await
	}

	pub async fn get_version(&self) -> Result<NeoVersion, ProviderError> {
		self.request("getversion", Vec::<u32>::new()).await
	}

	pub async fn get_committee(&self) -> Result<Vec<String>, ProviderError> {
		self.request("getcommittee", Vec::<u32>::new()).await
	}

	// Contract and storage methods

	/// `getcontractstate` takes the contract hash as plain hex without a
	/// `0x` prefix.
	pub async fn get_contract_state(
		&self,
		hash: H160,
	) -> Result<serde_json::Value, ProviderError> {
		self.request("getcontractstate", vec![hash.to_hex()]).await
	}

	/// `getstorage` keys travel base64-encoded.
	pub async fn get_storage(
		&self,
		contract_hash: H160,
		key: &[u8],
	) -> Result<String, ProviderError> {
		self.request("getstorage", vec![contract_hash.to_hex(), key.to_base64_string()]).await
	}

	// Transaction methods

	pub async fn get_transaction(&self, hash: H256) -> Result<RTransaction, ProviderError> {
		self.request("getrawtransaction", json!([hash.to_hex(), 1])).await
	}

	/// The serialized transaction as base64.
	pub async fn get_raw_transaction(&self, hash: H256) -> Result<String, ProviderError> {
		self.request("getrawtransaction", json!([hash.to_hex(), 0])).await
	}

	pub async fn get_transaction_height(&self, hash: H256) -> Result<u32, ProviderError> {
		self.request("gettransactionheight", vec![hash.to_hex()]).await
	}

	pub async fn get_application_log(&self, hash: H256) -> Result<ApplicationLog, ProviderError> {
		self.request("getapplicationlog", vec![hash.to_hex()]).await
	}

	/// Broadcasts a signed transaction, base64-encoded.
	pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<RawTransaction, ProviderError> {
		self.request("sendrawtransaction", vec![raw.to_base64_string()]).await
	}

	/// Submits a block. The encoding defaults to base64; when the node
	/// rejects the parameters in a way that suggests it expected hex,
	/// the call retries once with hex.
	pub async fn submit_block(&self, block: &[u8]) -> Result<serde_json::Value, ProviderError> {
		let first = match self.config.raw_block_encoding {
			RawBlockEncoding::Base64 => block.to_base64_string(),
			RawBlockEncoding::Hex => hex::encode(block),
		};
		match self.request("submitblock", vec![first]).await {
			Err(ProviderError::RpcError(err))
				if self.config.raw_block_encoding == RawBlockEncoding::Base64
					&& err.code == -32602 =>
				self.request("submitblock", vec![hex::encode(block)]).await,
			other => other,
		}
	}

	/// Prices the network fee for serialized transaction bytes.
	pub async fn calculate_network_fee(
		&self,
		raw_tx: &[u8],
	) -> Result<NeoNetworkFee, ProviderError> {
		self.request("calculatenetworkfee", vec![raw_tx.to_base64_string()]).await
	}

	// Invocation methods

	/// `invokefunction` takes the contract hash as plain hex, then the
	/// method, parameters and signers.
	pub async fn invoke_function(
		&self,
		contract_hash: &H160,
		method: String,
		params: Vec<ContractParameter>,
		signers: Option<Vec<Signer>>,
	) -> Result<InvocationResult, ProviderError> {
		let signers: Vec<TransactionSigner> =
			signers.unwrap_or_default().iter().map(Signer::to_transaction_signer).collect();
		self.request("invokefunction", json!([contract_hash.to_hex(), method, params, signers]))
			.await
	}

	/// `invokescript` takes the script base64-encoded.
	pub async fn invoke_script(
		&self,
		script: &[u8],
		signers: &[Signer],
	) -> Result<InvocationResult, ProviderError> {
		let signers: Vec<TransactionSigner> =
			signers.iter().map(Signer::to_transaction_signer).collect();
		self.request("invokescript", json!([script.to_base64_string(), signers])).await
	}

	// Iterator session methods

	pub async fn traverse_iterator(
		&self,
		session_id: &str,
		iterator_id: &str,
		count: u32,
	) -> Result<Vec<StackItem>, ProviderError> {
		self.request("traverseiterator", json!([session_id, iterator_id, count])).await
	}

	pub async fn terminate_session(&self, session_id: &str) -> Result<bool, ProviderError> {
		self.request("terminatesession", vec![session_id]).await
	}

	// Node methods

	pub async fn list_plugins(&self) -> Result<Vec<Plugin>, ProviderError> {
		self.request("listplugins", Vec::<u32>::new()).await
	}

	pub async fn validate_address(&self, address: &str) -> Result<ValidateAddress, ProviderError> {
		self.request("validateaddress", vec![address]).await
	}

	// Token tracker methods; these take addresses, not script-hash hex.

	pub async fn get_nep17_balances(&self, account: H160) -> Result<Nep17Balances, ProviderError> {
		self.request(
			"getnep17balances",
			vec![account.to_address_with_version(self.config.address_version)],
		)
		.await
	}

	pub async fn get_nep17_transfers(
		&self,
		account: H160,
	) -> Result<Nep17Transfers, ProviderError> {
		self.request(
			"getnep17transfers",
			vec![account.to_address_with_version(self.config.address_version)],
		)
		.await
	}

	pub async fn get_unclaimed_gas(&self, account: H160) -> Result<UnclaimedGas, ProviderError> {
		self.request(
			"getunclaimedgas",
			vec![account.to_address_with_version(self.config.address_version)],
		)
		.await
	}

	// State service methods; keys and proofs travel base64-encoded.

	pub async fn get_state_root(&self, index: u32) -> Result<StateRoot, ProviderError> {
		self.request("getstateroot", vec![json!(index)]).await
	}

	pub async fn get_state(
		&self,
		root_hash: H256,
		contract_hash: H160,
		key: &[u8],
	) -> Result<String, ProviderError> {
		self.request(
			"getstate",
			json!([root_hash.to_hex(), contract_hash.to_hex(), key.to_base64_string()]),
		)
		.await
	}

	pub async fn get_proof(
		&self,
		root_hash: H256,
		contract_hash: H160,
		key: &[u8],
	) -> Result<String, ProviderError> {
		self.request(
			"getproof",
			json!([root_hash.to_hex(), contract_hash.to_hex(), key.to_base64_string()]),
		)
		.await
	}

	pub async fn find_states(
		&self,
		root_hash: H256,
		contract_hash: H160,
		key_prefix: &[u8],
	) -> Result<States, ProviderError> {
		self.request(
			"findstates",
			json!([
				root_hash.to_hex(),
				contract_hash.to_hex(),
				key_prefix.to_base64_string()
			]),
		)
		.await
	}
}
