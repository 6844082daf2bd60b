use std::hash::{Hash, Hasher};

use primitive_types::H256;
use serde::{Deserialize, Serialize};

use crate::{
	builder::{Signer, SignerTrait, TransactionAttribute, TransactionError, Witness},
	codec::{Decoder, Encoder, NeoSerializable, VarSizeTrait},
	crypto::{HashableForVec, ToBase64String},
	neo_clients::{JsonRpcProvider, RpcClient},
	neo_config::NeoConstants,
	neo_protocol::{ApplicationLog, RawTransaction},
	neo_types::Bytes,
};

/// A Neo N3 transaction.
///
/// The serialized layout without witnesses is
///
/// ```text
/// u8 version || u32le nonce || i64le systemFee || i64le networkFee ||
/// u32le validUntilBlock || vararray(signers) || vararray(attributes) ||
/// varbytes(script)
/// ```
///
/// with `vararray(witnesses)` appended once signed. The transaction id
/// is the reversed SHA-256 of the unsigned bytes; signatures cover
/// `u32le(networkMagic) || sha256(unsigned bytes)`.
///
/// Transactions are normally produced by
/// [`crate::builder::TransactionBuilder`], which also wires in the
/// client used by [`Transaction::send_tx`] and
/// [`Transaction::track_tx`].
#[derive(Debug)]
pub struct Transaction<'a, P: JsonRpcProvider + 'static> {
	pub network: Option<&'a RpcClient<P>>,

	pub version: u8,
	pub nonce: u32,
	pub valid_until_block: u32,
	pub signers: Vec<Signer>,
	pub sys_fee: i64,
	pub net_fee: i64,
	pub attributes: Vec<TransactionAttribute>,
	pub script: Bytes,
	pub witnesses: Vec<Witness>,

	pub(crate) block_count_when_sent: Option<u32>,
}

impl<'a, P: JsonRpcProvider + 'static> Default for Transaction<'a, P> {
	fn default() -> Self {
		Transaction {
			network: None,
			version: NeoConstants::CURRENT_TX_VERSION,
			nonce: 0,
			valid_until_block: 0,
			signers: Vec::new(),
			sys_fee: 0,
			net_fee: 0,
			attributes: Vec::new(),
			script: Bytes::new(),
			witnesses: Vec::new(),
			block_count_when_sent: None,
		}
	}
}

impl<'a, P: JsonRpcProvider + 'static> Clone for Transaction<'a, P> {
	fn clone(&self) -> Self {
		Transaction {
			network: self.network,
			version: self.version,
			nonce: self.nonce,
			valid_until_block: self.valid_until_block,
			signers: self.signers.clone(),
			sys_fee: self.sys_fee,
			net_fee: self.net_fee,
			attributes: self.attributes.clone(),
			script: self.script.clone(),
			witnesses: self.witnesses.clone(),
			block_count_when_sent: self.block_count_when_sent,
		}
	}
}

impl<'a, P: JsonRpcProvider + 'static> Eq for Transaction<'a, P> {}

impl<'a, P: JsonRpcProvider + 'static> PartialEq for Transaction<'a, P> {
	fn eq(&self, other: &Self) -> bool {
		self.to_array() == other.to_array()
	}
}

impl<'a, P: JsonRpcProvider + 'static> Hash for Transaction<'a, P> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.to_array().hash(state);
	}
}

impl<'a, P: JsonRpcProvider + 'static> Transaction<'a, P> {
	/// Fixed bytes before the variable-length tail: version, nonce, the
	/// two fees and validUntilBlock.
	pub const HEADER_SIZE: usize = 25;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_network(&mut self, network: Option<&'a RpcClient<P>>) -> &mut Self {
		self.network = network;
		self
	}

	pub fn add_witness(&mut self, witness: Witness) {
		self.witnesses.push(witness);
	}

	pub(crate) fn serialize_without_witnesses(&self, writer: &mut Encoder) {
		writer.write_u8(self.version);
		writer.write_u32(self.nonce);
		writer.write_i64(self.sys_fee);
		writer.write_i64(self.net_fee);
		writer.write_u32(self.valid_until_block);
		writer
			.write_serializable_variable_list(&self.signers)
			.expect("signer lists are capped at 16 entries");
		writer
			.write_serializable_variable_list(&self.attributes)
			.expect("attribute lists are capped at 16 entries");
		writer.write_var_bytes(&self.script).expect("scripts are size-capped");
	}

	/// The unsigned serialization, which both the id and the signing
	/// digest are derived from.
	pub fn unsigned_bytes(&self) -> Bytes {
		let mut writer = Encoder::new();
		self.serialize_without_witnesses(&mut writer);
		writer.into_bytes()
	}

	/// The transaction id: the SHA-256 of the unsigned bytes, reversed
	/// into display order.
	pub fn get_tx_id(&self) -> Result<H256, TransactionError> {
		let mut digest = self.unsigned_bytes().hash256();
		digest.reverse();
		Ok(H256::from_slice(&digest))
	}

	/// The digest signatures cover:
	/// `u32le(networkMagic) || sha256(unsigned bytes)`.
	pub async fn get_hash_data(&self) -> Result<Bytes, TransactionError> {
		let client = self.network.ok_or_else(|| {
			TransactionError::IllegalState(
				"Transaction network magic is not set".to_string(),
			)
		})?;
		let magic = client.network().await?;
		Ok(Self::hash_data_with_magic(&self.unsigned_bytes(), magic))
	}

	/// Like [`Transaction::get_hash_data`] with an explicit magic, for
	/// offline signing.
	pub fn hash_data_with_magic(unsigned_bytes: &[u8], magic: u32) -> Bytes {
		let mut data = magic.to_le_bytes().to_vec();
		data.extend(unsigned_bytes.hash256());
		data
	}

	/// Checks the byte-level invariants: signer/witness pairing, size
	/// cap, fee signs, counts and signer scope consistency.
	pub fn validate(&self) -> Result<(), TransactionError> {
		if self.signers.is_empty() {
			return Err(TransactionError::NoSigners);
		}
		if self.signers.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
			return Err(TransactionError::TooManySigners);
		}
		if self.attributes.len() > NeoConstants::MAX_TRANSACTION_ATTRIBUTES as usize {
			return Err(TransactionError::TransactionConfiguration(format!(
				"A transaction takes at most {} attributes",
				NeoConstants::MAX_TRANSACTION_ATTRIBUTES
			)));
		}
		if self.sys_fee < 0 || self.net_fee < 0 {
			return Err(TransactionError::TransactionConfiguration(
				"Transaction fees cannot be negative".to_string(),
			));
		}
		for signer in &self.signers {
			signer.validate_scopes()?;
		}

		let size = self.size();
		if size > NeoConstants::MAX_TRANSACTION_SIZE as usize {
			return Err(TransactionError::TooLarge {
				size,
				max: NeoConstants::MAX_TRANSACTION_SIZE as usize,
			});
		}
		Ok(())
	}

	/// Broadcasts the signed transaction and records the height for
	/// [`Transaction::track_tx`].
	pub async fn send_tx(&mut self) -> Result<RawTransaction, TransactionError> {
		if self.signers.len() != self.witnesses.len() {
			return Err(TransactionError::TransactionConfiguration(
				"The transaction does not have the same number of signers and witnesses."
					.to_string(),
			));
		}
		self.validate()?;

		let client = self.network.ok_or_else(|| {
			TransactionError::IllegalState("Transaction network is not set".to_string())
		})?;
		self.block_count_when_sent = Some(client.get_block_count().await?);
		client.send_raw_transaction(&self.to_array()).await.map_err(Into::into)
	}

	/// Waits until the transaction appears in a block, checking at most
	/// `max_blocks` new blocks.
	pub async fn track_tx(&self, max_blocks: u32) -> Result<(), TransactionError> {
		let sent_at = self.block_count_when_sent.ok_or_else(|| {
			TransactionError::IllegalState(
				"Cannot track a transaction before it has been sent".to_string(),
			)
		})?;
		let client = self.network.ok_or_else(|| {
			TransactionError::IllegalState("Transaction network is not set".to_string())
		})?;

		let tx_id = self.get_tx_id()?;
		let mut current_block = sent_at;
		let max_block = sent_at + max_blocks;

		while current_block <= max_block {
			let latest_block = client.get_block_count().await?;
			for block_index in current_block..latest_block {
				let block_hash = client.get_block_hash(block_index).await?;
				let block = client.get_block(block_hash, true).await?;
				if let Some(transactions) = &block.tx {
					if transactions.iter().any(|tx| tx.hash == tx_id) {
						return Ok(());
					}
				}
				current_block = block_index + 1;
			}

			tokio::time::sleep(tokio::time::Duration::from_millis(
				client.config().block_interval_ms as u64 / 15,
			))
			.await;
		}

		Err(TransactionError::IllegalState(format!(
			"Transaction {} not found after waiting for {} blocks",
			hex::encode(tx_id.0),
			max_blocks
		)))
	}

	/// Fetches the execution record once the transaction is on chain.
	pub async fn get_application_log(&self) -> Result<ApplicationLog, TransactionError> {
		if self.block_count_when_sent.is_none() {
			return Err(TransactionError::IllegalState(
				"Cannot get the application log before the transaction has been sent".to_string(),
			));
		}
		let client = self.network.ok_or_else(|| {
			TransactionError::IllegalState("Transaction network is not set".to_string())
		})?;
		client.get_application_log(self.get_tx_id()?).await.map_err(Into::into)
	}

	/// The base64 form of the signed bytes, as `sendrawtransaction`
	/// expects them.
	pub fn to_base64(&self) -> String {
		self.to_array().to_base64_string()
	}
}

impl<'a, P: JsonRpcProvider + 'static> NeoSerializable for Transaction<'a, P> {
	type Error = TransactionError;

	fn size(&self) -> usize {
		Transaction::<'a, P>::HEADER_SIZE
			+ self.signers.var_size()
			+ self.attributes.var_size()
			+ self.script.var_size()
			+ self.witnesses.var_size()
	}

	fn encode(&self, writer: &mut Encoder) {
		self.serialize_without_witnesses(writer);
		writer
			.write_serializable_variable_list(&self.witnesses)
			.expect("witness count equals the signer count");
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let version = reader.read_u8()?;
		let nonce = reader.read_u32()?;
		let sys_fee = reader.read_i64()?;
		let net_fee = reader.read_i64()?;
		let valid_until_block = reader.read_u32()?;

		let signers: Vec<Signer> = reader.read_serializable_list::<Signer>()?;
		let attributes: Vec<TransactionAttribute> =
			reader.read_serializable_list::<TransactionAttribute>()?;
		let script = reader.read_var_bytes()?;

		let mut witnesses = Vec::new();
		if reader.available() > 0 {
			witnesses = reader.read_serializable_list::<Witness>()?;
		}

		Ok(Self {
			network: None,
			version,
			nonce,
			valid_until_block,
			sys_fee,
			net_fee,
			signers,
			attributes,
			script,
			witnesses,
			block_count_when_sent: None,
		})
	}
}

/// The JSON shape of a transaction, used by
/// [`crate::builder::ContractParametersContext`] and diagnostics. Fees
/// travel as decimal strings, the script as base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionJson {
	pub version: u8,
	pub nonce: u32,
	#[serde(rename = "sysfee")]
	pub sys_fee: String,
	#[serde(rename = "netfee")]
	pub net_fee: String,
	#[serde(rename = "validuntilblock")]
	pub valid_until_block: u32,
	pub signers: Vec<Signer>,
	pub attributes: Vec<TransactionAttribute>,
	pub script: String,
}

impl<'a, P: JsonRpcProvider + 'static> From<&Transaction<'a, P>> for TransactionJson {
	fn from(tx: &Transaction<'a, P>) -> Self {
		TransactionJson {
			version: tx.version,
			nonce: tx.nonce,
			sys_fee: tx.sys_fee.to_string(),
			net_fee: tx.net_fee.to_string(),
			valid_until_block: tx.valid_until_block,
			signers: tx.signers.clone(),
			attributes: tx.attributes.clone(),
			script: tx.script.to_base64_string(),
		}
	}
}
