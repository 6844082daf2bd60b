use std::{collections::HashSet, fmt::Debug, str::FromStr};

use lazy_static::lazy_static;
use primitive_types::H160;

use crate::{
	builder::{
		Signer, SignerTrait, TransactionAttribute, TransactionError, Witness,
	},
	codec::NeoSerializable,
	crypto::Secp256r1PublicKey,
	neo_clients::{JsonRpcProvider, RpcClient},
	neo_config::NeoConstants,
	neo_protocol::AccountTrait,
	neo_types::{Bytes, ContractParameter, InvocationResult, ScriptHashExtension},
};

use super::Transaction;

lazy_static! {
	pub static ref GAS_TOKEN_HASH: H160 =
		H160::from_str("d2a4cff31913016155e38e474a2c06d08be276cf")
			.expect("GAS token hash is a valid script hash");
}

/// A fluent builder orchestrating the transaction pipeline: script and
/// signer configuration, the dry run, fee discovery, defaults and
/// signing.
///
/// ```no_run
/// use neo3_core::builder::{AccountSigner, ScriptBuilder, TransactionBuilder};
/// use neo3_core::neo_clients::{Http, RpcClient};
/// use neo3_core::neo_protocol::{Account, AccountTrait};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RpcClient::new(Http::new("https://testnet1.neo.org:443")?);
///     let sender = Account::from_wif("L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU")?;
///
///     let mut builder = TransactionBuilder::with_client(&client);
///     builder
///         .set_script(Some(vec![0x40]))
///         .set_signers(vec![AccountSigner::called_by_entry(&sender)?.into()])?;
///
///     let mut tx = builder.sign().await?;
///     tx.send_tx().await?;
///     Ok(())
/// }
/// ```
pub struct TransactionBuilder<'a, P: JsonRpcProvider + 'static> {
	client: Option<&'a RpcClient<P>>,
	version: u8,
	nonce: Option<u32>,
	valid_until_block: Option<u32>,
	signers: Vec<Signer>,
	additional_network_fee: i64,
	additional_system_fee: i64,
	attributes: Vec<TransactionAttribute>,
	script: Option<Bytes>,
	// Consulted when the sender cannot cover the fees; receives the
	// required fee total and the sender's GAS balance.
	fee_consumer: Option<Box<dyn Fn(i64, i64) + Send + Sync>>,
}

impl<'a, P: JsonRpcProvider + 'static> Debug for TransactionBuilder<'a, P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TransactionBuilder")
			.field("version", &self.version)
			.field("nonce", &self.nonce)
			.field("valid_until_block", &self.valid_until_block)
			.field("signers", &self.signers)
			.field("additional_network_fee", &self.additional_network_fee)
			.field("additional_system_fee", &self.additional_system_fee)
			.field("attributes", &self.attributes)
			.field("script", &self.script)
			.finish()
	}
}

impl<'a, P: JsonRpcProvider + 'static> Default for TransactionBuilder<'a, P> {
	fn default() -> Self {
		Self {
			client: None,
			version: NeoConstants::CURRENT_TX_VERSION,
			nonce: None,
			valid_until_block: None,
			signers: Vec::new(),
			additional_network_fee: 0,
			additional_system_fee: 0,
			attributes: Vec::new(),
			script: None,
			fee_consumer: None,
		}
	}
}

impl<'a, P: JsonRpcProvider + 'static> TransactionBuilder<'a, P> {
	pub const BALANCE_OF_FUNCTION: &'static str = "balanceOf";
	pub const DUMMY_PUB_KEY: &'static str =
		"02ec143f00b88524caf36a0121c2de09eef0519ddbe1c710a00f0e2663201ee4c0";

	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_client(client: &'a RpcClient<P>) -> Self {
		Self { client: Some(client), ..Self::default() }
	}

	fn client(&self) -> Result<&'a RpcClient<P>, TransactionError> {
		self.client
			.ok_or_else(|| TransactionError::IllegalState("Client is not set".to_string()))
	}

	pub fn version(&mut self, version: u8) -> &mut Self {
		self.version = version;
		self
	}

	pub fn nonce(&mut self, nonce: u32) -> Result<&mut Self, TransactionError> {
		self.nonce = Some(nonce);
		Ok(self)
	}

	/// The height until which the transaction stays valid. Defaults to
	/// `currentHeight + maxValidUntilBlockIncrement - 1` when unset.
	pub fn valid_until_block(&mut self, block: u32) -> Result<&mut Self, TransactionError> {
		if block == 0 {
			return Err(TransactionError::InvalidBlock);
		}
		self.valid_until_block = Some(block);
		Ok(self)
	}

	/// Sets the signers. Order is preserved; accounts must be unique;
	/// every signer's scope configuration must be consistent.
	pub fn set_signers(&mut self, signers: Vec<Signer>) -> Result<&mut Self, TransactionError> {
		if signers.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
			return Err(TransactionError::TooManySigners);
		}

		let mut seen: HashSet<H160> = HashSet::new();
		for signer in &signers {
			if !seen.insert(*signer.get_signer_hash()) {
				return Err(TransactionError::DuplicateSigner);
			}
			signer.validate_scopes()?;
		}

		self.signers = signers;
		Ok(self)
	}

	pub fn signers(&self) -> &Vec<Signer> {
		&self.signers
	}

	/// Moves the signer with the given account hash to the front; the
	/// first signer pays the fees.
	pub fn first_signer_by_hash(&mut self, sender: &H160) -> Result<&mut Self, TransactionError> {
		use crate::builder::WitnessScope;
		if self.signers.iter().any(|s| s.get_scopes().contains(&WitnessScope::None)) {
			return Err(TransactionError::ScriptFormat(
				"This transaction contains a signer with fee-only witness scope that will cover the fees. Hence, the order of the signers does not affect the payment of the fees.".to_string(),
			));
		}
		if let Some(pos) = self.signers.iter().position(|s| s.get_signer_hash() == sender) {
			let signer = self.signers.remove(pos);
			self.signers.insert(0, signer);
			Ok(self)
		} else {
			Err(TransactionError::ScriptFormat(format!(
				"Could not find a signer with script hash {}. Make sure to add the signer before calling this method.",
				sender
			)))
		}
	}

	pub fn first_signer(
		&mut self,
		sender: &crate::neo_protocol::Account,
	) -> Result<&mut Self, TransactionError> {
		self.first_signer_by_hash(&sender.get_script_hash())
	}

	pub fn set_script(&mut self, script: Option<Bytes>) -> &mut Self {
		self.script = script;
		self
	}

	pub fn extend_script(&mut self, script: Vec<u8>) -> &mut Self {
		match &mut self.script {
			Some(existing) => existing.extend(script),
			None => self.script = Some(script),
		}
		self
	}

	pub fn script(&self) -> Option<&Bytes> {
		self.script.as_ref()
	}

	/// Adds attributes, keeping the count cap and the at-most-one rule
	/// for `HighPriority` and `OracleResponse`.
	pub fn add_attributes(
		&mut self,
		attributes: Vec<TransactionAttribute>,
	) -> Result<&mut Self, TransactionError> {
		if self.attributes.len() + attributes.len()
			> NeoConstants::MAX_TRANSACTION_ATTRIBUTES as usize
		{
			return Err(TransactionError::TransactionConfiguration(format!(
				"A transaction takes at most {} attributes",
				NeoConstants::MAX_TRANSACTION_ATTRIBUTES
			)));
		}
		for attribute in attributes {
			let duplicate = match &attribute {
				TransactionAttribute::HighPriority => self
					.attributes
					.iter()
					.any(|a| matches!(a, TransactionAttribute::HighPriority)),
				TransactionAttribute::OracleResponse { .. } => self
					.attributes
					.iter()
					.any(|a| matches!(a, TransactionAttribute::OracleResponse { .. })),
			};
			if duplicate {
				return Err(TransactionError::TransactionConfiguration(
					"A transaction can carry each attribute kind at most once".to_string(),
				));
			}
			self.attributes.push(attribute);
		}
		Ok(self)
	}

	/// An extra network fee on top of the calculated one, e.g. to win
	/// mempool priority.
	pub fn additional_network_fee(&mut self, fee: i64) -> &mut Self {
		self.additional_network_fee = fee;
		self
	}

	pub fn additional_system_fee(&mut self, fee: i64) -> &mut Self {
		self.additional_system_fee = fee;
		self
	}

	/// Called with (required fee, sender GAS balance) instead of
	/// failing when the sender cannot cover the fees.
	pub fn set_fee_consumer(&mut self, consumer: Box<dyn Fn(i64, i64) + Send + Sync>) -> &mut Self {
		self.fee_consumer = Some(consumer);
		self
	}

	/// Dry-runs the script via `invokescript` with the configured
	/// signers. The consumed gas of a HALTing run becomes the baseline
	/// system fee.
	pub async fn call_invoke_script(&self) -> Result<InvocationResult, TransactionError> {
		let script = self
			.script
			.as_ref()
			.filter(|script| !script.is_empty())
			.ok_or(TransactionError::NoScript)?;
		self.client()?.invoke_script(script, &self.signers).await.map_err(Into::into)
	}

	/// Assembles the unsigned transaction: validates the configuration,
	/// fills the nonce and validUntilBlock defaults, prices the system
	/// fee through a dry run and the network fee through
	/// `calculatenetworkfee` with placeholder witnesses.
	pub async fn get_unsigned_tx(&mut self) -> Result<Transaction<'a, P>, TransactionError> {
		if self.signers.is_empty() {
			return Err(TransactionError::NoSigners);
		}
		let script = match &self.script {
			None => return Err(TransactionError::NoScript),
			Some(script) if script.is_empty() => return Err(TransactionError::EmptyScript),
			Some(script) => script.clone(),
		};
		for signer in &self.signers {
			signer.validate_scopes()?;
		}

		let client = self.client()?;

		let nonce = match self.nonce {
			Some(nonce) => nonce,
			// A cryptographically random nonce keeps otherwise identical
			// transactions distinct.
			None => rand::random::<u32>(),
		};

		let valid_until_block = match self.valid_until_block {
			Some(block) => block,
			None => {
				let current = client.get_block_count().await?;
				current + client.max_valid_until_block_increment() - 1
			},
		};

		if self.attributes.iter().any(|a| matches!(a, TransactionAttribute::HighPriority)) {
			self.ensure_committee_member_signs().await?;
		}

		let system_fee = self.get_system_fee_for_script().await? + self.additional_system_fee;

		let mut tx = Transaction {
			network: Some(client),
			version: self.version,
			nonce,
			valid_until_block,
			signers: self.signers.clone(),
			sys_fee: system_fee,
			net_fee: 0,
			attributes: self.attributes.clone(),
			script,
			witnesses: Vec::new(),
			block_count_when_sent: None,
		};

		let network_fee = self.get_network_fee(&tx).await? + self.additional_network_fee;
		tx.net_fee = network_fee;

		if let Some(fee_consumer) = &self.fee_consumer {
			let total = system_fee + network_fee;
			let balance = self.sender_gas_balance().await?;
			if balance < total {
				fee_consumer(total, balance);
			}
		}

		tx.validate()?;
		Ok(tx)
	}

	/// Dry-runs the script and returns the consumed gas. A `FAULT`
	/// terminal state is an error unless the client is configured to
	/// allow transmission on fault.
	pub async fn get_system_fee_for_script(&self) -> Result<i64, TransactionError> {
		let result = self.call_invoke_script().await?;
		if result.has_state_fault() && !self.client()?.allows_transmission_on_fault() {
			return Err(TransactionError::InvocationFault {
				exception: result
					.exception
					.clone()
					.unwrap_or_else(|| "no exception message".to_string()),
				stack: result.stack.clone(),
			});
		}
		Ok(result.gas_consumed_fractions())
	}

	/// Prices the network fee by appending placeholder witnesses of the
	/// correct byte lengths (one 64-byte signature per required
	/// signature) and handing the serialized bytes to
	/// `calculatenetworkfee`. The placeholders never leave this method.
	pub async fn get_network_fee(
		&self,
		tx: &Transaction<'a, P>,
	) -> Result<i64, TransactionError> {
		let mut priced = tx.clone();
		for signer in &self.signers {
			priced.add_witness(self.placeholder_witness(signer)?);
		}

		let fee = self.client()?.calculate_network_fee(&priced.to_array()).await?;
		Ok(fee.network_fee)
	}

	fn placeholder_witness(&self, signer: &Signer) -> Result<Witness, TransactionError> {
		// Only the 64-byte length matters for pricing; all-zero scalars
		// would not parse as a signature, so a constant valid one is used.
		let placeholder_signature = || {
			crate::crypto::Secp256r1Signature::from_scalars([1u8; 32], [1u8; 32])
				.expect("constant scalars are valid")
		};

		match signer {
			Signer::ContractSigner(contract_signer) =>
				Ok(Witness::create_contract_witness(contract_signer.verify_params())?),
			Signer::AccountSigner(account_signer) => {
				let account = account_signer.get_account();
				if let Some(script) = account.get_verification_script() {
					let threshold = script.get_signing_threshold().unwrap_or(1);
					let signatures: Vec<_> =
						(0..threshold).map(|_| placeholder_signature()).collect();
					Ok(Witness {
						invocation_script:
							crate::builder::InvocationScript::from_signatures(&signatures),
						verification_script: script.clone(),
					})
				} else {
					self.dummy_witness(placeholder_signature())
				}
			},
			Signer::TransactionSigner(_) => self.dummy_witness(placeholder_signature()),
		}
	}

	// Hash-only signers still need a placeholder of single-sig shape.
	fn dummy_witness(
		&self,
		signature: crate::crypto::Secp256r1Signature,
	) -> Result<Witness, TransactionError> {
		let dummy_key = Secp256r1PublicKey::from_encoded(Self::DUMMY_PUB_KEY)
			.expect("the dummy public key constant is valid");
		Ok(Witness {
			invocation_script: crate::builder::InvocationScript::from_signature(&signature),
			verification_script: crate::builder::VerificationScript::from_public_key(&dummy_key),
		})
	}

	async fn ensure_committee_member_signs(&self) -> Result<(), TransactionError> {
		let committee = self.client()?.get_committee().await?;
		let mut committee_hashes: HashSet<H160> = HashSet::new();
		for encoded in &committee {
			let key = Secp256r1PublicKey::from_encoded(encoded).ok_or_else(|| {
				TransactionError::IllegalState(
					"The node returned an invalid committee key".to_string(),
				)
			})?;
			committee_hashes.insert(H160::from_public_key(&key.get_encoded(true)).map_err(
				|e| TransactionError::IllegalState(format!("Invalid committee key: {e}")),
			)?);
		}

		let signs = self.signers.iter().any(|signer| {
			if committee_hashes.contains(signer.get_signer_hash()) {
				return true;
			}
			// A multi-sig signer qualifies when a committee member
			// participates in it.
			signer
				.as_account_signer()
				.and_then(|account_signer| {
					account_signer.get_account().get_verification_script().cloned()
				})
				.and_then(|script| script.get_public_keys().ok())
				.map(|keys| {
					keys.iter().any(|key| {
						H160::from_public_key(&key.get_encoded(true))
							.map(|hash| committee_hashes.contains(&hash))
							.unwrap_or(false)
					})
				})
				.unwrap_or(false)
		});

		if !signs {
			return Err(TransactionError::IllegalState(
				"Only committee members can send transactions with high priority".to_string(),
			));
		}
		Ok(())
	}

	async fn sender_gas_balance(&self) -> Result<i64, TransactionError> {
		let sender = *self.signers[0].get_signer_hash();
		let result = self
			.client()?
			.invoke_function(
				&GAS_TOKEN_HASH,
				Self::BALANCE_OF_FUNCTION.to_string(),
				vec![ContractParameter::h160(&sender)],
				None,
			)
			.await?;

		result
			.first_stack_item()
			.and_then(crate::neo_types::StackItem::as_int)
			.ok_or_else(|| {
				TransactionError::IllegalState(
					"balanceOf returned an unexpected stack".to_string(),
				)
			})
	}

	/// Builds the unsigned transaction and creates a witness for every
	/// signer.
	///
	/// Account signers need a decrypted key. Multi-sig and plain-data
	/// signers cannot be signed here; assemble their witnesses through
	/// [`crate::builder::ContractParametersContext`] or
	/// [`Witness::create_multi_sig_witness_from_keys`] and attach them
	/// with [`Transaction::add_witness`].
	pub async fn sign(&mut self) -> Result<Transaction<'a, P>, TransactionError> {
		let mut tx = self.get_unsigned_tx().await?;
		let hash_data = tx.get_hash_data().await?;

		for signer in &self.signers {
			let witness = match signer {
				Signer::ContractSigner(contract_signer) =>
					Witness::create_contract_witness(contract_signer.verify_params())?,
				Signer::AccountSigner(account_signer) => {
					let account = account_signer.get_account();
					if account.is_multi_sig() {
						return Err(TransactionError::IllegalState(
							"Transactions with multi-sig signers cannot be signed automatically; collect the signatures through a ContractParametersContext".to_string(),
						));
					}
					let key_pair = account.key_pair().ok_or_else(|| {
						TransactionError::IllegalState(format!(
							"Cannot create a witness for account {} without a decrypted private key",
							account.get_address()
						))
					})?;
					Witness::create(&hash_data, key_pair)?
				},
				Signer::TransactionSigner(_) =>
					return Err(TransactionError::IllegalState(
						"Cannot produce a witness for a plain transaction signer; attach it manually".to_string(),
					)),
			};
			tx.add_witness(witness);
		}

		Ok(tx)
	}
}
