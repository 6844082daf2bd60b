use serde::{Deserialize, Serialize};

use crate::{
	builder::VerificationScript,
	crypto::FromBase64String,
	neo_protocol::{Account, AccountTrait},
	neo_types::{Address, ContractParameterType},
	neo_wallets::{Nep6Contract, Nep6Parameter, WalletError},
};

/// One account entry of a NEP-6 wallet file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nep6Account {
	#[serde(rename = "address")]
	pub address: Address,

	#[serde(rename = "label")]
	pub label: Option<String>,

	#[serde(rename = "isDefault", default)]
	pub is_default: bool,

	#[serde(rename = "lock", default)]
	pub lock: bool,

	/// The NEP-2 encrypted private key, when the account has one.
	#[serde(rename = "key")]
	pub key: Option<String>,

	#[serde(rename = "contract")]
	pub contract: Option<Nep6Contract>,

	#[serde(rename = "extra", default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<serde_json::Value>,
}

impl PartialEq for Nep6Account {
	// Key material and metadata may differ between exports; identity is
	// the address.
	fn eq(&self, other: &Self) -> bool {
		self.address == other.address
	}
}

impl Nep6Account {
	/// Converts an [`Account`] into its NEP-6 form. Key-bearing accounts
	/// must have been NEP-2 encrypted beforehand; plaintext keys never
	/// reach a wallet file.
	pub fn from_account(account: &Account, is_default: bool) -> Result<Self, WalletError> {
		if account.key_pair().is_some() && account.encrypted_private_key().is_none() {
			return Err(WalletError::AccountState(
				"Encrypt the account's private key before exporting it to NEP-6".to_string(),
			));
		}

		let contract = account.get_verification_script().map(|script| {
			let parameters = match script.get_signing_threshold() {
				Ok(threshold) if threshold > 1 => (0..threshold)
					.map(|i| Nep6Parameter {
						param_name: format!("signature{i}"),
						param_type: ContractParameterType::Signature,
					})
					.collect(),
				_ => vec![Nep6Parameter {
					param_name: "signature".to_string(),
					param_type: ContractParameterType::Signature,
				}],
			};
			Nep6Contract {
				script: Some(crate::crypto::ToBase64String::to_base64_string(
					script.script().as_slice(),
				)),
				nep6_parameters: parameters,
				is_deployed: false,
			}
		});

		Ok(Nep6Account {
			address: account.get_address(),
			label: account.label().cloned(),
			is_default,
			lock: account.is_locked(),
			key: account.encrypted_private_key().cloned(),
			contract,
			extra: None,
		})
	}

	/// Rebuilds an [`Account`] from its NEP-6 form, validating that a
	/// present contract script matches the declared parameter count.
	pub fn to_account(&self) -> Result<Account, WalletError> {
		let verification_script = match &self.contract {
			Some(contract) => match &contract.script {
				Some(encoded) => {
					let bytes = encoded.from_base64_string().map_err(|e| {
						WalletError::InvalidNep6(format!("Corrupt contract script: {e}"))
					})?;
					let script = VerificationScript::from(bytes);

					let expected_params = script.get_signing_threshold().unwrap_or(1) as usize;
					if !contract.nep6_parameters.is_empty()
						&& contract.nep6_parameters.len() != expected_params
					{
						return Err(WalletError::InvalidNep6(format!(
							"The contract of {} declares {} parameters but its script requires {}",
							self.address,
							contract.nep6_parameters.len(),
							expected_params
						)));
					}
					Some(script)
				},
				None => None,
			},
			None => None,
		};

		let mut account = match &self.key {
			Some(nep2) =>
				Account::from_nep2_locked(&self.address, nep2.clone(), verification_script)?,
			None => match verification_script {
				Some(script) => {
					let account = Account::from_verification_script(&script);
					if account.get_address() != self.address {
						return Err(WalletError::InvalidNep6(format!(
							"The contract script of {} hashes to a different address",
							self.address
						)));
					}
					account
				},
				None => Account::from_address(&self.address)?,
			},
		};

		account.set_label(self.label.clone());
		account.set_locked(self.lock);
		Ok(account)
	}
}
