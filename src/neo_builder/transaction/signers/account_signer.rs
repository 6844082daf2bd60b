use primitive_types::H160;

use crate::{
	builder::{BuilderError, SignerTrait, SignerType, WitnessRule, WitnessScope},
	crypto::Secp256r1PublicKey,
	neo_protocol::{Account, AccountTrait},
};

/// A signer backed by an [`Account`], so the transaction builder can
/// produce its witness during signing.
#[derive(Debug, Clone)]
pub struct AccountSigner {
	pub account: Account,
	pub(crate) scopes: Vec<WitnessScope>,
	pub(crate) allowed_contracts: Vec<H160>,
	pub(crate) allowed_groups: Vec<Secp256r1PublicKey>,
	pub(crate) rules: Vec<WitnessRule>,
}

impl PartialEq for AccountSigner {
	fn eq(&self, other: &Self) -> bool {
		self.account.get_script_hash() == other.account.get_script_hash()
			&& self.scopes == other.scopes
			&& self.allowed_contracts == other.allowed_contracts
			&& self.allowed_groups == other.allowed_groups
			&& self.rules == other.rules
	}
}

impl AccountSigner {
	fn new(account: &Account, scope: WitnessScope) -> Self {
		Self {
			account: account.clone(),
			scopes: vec![scope],
			allowed_contracts: Vec::new(),
			allowed_groups: Vec::new(),
			rules: Vec::new(),
		}
	}

	/// A signer that only covers fees (scope `None`).
	pub fn none(account: &Account) -> Result<Self, BuilderError> {
		Ok(Self::new(account, WitnessScope::None))
	}

	/// The default scope for plain transfers: the witness is valid in
	/// the entry script and its direct calls.
	pub fn called_by_entry(account: &Account) -> Result<Self, BuilderError> {
		Ok(Self::new(account, WitnessScope::CalledByEntry))
	}

	/// The witness is valid everywhere. Use with care.
	pub fn global(account: &Account) -> Result<Self, BuilderError> {
		Ok(Self::new(account, WitnessScope::Global))
	}

	pub fn none_hash160(account_hash: H160) -> Result<Self, BuilderError> {
		Ok(Self::new(&Account::from_script_hash(account_hash), WitnessScope::None))
	}

	pub fn called_by_entry_hash160(account_hash: H160) -> Result<Self, BuilderError> {
		Ok(Self::new(&Account::from_script_hash(account_hash), WitnessScope::CalledByEntry))
	}

	pub fn global_hash160(account_hash: H160) -> Result<Self, BuilderError> {
		Ok(Self::new(&Account::from_script_hash(account_hash), WitnessScope::Global))
	}

	pub fn get_account(&self) -> &Account {
		&self.account
	}
}

impl SignerTrait for AccountSigner {
	fn get_type(&self) -> SignerType {
		SignerType::AccountSigner
	}

	fn get_signer_hash(&self) -> &H160 {
		self.account.script_hash()
	}

	fn get_scopes(&self) -> &Vec<WitnessScope> {
		&self.scopes
	}

	fn get_allowed_contracts(&self) -> &Vec<H160> {
		&self.allowed_contracts
	}

	fn get_allowed_groups(&self) -> &Vec<Secp256r1PublicKey> {
		&self.allowed_groups
	}

	fn get_rules(&self) -> &Vec<WitnessRule> {
		&self.rules
	}

	fn scopes_mut(&mut self) -> &mut Vec<WitnessScope> {
		&mut self.scopes
	}

	fn allowed_contracts_mut(&mut self) -> &mut Vec<H160> {
		&mut self.allowed_contracts
	}

	fn allowed_groups_mut(&mut self) -> &mut Vec<Secp256r1PublicKey> {
		&mut self.allowed_groups
	}

	fn rules_mut(&mut self) -> &mut Vec<WitnessRule> {
		&mut self.rules
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_called_by_entry_scope() {
		let account = Account::create().unwrap();
		let signer = AccountSigner::called_by_entry(&account).unwrap();
		assert_eq!(signer.get_scopes(), &vec![WitnessScope::CalledByEntry]);
		assert_eq!(signer.get_signer_hash(), account.script_hash());
	}

	#[test]
	fn test_none_then_allowed_contracts_replaces_scope() {
		let account = Account::create().unwrap();
		let mut signer = AccountSigner::none(&account).unwrap();
		signer.set_allowed_contracts(vec![H160::zero()]).unwrap();
		assert!(!signer.get_scopes().contains(&WitnessScope::None));
		assert!(signer.get_scopes().contains(&WitnessScope::CustomContracts));
		assert!(signer.validate_scopes().is_ok());
	}
}
