use std::collections::HashMap;

use primitive_types::H160;

use crate::{
	neo_protocol::{Account, AccountTrait},
	neo_types::{ScriptHashExtension, ScryptParamsDef},
	neo_wallets::{Nep6Account, Nep6Wallet, WalletError},
};

/// A collection of accounts with a single designated default.
///
/// Invariants: at most one account per script hash, exactly one default
/// account, and the last account can never be removed. Removing the
/// default promotes another account.
#[derive(Clone, Debug)]
pub struct Wallet {
	name: String,
	version: String,
	scrypt_params: ScryptParamsDef,
	accounts: HashMap<H160, Account>,
	default_account: H160,
	extra: Option<serde_json::Value>,
}

impl Wallet {
	pub const DEFAULT_WALLET_NAME: &'static str = "NeoWallet";
	pub const CURRENT_VERSION: &'static str = "3.0";

	/// Creates a wallet holding one freshly generated default account.
	pub fn new() -> Result<Self, WalletError> {
		let account = Account::create()?;
		Self::from_accounts(vec![account])
	}

	/// Creates a wallet from existing accounts; the first becomes the
	/// default.
	pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, WalletError> {
		let first = accounts.first().ok_or_else(|| {
			WalletError::AccountState("A wallet needs at least one account".to_string())
		})?;
		let default_account = first.get_script_hash();

		let mut map = HashMap::new();
		for account in accounts {
			map.insert(account.get_script_hash(), account);
		}

		Ok(Self {
			name: Self::DEFAULT_WALLET_NAME.to_string(),
			version: Self::CURRENT_VERSION.to_string(),
			scrypt_params: ScryptParamsDef::default(),
			accounts: map,
			default_account,
			extra: None,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn set_name(&mut self, name: String) {
		self.name = name;
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn scrypt_params(&self) -> &ScryptParamsDef {
		&self.scrypt_params
	}

	pub fn set_scrypt_params(&mut self, params: ScryptParamsDef) {
		self.scrypt_params = params;
	}

	/// The accounts, ordered by script hash for deterministic iteration.
	pub fn get_accounts(&self) -> Vec<&Account> {
		let mut accounts: Vec<(&H160, &Account)> = self.accounts.iter().collect();
		accounts.sort_by_key(|(hash, _)| **hash);
		accounts.into_iter().map(|(_, account)| account).collect()
	}

	pub fn account_count(&self) -> usize {
		self.accounts.len()
	}

	pub fn get_account(&self, script_hash: &H160) -> Option<&Account> {
		self.accounts.get(script_hash)
	}

	pub fn get_account_mut(&mut self, script_hash: &H160) -> Option<&mut Account> {
		self.accounts.get_mut(script_hash)
	}

	pub fn contains(&self, script_hash: &H160) -> bool {
		self.accounts.contains_key(script_hash)
	}

	pub fn default_account(&self) -> &Account {
		self.accounts
			.get(&self.default_account)
			.expect("the default account is always present")
	}

	pub fn is_default(&self, script_hash: &H160) -> bool {
		&self.default_account == script_hash
	}

	/// Adds an account. A second account with the same script hash
	/// replaces the first.
	pub fn add_account(&mut self, account: Account) -> &mut Self {
		self.accounts.insert(account.get_script_hash(), account);
		self
	}

	/// Removes an account. The last account cannot be removed; removing
	/// the default promotes another account.
	pub fn remove_account(&mut self, script_hash: &H160) -> Result<(), WalletError> {
		if !self.accounts.contains_key(script_hash) {
			return Err(WalletError::AccountNotFound(script_hash.to_hex()));
		}
		if self.accounts.len() == 1 {
			return Err(WalletError::LastAccount);
		}

		self.accounts.remove(script_hash);
		if &self.default_account == script_hash {
			let promoted = *self
				.accounts
				.keys()
				.min()
				.expect("at least one account remains after removal");
			self.default_account = promoted;
		}
		Ok(())
	}

	pub fn set_default_account(&mut self, script_hash: H160) -> Result<(), WalletError> {
		if !self.accounts.contains_key(&script_hash) {
			return Err(WalletError::AccountNotFound(script_hash.to_hex()));
		}
		self.default_account = script_hash;
		Ok(())
	}

	/// NEP-2-encrypts every plaintext key in the wallet.
	pub fn encrypt_accounts(&mut self, password: &str) -> Result<(), WalletError> {
		let params = self.scrypt_params;
		for account in self.accounts.values_mut() {
			if account.key_pair().is_some() {
				account.encrypt_private_key(password, params)?;
			}
		}
		Ok(())
	}

	/// Decrypts the key of one account for signing.
	pub fn decrypt_account(
		&mut self,
		script_hash: &H160,
		password: &str,
	) -> Result<(), WalletError> {
		let params = self.scrypt_params;
		let account = self
			.accounts
			.get_mut(script_hash)
			.ok_or_else(|| WalletError::AccountNotFound(script_hash.to_hex()))?;
		account.decrypt_private_key(password, params)?;
		Ok(())
	}

	/// Exports the NEP-6 document. Plaintext keys must have been
	/// encrypted beforehand.
	pub fn to_nep6(&self) -> Result<Nep6Wallet, WalletError> {
		let mut accounts = Vec::with_capacity(self.accounts.len());
		for account in self.get_accounts() {
			accounts.push(Nep6Account::from_account(
				account,
				self.is_default(&account.get_script_hash()),
			)?);
		}

		Ok(Nep6Wallet {
			name: self.name.clone(),
			version: self.version.clone(),
			scrypt: self.scrypt_params,
			accounts,
			extra: self.extra.clone(),
		})
	}

	/// Imports a NEP-6 document, enforcing the exactly-one-default
	/// invariant.
	pub fn from_nep6(nep6: Nep6Wallet) -> Result<Self, WalletError> {
		let defaults: Vec<&Nep6Account> =
			nep6.accounts.iter().filter(|account| account.is_default).collect();
		if defaults.len() != 1 {
			return Err(WalletError::DefaultAccountInvariant);
		}
		let default_address = defaults[0].address.clone();

		let mut map = HashMap::new();
		let mut default_hash = None;
		for nep6_account in &nep6.accounts {
			let account = nep6_account.to_account()?;
			let hash = account.get_script_hash();
			if nep6_account.address == default_address {
				default_hash = Some(hash);
			}
			map.insert(hash, account);
		}
		if map.is_empty() {
			return Err(WalletError::InvalidNep6(
				"A NEP-6 wallet carries at least one account".to_string(),
			));
		}

		Ok(Self {
			name: nep6.name,
			version: nep6.version,
			scrypt_params: nep6.scrypt,
			accounts: map,
			default_account: default_hash.expect("the default address is one of the accounts"),
			extra: nep6.extra,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn small_params() -> ScryptParamsDef {
		ScryptParamsDef::new(256, 8, 8)
	}

	#[test]
	fn test_new_wallet_has_one_default_account() {
		let wallet = Wallet::new().unwrap();
		assert_eq!(wallet.account_count(), 1);
		let default_hash = wallet.default_account().get_script_hash();
		assert!(wallet.is_default(&default_hash));
	}

	#[test]
	fn test_add_and_remove_accounts() {
		let mut wallet = Wallet::new().unwrap();
		let second = Account::create().unwrap();
		let second_hash = second.get_script_hash();
		wallet.add_account(second);
		assert_eq!(wallet.account_count(), 2);

		wallet.remove_account(&second_hash).unwrap();
		assert_eq!(wallet.account_count(), 1);
		assert!(!wallet.contains(&second_hash));
	}

	#[test]
	fn test_last_account_cannot_be_removed() {
		let mut wallet = Wallet::new().unwrap();
		let only = wallet.default_account().get_script_hash();
		assert!(matches!(wallet.remove_account(&only), Err(WalletError::LastAccount)));
	}

	#[test]
	fn test_removing_default_promotes_another() {
		let mut wallet = Wallet::new().unwrap();
		let original_default = wallet.default_account().get_script_hash();
		let second = Account::create().unwrap();
		let second_hash = second.get_script_hash();
		wallet.add_account(second);

		wallet.remove_account(&original_default).unwrap();
		assert_eq!(wallet.default_account().get_script_hash(), second_hash);
	}

	#[test]
	fn test_duplicate_script_hash_replaces() {
		let mut wallet = Wallet::new().unwrap();
		let account = wallet.default_account().clone();
		wallet.add_account(account);
		assert_eq!(wallet.account_count(), 1);
	}

	#[test]
	fn test_nep6_round_trip() {
		let mut wallet = Wallet::new().unwrap();
		wallet.set_scrypt_params(small_params());
		wallet.add_account(Account::create().unwrap());
		wallet.encrypt_accounts("round trip").unwrap();

		let nep6 = wallet.to_nep6().unwrap();
		assert_eq!(nep6.accounts.len(), 2);
		assert_eq!(nep6.accounts.iter().filter(|a| a.is_default).count(), 1);
		for account in &nep6.accounts {
			assert!(account.key.as_ref().unwrap().starts_with("6P"));
		}

		let json = serde_json::to_string(&nep6).unwrap();
		let parsed: Nep6Wallet = serde_json::from_str(&json).unwrap();
		let restored = Wallet::from_nep6(parsed).unwrap();

		assert_eq!(restored.account_count(), wallet.account_count());
		assert_eq!(
			restored.default_account().get_script_hash(),
			wallet.default_account().get_script_hash()
		);
	}

	#[test]
	fn test_nep6_requires_exactly_one_default() {
		let mut wallet = Wallet::new().unwrap();
		wallet.set_scrypt_params(small_params());
		wallet.encrypt_accounts("pw").unwrap();
		let mut nep6 = wallet.to_nep6().unwrap();
		nep6.accounts[0].is_default = false;
		assert!(matches!(
			Wallet::from_nep6(nep6),
			Err(WalletError::DefaultAccountInvariant)
		));
	}

	#[test]
	fn test_unencrypted_wallet_cannot_export() {
		let wallet = Wallet::new().unwrap();
		assert!(wallet.to_nep6().is_err());
	}

	#[test]
	fn test_decrypt_account_restores_key() {
		let mut wallet = Wallet::new().unwrap();
		wallet.set_scrypt_params(small_params());
		let hash = wallet.default_account().get_script_hash();
		wallet.encrypt_accounts("pw").unwrap();
		assert!(wallet.default_account().key_pair().is_none());

		wallet.decrypt_account(&hash, "pw").unwrap();
		assert!(wallet.default_account().key_pair().is_some());
	}
}
