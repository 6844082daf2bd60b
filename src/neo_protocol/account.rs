use primitive_types::H160;

use crate::{
	builder::{BuilderError, VerificationScript},
	crypto::{CryptoError, KeyPair, Secp256r1PublicKey},
	neo_protocol::{Nep2Error, NEP2},
	neo_types::{Address, ScriptHashExtension, ScryptParamsDef, TypeError},
};
use thiserror::Error;

/// Errors raised by account construction and key management.
#[derive(Error, Debug)]
pub enum AccountError {
	#[error("Illegal state: {0}")]
	IllegalState(String),

	#[error(transparent)]
	Crypto(#[from] CryptoError),

	#[error(transparent)]
	Nep2(#[from] Nep2Error),

	#[error(transparent)]
	Builder(#[from] BuilderError),

	#[error(transparent)]
	Type(#[from] TypeError),
}

/// Behavior common to account implementations.
pub trait AccountTrait: Sized + Clone {
	type Error;

	/// Generates a fresh single-sig account from the CSPRNG.
	fn create() -> Result<Self, Self::Error>;

	fn from_key_pair(key_pair: KeyPair) -> Result<Self, Self::Error>;

	fn from_wif(wif: &str) -> Result<Self, Self::Error>;

	fn key_pair(&self) -> Option<&KeyPair>;

	fn script_hash(&self) -> &H160;

	fn get_script_hash(&self) -> H160;

	fn get_address(&self) -> Address;

	fn get_verification_script(&self) -> Option<&VerificationScript>;

	fn is_multi_sig(&self) -> bool;

	fn get_signing_threshold(&self) -> Result<u32, Self::Error>;

	fn get_nr_of_participants(&self) -> Result<u32, Self::Error>;
}

/// A Neo account: single-sig (key-bearing, possibly NEP-2-locked),
/// multi-sig (verification script only) or watch-only (script hash
/// only).
///
/// Multi-sig parameters are recovered by parsing the verification
/// script; an account without one never reports itself as multi-sig.
#[derive(Debug, Clone)]
pub struct Account {
	key_pair: Option<KeyPair>,
	script_hash: H160,
	label: Option<String>,
	verification_script: Option<VerificationScript>,
	is_locked: bool,
	encrypted_private_key: Option<String>,
}

impl PartialEq for Account {
	fn eq(&self, other: &Self) -> bool {
		self.script_hash == other.script_hash
			&& self.key_pair == other.key_pair
			&& self.label == other.label
			&& self.verification_script == other.verification_script
			&& self.is_locked == other.is_locked
			&& self.encrypted_private_key == other.encrypted_private_key
	}
}

impl Account {
	/// A watch-only account for a bare script hash.
	pub fn from_script_hash(script_hash: H160) -> Self {
		Self {
			key_pair: None,
			script_hash,
			label: None,
			verification_script: None,
			is_locked: false,
			encrypted_private_key: None,
		}
	}

	/// A watch-only account for an address.
	pub fn from_address(address: &str) -> Result<Self, AccountError> {
		let script_hash = H160::from_address(address)?;
		let mut account = Self::from_script_hash(script_hash);
		account.label = Some(address.to_string());
		Ok(account)
	}

	/// An account whose identity is a verification script. Multi-sig
	/// parameters become discoverable through script analysis.
	pub fn from_verification_script(script: &VerificationScript) -> Self {
		let script_hash = script.hash();
		Self {
			key_pair: None,
			script_hash,
			label: Some(script_hash.to_address()),
			verification_script: Some(script.clone()),
			is_locked: false,
			encrypted_private_key: None,
		}
	}

	/// An m-of-n multi-sig account from participant public keys.
	pub fn multi_sig_from_public_keys(
		public_keys: &[Secp256r1PublicKey],
		threshold: u32,
	) -> Result<Self, AccountError> {
		let script = VerificationScript::from_multi_sig(public_keys, threshold)?;
		Ok(Self::from_verification_script(&script))
	}

	/// A locked account carrying a NEP-2 string instead of a plaintext
	/// key, e.g. when loading a NEP-6 wallet.
	pub fn from_nep2_locked(
		address: &str,
		encrypted_private_key: String,
		verification_script: Option<VerificationScript>,
	) -> Result<Self, AccountError> {
		let script_hash = H160::from_address(address)?;
		Ok(Self {
			key_pair: None,
			script_hash,
			label: Some(address.to_string()),
			verification_script,
			is_locked: false,
			encrypted_private_key: Some(encrypted_private_key),
		})
	}

	pub fn label(&self) -> Option<&String> {
		self.label.as_ref()
	}

	pub fn set_label(&mut self, label: Option<String>) {
		self.label = label;
	}

	pub fn is_locked(&self) -> bool {
		self.is_locked
	}

	pub fn set_locked(&mut self, locked: bool) {
		self.is_locked = locked;
	}

	pub fn encrypted_private_key(&self) -> Option<&String> {
		self.encrypted_private_key.as_ref()
	}

	/// Encrypts the plaintext key into a NEP-2 string and drops the
	/// plaintext from memory.
	pub fn encrypt_private_key(
		&mut self,
		password: &str,
		params: ScryptParamsDef,
	) -> Result<(), AccountError> {
		let key_pair = self.key_pair.as_ref().ok_or_else(|| {
			AccountError::IllegalState(
				"The account does not hold a decrypted private key".to_string(),
			)
		})?;

		self.encrypted_private_key = Some(NEP2::encrypt(password, key_pair, params)?);
		self.key_pair = None;
		Ok(())
	}

	/// Decrypts the NEP-2 string back into a usable key pair.
	pub fn decrypt_private_key(
		&mut self,
		password: &str,
		params: ScryptParamsDef,
	) -> Result<(), AccountError> {
		if self.key_pair.is_some() {
			return Ok(());
		}
		let nep2 = self.encrypted_private_key.as_ref().ok_or_else(|| {
			AccountError::IllegalState("The account holds no encrypted private key".to_string())
		})?;

		let key_pair = NEP2::decrypt(password, nep2, params)?;
		if H160::from_public_key(&key_pair.public_key_bytes())? != self.script_hash
			&& self.verification_script.is_none()
		{
			return Err(AccountError::IllegalState(
				"The decrypted key does not belong to this account".to_string(),
			));
		}
		self.key_pair = Some(key_pair);
		Ok(())
	}
}

impl AccountTrait for Account {
	type Error = AccountError;

	fn create() -> Result<Self, Self::Error> {
		Self::from_key_pair(KeyPair::new_random())
	}

	fn from_key_pair(key_pair: KeyPair) -> Result<Self, Self::Error> {
		let script_hash = H160::from_public_key(&key_pair.public_key_bytes())?;
		let verification_script = VerificationScript::from_public_key(key_pair.public_key());
		Ok(Self {
			key_pair: Some(key_pair),
			script_hash,
			label: Some(script_hash.to_address()),
			verification_script: Some(verification_script),
			is_locked: false,
			encrypted_private_key: None,
		})
	}

	fn from_wif(wif: &str) -> Result<Self, Self::Error> {
		Self::from_key_pair(KeyPair::from_wif(wif)?)
	}

	fn key_pair(&self) -> Option<&KeyPair> {
		self.key_pair.as_ref()
	}

	fn script_hash(&self) -> &H160 {
		&self.script_hash
	}

	fn get_script_hash(&self) -> H160 {
		self.script_hash
	}

	fn get_address(&self) -> Address {
		self.script_hash.to_address()
	}

	fn get_verification_script(&self) -> Option<&VerificationScript> {
		self.verification_script.as_ref()
	}

	fn is_multi_sig(&self) -> bool {
		self.verification_script
			.as_ref()
			.map(VerificationScript::is_multi_sig)
			.unwrap_or(false)
	}

	fn get_signing_threshold(&self) -> Result<u32, Self::Error> {
		let script = self.verification_script.as_ref().ok_or_else(|| {
			AccountError::IllegalState(
				"Cannot determine a signing threshold without a verification script".to_string(),
			)
		})?;
		Ok(script.get_signing_threshold()?)
	}

	fn get_nr_of_participants(&self) -> Result<u32, Self::Error> {
		let script = self.verification_script.as_ref().ok_or_else(|| {
			AccountError::IllegalState(
				"Cannot determine participants without a verification script".to_string(),
			)
		})?;
		Ok(script.get_nr_of_accounts()?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_create_single_sig_account() {
		let account = Account::create().unwrap();
		assert!(account.key_pair().is_some());
		assert!(!account.is_multi_sig());
		assert_eq!(account.get_signing_threshold().unwrap(), 1);
		assert_eq!(account.get_nr_of_participants().unwrap(), 1);
		assert!(account.get_address().starts_with('N'));
	}

	#[test]
	fn test_from_wif_derives_script_hash() {
		let account =
			Account::from_wif("L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU").unwrap();
		let key_pair = account.key_pair().unwrap();
		let expected = H160::from_public_key(&key_pair.public_key_bytes()).unwrap();
		assert_eq!(account.get_script_hash(), expected);
	}

	#[test]
	fn test_multi_sig_from_public_keys() {
		let keys: Vec<Secp256r1PublicKey> = (0..3)
			.map(|_| KeyPair::new_random().public_key().clone())
			.collect();
		let account = Account::multi_sig_from_public_keys(&keys, 2).unwrap();

		assert!(account.is_multi_sig());
		assert_eq!(account.get_signing_threshold().unwrap(), 2);
		assert_eq!(account.get_nr_of_participants().unwrap(), 3);
	}

	#[test]
	fn test_watch_only_account_is_not_multi_sig() {
		// An account without a verification script must not pretend to
		// know multi-sig parameters.
		let account = Account::from_script_hash(H160::zero());
		assert!(!account.is_multi_sig());
		assert!(account.get_signing_threshold().is_err());
		assert!(account.get_nr_of_participants().is_err());
	}

	#[test]
	fn test_encrypt_decrypt_key_round_trip() {
		let params = ScryptParamsDef::new(256, 8, 8);
		let mut account = Account::create().unwrap();
		let original = account.key_pair().unwrap().clone();

		account.encrypt_private_key("secret", params).unwrap();
		assert!(account.key_pair().is_none());
		assert!(account.encrypted_private_key().unwrap().starts_with("6P"));

		assert!(account.decrypt_private_key("wrong", params).is_err());
		account.decrypt_private_key("secret", params).unwrap();
		assert_eq!(account.key_pair().unwrap(), &original);
	}
}
