use serde::{Deserialize, Serialize};

use crate::{neo_types::ScryptParamsDef, neo_wallets::Nep6Account};

/// The NEP-6 wallet file structure (JSON, UTF-8).
///
/// This type only models the document; reading and writing files is
/// left to the host application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nep6Wallet {
	pub name: String,

	pub version: String,

	pub scrypt: ScryptParamsDef,

	pub accounts: Vec<Nep6Account>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_reference_document() {
		let json = r#"{
			"name": "MyWallet",
			"version": "3.0",
			"scrypt": {"n": 16384, "r": 8, "p": 8},
			"accounts": [{
				"address": "NKuyBkoGdZZSLyPbJEetheRhMjeznFZszf",
				"label": "main",
				"isDefault": true,
				"lock": false,
				"key": null,
				"contract": null
			}],
			"extra": null
		}"#;
		let wallet: Nep6Wallet = serde_json::from_str(json).unwrap();
		assert_eq!(wallet.name, "MyWallet");
		assert_eq!(wallet.scrypt, ScryptParamsDef::default());
		assert!(wallet.accounts[0].is_default);
	}
}
