//! # Neo Builder
//!
//! Tooling for constructing Neo N3 transactions and NeoVM scripts.
//!
//! ## Overview
//!
//! The neo_builder module provides the write path of the SDK:
//!
//! ### Transaction building
//!
//! - **Transaction builder**: fluent configuration, dry run, fee
//!   discovery, defaults and signing
//! - **Signer management**: account, contract and plain-data signers
//!   with witness scopes and their allow lists
//! - **Witnesses**: single-sig, multi-sig and contract witnesses, plus
//!   the offline `ContractParametersContext`
//! - **Attributes**: high-priority and oracle-response attributes
//!
//! ### Script construction
//!
//! - **Script builder**: NeoVM scripts with minimal push encodings
//! - **Verification scripts**: `CheckSig`/`CheckMultisig` forms with
//!   static introspection of `m`, `n` and the participant keys
//!
//! ## Example
//!
//! ```no_run
//! use neo3_core::builder::{AccountSigner, ScriptBuilder, TransactionBuilder};
//! use neo3_core::neo_clients::{Http, RpcClient};
//! use neo3_core::neo_protocol::{Account, AccountTrait};
//! use neo3_core::neo_types::ContractParameter;
//! use primitive_types::H160;
//! use std::str::FromStr;
//!
//! async fn transfer() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new(Http::new("https://testnet1.neo.org:443")?);
//!     let sender = Account::from_wif("L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU")?;
//!     let gas = H160::from_str("d2a4cff31913016155e38e474a2c06d08be276cf")?;
//!
//!     let mut script = ScriptBuilder::new();
//!     script.contract_call(
//!         &gas,
//!         "transfer",
//!         &[
//!             ContractParameter::h160(&sender.get_script_hash()),
//!             ContractParameter::h160(&gas),
//!             ContractParameter::integer(1_0000_0000),
//!             ContractParameter::any(),
//!         ],
//!         None,
//!     )?;
//!
//!     let mut builder = TransactionBuilder::with_client(&client);
//!     builder
//!         .set_script(Some(script.to_bytes()))
//!         .set_signers(vec![AccountSigner::called_by_entry(&sender)?.into()])?;
//!
//!     let mut tx = builder.sign().await?;
//!     let response = tx.send_tx().await?;
//!     println!("sent {:?}", response.hash);
//!     Ok(())
//! }
//! ```

pub use error::*;
pub use script::*;
pub use transaction::*;

mod error;
mod script;
mod transaction;

#[cfg(test)]
mod proptest_tests;
