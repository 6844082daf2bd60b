#![allow(
	clippy::result_large_err,
	clippy::too_many_arguments,
	clippy::wrong_self_convention,
	clippy::module_inception,
	clippy::type_complexity
)]
//! # Neo3 Core SDK
//!
//! A Rust SDK for the Neo N3 blockchain, focused on the transaction
//! construction and signing pipeline: byte-exact binary serialization,
//! secp256r1 key management, NeoVM script building and the JSON-RPC
//! envelope Neo nodes speak.
//!
//! ## Overview
//!
//! Everything a transaction needs interlocks here: its bytes, hash and
//! witnesses must match what nodes accept bit for bit, signatures are
//! computed over a network-magic-prefixed digest, and fees are
//! discovered by dry-running the same bytes through the node.
//!
//! ## Core Modules
//!
//! - [**neo_builder**](neo_builder): transaction and script building
//! - [**neo_clients**](neo_clients): the RPC envelope, transports and client
//! - [**neo_codec**](neo_codec): binary serialization of Neo structures
//! - [**neo_config**](neo_config): protocol constants and client settings
//! - [**neo_crypto**](neo_crypto): keys, signatures, hashing, secret containers
//! - [**neo_error**](neo_error): unified error handling
//! - [**neo_protocol**](neo_protocol): accounts, NEP-2 and RPC response model
//! - [**neo_types**](neo_types): hashes, contract parameters, VM model types
//! - [**neo_wallets**](neo_wallets): wallets and NEP-6
//!
//! ## Quick Start
//!
//! ```rust
//! use neo3_core::prelude::*;
//! ```
//!
//! ## Complete Example
//!
//! ```no_run
//! use neo3_core::builder::{AccountSigner, ScriptBuilder, TransactionBuilder};
//! use neo3_core::neo_clients::{Http, RpcClient};
//! use neo3_core::neo_protocol::{Account, AccountTrait};
//! use neo3_core::neo_types::{ContractParameter, ScriptHash, ScriptHashExtension};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to Neo N3 TestNet
//!     let provider = Http::new("https://testnet1.neo.org:443")?;
//!     let client = RpcClient::new(provider);
//!
//!     // Create accounts for the sender and recipient
//!     let sender = Account::from_wif("L1eV34wPoj9weqhGijdDLtVQzUpWGHszXXpdU9dPuh2nRFFzFa7E")?;
//!     let recipient = ScriptHash::from_address("NbTiM6h8r99kpRtb428XcsUk1TzKed2gTc")?;
//!
//!     // Build a GAS transfer script
//!     let gas_token = ScriptHash::from_str("d2a4cff31913016155e38e474a2c06d08be276cf")?;
//!     let mut script_builder = ScriptBuilder::new();
//!     script_builder.contract_call(
//!         &gas_token,
//!         "transfer",
//!         &[
//!             ContractParameter::h160(&sender.get_script_hash()),
//!             ContractParameter::h160(&recipient),
//!             ContractParameter::integer(1_0000_0000), // 1 GAS (8 decimals)
//!             ContractParameter::any(),
//!         ],
//!         None,
//!     )?;
//!
//!     // Configure, sign and send the transaction
//!     let mut tx_builder = TransactionBuilder::with_client(&client);
//!     tx_builder
//!         .set_script(Some(script_builder.to_bytes()))
//!         .set_signers(vec![AccountSigner::called_by_entry(&sender)?.into()])?;
//!
//!     let mut tx = tx_builder.sign().await?;
//!     let response = tx.send_tx().await?;
//!     println!("Transaction sent: {:?}", response.hash);
//!
//!     // Wait for the transaction to be confirmed
//!     tx.track_tx(10).await?;
//!     let log = tx.get_application_log().await?;
//!     println!("Application log: {log:?}");
//!
//!     Ok(())
//! }
//! ```

#![allow(elided_lifetimes_in_paths, missing_docs, missing_debug_implementations)]
#![warn(unreachable_pub)]
#![doc(test(no_crate_inject, attr(deny(rust_2018_idioms), allow(dead_code, unused_variables))))]

// Core modules
pub mod neo_builder;
pub mod neo_clients;
pub mod neo_codec;
pub mod neo_config;
pub mod neo_crypto;
pub mod neo_error;
pub mod neo_protocol;
pub mod neo_types;
pub mod neo_wallets;

// Re-exports for convenience
#[doc(inline)]
pub use neo_builder as builder;
#[doc(inline)]
pub use neo_clients as providers;
#[doc(inline)]
pub use neo_codec as codec;
#[doc(inline)]
pub use neo_config as config;
#[doc(inline)]
pub use neo_crypto as crypto;
#[doc(inline)]
pub use neo_protocol as protocol;
#[doc(inline)]
pub use neo_wallets as wallets;

// Re-export the types nearly every consumer touches
pub use crate::{
	neo_builder::{Transaction, TransactionBuilder},
	neo_types::{
		Address, Bytes, ContractParameter, ContractParameterType, InvocationResult, OpCode,
		ParameterValue, ScriptHash, ScriptHashExtension, StackItem, TypeError, VMState,
	},
};

/// Convenient imports for commonly used types and traits.
///
/// ```rust
/// use neo3_core::prelude::*;
/// ```
pub mod prelude;
