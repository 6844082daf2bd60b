//! # Neo Types
//!
//! Core data types for the Neo N3 ecosystem.
//!
//! ## Overview
//!
//! The neo_types module provides the value types the rest of the crate is
//! built from:
//!
//! - Script hashes (`H160`) and transaction/block hashes (`H256`) with
//!   hex, little-endian and Base58Check address conversions
//! - The contract parameter model and its JSON encoding for RPC
//! - NeoVM op codes, stack items and VM states
//! - Serde helpers for fixed-width hash types

pub use address::*;
pub use contract_parameter::*;
pub use error::*;
pub use invocation_result::*;
pub use op_code::*;
pub use script_hash::*;
pub use scrypt_params::*;
pub use serde_with_utils::*;
pub use stack_item::*;
pub use tx_hash::*;
pub use vm_state::*;

mod address;
mod contract_parameter;
mod error;
mod invocation_result;
mod op_code;
mod script_hash;
mod scrypt_params;
mod serde_with_utils;
mod stack_item;
mod tx_hash;
mod vm_state;

/// An arbitrary byte string.
pub type Bytes = Vec<u8>;

/// Converts a `Vec<u8>` into a fixed 32-byte array.
pub fn vec_to_array32(vec: Vec<u8>) -> Result<[u8; 32], TypeError> {
	vec.try_into()
		.map_err(|_| TypeError::InvalidFormat("Expected exactly 32 bytes".to_string()))
}
