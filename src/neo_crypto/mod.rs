//! # Neo Crypto
//!
//! Cryptographic primitives for the Neo N3 blockchain.
//!
//! ## Overview
//!
//! The neo_crypto module provides the cryptographic foundation for wallet
//! management and transaction signing:
//!
//! - secp256r1 key pairs, ECDSA signing/verification and public key recovery
//! - Hashing (SHA-256, RIPEMD-160, HMAC)
//! - Base58 / Base58Check encoding
//! - WIF (Wallet Import Format) import and export
//! - A zeroizing secret container for private key material
//! - An optional, explicitly constructed hash cache
//!
//! ## Examples
//!
//! ### Creating a key pair
//!
//! ```rust,no_run
//! use neo3_core::neo_crypto::KeyPair;
//!
//! // Generate a new random key pair
//! let key_pair = KeyPair::new_random();
//! println!("Public key: {:?}", key_pair.public_key());
//!
//! // Create a key pair from a private key (32 bytes)
//! let private_key_bytes = [1u8; 32];
//! let key_pair = KeyPair::from_private_key(&private_key_bytes).unwrap();
//! ```
//!
//! ### Working with WIF format
//!
//! ```rust,no_run
//! use neo3_core::neo_crypto::KeyPair;
//!
//! let wif = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
//! let key_pair = KeyPair::from_wif(wif).unwrap();
//! assert_eq!(wif, key_pair.export_as_wif());
//! ```

pub use base58_helper::*;
pub use error::*;
pub use hash_cache::*;
pub use key_pair::KeyPair;
pub use keys::*;
pub use recover::*;
pub use secure_bytes::SecureBytes;
pub use utils::*;
pub use wif::*;

mod base58_helper;
mod error;
pub mod hash;
mod hash_cache;
mod key_pair;
mod keys;
mod recover;
mod secure_bytes;
pub mod utils;
mod wif;

pub use hash::HashableForVec;
