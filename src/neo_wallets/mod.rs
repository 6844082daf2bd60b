//! # Neo Wallets
//!
//! Wallet management for Neo N3.
//!
//! ## Overview
//!
//! The neo_wallets module provides the account collection type and the
//! NEP-6 wallet document:
//!
//! - [`Wallet`]: accounts keyed by script hash with a single designated
//!   default
//! - [`Nep6Wallet`] / [`Nep6Account`] / [`Nep6Contract`]: the NEP-6
//!   JSON structure and its conversions
//!
//! Reading and writing wallet files is left to the host application;
//! this module only models the document.

pub use nep6::*;
pub use wallet::*;
pub use wallet_error::*;

mod nep6;
mod wallet;
mod wallet_error;
