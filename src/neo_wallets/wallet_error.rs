use thiserror::Error;

use crate::{
	builder::BuilderError, neo_protocol::AccountError, neo_types::TypeError,
};

/// Errors raised by wallet management and NEP-6 conversion.
#[derive(Error, Debug)]
pub enum WalletError {
	#[error("Account state: {0}")]
	AccountState(String),

	#[error("No account with script hash {0} in the wallet")]
	AccountNotFound(String),

	#[error("The last remaining account cannot be removed")]
	LastAccount,

	#[error("A NEP-6 wallet must designate exactly one default account")]
	DefaultAccountInvariant,

	#[error("Invalid NEP-6 wallet: {0}")]
	InvalidNep6(String),

	#[error(transparent)]
	Account(#[from] AccountError),

	#[error(transparent)]
	Builder(#[from] BuilderError),

	#[error(transparent)]
	Type(#[from] TypeError),
}
