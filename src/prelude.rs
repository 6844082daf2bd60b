//! Convenient imports for everyday use of the SDK.
//!
//! This prelude re-exports the types, traits and helpers that nearly
//! every consumer needs:
//!
//! ```rust
//! use neo3_core::prelude::*;
//! ```

pub use primitive_types::{H160, H256};

pub use crate::{
	builder::{
		AccountSigner, ContractParametersContext, ContractSigner, InvocationScript,
		ScriptBuilder, Signer, SignerTrait, Transaction, TransactionAttribute,
		TransactionBuilder, TransactionError, TransactionSigner, VerificationScript, Witness,
		WitnessAction, WitnessCondition, WitnessRule, WitnessScope,
	},
	codec::{Decoder, Encoder, NeoSerializable},
	neo_clients::{Http, JsonRpcProvider, MockProvider, NeoIterator, ProviderError, RpcClient},
	neo_config::{NeoConfig, NeoConstants},
	neo_crypto::{
		HashCache, HashableForVec, KeyPair, Secp256r1PrivateKey, Secp256r1PublicKey,
		Secp256r1Signature, SecureBytes,
	},
	neo_error::{Neo3Error, Neo3Result},
	neo_protocol::{Account, AccountTrait, Nep2Error, NEP2},
	neo_types::{
		Address, AddressExtension, Bytes, ContractParameter, ContractParameterType,
		HashExtension, InvocationResult, OpCode, ScriptHash, ScriptHashExtension,
		ScryptParamsDef, StackItem, VMState,
	},
	neo_wallets::{Nep6Account, Nep6Wallet, Wallet, WalletError},
};
