//! # Neo Config
//!
//! Network and client configuration for the Neo N3 SDK.
//!
//! ## Overview
//!
//! The neo_config module holds the protocol constants shared by the whole
//! crate and the per-client [`NeoConfig`] value. A `NeoConfig` is owned by
//! each `RpcClient`; there is no process-wide mutable configuration. The
//! network magic may be left unset, in which case the client discovers it
//! through `getversion` on first use.

pub use config::{NeoConfig, RawBlockEncoding};
pub use constant::NeoConstants;

mod config;
mod constant;

/// Version byte prepended to a script hash before Base58Check address
/// encoding. 0x35 yields N3 addresses starting with `N`.
pub const DEFAULT_ADDRESS_VERSION: u8 = 0x35;
