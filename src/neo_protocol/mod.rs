//! # Neo Protocol
//!
//! Account management, NEP-2 key protection and the typed model of RPC
//! responses.

pub use account::*;
pub use nep2::*;
pub use responses::*;

mod account;
mod nep2;
mod responses;
