//! # Neo Codec
//!
//! Binary serialization for Neo N3 data structures.
//!
//! ## Overview
//!
//! The neo_codec module implements the byte-exact wire format Neo nodes
//! expect: little-endian integers, the canonical 1/3/5/9-byte var-int
//! family, var-bytes/var-string/var-array framing, and the
//! [`NeoSerializable`] trait every protocol structure implements. Hashes
//! serialize in little-endian order, the reverse of their display form.

pub use binary_decoder::*;
pub use binary_encoder::*;
pub use encode::*;
pub use error::*;

mod binary_decoder;
mod binary_encoder;
mod encode;
mod error;
