use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait};

/// Response codes an oracle node attaches to an `OracleResponse`
/// attribute.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
#[repr(u8)]
pub enum OracleResponseCode {
	Success = 0x00,
	ProtocolNotSupported = 0x10,
	ConsensusUnreachable = 0x12,
	NotFound = 0x14,
	Timeout = 0x16,
	Forbidden = 0x18,
	ResponseTooLarge = 0x1A,
	InsufficientFunds = 0x1C,
	ContentTypeNotSupported = 0x1F,
	Error = 0xFF,
}

/// A transaction attribute.
///
/// At most one `HighPriority` and one `OracleResponse` may appear on a
/// transaction; the builder enforces the counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionAttribute {
	/// Lets committee members front-run the mempool. No payload.
	HighPriority,

	/// Attached by oracle nodes when delivering a response.
	OracleResponse {
		id: u64,
		code: OracleResponseCode,
		/// Base64 in JSON, var-bytes on the wire.
		result: String,
	},
}

impl TransactionAttribute {
	pub const HIGH_PRIORITY_TYPE: u8 = 0x01;
	pub const ORACLE_RESPONSE_TYPE: u8 = 0x11;
	pub const MAX_RESULT_SIZE: usize = 0xFFFF;

	pub fn type_byte(&self) -> u8 {
		match self {
			TransactionAttribute::HighPriority => Self::HIGH_PRIORITY_TYPE,
			TransactionAttribute::OracleResponse { .. } => Self::ORACLE_RESPONSE_TYPE,
		}
	}
}

impl NeoSerializable for TransactionAttribute {
	type Error = CodecError;

	fn size(&self) -> usize {
		match self {
			TransactionAttribute::HighPriority => 1,
			TransactionAttribute::OracleResponse { result, .. } => {
				use crate::crypto::FromBase64String;
				let raw_len =
					result.from_base64_string().map(|bytes| bytes.len()).unwrap_or_default();
				1 + 8 + 1 + crate::codec::var_size(raw_len as u64) + raw_len
			},
		}
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.type_byte());
		if let TransactionAttribute::OracleResponse { id, code, result } = self {
			use crate::crypto::FromBase64String;
			writer.write_u64(*id);
			writer.write_u8(*code as u8);
			let raw = result.from_base64_string().unwrap_or_default();
			writer.write_var_bytes(&raw).expect("oracle results are size-capped");
		}
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		match reader.read_u8()? {
			Self::HIGH_PRIORITY_TYPE => Ok(TransactionAttribute::HighPriority),
			Self::ORACLE_RESPONSE_TYPE => {
				use crate::crypto::ToBase64String;
				let id = reader.read_u64()?;
				let code = OracleResponseCode::try_from(reader.read_u8()?).map_err(|_| {
					CodecError::InvalidEncoding("Unknown oracle response code".to_string())
				})?;
				let raw = reader.read_var_bytes()?;
				if raw.len() > Self::MAX_RESULT_SIZE {
					return Err(CodecError::MalformedLength(
						"Oracle result exceeds the size cap".to_string(),
					));
				}
				Ok(TransactionAttribute::OracleResponse {
					id,
					code,
					result: raw.to_base64_string(),
				})
			},
			other => Err(CodecError::InvalidEncoding(format!(
				"Unknown transaction attribute type {other:#04x}"
			))),
		}
	}
}
