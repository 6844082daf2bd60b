use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::{
	builder::BuilderError,
	codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	crypto::Secp256r1PublicKey,
	neo_types::{deserialize_script_hash, serialize_script_hash},
};

/// The condition of a witness rule, a closed tree with protocol-bounded
/// nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WitnessCondition {
	Boolean {
		#[serde(
			serialize_with = "bool_to_string",
			deserialize_with = "bool_from_string_or_bool"
		)]
		expression: bool,
	},
	Not {
		expression: Box<WitnessCondition>,
	},
	And {
		expressions: Vec<WitnessCondition>,
	},
	Or {
		expressions: Vec<WitnessCondition>,
	},
	ScriptHash {
		#[serde(
			serialize_with = "serialize_script_hash",
			deserialize_with = "deserialize_script_hash"
		)]
		hash: H160,
	},
	Group {
		group: Secp256r1PublicKey,
	},
	CalledByEntry,
	CalledByContract {
		#[serde(
			serialize_with = "serialize_script_hash",
			deserialize_with = "deserialize_script_hash"
		)]
		hash: H160,
	},
	CalledByGroup {
		group: Secp256r1PublicKey,
	},
}

fn bool_to_string<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	serializer.serialize_str(if *value { "true" } else { "false" })
}

fn bool_from_string_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum BoolOrString {
		Bool(bool),
		String(String),
	}
	match BoolOrString::deserialize(deserializer)? {
		BoolOrString::Bool(b) => Ok(b),
		BoolOrString::String(s) => Ok(s == "true"),
	}
}

impl WitnessCondition {
	pub const BOOLEAN_TYPE: u8 = 0x00;
	pub const NOT_TYPE: u8 = 0x01;
	pub const AND_TYPE: u8 = 0x02;
	pub const OR_TYPE: u8 = 0x03;
	pub const SCRIPT_HASH_TYPE: u8 = 0x18;
	pub const GROUP_TYPE: u8 = 0x19;
	pub const CALLED_BY_ENTRY_TYPE: u8 = 0x20;
	pub const CALLED_BY_CONTRACT_TYPE: u8 = 0x28;
	pub const CALLED_BY_GROUP_TYPE: u8 = 0x29;

	/// The chain rejects condition trees nested deeper than this.
	pub const MAX_NESTING_DEPTH: usize = 2;
	pub const MAX_SUBITEMS: usize = 16;

	pub fn type_byte(&self) -> u8 {
		match self {
			WitnessCondition::Boolean { .. } => Self::BOOLEAN_TYPE,
			WitnessCondition::Not { .. } => Self::NOT_TYPE,
			WitnessCondition::And { .. } => Self::AND_TYPE,
			WitnessCondition::Or { .. } => Self::OR_TYPE,
			WitnessCondition::ScriptHash { .. } => Self::SCRIPT_HASH_TYPE,
			WitnessCondition::Group { .. } => Self::GROUP_TYPE,
			WitnessCondition::CalledByEntry => Self::CALLED_BY_ENTRY_TYPE,
			WitnessCondition::CalledByContract { .. } => Self::CALLED_BY_CONTRACT_TYPE,
			WitnessCondition::CalledByGroup { .. } => Self::CALLED_BY_GROUP_TYPE,
		}
	}

	/// Validates the nesting depth and compound sizes.
	pub fn validate(&self) -> Result<(), BuilderError> {
		self.validate_depth(Self::MAX_NESTING_DEPTH)
	}

	fn validate_depth(&self, remaining: usize) -> Result<(), BuilderError> {
		match self {
			WitnessCondition::Not { expression } => {
				if remaining == 0 {
					return Err(BuilderError::SignerConfiguration(
						"Witness condition nesting exceeds the protocol limit".to_string(),
					));
				}
				expression.validate_depth(remaining - 1)
			},
			WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
				if remaining == 0 {
					return Err(BuilderError::SignerConfiguration(
						"Witness condition nesting exceeds the protocol limit".to_string(),
					));
				}
				if expressions.is_empty() || expressions.len() > Self::MAX_SUBITEMS {
					return Err(BuilderError::SignerConfiguration(format!(
						"Compound witness conditions take 1..={} subconditions",
						Self::MAX_SUBITEMS
					)));
				}
				expressions.iter().try_for_each(|e| e.validate_depth(remaining - 1))
			},
			_ => Ok(()),
		}
	}
}

impl NeoSerializable for WitnessCondition {
	type Error = CodecError;

	fn size(&self) -> usize {
		1 + match self {
			WitnessCondition::Boolean { .. } => 1,
			WitnessCondition::Not { expression } => expression.size(),
			WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } =>
				expressions.var_size(),
			WitnessCondition::ScriptHash { hash } => hash.size(),
			WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } =>
				group.size(),
			WitnessCondition::CalledByEntry => 0,
			WitnessCondition::CalledByContract { hash } => hash.size(),
		}
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.type_byte());
		match self {
			WitnessCondition::Boolean { expression } => writer.write_bool(*expression),
			WitnessCondition::Not { expression } => expression.encode(writer),
			WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
				writer
					.write_serializable_variable_list(expressions)
					.expect("condition lists are bounded well below var-int limits");
			},
			WitnessCondition::ScriptHash { hash } |
			WitnessCondition::CalledByContract { hash } => hash.encode(writer),
			WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } =>
				group.encode(writer),
			WitnessCondition::CalledByEntry => {},
		}
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let type_byte = reader.read_u8()?;
		let condition = match type_byte {
			Self::BOOLEAN_TYPE => WitnessCondition::Boolean { expression: reader.read_bool()? },
			Self::NOT_TYPE =>
				WitnessCondition::Not { expression: Box::new(WitnessCondition::decode(reader)?) },
			Self::AND_TYPE =>
				WitnessCondition::And { expressions: reader.read_serializable_list()? },
			Self::OR_TYPE => WitnessCondition::Or { expressions: reader.read_serializable_list()? },
			Self::SCRIPT_HASH_TYPE => WitnessCondition::ScriptHash { hash: H160::decode(reader)? },
			Self::GROUP_TYPE =>
				WitnessCondition::Group { group: Secp256r1PublicKey::decode(reader)? },
			Self::CALLED_BY_ENTRY_TYPE => WitnessCondition::CalledByEntry,
			Self::CALLED_BY_CONTRACT_TYPE =>
				WitnessCondition::CalledByContract { hash: H160::decode(reader)? },
			Self::CALLED_BY_GROUP_TYPE =>
				WitnessCondition::CalledByGroup { group: Secp256r1PublicKey::decode(reader)? },
			_ =>
				return Err(CodecError::InvalidEncoding(format!(
					"Unknown witness condition type {type_byte:#04x}"
				))),
		};
		Ok(condition)
	}
}
