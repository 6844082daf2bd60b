use serde::{Deserialize, Serialize};

use crate::{
	builder::{BuilderError, WitnessAction, WitnessCondition},
	codec::{CodecError, Decoder, Encoder, NeoSerializable},
};

/// A witness rule: an action applied when its condition matches during
/// invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessRule {
	pub action: WitnessAction,
	pub condition: WitnessCondition,
}

impl WitnessRule {
	pub fn new(action: WitnessAction, condition: WitnessCondition) -> Self {
		Self { action, condition }
	}

	pub fn validate(&self) -> Result<(), BuilderError> {
		self.condition.validate()
	}
}

impl NeoSerializable for WitnessRule {
	type Error = CodecError;

	fn size(&self) -> usize {
		1 + self.condition.size()
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.action as u8);
		self.condition.encode(writer);
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let action = WitnessAction::try_from(reader.read_u8()?)
			.map_err(|_| CodecError::InvalidEncoding("Unknown witness action".to_string()))?;
		let condition = WitnessCondition::decode(reader)?;
		Ok(Self { action, condition })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_binary_round_trip() {
		let rule = WitnessRule::new(WitnessAction::Allow, WitnessCondition::CalledByEntry);
		let bytes = rule.to_array();
		assert_eq!(bytes, vec![0x01, WitnessCondition::CALLED_BY_ENTRY_TYPE]);
		assert_eq!(WitnessRule::from_bytes(&bytes).unwrap(), rule);
	}

	#[test]
	fn test_json_round_trip() {
		let rule = WitnessRule::new(
			WitnessAction::Deny,
			WitnessCondition::Boolean { expression: false },
		);
		let json = serde_json::to_string(&rule).unwrap();
		assert!(json.contains("\"Deny\""));
		assert_eq!(serde_json::from_str::<WitnessRule>(&json).unwrap(), rule);
	}
}
