use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Whether a matching witness rule admits or rejects the witness.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
#[repr(u8)]
pub enum WitnessAction {
	Deny = 0,
	Allow = 1,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_json_names() {
		assert_eq!(serde_json::to_string(&WitnessAction::Allow).unwrap(), "\"Allow\"");
		assert_eq!(serde_json::from_str::<WitnessAction>("\"Deny\"").unwrap(), WitnessAction::Deny);
	}
}
