use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Terminal NeoVM execution states. `HALT` is success, `FAULT` failure.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum VMState {
	#[default]
	#[serde(rename = "NONE")]
	#[strum(serialize = "NONE")]
	None,
	#[serde(rename = "HALT")]
	#[strum(serialize = "HALT")]
	Halt,
	#[serde(rename = "FAULT")]
	#[strum(serialize = "FAULT")]
	Fault,
	#[serde(rename = "BREAK")]
	#[strum(serialize = "BREAK")]
	Break,
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	#[test]
	fn test_json_round_trip() {
		assert_eq!(serde_json::to_string(&VMState::Halt).unwrap(), "\"HALT\"");
		assert_eq!(serde_json::from_str::<VMState>("\"FAULT\"").unwrap(), VMState::Fault);
	}

	#[test]
	fn test_string_round_trip() {
		assert_eq!(VMState::Halt.to_string(), "HALT");
		assert_eq!(VMState::from_str("BREAK").unwrap(), VMState::Break);
	}
}
