use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::builder::BuilderError;

/// Witness scope flags constraining where a signer's witness may be
/// consumed during contract invocation.
///
/// `Global` is mutually exclusive with every other flag; the custom
/// scopes each require their companion list on the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[repr(u8)]
pub enum WitnessScope {
	/// Only the fee is covered; the witness is valid nowhere else.
	#[serde(rename = "None")]
	#[strum(serialize = "None")]
	None = 0x00,

	/// Valid in the entry script and in contracts it calls directly.
	#[serde(rename = "CalledByEntry")]
	#[strum(serialize = "CalledByEntry")]
	CalledByEntry = 0x01,

	/// Valid only in the contracts listed on the signer.
	#[serde(rename = "CustomContracts")]
	#[strum(serialize = "CustomContracts")]
	CustomContracts = 0x10,

	/// Valid only in contracts belonging to the listed groups.
	#[serde(rename = "CustomGroups")]
	#[strum(serialize = "CustomGroups")]
	CustomGroups = 0x20,

	/// Valid where the signer's witness rules allow it.
	#[serde(rename = "WitnessRules")]
	#[strum(serialize = "WitnessRules")]
	WitnessRules = 0x40,

	/// Valid everywhere. Must stand alone.
	#[serde(rename = "Global")]
	#[strum(serialize = "Global")]
	Global = 0x80,
}

impl WitnessScope {
	pub fn byte_repr(self) -> u8 {
		self as u8
	}

	pub fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			0x00 => Some(WitnessScope::None),
			0x01 => Some(WitnessScope::CalledByEntry),
			0x10 => Some(WitnessScope::CustomContracts),
			0x20 => Some(WitnessScope::CustomGroups),
			0x40 => Some(WitnessScope::WitnessRules),
			0x80 => Some(WitnessScope::Global),
			_ => None,
		}
	}

	/// Folds a set of scopes into the wire byte.
	pub fn combine(scopes: &[Self]) -> u8 {
		scopes.iter().fold(0, |acc, scope| acc | scope.byte_repr())
	}

	/// Splits a wire byte into scopes, rejecting unknown bits and the
	/// combination of `Global` with anything else.
	pub fn split(byte: u8) -> Result<Vec<Self>, BuilderError> {
		const KNOWN: u8 = 0x00 | 0x01 | 0x10 | 0x20 | 0x40 | 0x80;
		if byte & !KNOWN != 0 {
			return Err(BuilderError::SignerConfiguration(format!(
				"Unknown witness scope bits: {byte:#04x}"
			)));
		}

		if byte == 0 {
			return Ok(vec![WitnessScope::None]);
		}

		let mut scopes = Vec::new();
		for flag in [
			WitnessScope::CalledByEntry,
			WitnessScope::CustomContracts,
			WitnessScope::CustomGroups,
			WitnessScope::WitnessRules,
			WitnessScope::Global,
		] {
			if byte & flag.byte_repr() != 0 {
				scopes.push(flag);
			}
		}

		if scopes.contains(&WitnessScope::Global) && scopes.len() > 1 {
			return Err(BuilderError::SignerConfiguration(
				"Global witness scope cannot be combined with other scopes".to_string(),
			));
		}

		Ok(scopes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_combine_and_split() {
		let scopes = vec![WitnessScope::CalledByEntry, WitnessScope::CustomContracts];
		let byte = WitnessScope::combine(&scopes);
		assert_eq!(byte, 0x11);
		assert_eq!(WitnessScope::split(byte).unwrap(), scopes);
	}

	#[test]
	fn test_split_zero_is_none() {
		assert_eq!(WitnessScope::split(0).unwrap(), vec![WitnessScope::None]);
	}

	#[test]
	fn test_split_rejects_global_combinations() {
		assert!(WitnessScope::split(0x81).is_err());
		assert!(WitnessScope::split(0x90).is_err());
		assert_eq!(WitnessScope::split(0x80).unwrap(), vec![WitnessScope::Global]);
	}

	#[test]
	fn test_split_rejects_unknown_bits() {
		assert!(WitnessScope::split(0x02).is_err());
		assert!(WitnessScope::split(0x08).is_err());
	}

	#[test]
	fn test_json_names() {
		assert_eq!(
			serde_json::to_string(&WitnessScope::CalledByEntry).unwrap(),
			"\"CalledByEntry\""
		);
	}
}
