use serde::{Deserialize, Serialize};

use crate::neo_types::ContractParameterType;

/// The `contract` object of a NEP-6 account: the verification script
/// (base64) and the named parameters its witness must supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nep6Contract {
	#[serde(rename = "script")]
	pub script: Option<String>,

	#[serde(rename = "parameters", default)]
	pub nep6_parameters: Vec<Nep6Parameter>,

	#[serde(rename = "deployed", default)]
	pub is_deployed: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Nep6Parameter {
	#[serde(rename = "name")]
	pub param_name: String,

	#[serde(rename = "type")]
	pub param_type: ContractParameterType,
}

impl PartialEq for Nep6Contract {
	fn eq(&self, other: &Self) -> bool {
		self.script == other.script
			&& self.nep6_parameters == other.nep6_parameters
			&& self.is_deployed == other.is_deployed
	}
}
