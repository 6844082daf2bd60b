use primitive_types::H160;

use crate::{
	builder::{SignerTrait, SignerType, WitnessRule, WitnessScope},
	crypto::Secp256r1PublicKey,
	neo_types::ContractParameter,
};

/// A signer that is a deployed contract. No signature is produced;
/// instead the chain invokes the contract's `verify` method with the
/// given parameters, and the attached witness carries those parameters
/// in its invocation script.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractSigner {
	contract_hash: H160,
	scopes: Vec<WitnessScope>,
	allowed_contracts: Vec<H160>,
	allowed_groups: Vec<Secp256r1PublicKey>,
	rules: Vec<WitnessRule>,
	verify_params: Vec<ContractParameter>,
}

impl ContractSigner {
	fn new(contract_hash: H160, scope: WitnessScope, verify_params: Vec<ContractParameter>) -> Self {
		Self {
			contract_hash,
			scopes: vec![scope],
			allowed_contracts: Vec::new(),
			allowed_groups: Vec::new(),
			rules: Vec::new(),
			verify_params,
		}
	}

	/// A fee-only contract signer.
	pub fn none(contract_hash: H160, verify_params: &[ContractParameter]) -> Self {
		Self::new(contract_hash, WitnessScope::None, verify_params.to_vec())
	}

	pub fn called_by_entry(contract_hash: H160, verify_params: &[ContractParameter]) -> Self {
		Self::new(contract_hash, WitnessScope::CalledByEntry, verify_params.to_vec())
	}

	pub fn global(contract_hash: H160, verify_params: &[ContractParameter]) -> Self {
		Self::new(contract_hash, WitnessScope::Global, verify_params.to_vec())
	}

	/// The parameters handed to the contract's `verify` method.
	pub fn verify_params(&self) -> &Vec<ContractParameter> {
		&self.verify_params
	}
}

impl SignerTrait for ContractSigner {
	fn get_type(&self) -> SignerType {
		SignerType::ContractSigner
	}

	fn get_signer_hash(&self) -> &H160 {
		&self.contract_hash
	}

	fn get_scopes(&self) -> &Vec<WitnessScope> {
		&self.scopes
	}

	fn get_allowed_contracts(&self) -> &Vec<H160> {
		&self.allowed_contracts
	}

	fn get_allowed_groups(&self) -> &Vec<Secp256r1PublicKey> {
		&self.allowed_groups
	}

	fn get_rules(&self) -> &Vec<WitnessRule> {
		&self.rules
	}

	fn scopes_mut(&mut self) -> &mut Vec<WitnessScope> {
		&mut self.scopes
	}

	fn allowed_contracts_mut(&mut self) -> &mut Vec<H160> {
		&mut self.allowed_contracts
	}

	fn allowed_groups_mut(&mut self) -> &mut Vec<Secp256r1PublicKey> {
		&mut self.allowed_groups
	}

	fn rules_mut(&mut self) -> &mut Vec<WitnessRule> {
		&mut self.rules
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_contract_signer_carries_verify_params() {
		let signer =
			ContractSigner::called_by_entry(H160::zero(), &[ContractParameter::integer(5)]);
		assert_eq!(signer.get_type(), SignerType::ContractSigner);
		assert_eq!(signer.verify_params().len(), 1);
		assert_eq!(signer.get_scopes(), &vec![WitnessScope::CalledByEntry]);
	}
}
