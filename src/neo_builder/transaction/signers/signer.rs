use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::{
	builder::{
		AccountSigner, BuilderError, ContractSigner, TransactionSigner, WitnessRule, WitnessScope,
	},
	codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	crypto::Secp256r1PublicKey,
	neo_config::NeoConstants,
};

/// The kind of a [`Signer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerType {
	AccountSigner,
	ContractSigner,
	TransactionSigner,
}

/// Common behavior of all signer kinds: the signing account hash, the
/// witness scopes and the scope-dependent allow lists.
///
/// The mutators keep the scope flags and their companion lists
/// consistent: a custom scope is present exactly when its list is
/// non-empty, `Global` stands alone, and no list exceeds
/// [`NeoConstants::MAX_SIGNER_SUBITEMS`].
pub trait SignerTrait {
	fn get_type(&self) -> SignerType;

	fn get_signer_hash(&self) -> &H160;

	fn get_scopes(&self) -> &Vec<WitnessScope>;

	fn get_allowed_contracts(&self) -> &Vec<H160>;

	fn get_allowed_groups(&self) -> &Vec<Secp256r1PublicKey>;

	fn get_rules(&self) -> &Vec<WitnessRule>;

	fn scopes_mut(&mut self) -> &mut Vec<WitnessScope>;

	fn allowed_contracts_mut(&mut self) -> &mut Vec<H160>;

	fn allowed_groups_mut(&mut self) -> &mut Vec<Secp256r1PublicKey>;

	fn rules_mut(&mut self) -> &mut Vec<WitnessRule>;

	/// Grants the witness to the listed contracts, adding the
	/// `CustomContracts` scope.
	fn set_allowed_contracts(&mut self, contracts: Vec<H160>) -> Result<(), BuilderError> {
		if contracts.is_empty() {
			return Err(BuilderError::SignerConfiguration(
				"CustomContracts requires a non-empty contract list".to_string(),
			));
		}
		if self.get_scopes().contains(&WitnessScope::Global) {
			return Err(BuilderError::SignerConfiguration(
				"Trying to set allowed contracts on a signer with global scope".to_string(),
			));
		}
		if self.get_allowed_contracts().len() + contracts.len()
			> NeoConstants::MAX_SIGNER_SUBITEMS as usize
		{
			return Err(BuilderError::SignerConfiguration(format!(
				"A signer's scope can only contain {} allowed contracts",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}

		let scopes = self.scopes_mut();
		scopes.retain(|scope| *scope != WitnessScope::None);
		if !scopes.contains(&WitnessScope::CustomContracts) {
			scopes.push(WitnessScope::CustomContracts);
		}
		self.allowed_contracts_mut().extend(contracts);
		Ok(())
	}

	/// Grants the witness to contracts of the listed groups, adding the
	/// `CustomGroups` scope.
	fn set_allowed_groups(
		&mut self,
		groups: Vec<Secp256r1PublicKey>,
	) -> Result<(), BuilderError> {
		if groups.is_empty() {
			return Err(BuilderError::SignerConfiguration(
				"CustomGroups requires a non-empty group list".to_string(),
			));
		}
		if self.get_scopes().contains(&WitnessScope::Global) {
			return Err(BuilderError::SignerConfiguration(
				"Trying to set allowed groups on a signer with global scope".to_string(),
			));
		}
		if self.get_allowed_groups().len() + groups.len()
			> NeoConstants::MAX_SIGNER_SUBITEMS as usize
		{
			return Err(BuilderError::SignerConfiguration(format!(
				"A signer's scope can only contain {} allowed groups",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}

		let scopes = self.scopes_mut();
		scopes.retain(|scope| *scope != WitnessScope::None);
		if !scopes.contains(&WitnessScope::CustomGroups) {
			scopes.push(WitnessScope::CustomGroups);
		}
		self.allowed_groups_mut().extend(groups);
		Ok(())
	}

	/// Constrains the witness by rules, adding the `WitnessRules` scope.
	fn set_rules(&mut self, rules: Vec<WitnessRule>) -> Result<(), BuilderError> {
		if rules.is_empty() {
			return Err(BuilderError::SignerConfiguration(
				"WitnessRules requires a non-empty rule list".to_string(),
			));
		}
		if self.get_scopes().contains(&WitnessScope::Global) {
			return Err(BuilderError::SignerConfiguration(
				"Trying to set witness rules on a signer with global scope".to_string(),
			));
		}
		if self.get_rules().len() + rules.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
			return Err(BuilderError::SignerConfiguration(format!(
				"A signer's scope can only contain {} rules",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}
		for rule in &rules {
			rule.validate()?;
		}

		let scopes = self.scopes_mut();
		scopes.retain(|scope| *scope != WitnessScope::None);
		if !scopes.contains(&WitnessScope::WitnessRules) {
			scopes.push(WitnessScope::WitnessRules);
		}
		self.rules_mut().extend(rules);
		Ok(())
	}

	/// Checks the scope/list consistency invariants. Serialization and
	/// transaction building refuse signers that fail this.
	fn validate_scopes(&self) -> Result<(), BuilderError> {
		let scopes = self.get_scopes();
		if scopes.is_empty() {
			return Err(BuilderError::SignerConfiguration(
				"A signer needs at least one witness scope".to_string(),
			));
		}
		if scopes.contains(&WitnessScope::Global) && scopes.len() > 1 {
			return Err(BuilderError::SignerConfiguration(
				"Global witness scope cannot be combined with other scopes".to_string(),
			));
		}
		if scopes.contains(&WitnessScope::None) && scopes.len() > 1 {
			return Err(BuilderError::SignerConfiguration(
				"The fee-only scope cannot be combined with other scopes".to_string(),
			));
		}

		let checks: [(WitnessScope, usize, &str); 3] = [
			(WitnessScope::CustomContracts, self.get_allowed_contracts().len(), "contracts"),
			(WitnessScope::CustomGroups, self.get_allowed_groups().len(), "groups"),
			(WitnessScope::WitnessRules, self.get_rules().len(), "rules"),
		];
		for (scope, len, what) in checks {
			let has_scope = scopes.contains(&scope);
			if has_scope && len == 0 {
				return Err(BuilderError::SignerConfiguration(format!(
					"The {scope} scope requires a non-empty list of {what}"
				)));
			}
			if !has_scope && len > 0 {
				return Err(BuilderError::SignerConfiguration(format!(
					"A list of {what} is only allowed with the {scope} scope"
				)));
			}
			if len > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
				return Err(BuilderError::SignerConfiguration(format!(
					"A signer's scope can only contain {} {what}",
					NeoConstants::MAX_SIGNER_SUBITEMS
				)));
			}
		}
		Ok(())
	}
}

/// A transaction signer of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Signer {
	AccountSigner(AccountSigner),
	ContractSigner(ContractSigner),
	TransactionSigner(TransactionSigner),
}

impl Signer {
	pub fn as_account_signer(&self) -> Option<&AccountSigner> {
		match self {
			Signer::AccountSigner(signer) => Some(signer),
			_ => None,
		}
	}

	pub fn as_contract_signer(&self) -> Option<&ContractSigner> {
		match self {
			Signer::ContractSigner(signer) => Some(signer),
			_ => None,
		}
	}

	/// Flattens any signer kind into the plain data form used on the
	/// wire and in RPC parameters.
	pub fn to_transaction_signer(&self) -> TransactionSigner {
		match self {
			Signer::TransactionSigner(signer) => signer.clone(),
			_ => TransactionSigner::new_full(
				*self.get_signer_hash(),
				self.get_scopes().clone(),
				self.get_allowed_contracts().clone(),
				self.get_allowed_groups().clone(),
				self.get_rules().clone(),
			),
		}
	}
}

macro_rules! delegate {
	($self:ident, $method:ident) => {
		match $self {
			Signer::AccountSigner(signer) => signer.$method(),
			Signer::ContractSigner(signer) => signer.$method(),
			Signer::TransactionSigner(signer) => signer.$method(),
		}
	};
}

impl SignerTrait for Signer {
	fn get_type(&self) -> SignerType {
		delegate!(self, get_type)
	}

	fn get_signer_hash(&self) -> &H160 {
		delegate!(self, get_signer_hash)
	}

	fn get_scopes(&self) -> &Vec<WitnessScope> {
		delegate!(self, get_scopes)
	}

	fn get_allowed_contracts(&self) -> &Vec<H160> {
		delegate!(self, get_allowed_contracts)
	}

	fn get_allowed_groups(&self) -> &Vec<Secp256r1PublicKey> {
		delegate!(self, get_allowed_groups)
	}

	fn get_rules(&self) -> &Vec<WitnessRule> {
		delegate!(self, get_rules)
	}

	fn scopes_mut(&mut self) -> &mut Vec<WitnessScope> {
		delegate!(self, scopes_mut)
	}

	fn allowed_contracts_mut(&mut self) -> &mut Vec<H160> {
		delegate!(self, allowed_contracts_mut)
	}

	fn allowed_groups_mut(&mut self) -> &mut Vec<Secp256r1PublicKey> {
		delegate!(self, allowed_groups_mut)
	}

	fn rules_mut(&mut self) -> &mut Vec<WitnessRule> {
		delegate!(self, rules_mut)
	}
}

impl From<AccountSigner> for Signer {
	fn from(signer: AccountSigner) -> Self {
		Signer::AccountSigner(signer)
	}
}

impl From<ContractSigner> for Signer {
	fn from(signer: ContractSigner) -> Self {
		Signer::ContractSigner(signer)
	}
}

impl From<TransactionSigner> for Signer {
	fn from(signer: TransactionSigner) -> Self {
		Signer::TransactionSigner(signer)
	}
}

impl Serialize for Signer {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.to_transaction_signer().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Signer {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		TransactionSigner::deserialize(deserializer).map(Signer::TransactionSigner)
	}
}

impl NeoSerializable for Signer {
	type Error = CodecError;

	fn size(&self) -> usize {
		let mut size = 20 + 1;
		let scopes = self.get_scopes();
		if scopes.contains(&WitnessScope::CustomContracts) {
			size += self.get_allowed_contracts().var_size();
		}
		if scopes.contains(&WitnessScope::CustomGroups) {
			size += self.get_allowed_groups().var_size();
		}
		if scopes.contains(&WitnessScope::WitnessRules) {
			size += self.get_rules().var_size();
		}
		size
	}

	fn encode(&self, writer: &mut Encoder) {
		self.get_signer_hash().encode(writer);
		let scopes = self.get_scopes();
		writer.write_u8(WitnessScope::combine(scopes));
		if scopes.contains(&WitnessScope::CustomContracts) {
			writer
				.write_serializable_variable_list(self.get_allowed_contracts())
				.expect("signer lists are capped at 16 entries");
		}
		if scopes.contains(&WitnessScope::CustomGroups) {
			writer
				.write_serializable_variable_list(self.get_allowed_groups())
				.expect("signer lists are capped at 16 entries");
		}
		if scopes.contains(&WitnessScope::WitnessRules) {
			writer
				.write_serializable_variable_list(self.get_rules())
				.expect("signer lists are capped at 16 entries");
		}
	}

	fn decode(reader: &mut Decoder) -> Result<Self, Self::Error> {
		let account = H160::decode(reader)?;
		let scopes = WitnessScope::split(reader.read_u8()?)
			.map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;

		let mut allowed_contracts = Vec::new();
		let mut allowed_groups = Vec::new();
		let mut rules = Vec::new();
		if scopes.contains(&WitnessScope::CustomContracts) {
			allowed_contracts = reader.read_serializable_list::<H160>()?;
		}
		if scopes.contains(&WitnessScope::CustomGroups) {
			allowed_groups = reader.read_serializable_list::<Secp256r1PublicKey>()?;
		}
		if scopes.contains(&WitnessScope::WitnessRules) {
			rules = reader.read_serializable_list::<WitnessRule>()?;
		}
		if allowed_contracts.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize
			|| allowed_groups.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize
			|| rules.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize
		{
			return Err(CodecError::MalformedLength(
				"Signer scope lists are capped at 16 entries".to_string(),
			));
		}

		Ok(Signer::TransactionSigner(TransactionSigner::new_full(
			account,
			scopes,
			allowed_contracts,
			allowed_groups,
			rules,
		)))
	}
}
