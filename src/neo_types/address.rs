use primitive_types::H160;

use crate::neo_types::{ScriptHashExtension, TypeError};

/// A Base58Check-encoded Neo address.
pub type Address = String;

/// Address-side conversions, the inverse view of
/// [`ScriptHashExtension::to_address`].
pub trait AddressExtension {
	/// Decodes this address into its script hash, with strict checksum
	/// and version validation.
	fn address_to_script_hash(&self) -> Result<H160, TypeError>;

	/// Whether the string is a well-formed address under the default
	/// version byte.
	fn is_valid_address(&self) -> bool;
}

impl AddressExtension for str {
	fn address_to_script_hash(&self) -> Result<H160, TypeError> {
		H160::from_address(self)
	}

	fn is_valid_address(&self) -> bool {
		H160::from_address(self).is_ok()
	}
}

impl AddressExtension for String {
	fn address_to_script_hash(&self) -> Result<H160, TypeError> {
		self.as_str().address_to_script_hash()
	}

	fn is_valid_address(&self) -> bool {
		self.as_str().is_valid_address()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_address_to_script_hash() {
		let hash = <H160 as ScriptHashExtension>::zero();
		let address = hash.to_address();
		assert_eq!(address.address_to_script_hash().unwrap(), hash);
		assert!(address.is_valid_address());
	}

	#[test]
	fn test_invalid_address() {
		assert!(!"".is_valid_address());
		assert!(!"NLnyLtep7jwyq1qhNPkwXbJpurC4jUT8keas".is_valid_address());
	}
}
