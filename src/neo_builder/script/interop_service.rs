use strum_macros::{Display, EnumString};

use crate::crypto::HashableForVec;

/// The interop services the SDK invokes through `SYSCALL`.
///
/// A service descriptor hash is the first four bytes of the SHA-256 of the
/// service name, hex-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum InteropService {
	#[strum(serialize = "System.Contract.Call")]
	SystemContractCall,
	#[strum(serialize = "System.Crypto.CheckSig")]
	SystemCryptoCheckSig,
	#[strum(serialize = "System.Crypto.CheckMultisig")]
	SystemCryptoCheckMultiSig,
	#[strum(serialize = "System.Iterator.Next")]
	SystemIteratorNext,
	#[strum(serialize = "System.Iterator.Value")]
	SystemIteratorValue,
	#[strum(serialize = "System.Runtime.CheckWitness")]
	SystemRuntimeCheckWitness,
	#[strum(serialize = "System.Runtime.GetNetwork")]
	SystemRuntimeGetNetwork,
}

impl InteropService {
	/// The four-byte descriptor hash as lowercase hex.
	pub fn hash(&self) -> String {
		hex::encode(self.descriptor())
	}

	/// The four-byte descriptor hash.
	pub fn descriptor(&self) -> [u8; 4] {
		let digest = self.to_string().as_bytes().hash256();
		digest[..4].try_into().expect("SHA-256 digests are at least 4 bytes")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_descriptor_hashes() {
		assert_eq!(InteropService::SystemContractCall.hash(), "627d5b52");
		assert_eq!(InteropService::SystemCryptoCheckSig.hash(), "56e7b327");
		assert_eq!(InteropService::SystemCryptoCheckMultiSig.hash(), "9ed0dc3a");
		assert_eq!(InteropService::SystemIteratorNext.hash(), "9c08ed9c");
		assert_eq!(InteropService::SystemIteratorValue.hash(), "f354bf1d");
	}
}
