use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// Hash operations over byte slices used throughout the Neo protocol.
pub trait HashableForVec {
	/// SHA-256 digest. Applied twice this yields the checksum family used
	/// by Base58Check and NEP-2 address hashes.
	fn hash256(&self) -> Vec<u8>;

	/// RIPEMD-160 digest.
	fn ripemd160(&self) -> Vec<u8>;

	/// RIPEMD-160 of the SHA-256 digest; the script hash function.
	fn sha256_ripemd160(&self) -> Vec<u8>;

	fn hmac_sha256(&self, key: &[u8]) -> Vec<u8>;

	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8>;
}

impl HashableForVec for [u8] {
	fn hash256(&self) -> Vec<u8> {
		Sha256::digest(self).to_vec()
	}

	fn ripemd160(&self) -> Vec<u8> {
		Ripemd160::digest(self).to_vec()
	}

	fn sha256_ripemd160(&self) -> Vec<u8> {
		Ripemd160::digest(Sha256::digest(self)).to_vec()
	}

	fn hmac_sha256(&self, key: &[u8]) -> Vec<u8> {
		let mut mac =
			Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
		mac.update(self);
		mac.finalize().into_bytes().to_vec()
	}

	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8> {
		let mut mac =
			Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
		mac.update(self);
		mac.finalize().into_bytes().to_vec()
	}
}

impl HashableForVec for Vec<u8> {
	fn hash256(&self) -> Vec<u8> {
		self.as_slice().hash256()
	}

	fn ripemd160(&self) -> Vec<u8> {
		self.as_slice().ripemd160()
	}

	fn sha256_ripemd160(&self) -> Vec<u8> {
		self.as_slice().sha256_ripemd160()
	}

	fn hmac_sha256(&self, key: &[u8]) -> Vec<u8> {
		self.as_slice().hmac_sha256(key)
	}

	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8> {
		self.as_slice().hmac_sha512(key)
	}
}
