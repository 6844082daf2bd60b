use serde::{Deserialize, Serialize};

use crate::{neo_config::NeoConstants, neo_types::TypeError};

/// Scrypt difficulty parameters as stored in NEP-6 wallets and fed to
/// NEP-2 key encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScryptParamsDef {
	pub n: u32,
	pub r: u32,
	pub p: u32,
}

impl Default for ScryptParamsDef {
	fn default() -> Self {
		Self { n: NeoConstants::SCRYPT_N, r: NeoConstants::SCRYPT_R, p: NeoConstants::SCRYPT_P }
	}
}

impl ScryptParamsDef {
	pub fn new(n: u32, r: u32, p: u32) -> Self {
		Self { n, r, p }
	}

	/// `log2(N)`, which the `scrypt` crate takes instead of `N`.
	/// `N` must be a power of two greater than one.
	pub fn log_n(&self) -> Result<u8, TypeError> {
		if self.n <= 1 || !self.n.is_power_of_two() {
			return Err(TypeError::InvalidArgError(format!(
				"Scrypt N must be a power of two > 1, got {}",
				self.n
			)));
		}
		Ok(self.n.trailing_zeros() as u8)
	}

	/// The working memory scrypt will allocate: `128 * N * r * p`.
	pub fn memory_bytes(&self) -> u64 {
		128 * self.n as u64 * self.r as u64 * self.p as u64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_matches_nep2_standard() {
		let params = ScryptParamsDef::default();
		assert_eq!(params.n, 16384);
		assert_eq!(params.r, 8);
		assert_eq!(params.p, 8);
		assert_eq!(params.log_n().unwrap(), 14);
	}

	#[test]
	fn test_log_n_rejects_non_powers() {
		assert!(ScryptParamsDef::new(0, 8, 8).log_n().is_err());
		assert!(ScryptParamsDef::new(1, 8, 8).log_n().is_err());
		assert!(ScryptParamsDef::new(1000, 8, 8).log_n().is_err());
		assert_eq!(ScryptParamsDef::new(2, 8, 8).log_n().unwrap(), 1);
	}

	#[test]
	fn test_json_shape() {
		let json = serde_json::to_value(ScryptParamsDef::default()).unwrap();
		assert_eq!(json, serde_json::json!({"n": 16384, "r": 8, "p": 8}));
	}
}
