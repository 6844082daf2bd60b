//! # NEP-2 passphrase-protected private keys
//!
//! NEP-2 wraps a private key in a scrypt-derived AES-256-ECB envelope:
//!
//! ```text
//! payload  = 0x01 0x42 0xE0 || addressHash[4] || AES-ECB(xor(key, DK1), DK2)
//! (DK1, DK2) = scrypt(password, addressHash, N, r, p, 64).split(32)
//! addressHash = sha256(sha256(address))[0..4]
//! ```
//!
//! The final string is Base58Check over the 39-byte payload and starts
//! with `6P`. Decryption re-derives the address from the decrypted key
//! and compares its hash to the stored one, which catches wrong
//! passwords.

use aes::Aes256;
use cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyInit};
use primitive_types::H160;
use scrypt::{scrypt, Params};
use thiserror::Error;

use crate::{
	crypto::{
		base58check_decode, base58check_encode, CryptoError, HashableForVec, KeyPair, SecureBytes,
	},
	neo_config::NeoConstants,
	neo_types::{ScriptHashExtension, ScryptParamsDef},
};

type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

/// Errors raised by NEP-2 encryption and decryption.
#[derive(Error, Debug, PartialEq)]
pub enum Nep2Error {
	#[error("Invalid NEP-2 format: {0}")]
	InvalidFormat(String),

	#[error("Wrong passphrase")]
	InvalidPassphrase,

	#[error("Invalid scrypt parameters: {0}")]
	InvalidScryptParams(String),

	/// The configured scrypt parameters would exceed the memory ceiling.
	#[error("Scrypt memory requirement {required} exceeds the ceiling of {ceiling} bytes")]
	ResourceExhausted { required: u64, ceiling: u64 },

	#[error("Cipher failure: {0}")]
	Cipher(String),

	#[error(transparent)]
	Crypto(#[from] CryptoError),
}

pub struct NEP2;

impl NEP2 {
	pub const DKLEN: usize = 64;
	pub const NEP2_PAYLOAD_LENGTH: usize = 39;
	pub const NEP2_PREFIX_1: u8 = NeoConstants::NEP_HEADER_1;
	pub const NEP2_PREFIX_2: u8 = NeoConstants::NEP_HEADER_2;
	pub const NEP2_FLAGBYTE: u8 = NeoConstants::NEP_FLAG;

	/// Encrypts a key pair under a password with the given scrypt
	/// parameters.
	pub fn encrypt(
		password: &str,
		key_pair: &KeyPair,
		params: ScryptParamsDef,
	) -> Result<String, Nep2Error> {
		let address_hash = address_hash_of(key_pair);
		let derived = derive_key(password, &address_hash, &params)?;

		let mut xored = SecureBytes::new(key_pair.private_key_bytes().to_vec());
		derived.expose(|dk| {
			xored.expose_mut(|key| {
				for (byte, pad) in key.iter_mut().zip(&dk[..32]) {
					*byte ^= pad;
				}
			})
		});

		let encrypted = derived.expose(|dk| {
			let cipher = Aes256EcbEnc::new_from_slice(&dk[32..64])
				.map_err(|e| Nep2Error::Cipher(e.to_string()))?;
			let mut block = [0u8; 32];
			xored.expose(|key| block.copy_from_slice(key));
			cipher
				.encrypt_padded_mut::<NoPadding>(&mut block, 32)
				.map(<[u8]>::to_vec)
				.map_err(|e| Nep2Error::Cipher(e.to_string()))
		})?;

		let mut payload = Vec::with_capacity(Self::NEP2_PAYLOAD_LENGTH);
		payload.push(Self::NEP2_PREFIX_1);
		payload.push(Self::NEP2_PREFIX_2);
		payload.push(Self::NEP2_FLAGBYTE);
		payload.extend_from_slice(&address_hash);
		payload.extend_from_slice(&encrypted);

		Ok(base58check_encode(&payload))
	}

	/// Encrypts with the standard NEP-2 parameters (N=16384, r=8, p=8).
	pub fn encrypt_default(password: &str, key_pair: &KeyPair) -> Result<String, Nep2Error> {
		Self::encrypt(password, key_pair, ScryptParamsDef::default())
	}

	/// Decrypts a NEP-2 string. A wrong password surfaces as
	/// [`Nep2Error::InvalidPassphrase`] via the address-hash check.
	pub fn decrypt(
		password: &str,
		nep2: &str,
		params: ScryptParamsDef,
	) -> Result<KeyPair, Nep2Error> {
		let payload = base58check_decode(nep2)
			.ok_or_else(|| Nep2Error::InvalidFormat("Base58Check decoding failed".to_string()))?;
		if payload.len() != Self::NEP2_PAYLOAD_LENGTH {
			return Err(Nep2Error::InvalidFormat(format!(
				"NEP-2 payloads are {} bytes, got {}",
				Self::NEP2_PAYLOAD_LENGTH,
				payload.len()
			)));
		}
		if payload[0] != Self::NEP2_PREFIX_1
			|| payload[1] != Self::NEP2_PREFIX_2
			|| payload[2] != Self::NEP2_FLAGBYTE
		{
			return Err(Nep2Error::InvalidFormat("Wrong NEP-2 framing bytes".to_string()));
		}

		let address_hash: [u8; 4] = payload[3..7].try_into().expect("slice is 4 bytes");
		let encrypted = &payload[7..39];

		let derived = derive_key(password, &address_hash, &params)?;

		let mut decrypted = derived.expose(|dk| {
			let cipher = Aes256EcbDec::new_from_slice(&dk[32..64])
				.map_err(|e| Nep2Error::Cipher(e.to_string()))?;
			let mut block = [0u8; 32];
			block.copy_from_slice(encrypted);
			cipher
				.decrypt_padded_mut::<NoPadding>(&mut block)
				.map(<[u8]>::to_vec)
				.map_err(|e| Nep2Error::Cipher(e.to_string()))
		})?;
		let mut plain_key = SecureBytes::new(std::mem::take(&mut decrypted));
		derived.expose(|dk| {
			plain_key.expose_mut(|key| {
				for (byte, pad) in key.iter_mut().zip(&dk[..32]) {
					*byte ^= pad;
				}
			})
		});

		let key_pair = plain_key.expose(|key| {
			let bytes: [u8; 32] =
				key.try_into().map_err(|_| CryptoError::InvalidPrivateKey)?;
			KeyPair::from_private_key(&bytes)
		})?;

		// Wrong passwords decrypt to a different key, whose address hash
		// cannot match the stored one.
		if address_hash_of(&key_pair) != address_hash {
			return Err(Nep2Error::InvalidPassphrase);
		}

		Ok(key_pair)
	}

	pub fn decrypt_default(password: &str, nep2: &str) -> Result<KeyPair, Nep2Error> {
		Self::decrypt(password, nep2, ScryptParamsDef::default())
	}
}

/// `sha256(sha256(address))[0..4]` for the key pair's address.
fn address_hash_of(key_pair: &KeyPair) -> [u8; 4] {
	let address = H160::from_public_key(&key_pair.public_key_bytes())
		.expect("compressed public keys are always 33 bytes")
		.to_address();
	let digest = address.as_bytes().hash256().hash256();
	digest[..4].try_into().expect("SHA-256 digests are at least 4 bytes")
}

/// Runs scrypt into a zeroizing buffer, enforcing the memory ceiling
/// before any allocation happens.
fn derive_key(
	password: &str,
	address_hash: &[u8; 4],
	params: &ScryptParamsDef,
) -> Result<SecureBytes, Nep2Error> {
	let required = params.memory_bytes();
	if required > NeoConstants::SCRYPT_MEMORY_CEILING {
		return Err(Nep2Error::ResourceExhausted {
			required,
			ceiling: NeoConstants::SCRYPT_MEMORY_CEILING,
		});
	}

	let log_n = params.log_n().map_err(|e| Nep2Error::InvalidScryptParams(e.to_string()))?;
	let scrypt_params = Params::new(log_n, params.r, params.p, 32)
		.map_err(|e| Nep2Error::InvalidScryptParams(e.to_string()))?;

	let password = SecureBytes::from_password(password);
	let mut derived = SecureBytes::new(vec![0u8; NEP2::DKLEN]);
	let result = password.expose(|pw| {
		derived.expose_mut(|out| scrypt(pw, address_hash, &scrypt_params, out))
	});
	result.map_err(|e| Nep2Error::InvalidScryptParams(e.to_string()))?;
	Ok(derived)
}
