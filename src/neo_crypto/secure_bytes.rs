//! A zeroizing container for secret byte strings.
//!
//! Key material that has to exist outside the curve library (WIF payloads,
//! NEP-2 intermediates, passwords) lives in a [`SecureBytes`]: the buffer
//! is wiped through a compiler-barrier-resistant write on drop, compared
//! in constant time, exposed only through a scoped borrow, and never
//! printed by `Debug`/`Display` or serialized implicitly.
//!
//! The backing pages are NOT locked into physical memory (`mlock`); the
//! buffer stays at one address for its whole lifetime, but keeping swap
//! and core dumps away from it is the host process's responsibility.

use std::fmt;

use p256::elliptic_curve::{subtle::ConstantTimeEq, zeroize::Zeroize};

/// A fixed-length secret byte container.
///
/// The backing buffer is allocated once with its final capacity and never
/// reallocated, so no stale copy of the secret is left behind by growth.
/// It is not page-locked; see the module docs.
pub struct SecureBytes {
	data: Vec<u8>,
}

impl SecureBytes {
	/// Takes ownership of `bytes`. The source should itself be wiped by
	/// the caller if it was not moved.
	pub fn new(bytes: Vec<u8>) -> Self {
		let mut data = Vec::with_capacity(bytes.len());
		data.extend_from_slice(&bytes);
		let mut bytes = bytes;
		bytes.zeroize();
		Self { data }
	}

	/// Encodes a password as UTF-8 into a fresh container. The transient
	/// encoding buffer is the container itself, so no intermediate copy
	/// outlives this call.
	pub fn from_password(password: &str) -> Self {
		Self { data: password.as_bytes().to_vec() }
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Grants scoped read access to the secret. The borrow cannot escape
	/// the closure, so release is guaranteed on every exit path.
	pub fn expose<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
		f(&self.data)
	}

	/// Scoped mutable access, for in-place transforms such as the NEP-2
	/// XOR step.
	pub fn expose_mut<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R {
		f(&mut self.data)
	}
}

impl Drop for SecureBytes {
	fn drop(&mut self) {
		self.data.zeroize();
	}
}

impl Clone for SecureBytes {
	fn clone(&self) -> Self {
		Self { data: self.data.clone() }
	}
}

impl PartialEq for SecureBytes {
	fn eq(&self, other: &Self) -> bool {
		// Length is not secret; contents are compared in constant time.
		self.data.len() == other.data.len()
			&& bool::from(self.data.as_slice().ct_eq(other.data.as_slice()))
	}
}

impl Eq for SecureBytes {}

impl fmt::Debug for SecureBytes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecureBytes([REDACTED; {}])", self.data.len())
	}
}

impl fmt::Display for SecureBytes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecureBytes([REDACTED])")
	}
}

impl From<Vec<u8>> for SecureBytes {
	fn from(bytes: Vec<u8>) -> Self {
		Self::new(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_expose_round_trip() {
		let secret = SecureBytes::new(vec![1, 2, 3, 4]);
		assert_eq!(secret.len(), 4);
		secret.expose(|bytes| assert_eq!(bytes, &[1, 2, 3, 4]));
	}

	#[test]
	fn test_constant_time_eq() {
		let a = SecureBytes::new(vec![9u8; 32]);
		let b = SecureBytes::new(vec![9u8; 32]);
		let c = SecureBytes::new(vec![8u8; 32]);
		let d = SecureBytes::new(vec![9u8; 31]);
		assert_eq!(a, b);
		assert_ne!(a, c);
		assert_ne!(a, d);
	}

	#[test]
	fn test_debug_reveals_nothing() {
		let secret = SecureBytes::from_password("hunter2");
		let printed = format!("{:?}", secret);
		assert!(!printed.contains("hunter2"));
		assert!(printed.contains("REDACTED"));
	}

	#[test]
	fn test_expose_mut_transforms_in_place() {
		let mut secret = SecureBytes::new(vec![0xFF; 4]);
		secret.expose_mut(|bytes| bytes.iter_mut().for_each(|b| *b ^= 0xFF));
		secret.expose(|bytes| assert_eq!(bytes, &[0, 0, 0, 0]));
	}
}
