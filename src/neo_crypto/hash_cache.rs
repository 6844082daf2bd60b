//! An optional cache for repeated hashing of identical inputs.
//!
//! Verification scripts and transaction bodies get hashed repeatedly while
//! a transaction moves through fee calculation and signing. A [`HashCache`]
//! memoizes those digests. It is an explicitly constructed object handed to
//! whoever wants it; correctness never depends on it and nothing in the
//! crate requires one.

use std::{
	collections::HashMap,
	sync::Mutex,
	time::{Duration, Instant},
};

use crate::crypto::hash::HashableForVec;

/// Bounds and lifetime settings for a [`HashCache`].
#[derive(Clone, Debug)]
pub struct HashCacheConfig {
	/// Maximum number of entries before LRU eviction kicks in.
	pub max_entries: usize,
	/// Maximum total bytes (keys + digests) held by the cache.
	pub max_size_bytes: usize,
	/// Entries older than this are dropped on access.
	pub default_ttl: Duration,
}

impl Default for HashCacheConfig {
	fn default() -> Self {
		Self {
			max_entries: 4096,
			max_size_bytes: 8 * 1024 * 1024,
			default_ttl: Duration::from_secs(3600),
		}
	}
}

/// Usage counters, readable at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashCacheStats {
	pub hits: u64,
	pub misses: u64,
	pub evictions: u64,
}

struct CacheEntry {
	digest: Vec<u8>,
	created: Instant,
	last_access: Instant,
}

struct CacheInner {
	entries: HashMap<Vec<u8>, CacheEntry>,
	size_bytes: usize,
	stats: HashCacheStats,
}

/// A thread-safe, bounded, TTL-aware digest cache with LRU eviction by
/// last-access timestamp.
pub struct HashCache {
	config: HashCacheConfig,
	inner: Mutex<CacheInner>,
}

impl HashCache {
	pub fn new(config: HashCacheConfig) -> Self {
		Self {
			config,
			inner: Mutex::new(CacheInner {
				entries: HashMap::new(),
				size_bytes: 0,
				stats: HashCacheStats::default(),
			}),
		}
	}

	pub fn with_defaults() -> Self {
		Self::new(HashCacheConfig::default())
	}

	/// SHA-256 through the cache.
	pub fn hash256(&self, data: &[u8]) -> Vec<u8> {
		self.get_or_compute(0x01, data, |d| d.hash256())
	}

	/// RIPEMD-160(SHA-256(·)) through the cache.
	pub fn sha256_ripemd160(&self, data: &[u8]) -> Vec<u8> {
		self.get_or_compute(0x02, data, |d| d.sha256_ripemd160())
	}

	pub fn stats(&self) -> HashCacheStats {
		self.inner.lock().expect("hash cache poisoned").stats.clone()
	}

	pub fn len(&self) -> usize {
		self.inner.lock().expect("hash cache poisoned").entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn clear(&self) {
		let mut inner = self.inner.lock().expect("hash cache poisoned");
		inner.entries.clear();
		inner.size_bytes = 0;
	}

	fn get_or_compute(
		&self,
		domain: u8,
		data: &[u8],
		compute: impl FnOnce(&[u8]) -> Vec<u8>,
	) -> Vec<u8> {
		let mut key = Vec::with_capacity(data.len() + 1);
		key.push(domain);
		key.extend_from_slice(data);

		let now = Instant::now();
		let mut guard = self.inner.lock().expect("hash cache poisoned");
		let inner = &mut *guard;

		let expired = match inner.entries.get_mut(&key) {
			Some(entry) if now.duration_since(entry.created) <= self.config.default_ttl => {
				entry.last_access = now;
				inner.stats.hits += 1;
				return entry.digest.clone();
			},
			Some(_) => true,
			None => false,
		};
		if expired {
			if let Some(old) = inner.entries.remove(&key) {
				inner.size_bytes -= key.len() + old.digest.len();
				inner.stats.evictions += 1;
			}
		}

		inner.stats.misses += 1;
		let digest = compute(data);

		let entry_size = key.len() + digest.len();
		// Inputs larger than the whole budget are not worth caching.
		if entry_size <= self.config.max_size_bytes {
			while inner.entries.len() >= self.config.max_entries
				|| inner.size_bytes + entry_size > self.config.max_size_bytes
			{
				if !Self::evict_lru(inner) {
					break;
				}
			}
			inner.size_bytes += entry_size;
			inner
				.entries
				.insert(key, CacheEntry { digest: digest.clone(), created: now, last_access: now });
		}

		digest
	}

	fn evict_lru(inner: &mut CacheInner) -> bool {
		let oldest = inner
			.entries
			.iter()
			.min_by_key(|(_, entry)| entry.last_access)
			.map(|(key, _)| key.clone());
		match oldest {
			Some(key) => {
				if let Some(entry) = inner.entries.remove(&key) {
					inner.size_bytes -= key.len() + entry.digest.len();
					inner.stats.evictions += 1;
				}
				true
			},
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hit_returns_same_digest() {
		let cache = HashCache::with_defaults();
		let first = cache.hash256(b"hello");
		let second = cache.hash256(b"hello");
		assert_eq!(first, second);
		assert_eq!(first, b"hello".to_vec().hash256());

		let stats = cache.stats();
		assert_eq!(stats.misses, 1);
		assert_eq!(stats.hits, 1);
	}

	#[test]
	fn test_domains_do_not_collide() {
		let cache = HashCache::with_defaults();
		assert_ne!(cache.hash256(b"x"), cache.sha256_ripemd160(b"x"));
	}

	#[test]
	fn test_entry_count_bound() {
		let cache = HashCache::new(HashCacheConfig {
			max_entries: 4,
			..HashCacheConfig::default()
		});
		for i in 0u32..16 {
			cache.hash256(&i.to_le_bytes());
		}
		assert!(cache.len() <= 4);
		assert!(cache.stats().evictions >= 12);
	}

	#[test]
	fn test_ttl_expiry_recomputes() {
		let cache = HashCache::new(HashCacheConfig {
			default_ttl: Duration::from_secs(0),
			..HashCacheConfig::default()
		});
		cache.hash256(b"short lived");
		cache.hash256(b"short lived");
		assert_eq!(cache.stats().misses, 2);
	}

	#[test]
	fn test_shared_across_threads() {
		use std::sync::Arc;

		let cache = Arc::new(HashCache::with_defaults());
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let cache = Arc::clone(&cache);
				std::thread::spawn(move || cache.hash256(b"concurrent"))
			})
			.collect();
		let expected = b"concurrent".to_vec().hash256();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), expected);
		}
	}
}
