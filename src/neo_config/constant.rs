/// Protocol-level constants for Neo N3.
#[derive(Copy, Clone, Debug)]
pub struct NeoConstants {}

impl NeoConstants {
	// Network magic numbers
	pub const MAGIC_NUMBER_MAINNET: u32 = 860_833_102;
	pub const MAGIC_NUMBER_TESTNET: u32 = 894_710_606;

	// Accounts, addresses, keys
	pub const MAX_PUBLIC_KEYS_PER_MULTI_SIG_ACCOUNT: u32 = 1024;
	pub const HASH160_SIZE: u32 = 20;
	pub const HASH256_SIZE: u32 = 32;
	pub const PRIVATE_KEY_SIZE: u32 = 32;
	pub const PUBLIC_KEY_SIZE_COMPRESSED: u32 = 33;
	pub const SIGNATURE_SIZE: u32 = 64;
	pub const VERIFICATION_SCRIPT_SIZE: u32 = 40;
	pub const WIF_LENGTH: u32 = 38;

	// Transactions & contracts
	pub const CURRENT_TX_VERSION: u8 = 0;
	pub const MAX_TRANSACTION_SIZE: u32 = 102_400;
	pub const MAX_TRANSACTION_ATTRIBUTES: u32 = 16;
	pub const MAX_SIGNER_SUBITEMS: u32 = 16;
	pub const MAX_MANIFEST_SIZE: u32 = 0xFFFF;
	pub const MAX_ITERATOR_ITEMS_DEFAULT: u32 = 100;

	// Blocks
	pub const MAX_VALID_UNTIL_BLOCK_INCREMENT_DEFAULT: u32 = 5760;
	pub const MILLISECONDS_PER_BLOCK: u32 = 15_000;

	// Fee fractions (1 GAS = 10^8 fractions)
	pub const FEE_FRACTIONS_PER_GAS: i64 = 100_000_000;

	// NEP-2 framing
	pub const NEP_HEADER_1: u8 = 0x01;
	pub const NEP_HEADER_2: u8 = 0x42;
	pub const NEP_FLAG: u8 = 0xE0;

	// Scrypt defaults for NEP-2 (N = 2^14, r = 8, p = 8)
	pub const SCRYPT_LOG_N: u8 = 14;
	pub const SCRYPT_N: u32 = 16384;
	pub const SCRYPT_R: u32 = 8;
	pub const SCRYPT_P: u32 = 8;
	pub const SCRYPT_DK_LEN: usize = 64;
	/// Upper bound on scrypt working memory (128 * N * r * p), 1 GiB.
	pub const SCRYPT_MEMORY_CEILING: u64 = 1 << 30;

	// Seed nodes
	pub const SEED_1: &'static str = "https://mainnet1.neo.coz.io:443";
	pub const SEED_2: &'static str = "https://mainnet2.neo.coz.io:443";
	pub const SEED_3: &'static str = "https://mainnet3.neo.coz.io:443";

	pub fn new() -> Self {
		Self {}
	}
}

impl Default for NeoConstants {
	fn default() -> Self {
		Self::new()
	}
}
