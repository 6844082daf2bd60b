use num_bigint::BigInt;
use proptest::prelude::*;

use crate::{
	builder::{ScriptBuilder, WitnessScope},
	codec::Decoder,
	crypto::{base58check_decode, base58check_encode, KeyPair},
	neo_types::{ContractParameter, OpCode},
};

proptest! {
	// Base58Check decode ∘ encode is the identity on all byte strings.
	#[test]
	fn prop_base58check_round_trip(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
		let encoded = base58check_encode(&bytes);
		prop_assert_eq!(base58check_decode(&encoded), Some(bytes));
	}

	// Integer pushes always pick the smallest encoding and read back to
	// the same value.
	#[test]
	fn prop_push_integer_minimal_and_round_trips(value in any::<i64>()) {
		let mut builder = ScriptBuilder::new();
		builder.push_integer(BigInt::from(value)).unwrap();
		let script = builder.to_bytes();

		if (-1..=16).contains(&value) {
			prop_assert_eq!(script.len(), 1);
		} else if (-128..=127).contains(&value) {
			prop_assert_eq!(script[0], OpCode::PushInt8 as u8);
		} else if (-32768..=32767).contains(&value) {
			prop_assert_eq!(script[0], OpCode::PushInt16 as u8);
		}

		let mut reader = Decoder::new(&script);
		prop_assert_eq!(reader.read_push_int().unwrap(), BigInt::from(value));
	}

	// Data pushes read back unchanged through every PUSHDATA width.
	#[test]
	fn prop_push_data_round_trips(data in prop::collection::vec(any::<u8>(), 0..600)) {
		let mut builder = ScriptBuilder::new();
		builder.push_data(data.clone());
		let script = builder.to_bytes();

		let mut reader = Decoder::new(&script);
		prop_assert_eq!(reader.read_push_bytes().unwrap(), data);
	}

	// ContractParameter JSON round trip preserves type and value.
	#[test]
	fn prop_contract_parameter_json_round_trip(value in any::<i64>(), text in "[a-zA-Z0-9 ]{0,40}") {
		let params = vec![
			ContractParameter::integer(value),
			ContractParameter::string(text),
			ContractParameter::bool(value % 2 == 0),
			ContractParameter::byte_array(value.to_le_bytes().to_vec()),
			ContractParameter::any(),
		];
		let param = ContractParameter::array(params);
		let json = serde_json::to_string(&param).unwrap();
		prop_assert_eq!(serde_json::from_str::<ContractParameter>(&json).unwrap(), param);
	}

	// Witness scope bytes split back into the scopes they were combined
	// from.
	#[test]
	fn prop_witness_scope_combine_split(
		called_by_entry in any::<bool>(),
		custom_contracts in any::<bool>(),
		custom_groups in any::<bool>(),
		witness_rules in any::<bool>(),
	) {
		let mut scopes = Vec::new();
		if called_by_entry {
			scopes.push(WitnessScope::CalledByEntry);
		}
		if custom_contracts {
			scopes.push(WitnessScope::CustomContracts);
		}
		if custom_groups {
			scopes.push(WitnessScope::CustomGroups);
		}
		if witness_rules {
			scopes.push(WitnessScope::WitnessRules);
		}

		let byte = WitnessScope::combine(&scopes);
		let split = WitnessScope::split(byte).unwrap();
		if scopes.is_empty() {
			prop_assert_eq!(split, vec![WitnessScope::None]);
		} else {
			prop_assert_eq!(split, scopes);
		}
	}
}

proptest! {
	// ECDSA: verify(pubkey, msg, sign(privkey, msg)) holds for arbitrary
	// messages. Key generation is expensive, so fewer cases suffice.
	#![proptest_config(ProptestConfig::with_cases(8))]
	#[test]
	fn prop_sign_verify(message in prop::collection::vec(any::<u8>(), 0..128)) {
		let key_pair = KeyPair::new_random();
		let signature = key_pair.sign(&message).unwrap();
		prop_assert!(key_pair.verify_signature(&message, &signature).is_ok());
		prop_assert!(signature.is_low_s());
	}
}
