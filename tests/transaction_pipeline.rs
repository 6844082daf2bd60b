//! End-to-end exercise of the build → dry-run → fee → sign → send
//! pipeline against an in-process transport.

use neo3_core::{
	builder::{AccountSigner, ScriptBuilder, TransactionBuilder},
	codec::NeoSerializable,
	crypto::FromBase64String,
	neo_clients::{MockProvider, RpcClient},
	neo_config::{NeoConfig, NeoConstants},
	neo_protocol::{Account, AccountTrait},
	neo_types::{ContractParameter, ScriptHash},
	Transaction,
};
use serde_json::json;
use std::str::FromStr;

const GAS_TOKEN: &str = "d2a4cff31913016155e38e474a2c06d08be276cf";

fn testnet_client(provider: MockProvider) -> RpcClient<MockProvider> {
	RpcClient::with_config(provider, NeoConfig::testnet())
}

fn transfer_script(sender: &Account) -> Vec<u8> {
	let gas = ScriptHash::from_str(GAS_TOKEN).unwrap();
	let mut script_builder = ScriptBuilder::new();
	script_builder
		.contract_call(
			&gas,
			"transfer",
			&[
				ContractParameter::h160(&sender.get_script_hash()),
				ContractParameter::h160(&gas),
				ContractParameter::integer(1_0000_0000),
				ContractParameter::any(),
			],
			None,
		)
		.unwrap();
	script_builder.to_bytes()
}

#[tokio::test]
async fn test_build_sign_and_send_round_trip() {
	let provider = MockProvider::new();
	provider.mock_response("getblockcount", json!(5000));
	provider.mock_response(
		"invokescript",
		json!({
			"script": "AA==",
			"state": "HALT",
			"gasconsumed": "9977780",
			"stack": []
		}),
	);
	provider.mock_response("calculatenetworkfee", json!({"networkfee": "1230610"}));
	provider.mock_response("getblockcount", json!(5001));
	provider.mock_response(
		"sendrawtransaction",
		json!({"hash": "0xb386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9"}),
	);

	let client = testnet_client(provider);
	let sender = Account::create().unwrap();

	let mut builder = TransactionBuilder::with_client(&client);
	builder
		.set_script(Some(transfer_script(&sender)))
		.set_signers(vec![AccountSigner::called_by_entry(&sender).unwrap().into()])
		.unwrap();

	let mut tx = builder.sign().await.unwrap();
	assert_eq!(tx.sys_fee, 9_977_780);
	assert_eq!(tx.net_fee, 1_230_610);
	assert_eq!(tx.valid_until_block, 5000 + 5759);
	assert_eq!(tx.witnesses.len(), 1);

	let response = tx.send_tx().await.unwrap();
	assert_eq!(
		format!("{:x}", response.hash),
		"b386ed90c0fd6f44f673e100c39bd09a0a2b26e4c9b4e08dbbfc91e2ebf243b9"
	);

	// The broadcast bytes must decode back to the signed transaction.
	let params = client.as_ref().last_params_of("sendrawtransaction").unwrap();
	let raw = params[0].as_str().unwrap().from_base64_string().unwrap();
	let decoded = Transaction::<MockProvider>::from_bytes(&raw).unwrap();
	assert_eq!(decoded.witnesses.len(), 1);
	assert_eq!(decoded.script, tx.script);
	assert_eq!(decoded.get_tx_id().unwrap(), tx.get_tx_id().unwrap());
	assert!(decoded.size() <= NeoConstants::MAX_TRANSACTION_SIZE as usize);
}

#[tokio::test]
async fn test_signature_commits_to_network_magic() {
	let provider = MockProvider::new();
	provider.mock_response("getblockcount", json!(100));
	provider.mock_response(
		"invokescript",
		json!({"script": "AA==", "state": "HALT", "gasconsumed": "100", "stack": []}),
	);
	provider.mock_response("calculatenetworkfee", json!({"networkfee": 50}));

	let client = testnet_client(provider);
	let sender = Account::create().unwrap();

	let mut builder = TransactionBuilder::with_client(&client);
	builder
		.set_script(Some(vec![0x40]))
		.set_signers(vec![AccountSigner::called_by_entry(&sender).unwrap().into()])
		.unwrap();
	let tx = builder.sign().await.unwrap();

	let signature = &tx.witnesses[0].invocation_script.get_signatures().unwrap()[0];
	let public_key = sender.key_pair().unwrap().public_key();

	let testnet_digest = Transaction::<MockProvider>::hash_data_with_magic(
		&tx.unsigned_bytes(),
		NeoConstants::MAGIC_NUMBER_TESTNET,
	);
	assert!(public_key.verify(&testnet_digest, signature).is_ok());

	// The same bytes under a different magic must not verify.
	let mainnet_digest = Transaction::<MockProvider>::hash_data_with_magic(
		&tx.unsigned_bytes(),
		NeoConstants::MAGIC_NUMBER_MAINNET,
	);
	assert!(public_key.verify(&mainnet_digest, signature).is_err());
}

#[tokio::test]
async fn test_network_magic_is_discovered_once() {
	let provider = MockProvider::new();
	provider.mock_response(
		"getversion",
		json!({
			"useragent": "/Neo:3.6.0/",
			"nonce": 1,
			"protocol": {
				"network": 7777,
				"addressversion": 53,
				"msperblock": 15000,
				"maxvaliduntilblockincrement": 5760,
				"maxtraceableblocks": 2102400,
				"maxtransactionsperblock": 512,
				"memorypoolmaxtransactions": 50000,
				"initialgasdistribution": 0
			}
		}),
	);

	// No configured magic: the client asks getversion exactly once.
	let client = RpcClient::new(provider);
	assert_eq!(client.network().await.unwrap(), 7777);
	assert_eq!(client.network().await.unwrap(), 7777);
	let version_calls = client
		.as_ref()
		.requests()
		.iter()
		.filter(|(method, _)| method == "getversion")
		.count();
	assert_eq!(version_calls, 1);
}

#[tokio::test]
async fn test_send_rejects_witness_signer_mismatch() {
	let provider = MockProvider::new();
	let client = testnet_client(provider);
	let sender = Account::create().unwrap();

	let mut tx = Transaction::<MockProvider>::new();
	tx.set_network(Some(&client));
	tx.valid_until_block = 1;
	tx.signers = vec![AccountSigner::called_by_entry(&sender).unwrap().into()];
	tx.script = vec![0x40];

	// No witness for the single signer.
	assert!(tx.send_tx().await.is_err());
}
