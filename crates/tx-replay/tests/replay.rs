//! Replays against a mocked JSON-RPC node.

use alloy_consensus::{transaction::Recovered, Signed, TxEnvelope, TxLegacy};
use alloy_primitives::{
    address, b256, bytes, hex, Address, Bytes, Signature, TxHash, TxKind, B256, U256,
};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types_eth::Transaction;
use alloy_sol_types::{Revert, SolError};
use serde_json::{json, Value};
use tx_replay::{DecodeError, ReplayError, ReplayOutcome, ResponseDecoder, TransactionReplayer};
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

const TX_HASH: TxHash = b256!("5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060");
const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const CONTRACT: Address = address!("1000000000000000000000000000000000000001");
const BLOCK_NUMBER: u64 = 12345;

/// Answers a JSON-RPC request with a fixed result or error, echoing the request id.
struct RpcResponder {
    payload: std::result::Result<Value, Value>,
}

impl RpcResponder {
    fn result(result: Value) -> Self {
        Self { payload: Ok(result) }
    }

    fn error(error: Value) -> Self {
        Self { payload: Err(error) }
    }
}

impl Respond for RpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let mut response = json!({ "jsonrpc": "2.0", "id": body["id"] });
        match &self.payload {
            Ok(result) => response["result"] = result.clone(),
            Err(error) => response["error"] = error.clone(),
        }
        ResponseTemplate::new(200).set_body_json(response)
    }
}

fn transaction(block_number: Option<u64>) -> Value {
    let tx = TxLegacy {
        chain_id: Some(1),
        nonce: 9,
        gas_price: 20_000_000_000,
        gas_limit: 60_000,
        to: TxKind::Call(CONTRACT),
        value: U256::ZERO,
        input: bytes!("06fdde03"),
    };
    let signature = Signature::new(U256::from(1), U256::from(2), false);
    let tx = Transaction {
        inner: Recovered::new_unchecked(
            TxEnvelope::Legacy(Signed::new_unchecked(tx, signature, TX_HASH)),
            SENDER,
        ),
        block_hash: block_number.map(|_| B256::repeat_byte(0x22)),
        block_number,
        transaction_index: block_number.map(|_| 0),
        effective_gas_price: Some(20_000_000_000),
    };
    serde_json::to_value(tx).unwrap()
}

/// Call response made of a 138-character header (prefix included) followed by `text`.
fn string_response(text: &str) -> Value {
    json!(format!("0x{}{}", "0".repeat(136), hex::encode(text)))
}

async fn mount(server: &MockServer, rpc_method: &str, responder: RpcResponder, times: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(responder)
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_transaction(server: &MockServer, block_number: Option<u64>) {
    let responder = RpcResponder::result(transaction(block_number));
    mount(server, "eth_getTransactionByHash", responder, 1).await;
}

fn replayer(server: &MockServer) -> TransactionReplayer<impl Provider> {
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(server.uri().parse().unwrap());
    TransactionReplayer::new(provider)
}

async fn eth_call_params(server: &MockServer) -> Vec<Value> {
    let requests = server.received_requests().await.unwrap();
    let call = requests
        .iter()
        .map(|request| serde_json::from_slice::<Value>(&request.body).unwrap())
        .find(|body| body["method"] == "eth_call")
        .expect("eth_call was sent");
    call["params"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_replays_and_decodes_string() {
    let server = MockServer::start().await;
    mount_transaction(&server, Some(BLOCK_NUMBER)).await;
    mount(&server, "eth_call", RpcResponder::result(string_response("hello")), 1).await;

    let outcome = replayer(&server).replay(TX_HASH).await.unwrap();

    let ReplayOutcome::Decoded(decoded) = outcome else { panic!("unexpected outcome: {outcome:?}") };
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.remainder, bytes!("68656c6c6f"));

    let params = eth_call_params(&server).await;
    assert_eq!(params[1], json!("0x3039"));
    let request = &params[0];
    assert_eq!(serde_json::from_value::<Address>(request["from"].clone()).unwrap(), SENDER);
    assert_eq!(serde_json::from_value::<Address>(request["to"].clone()).unwrap(), CONTRACT);
    assert_eq!(request["input"], json!("0x06fdde03"));
    assert_eq!(request["gas"], json!("0xea60"));
    assert_eq!(request["nonce"], json!("0x9"));
}

#[tokio::test]
async fn test_unknown_transaction_performs_no_call() {
    let server = MockServer::start().await;
    mount(&server, "eth_getTransactionByHash", RpcResponder::result(Value::Null), 1).await;
    mount(&server, "eth_call", RpcResponder::result(string_response("unused")), 0).await;

    let outcome = replayer(&server).replay(TX_HASH).await.unwrap();

    assert!(matches!(outcome, ReplayOutcome::NotFound));
}

#[tokio::test]
async fn test_pending_transaction_is_caught() {
    let server = MockServer::start().await;
    mount_transaction(&server, None).await;
    mount(&server, "eth_call", RpcResponder::result(string_response("unused")), 0).await;

    let outcome = replayer(&server).replay(TX_HASH).await.unwrap();

    let ReplayOutcome::Failed(failure) = outcome else { panic!("unexpected outcome: {outcome:?}") };
    assert!(matches!(failure.error, ReplayError::MissingBlockNumber(hash) if hash == TX_HASH));
    assert_eq!(failure.revert_data, None);
}

#[tokio::test]
async fn test_revert_is_caught_and_decoded() {
    let server = MockServer::start().await;
    let revert_data = Revert { reason: "Ownable: caller is not the owner".to_string() }.abi_encode();
    mount_transaction(&server, Some(BLOCK_NUMBER)).await;
    mount(
        &server,
        "eth_call",
        RpcResponder::error(json!({
            "code": 3,
            "message": "execution reverted: Ownable: caller is not the owner",
            "data": hex::encode_prefixed(&revert_data),
        })),
        1,
    )
    .await;

    let outcome = replayer(&server).replay(TX_HASH).await.unwrap();

    let ReplayOutcome::Failed(failure) = outcome else { panic!("unexpected outcome: {outcome:?}") };
    assert!(matches!(failure.error, ReplayError::Call(_)));
    assert_eq!(failure.revert_data, Some(Bytes::from(revert_data)));
    assert_eq!(
        failure.revert_reason.as_deref(),
        Some("Error(\"Ownable: caller is not the owner\")")
    );
}

#[tokio::test]
async fn test_decode_failure_is_caught() {
    let server = MockServer::start().await;
    mount_transaction(&server, Some(BLOCK_NUMBER)).await;
    let response = json!(format!("0x{}fffe", "0".repeat(136)));
    mount(&server, "eth_call", RpcResponder::result(response), 1).await;

    let outcome = replayer(&server).replay(TX_HASH).await.unwrap();

    let ReplayOutcome::Failed(failure) = outcome else { panic!("unexpected outcome: {outcome:?}") };
    assert!(matches!(failure.error, ReplayError::Decode(DecodeError::InvalidUtf8(_))));
    assert_eq!(failure.revert_reason, None);
}

#[tokio::test]
async fn test_custom_header_len() {
    let server = MockServer::start().await;
    let payload = alloy_sol_types::SolValue::abi_encode(&"no selector".to_string());
    mount_transaction(&server, Some(BLOCK_NUMBER)).await;
    mount(&server, "eth_call", RpcResponder::result(json!(hex::encode_prefixed(payload))), 1).await;

    let replayer = replayer(&server).with_response_decoder(ResponseDecoder::new(130).unwrap());
    let outcome = replayer.replay(TX_HASH).await.unwrap();

    let ReplayOutcome::Decoded(decoded) = outcome else { panic!("unexpected outcome: {outcome:?}") };
    assert_eq!(decoded.text, "no selector");
}

#[tokio::test]
async fn test_lookup_failure_is_not_caught() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

    let err = replayer(&server).replay(TX_HASH).await.unwrap_err();

    assert!(matches!(err, ReplayError::TransactionLookup(_)));
}
