use alloy_primitives::Bytes;
use serde_json::json;

use crate::{rpc::parse_call_result, CheckoutError, RpcChainReader};

#[test]
fn test_parse_result() {
    let data = vec![0u8, 0x20, 0xff];
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": format!("0x{}", hex::encode(&data)) });

    assert_eq!(parse_call_result(&body).unwrap(), Bytes::from(data));
}

#[test]
fn test_parse_empty_result() {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" });

    assert!(parse_call_result(&body).unwrap().is_empty());
}

#[test]
fn test_parse_error_response() {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": 3, "message": "execution reverted" }
    });

    let err = parse_call_result(&body).unwrap_err();
    assert!(matches!(err, CheckoutError::Rpc(ref m) if m == "execution reverted"));
}

#[test]
fn test_parse_missing_result() {
    let body = json!({ "jsonrpc": "2.0", "id": 1 });

    assert!(matches!(parse_call_result(&body), Err(CheckoutError::Rpc(_))));
}

#[test]
fn test_parse_bad_hex() {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": "0xzz" });

    assert!(matches!(parse_call_result(&body), Err(CheckoutError::Rpc(_))));
}

#[test]
fn test_ws_url_mapped_to_http() {
    assert_eq!(RpcChainReader::new("wss://node.example").rpc_url(), "https://node.example");
    assert_eq!(RpcChainReader::new("ws://localhost:8546").rpc_url(), "http://localhost:8546");
    assert_eq!(RpcChainReader::new("https://mainnet.base.org").rpc_url(), "https://mainnet.base.org");
}
