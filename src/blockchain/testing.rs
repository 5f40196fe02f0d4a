//! In-process JSON-RPC node and receipt fixtures for unit tests.

use alloy::primitives::B256;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Receipt JSON as returned by `eth_getTransactionReceipt`.
pub fn receipt_json(success: bool, block_number: u64, topics: &[Vec<B256>]) -> Value {
    let tx_hash = B256::repeat_byte(0x42);
    let block_hash = B256::repeat_byte(0x0b);
    let logs: Vec<Value> = topics
        .iter()
        .enumerate()
        .map(|(i, topics)| {
            json!({
                "address": "0x203a36744dd130f1de981ec72c2144862aece6aa",
                "topics": topics,
                "data": "0x",
                "blockHash": block_hash,
                "blockNumber": format!("{block_number:#x}"),
                "transactionHash": tx_hash,
                "transactionIndex": "0x0",
                "logIndex": format!("{i:#x}"),
                "removed": false
            })
        })
        .collect();

    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x15f90",
        "logs": logs,
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": block_hash,
        "blockNumber": format!("{block_number:#x}"),
        "gasUsed": "0x15f90",
        "effectiveGasPrice": "0x3b9aca00",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x203a36744dd130f1de981ec72c2144862aece6aa",
        "contractAddress": null
    })
}

/// Serve JSON-RPC on a random local port; `answer(method)` returns the
/// result or an error message. Returns the node URL.
pub async fn spawn_rpc<F, Fut>(answer: F) -> String
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, String>> + Send + 'static,
{
    let answer = Arc::new(answer);
    let app = Router::new().route(
        "/",
        post(move |Json(req): Json<Value>| {
            let answer = answer.clone();
            async move {
                let id = req["id"].clone();
                let method = req["method"].as_str().unwrap_or_default().to_string();
                Json(match answer(method).await {
                    Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
                    Err(message) => json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": { "code": -32000, "message": message }
                    }),
                })
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
