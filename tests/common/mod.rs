#![allow(dead_code)]

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use blockcraft::RpcClient;

#[derive(Default)]
struct NodeState {
    replies: HashMap<String, Value>,
    requests: Vec<Value>,
}

/// Minimal JSON-RPC node answering canned replies per method.
pub struct FakeNode {
    pub url: String,
    state: Arc<Mutex<NodeState>>,
}

impl FakeNode {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(NodeState::default()));
        let app = Router::new()
            .route("/", post(handle))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { url, state }
    }

    pub fn client(&self) -> RpcClient {
        RpcClient::new(self.url.clone(), Duration::from_secs(5)).unwrap()
    }

    pub fn respond(&self, method: &str, result: Value) {
        self.state
            .lock()
            .replies
            .insert(method.to_string(), json!({ "result": result }));
    }

    pub fn fail(&self, method: &str, code: i64, message: &str) {
        self.state.lock().replies.insert(
            method.to_string(),
            json!({ "error": { "code": code, "message": message } }),
        );
    }

    /// Params of every request made for `method`, oldest first.
    pub fn params_for(&self, method: &str) -> Vec<Value> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r["method"] == method)
            .map(|r| r["params"].clone())
            .collect()
    }

    /// A mined, successful transfer of 1000 wei at block 0x64 with the head at 0x6e.
    pub fn stage_transfer(&self, to: &str) {
        self.respond("eth_blockNumber", json!("0x6e"));
        self.respond(
            "eth_getTransactionByHash",
            json!({
                "hash": "0xfeed",
                "from": "0x1111111111111111111111111111111111111111",
                "to": to,
                "value": "0x3e8",
                "blockNumber": "0x64"
            }),
        );
        self.respond(
            "eth_getTransactionReceipt",
            json!({
                "transactionHash": "0xfeed",
                "status": "0x1",
                "gasUsed": "0x5208",
                "blockNumber": "0x64"
            }),
        );
    }
}

async fn handle(State(state): State<Arc<Mutex<NodeState>>>, Json(request): Json<Value>) -> Json<Value> {
    let mut state = state.lock();
    state.requests.push(request.clone());
    let method = request["method"].as_str().unwrap_or_default();

    let mut reply = state.replies.get(method).cloned().unwrap_or_else(|| {
        json!({ "error": { "code": -32601, "message": format!("the method {method} does not exist") } })
    });
    reply["jsonrpc"] = json!("2.0");
    reply["id"] = request["id"].clone();
    Json(reply)
}
