//! Calculator demo: calls, a notification and a batch against an in-process peer
//!
//! Run with `cargo run --example calculator`; set `RUST_LOG=debug` to see
//! what the builders send.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Mutex;
use textrpc::core::logging::{init_logging, LoggingConfig};
use textrpc::core::{codec, Error, Id, Result};
use textrpc::{JsonRpcClient, Transport};

#[derive(Serialize)]
struct Operands {
    a: i64,
    b: i64,
}

/// Answers requests in-process, the way a remote calculator service would
struct InProcessCalculator {
    log: Mutex<Vec<String>>,
}

impl InProcessCalculator {
    fn new() -> Self {
        Self { log: Mutex::new(Vec::new()) }
    }

    fn answer(&self, request: &Value) -> Option<Value> {
        let method = request["method"].as_str().unwrap_or_default();
        let params = &request["params"];
        let id = request.get("id").cloned();

        let result = match method {
            "add" => Some(json!(operand(params, 0, "a") + operand(params, 1, "b"))),
            "subtract" => Some(json!(operand(params, 0, "a") - operand(params, 1, "b"))),
            "log" => {
                if let Ok(mut log) = self.log.lock() {
                    log.push(params.to_string());
                }
                None
            }
            _ => None,
        };

        // Notifications never get a response
        let id = id?;
        Some(match result {
            Some(result) => json!({"jsonrpc": "2.0", "result": result, "id": id}),
            None => json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": format!("Method not found: {}", method)},
                "id": id
            }),
        })
    }
}

fn operand(params: &Value, index: usize, name: &str) -> i64 {
    params
        .get(index)
        .or_else(|| params.get(name))
        .and_then(Value::as_i64)
        .unwrap_or_default()
}

impl Transport for InProcessCalculator {
    fn pass(&self, request: &str) -> Result<String> {
        let parsed: Value = serde_json::from_str(request)?;
        let response = match parsed {
            Value::Array(items) => {
                let answers: Vec<Value> = items.iter().filter_map(|item| self.answer(item)).collect();
                if answers.is_empty() {
                    Value::Null
                } else {
                    Value::Array(answers)
                }
            }
            single => self.answer(&single).unwrap_or(Value::Null),
        };

        Ok(match response {
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        tracing::info!(id = %id, "Routing call");
        self.pass(request)
    }
}

/// Send one mixed batch and return the ids the peer answered
fn run_batch(client: &JsonRpcClient<InProcessCalculator>) -> Result<Vec<Id>> {
    let mut batch = client.create_batch();
    batch
        .request(2, "add", codec::to_json(Operands { a: 1, b: 2 })?)?
        .notification("log", codec::positional_params(["batch"])?)?
        .request(3, "multiply", codec::positional_params([6, 7])?)?;
    let answers = batch.execute()?;
    println!("batch -> {}", answers);

    Ok(serde_json::from_str::<Value>(&answers)?
        .as_array()
        .map(|items| items.iter().filter_map(|r| codec::decode_id(&r["id"]).ok()).collect())
        .unwrap_or_default())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::new("calculator-demo"))?;

    let client = JsonRpcClient::new(InProcessCalculator::new());

    let response = client
        .create_request()
        .method("subtract")
        .id(1)
        .params([42, 23])
        .execute()?;
    println!("subtract -> {}", response);

    let response = client
        .create_request()
        .method("add")
        .id("named-1")
        .param("a", 5)
        .param("b", 3)
        .execute()?;
    println!("add -> {}", response);

    client
        .create_notification()
        .method("log")
        .param("message", "demo started")
        .execute()?;

    let ids = run_batch(&client)?;
    println!("answered ids -> {:?}", ids);

    match client.create_request().method("").id(4).execute() {
        Err(Error::InvalidArgument(msg)) => println!("rejected locally: {}", msg),
        other => println!("unexpected: {:?}", other),
    }

    if let Ok(log) = client.transport().log.lock() {
        println!("server log -> {:?}", *log);
    }

    Ok(())
}
