//! Common test utilities for textrpc-client integration tests
//!
//! Mock transports that stand in for a real network peer.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use textrpc_client::Transport;
use textrpc_core::{Error, Id, Result};

/// Which transport entry point a request came through
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Plain,
    WithId(Id),
    WithIds(Vec<Id>),
}

/// Records every request and answers with a fixed response
///
/// Overrides both id-aware methods so tests can see which ids the builders
/// handed over.
pub struct RecordingTransport {
    response: String,
    calls: Mutex<Vec<(Entry, String)>>,
}

impl RecordingTransport {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers with a well-formed single success response
    pub fn ok() -> Self {
        Self::new(mock_response(1, serde_json::json!(true)))
    }

    pub fn calls(&self) -> Vec<(Entry, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(_, text)| text.clone())
    }

    fn record(&self, entry: Entry, request: &str) -> Result<String> {
        self.calls.lock().unwrap().push((entry, request.to_string()));
        Ok(self.response.clone())
    }
}

impl Transport for RecordingTransport {
    fn pass(&self, request: &str) -> Result<String> {
        self.record(Entry::Plain, request)
    }

    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        self.record(Entry::WithId(id.clone()), request)
    }

    fn pass_with_ids(&self, ids: &[Id], request: &str) -> Result<String> {
        self.record(Entry::WithIds(ids.to_vec()), request)
    }
}

/// Implements only `pass`, relying on the provided id-aware methods
pub struct PlainTransport {
    response: String,
}

impl PlainTransport {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Transport for PlainTransport {
    fn pass(&self, request: &str) -> Result<String> {
        Ok(format!("{}|{}", self.response, request.len()))
    }
}

/// Fails every exchange with the given I/O error kind
pub struct FailingTransport {
    kind: std::io::ErrorKind,
}

impl FailingTransport {
    pub fn new(kind: std::io::ErrorKind) -> Self {
        Self { kind }
    }
}

impl Transport for FailingTransport {
    fn pass(&self, _request: &str) -> Result<String> {
        Err(Error::Transport(std::io::Error::new(self.kind, "transport failure")))
    }
}

/// Answers each call with a response keyed by its id
///
/// Stands in for a multiplexing transport that correlates by id instead of
/// parsing request bodies.
pub struct RoutingTransport {
    responses: HashMap<Id, String>,
}

impl RoutingTransport {
    pub fn new(responses: impl IntoIterator<Item = (Id, String)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }
}

impl Transport for RoutingTransport {
    fn pass(&self, _request: &str) -> Result<String> {
        Err(Error::Transport(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "routing transport needs an id",
        )))
    }

    fn pass_with_id(&self, id: &Id, _request: &str) -> Result<String> {
        self.responses.get(id).cloned().ok_or_else(|| {
            Error::Transport(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no route for id {}", id),
            ))
        })
    }
}

/// Create a mock JSON-RPC success response
pub fn mock_response(id: i64, result: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
    .to_string()
}

/// Create a mock JSON-RPC error response
pub fn mock_error_response(id: i64, code: i32, message: &str) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message
        },
        "id": id
    })
    .to_string()
}
