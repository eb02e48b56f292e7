//! Shared request builder
//!
//! [`RequestBuilder`] is the piece every request path goes through. It
//! borrows a transport, carries the version-checking flag, and offers the
//! parameter builders, request construction and id decoding from
//! `textrpc_core::codec` alongside the send operations.
//!
//! # Configuration
//!
//! The only mutable state is [`BuilderConfig::check_version`]. It is changed
//! through `&mut self`, so a toggle can never race with a send on another
//! thread. Construction itself never consults it. Only response handling
//! does.

use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;
use textrpc_core::{codec, Error, Id, JsonRpcRequest, Result, JSONRPC_VERSION};

/// Configuration for request builders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Reject responses whose `jsonrpc` tag is missing or not "2.0"
    pub check_version: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { check_version: true }
    }
}

impl BuilderConfig {
    /// Create a configuration with version checking enabled
    ///
    /// Same as [`BuilderConfig::default`]; reads better at the head of a
    /// `with_*` chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable response version checking
    pub fn with_version_checking(mut self, enabled: bool) -> Self {
        self.check_version = enabled;
        self
    }
}

/// Builds JSON-RPC 2.0 requests and passes them through a borrowed transport
///
/// # Examples
///
/// ```rust
/// use textrpc_client::{FnTransport, RequestBuilder};
/// use textrpc_core::Id;
///
/// let transport = FnTransport::new(|_: &str| Ok(r#"{"jsonrpc":"2.0","result":19,"id":1}"#.to_string()));
/// let builder = RequestBuilder::new(&transport);
///
/// let params = builder.positional_params([42, 23]).unwrap();
/// let request = builder.request(Some(Id::Int(1)), "subtract", params).unwrap();
/// let response = builder.pass(&request).unwrap();
/// assert!(response.contains("19"));
/// ```
pub struct RequestBuilder<'a> {
    transport: &'a dyn Transport,
    config: BuilderConfig,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder with version checking enabled
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self::with_config(transport, BuilderConfig::default())
    }

    /// Create a builder with an explicit configuration
    ///
    /// # Arguments
    ///
    /// * `transport` - Borrowed transport every send goes through
    /// * `config` - Copied into the builder; later changes to the caller's
    ///   copy have no effect
    pub fn with_config(transport: &'a dyn Transport, config: BuilderConfig) -> Self {
        Self { transport, config }
    }

    /// Turn response version checking on or off
    pub fn set_version_checking(&mut self, enabled: bool) {
        self.config.check_version = enabled;
    }

    /// Whether responses are checked for the "2.0" version tag
    pub fn is_version_checking(&self) -> bool {
        self.config.check_version
    }

    /// Current configuration, by value
    pub fn config(&self) -> BuilderConfig {
        self.config
    }

    pub fn transport(&self) -> &'a dyn Transport {
        self.transport
    }

    /// Build request params as a JSON array
    pub fn positional_params<I, T>(&self, values: I) -> Result<Value>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        codec::positional_params(values)
    }

    /// Build request params as a JSON object
    pub fn named_params<I, K, T>(&self, entries: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Serialize,
    {
        codec::named_params(entries)
    }

    /// Create a new JSON-RPC request; `None` as id makes it a notification
    pub fn request(&self, id: Option<Id>, method: impl Into<String>, params: Value) -> Result<JsonRpcRequest> {
        codec::build_request(id, method, params)
    }

    /// Decode a JSON id back to its native type
    pub fn node_value(&self, id: &Value) -> Result<Id> {
        codec::decode_id(id)
    }

    /// Encode and send a single request, returning the response text
    ///
    /// Requests with an id go through [`Transport::pass_with_id`],
    /// notifications through [`Transport::pass`].
    #[tracing::instrument(skip(self, request), fields(method = %request.method()))]
    pub fn pass(&self, request: &JsonRpcRequest) -> Result<String> {
        let text = codec::encode_request(request)?;
        tracing::debug!(bytes = text.len(), "Sending request");

        let response = match request.id() {
            Some(id) => self.transport.pass_with_id(id, &text)?,
            None => self.transport.pass(&text)?,
        };

        self.verify(&response, request.id().is_some())?;
        Ok(response)
    }

    /// Encode and send a batch, returning the response text
    ///
    /// The ids of every call that has one are handed to
    /// [`Transport::pass_with_ids`], in batch order.
    #[tracing::instrument(skip(self, requests), fields(batch_size = requests.len()))]
    pub fn pass_batch(&self, requests: &[JsonRpcRequest]) -> Result<String> {
        let text = codec::encode_batch(requests)?;
        let ids: Vec<Id> = requests.iter().filter_map(|r| r.id().cloned()).collect();
        tracing::debug!(bytes = text.len(), calls = ids.len(), "Sending batch");

        let response = self.transport.pass_with_ids(&ids, &text)?;

        self.verify(&response, !ids.is_empty())?;
        Ok(response)
    }

    /// Check the response version if the flag is on
    ///
    /// `expects_response` is false when nothing sent carried an id. Only then
    /// is an empty body accepted, since notifications usually get nothing
    /// back.
    ///
    /// # Errors
    ///
    /// - `Error::VersionMismatch` if a response is expected but the body is
    ///   empty, or if any response object lacks `"jsonrpc":"2.0"`
    /// - `Error::InvalidResponse` if the body isn't a JSON object or array
    pub fn verify(&self, response: &str, expects_response: bool) -> Result<()> {
        if !self.config.check_version {
            return Ok(());
        }
        if response.trim().is_empty() {
            if !expects_response {
                return Ok(());
            }
            tracing::warn!("Empty response to a request that expects one");
            return Err(Error::VersionMismatch {
                expected: JSONRPC_VERSION.to_string(),
                actual: "<missing>".to_string(),
            });
        }
        codec::check_response_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FnTransport;
    use serde_json::json;
    use std::sync::Mutex;

    const OK: &str = r#"{"jsonrpc":"2.0","result":1,"id":1}"#;
    const OLD: &str = r#"{"result":1,"error":null,"id":1}"#;

    #[test]
    fn test_default_config_checks_version() {
        assert!(BuilderConfig::default().check_version);
        assert!(!BuilderConfig::new().with_version_checking(false).check_version);
    }

    #[test]
    fn test_toggle_version_checking() {
        let transport = FnTransport::new(|_: &str| Ok(OLD.to_string()));
        let mut builder = RequestBuilder::new(&transport);
        let request = builder.request(Some(Id::Int(1)), "m", json!([])).unwrap();

        assert!(matches!(builder.pass(&request), Err(Error::VersionMismatch { .. })));

        builder.set_version_checking(false);
        assert!(!builder.is_version_checking());
        assert_eq!(builder.pass(&request).unwrap(), OLD);
    }

    #[test]
    fn test_unchecked_builder_returns_text_untouched() {
        let transport = FnTransport::new(|_: &str| Ok("not json at all".to_string()));
        let builder = RequestBuilder::with_config(&transport, BuilderConfig::new().with_version_checking(false));
        let request = builder.request(None, "m", json!({})).unwrap();
        assert_eq!(builder.pass(&request).unwrap(), "not json at all");
    }

    #[test]
    fn test_empty_response_to_notification_passes_check() {
        let transport = FnTransport::new(|_: &str| Ok(String::new()));
        let builder = RequestBuilder::new(&transport);
        let request = builder.request(None, "notify", json!({})).unwrap();
        assert_eq!(builder.pass(&request).unwrap(), "");
    }

    #[test]
    fn test_empty_response_to_call_fails_check() {
        let transport = FnTransport::new(|_: &str| Ok(" \n".to_string()));
        let mut builder = RequestBuilder::new(&transport);

        let call = builder.request(Some(Id::Int(1)), "m", json!([])).unwrap();
        match builder.pass(&call) {
            Err(Error::VersionMismatch { expected, actual }) => {
                assert_eq!(expected, "2.0");
                assert_eq!(actual, "<missing>");
            }
            other => panic!("Expected VersionMismatch, got {:?}", other),
        }

        let notice = builder.request(None, "n", json!([])).unwrap();
        let batch = [notice.clone(), call.clone()];
        assert!(matches!(builder.pass_batch(&batch), Err(Error::VersionMismatch { .. })));
        assert_eq!(builder.pass_batch(&[notice]).unwrap(), " \n");

        builder.set_version_checking(false);
        assert_eq!(builder.pass(&call).unwrap(), " \n");
    }

    #[test]
    fn test_pass_sends_encoded_request() {
        let sent = Mutex::new(String::new());
        let transport = FnTransport::new(|req: &str| {
            *sent.lock().unwrap() = req.to_string();
            Ok(OK.to_string())
        });
        let builder = RequestBuilder::new(&transport);

        let params = builder.named_params([("x", 1)]).unwrap();
        let request = builder.request(Some(Id::from("a")), "calc", params).unwrap();
        builder.pass(&request).unwrap();

        assert_eq!(
            *sent.lock().unwrap(),
            r#"{"jsonrpc":"2.0","method":"calc","params":{"x":1},"id":"a"}"#
        );
    }

    #[test]
    fn test_node_value_matches_codec() {
        let transport = FnTransport::new(|_: &str| Ok(OK.to_string()));
        let builder = RequestBuilder::new(&transport);
        assert!(matches!(builder.node_value(&json!(42)).unwrap(), Id::Int(42)));
        assert!(matches!(builder.node_value(&json!(9_999_999_999i64)).unwrap(), Id::Long(_)));
        assert!(builder.node_value(&json!(false)).is_err());
    }

    #[test]
    fn test_builder_shared_across_threads() {
        let transport = FnTransport::new(|_: &str| Ok(OK.to_string()));
        let builder = RequestBuilder::new(&transport);

        std::thread::scope(|s| {
            for i in 0..4 {
                let builder = &builder;
                s.spawn(move || {
                    let params = builder.positional_params([i]).unwrap();
                    let request = builder.request(Some(Id::Int(i)), "work", params).unwrap();
                    assert_eq!(builder.pass(&request).unwrap(), OK);
                });
            }
        });
    }
}
