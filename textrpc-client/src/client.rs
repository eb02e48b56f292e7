//! JSON-RPC client facade
//!
//! [`JsonRpcClient`] owns a transport and a [`BuilderConfig`] and hands out
//! fluent builders for calls, notifications and batches. Every builder goes
//! through the same [`RequestBuilder`], so protocol rules and version
//! checking are applied identically on all paths.

use crate::batch::BatchCall;
use crate::builder::{BuilderConfig, RequestBuilder};
use crate::request::{NotificationCall, RequestCall};
use crate::transport::Transport;

/// JSON-RPC 2.0 client over any [`Transport`]
///
/// The transport can be an owned value, a reference, an `Arc` or a
/// `Box<dyn Transport>`.
///
/// # Examples
///
/// ```rust
/// use textrpc_client::{FnTransport, JsonRpcClient};
///
/// let mut client = JsonRpcClient::new(FnTransport::new(|_: &str| {
///     Ok(r#"{"result":"legacy peer","id":1}"#.to_string())
/// }));
///
/// // Version checking is on by default and rejects the response above
/// assert!(client.create_request().method("hello").id(1).execute().is_err());
///
/// client.set_version_checking(false);
/// let text = client.create_request().method("hello").id(1).execute().unwrap();
/// assert!(text.contains("legacy peer"));
/// ```
pub struct JsonRpcClient<T> {
    transport: T,
    config: BuilderConfig,
}

impl<T: Transport> JsonRpcClient<T> {
    /// Create a client with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, BuilderConfig::default())
    }

    pub fn with_config(transport: T, config: BuilderConfig) -> Self {
        tracing::debug!(check_version = config.check_version, "Creating JSON-RPC client");
        Self { transport, config }
    }

    /// Turn response version checking on or off for builders created afterwards
    pub fn set_version_checking(&mut self, enabled: bool) {
        self.config.check_version = enabled;
    }

    pub fn config(&self) -> BuilderConfig {
        self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The shared builder, borrowing this client's transport
    pub fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::with_config(&self.transport, self.config)
    }

    /// Start building a call that expects a response
    pub fn create_request(&self) -> RequestCall<'_> {
        RequestCall::new(self.builder())
    }

    /// Start building a notification
    pub fn create_notification(&self) -> NotificationCall<'_> {
        NotificationCall::new(self.builder())
    }

    /// Start building a batch
    pub fn create_batch(&self) -> BatchCall<'_> {
        BatchCall::new(self.builder())
    }
}
