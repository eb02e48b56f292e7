//! Batch request building
//!
//! JSON-RPC 2.0 allows several calls in a single message: a JSON array of
//! request objects. A batch here is nothing more than that: single requests
//! built by the usual path, collected in order and sent together.
//!
//! When the batch is sent, the transport receives the ids of every call that
//! has one, in batch order. Notifications contribute no id, so the list can
//! be shorter than the batch. Matching the response array back to those ids
//! is left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use textrpc_client::{FnTransport, JsonRpcClient};
//! use textrpc_core::codec;
//!
//! # fn main() -> textrpc_core::Result<()> {
//! let client = JsonRpcClient::new(FnTransport::new(|_: &str| {
//!     Ok(r#"[{"jsonrpc":"2.0","result":7,"id":1},{"jsonrpc":"2.0","result":19,"id":2}]"#.to_string())
//! }));
//!
//! let mut batch = client.create_batch();
//! batch
//!     .request(1, "sum", codec::positional_params([1, 2, 4])?)?
//!     .notification("notify_hello", codec::positional_params([7])?)?
//!     .request(2, "subtract", codec::positional_params([42, 23])?)?;
//!
//! let (_, ids) = batch.build()?;
//! assert_eq!(ids.len(), 2);
//!
//! let response = batch.execute()?;
//! assert!(response.starts_with('['));
//! # Ok(())
//! # }
//! ```

use crate::builder::RequestBuilder;
use serde_json::Value;
use textrpc_core::{Error, Id, JsonRpcRequest, Result};

/// Builder for a batch of calls and notifications
///
/// Created by [`JsonRpcClient::create_batch`](crate::JsonRpcClient::create_batch).
pub struct BatchCall<'a> {
    builder: RequestBuilder<'a>,
    entries: Vec<JsonRpcRequest>,
}

impl<'a> BatchCall<'a> {
    pub(crate) fn new(builder: RequestBuilder<'a>) -> Self {
        Self {
            builder,
            entries: Vec::new(),
        }
    }

    /// Add a call that expects a response
    pub fn request(
        &mut self,
        id: impl Into<Id>,
        method: impl Into<String>,
        params: impl Into<Value>,
    ) -> Result<&mut Self> {
        let request = self.builder.request(Some(id.into()), method, params.into())?;
        Ok(self.add(request))
    }

    /// Add a notification
    pub fn notification(&mut self, method: impl Into<String>, params: impl Into<Value>) -> Result<&mut Self> {
        let request = self.builder.request(None, method, params.into())?;
        Ok(self.add(request))
    }

    /// Add an already built request or notification
    pub fn add(&mut self, request: JsonRpcRequest) -> &mut Self {
        self.entries.push(request);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of the calls in the batch, in order, skipping notifications
    pub fn ids(&self) -> Vec<Id> {
        self.entries.iter().filter_map(|r| r.id().cloned()).collect()
    }

    /// The batch entries and their ids, without sending anything
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty batch.
    pub fn build(&self) -> Result<(Vec<JsonRpcRequest>, Vec<Id>)> {
        if self.entries.is_empty() {
            return Err(Error::InvalidArgument("Batch is empty".to_string()));
        }
        Ok((self.entries.clone(), self.ids()))
    }

    /// Send the batch and return the raw response text
    pub fn execute(&self) -> Result<String> {
        self.builder.pass_batch(&self.entries)
    }
}
