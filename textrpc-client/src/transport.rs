//! Transport contract for moving JSON-RPC text
//!
//! A transport takes a complete request (or batch) as text and blocks until
//! the complete response text is available. How the bytes travel is up to
//! the implementation: HTTP, a socket, a message queue, or a function call
//! in tests.
//!
//! # Id-aware overloads
//!
//! Only [`Transport::pass`] must be implemented. The two id-aware methods
//! default to ignoring the ids and calling `pass`, so a plain transport
//! behaves identically whichever entry point the builders use. A
//! multiplexing transport can override them to see which logical ids a
//! request carries without parsing the request body.
//!
//! # Failure
//!
//! Transport failures surface as `Error::Transport` and reach the caller
//! unchanged. Nothing in this crate retries, times out or cancels. Those
//! policies belong to the concrete transport.
//!
//! # Examples
//!
//! ```rust
//! use textrpc_client::{FnTransport, Transport};
//! use textrpc_core::Id;
//!
//! let transport = FnTransport::new(|request: &str| Ok(format!("echo:{}", request)));
//! assert_eq!(transport.pass("x").unwrap(), "echo:x");
//! assert_eq!(transport.pass_with_id(&Id::Int(1), "x").unwrap(), "echo:x");
//! ```

use std::fmt;
use std::sync::Arc;
use textrpc_core::{Id, Result};

/// Synchronous request/response text exchange
pub trait Transport: Send + Sync {
    /// Send request text and return the response text
    fn pass(&self, request: &str) -> Result<String>;

    /// Send a single request whose logical id is `id`
    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        let _ = id;
        self.pass(request)
    }

    /// Send a batch carrying the ids of its calls, in order
    ///
    /// `ids` may be shorter than the batch because notifications have no id.
    fn pass_with_ids(&self, ids: &[Id], request: &str) -> Result<String> {
        let _ = ids;
        self.pass(request)
    }
}

// Forwarding impls keep any overrides of the id-aware methods intact.

impl<T: Transport + ?Sized> Transport for &T {
    fn pass(&self, request: &str) -> Result<String> {
        (**self).pass(request)
    }

    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        (**self).pass_with_id(id, request)
    }

    fn pass_with_ids(&self, ids: &[Id], request: &str) -> Result<String> {
        (**self).pass_with_ids(ids, request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn pass(&self, request: &str) -> Result<String> {
        (**self).pass(request)
    }

    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        (**self).pass_with_id(id, request)
    }

    fn pass_with_ids(&self, ids: &[Id], request: &str) -> Result<String> {
        (**self).pass_with_ids(ids, request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn pass(&self, request: &str) -> Result<String> {
        (**self).pass(request)
    }

    fn pass_with_id(&self, id: &Id, request: &str) -> Result<String> {
        (**self).pass_with_id(id, request)
    }

    fn pass_with_ids(&self, ids: &[Id], request: &str) -> Result<String> {
        (**self).pass_with_ids(ids, request)
    }
}

/// Transport backed by a closure
///
/// Handy for tests and for wrapping an existing client library without
/// declaring a new type. The id-aware methods use the defaults.
pub struct FnTransport<F> {
    f: F,
}

impl<F> FnTransport<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    /// Wrap `f` as a transport
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn pass(&self, request: &str) -> Result<String> {
        (self.f)(request)
    }
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}
