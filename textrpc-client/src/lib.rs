//! JSON-RPC 2.0 client over a pluggable text transport
//!
//! This crate turns method calls into JSON-RPC 2.0 request text and hands it
//! to a [`Transport`] for delivery. It does not implement any network
//! transport itself. Anything that can exchange a request string for a
//! response string can be plugged in.
//!
//! # Core Pieces
//!
//! - **[`Transport`]**: one required method, `pass`, plus two id-aware
//!   variants that default to `pass`
//! - **[`RequestBuilder`]**: parameter building, request construction, id
//!   decoding and sending, with optional response version checking
//! - **[`JsonRpcClient`]**: owns a transport and hands out fluent builders
//!   for calls, notifications and batches
//!
//! # Quick Start
//!
//! ```rust
//! use textrpc_client::{FnTransport, JsonRpcClient};
//!
//! # fn main() -> textrpc_core::Result<()> {
//! let transport = FnTransport::new(|request: &str| {
//!     if request.contains(r#""id""#) {
//!         Ok(r#"{"jsonrpc":"2.0","result":19,"id":3}"#.to_string())
//!     } else {
//!         // Notifications get no response body
//!         Ok(String::new())
//!     }
//! });
//! let client = JsonRpcClient::new(transport);
//!
//! let response = client
//!     .create_request()
//!     .method("subtract")
//!     .id(3)
//!     .param("minuend", 42)
//!     .param("subtrahend", 23)
//!     .execute()?;
//! assert_eq!(response, r#"{"jsonrpc":"2.0","result":19,"id":3}"#);
//!
//! client.create_notification().method("update").params([1, 2, 3]).execute()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! Sending blocks the calling thread until the transport returns. Builders
//! hold only a shared reference to the transport, so one client can serve
//! many threads. Changing the version-checking flag needs `&mut`, which
//! keeps it from racing with in-flight requests.

pub mod batch;
pub mod builder;
pub mod client;
pub mod request;
pub mod transport;

pub use batch::BatchCall;
pub use builder::{BuilderConfig, RequestBuilder};
pub use client::JsonRpcClient;
pub use request::{NotificationCall, RequestCall};
pub use transport::{FnTransport, Transport};
