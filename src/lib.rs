//! textrpc - JSON-RPC 2.0 requests over any text transport
//!
//! This is the convenience crate that re-exports the textrpc sub-crates.
//! Use it if you want a single dependency.
//!
//! # Architecture
//!
//! - **textrpc-core**: request types, codec, id decoding, errors, logging setup
//! - **textrpc-client**: the transport contract and the request builders
//!
//! # Quick Start
//!
//! ```rust
//! use textrpc::{FnTransport, JsonRpcClient};
//!
//! # fn main() -> textrpc::core::Result<()> {
//! let client = JsonRpcClient::new(FnTransport::new(|_: &str| {
//!     Ok(r#"{"jsonrpc":"2.0","result":8,"id":1}"#.to_string())
//! }));
//!
//! let response = client
//!     .create_request()
//!     .method("add")
//!     .id(1)
//!     .param("a", 5)
//!     .param("b", 3)
//!     .execute()?;
//! println!("Response: {}", response);
//! # Ok(())
//! # }
//! ```

pub use textrpc_client as client;
pub use textrpc_core as core;

pub use textrpc_client::{FnTransport, JsonRpcClient, RequestBuilder, Transport};
pub use textrpc_core::{Error, Id, JsonRpcRequest, Result};
