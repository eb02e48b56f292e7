//! Core JSON-RPC 2.0 request types and codec for textrpc
//!
//! This crate provides the protocol layer between an application that wants
//! to invoke remote methods and whatever carries the bytes. It includes:
//!
//! - **Types**: request ids, parameter styles, and the immutable request object
//! - **Codec**: parameter builders, request construction, id decoding,
//!   response version checks and text encoding
//! - **Error handling**: a single error enum for construction, encoding,
//!   transport and response failures
//! - **Logging**: an optional `tracing-subscriber` setup for applications
//!
//! # Architecture
//!
//! The crate is transport-agnostic. It produces request text and checks
//! response text but never moves either. The `textrpc-client` crate defines
//! the transport contract and the builders that drive it.
//!
//! # Example
//!
//! ```rust
//! use textrpc_core::{codec, Id};
//!
//! let params = codec::named_params([("a", 5), ("b", 3)]).unwrap();
//! let request = codec::build_request(Some(Id::Int(1)), "add", params).unwrap();
//!
//! let json = codec::encode_request(&request).unwrap();
//! assert_eq!(json, r#"{"jsonrpc":"2.0","method":"add","params":{"a":5,"b":3},"id":1}"#);
//!
//! let id = codec::decode_id(&serde_json::json!(1)).unwrap();
//! assert_eq!(Some(&id), request.id());
//! ```

pub mod codec;
pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::{Id, JsonRpcRequest, Params, JSONRPC_VERSION};
