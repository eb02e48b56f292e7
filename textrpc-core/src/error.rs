//! Error types for textrpc
//!
//! Everything that can go wrong while building a JSON-RPC 2.0 request or
//! passing it through a transport is reported through a single [`Error`] enum.
//!
//! # Error Categories
//!
//! - **Construction errors**: `InvalidArgument`. Raised locally and
//!   synchronously, before anything is sent (empty method, unsupported id
//!   kind, mixed parameter styles). Never retried, never coerced.
//! - **Encoding errors**: `Serialization`. A value could not be converted to
//!   JSON or a request could not be written as text.
//! - **Transport errors**: `Transport`. Anything the transport reports is
//!   wrapped as-is and handed back to the caller.
//! - **Response errors**: `VersionMismatch`, `InvalidResponse`. Only produced
//!   when version checking is enabled.
//!
//! # Examples
//!
//! ```rust
//! use textrpc_core::{codec, Error};
//!
//! let err = codec::build_request(None, "", serde_json::json!([])).unwrap_err();
//! assert!(matches!(err, Error::InvalidArgument(_)));
//! ```

use thiserror::Error;

/// Result type for textrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textrpc operations
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument was rejected during request construction
    /// or id decoding.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization or deserialization error
    ///
    /// Occurs when an application value can't be represented as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failure reported by the transport (connection loss, timeout, framing)
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The response carried a protocol version other than "2.0"
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The version this client speaks
        expected: String,
        /// What the response declared (`<missing>` if absent)
        actual: String,
    },

    /// The response text was not a JSON-RPC response at all
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
