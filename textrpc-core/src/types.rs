//! JSON-RPC 2.0 request types
//!
//! This module holds the data structures a client needs to put a request on
//! the wire:
//!
//! - [`Id`]: the scalar identifier that correlates a call with its response
//! - [`Params`]: positional (array) or named (object) parameters
//! - [`JsonRpcRequest`]: a fully built, immutable request object
//!
//! Requests are only produced by [`crate::codec::build_request`], which
//! enforces the protocol invariants. The struct itself has no public
//! constructor and no setters.
//!
//! # Notifications
//!
//! A request without an id is a notification: the server sends nothing back.
//! The absence of the `id` field is what signals this. A `null` id is never
//! written.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Protocol version tag carried by every request and expected on every response
pub const JSONRPC_VERSION: &str = "2.0";

/// Name of the version field in requests and responses
pub const JSONRPC_FIELD: &str = "jsonrpc";

/// JSON-RPC 2.0 request ID
///
/// An id is a 32-bit integer, a 64-bit integer or a string. Integers that
/// fit in 32 bits are decoded as `Int`, wider ones as `Long`; see
/// [`crate::codec::decode_id`].
///
/// Numeric ids compare and hash by value, so `Int(42)` and `Long(42)` are
/// the same id. This keeps correlation independent of which width a peer
/// happened to produce.
///
/// # Examples
///
/// ```rust
/// use textrpc_core::Id;
///
/// let id1: Id = "req-123".into();
/// let id2: Id = 42i32.into();
/// let id3: Id = 9_999_999_999i64.into();
///
/// assert_eq!(id1.to_string(), "\"req-123\"");
/// assert_eq!(id2.to_string(), "42");
/// assert_eq!(id3.to_string(), "9999999999");
/// assert_eq!(Id::Int(7), Id::Long(7));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Integer identifier that fits in 32 bits
    Int(i32),
    /// Integer identifier that needs 64 bits
    Long(i64),
    /// String identifier, useful for UUIDs or correlation tokens
    String(String),
}

impl Id {
    /// Numeric value of the id, if it is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Id::Int(n) => Some(i64::from(*n)),
            Id::Long(n) => Some(*n),
            Id::String(_) => None,
        }
    }

    /// String value of the id, if it is textual
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Id::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Id::String(a), Id::String(b)) => a == b,
            (Id::String(_), _) | (_, Id::String(_)) => false,
            _ => self.as_i64() == other.as_i64(),
        }
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with PartialEq: both integer widths hash the same way.
        match self {
            Id::String(s) => {
                1u8.hash(state);
                s.hash(state);
            }
            _ => {
                0u8.hash(state);
                self.as_i64().hash(state);
            }
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Long(n) => write!(f, "{}", n),
            Id::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Int(n)
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Long(n)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        match id {
            Id::Int(n) => Value::from(n),
            Id::Long(n) => Value::from(n),
            Id::String(s) => Value::String(s),
        }
    }
}

/// Request parameters in one of the two JSON-RPC 2.0 styles
///
/// The styles are mutually exclusive: a request carries either an array
/// matched by position or an object matched by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Parameters matched to the remote method by position
    Positional(Vec<Value>),
    /// Parameters matched to the remote method by name
    Named(Map<String, Value>),
}

impl Params {
    /// Number of parameters, regardless of style
    pub fn len(&self) -> usize {
        match self {
            Params::Positional(values) => values.len(),
            Params::Named(map) => map.len(),
        }
    }

    /// True when there are no parameters in either style
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Params {
    /// An empty named object, the form used when a caller supplies nothing
    fn default() -> Self {
        Params::Named(Map::new())
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        match params {
            Params::Positional(values) => Value::Array(values),
            Params::Named(map) => Value::Object(map),
        }
    }
}

/// JSON-RPC 2.0 request message
///
/// Serializes with the fields in wire order:
///
/// ```text
/// {"jsonrpc":"2.0","method":"<name>","params":<array-or-object>[,"id":<scalar>]}
/// ```
///
/// Build one with [`crate::codec::build_request`]:
///
/// ```rust
/// use textrpc_core::{codec, Id};
///
/// let params = codec::positional_params([42, 23]).unwrap();
/// let request = codec::build_request(Some(Id::Int(1)), "subtract", params).unwrap();
/// assert_eq!(request.method(), "subtract");
/// assert!(!request.is_notification());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: String,
    params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
}

impl JsonRpcRequest {
    /// Callers go through `codec::build_request`, which validates `method`.
    pub(crate) fn new(method: String, params: Value, id: Option<Id>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id,
        }
    }

    /// Protocol version tag, always "2.0"
    pub fn jsonrpc(&self) -> &str {
        self.jsonrpc
    }

    /// Name of the remote method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parameters exactly as they will be sent
    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Request id, `None` for notifications
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    /// True when the request carries no id and expects no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Convert the request into a generic JSON value
    ///
    /// Goes through the same `Serialize` impl as the wire encoding, so the
    /// key set always matches what is sent. Key order follows
    /// `serde_json::Map`, not the wire.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if serde_json rejects the request,
    /// which a request built by `codec::build_request` never triggers.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }
}
