//! Request construction and encoding for JSON-RPC 2.0
//!
//! This module is the protocol core. Every request this crate produces goes
//! through [`build_request`], and every parameter list through
//! [`positional_params`] or [`named_params`]. All generic JSON work is
//! delegated to `serde_json`.
//!
//! # Invariants
//!
//! - The method name is never empty. An empty name is rejected before any
//!   object exists.
//! - `jsonrpc` is always the literal `"2.0"`.
//! - `params` is always present, even when empty.
//! - `id` is present if and only if the caller supplied one.
//!
//! # Examples
//!
//! ```rust
//! use textrpc_core::{codec, Id};
//! use std::collections::BTreeMap;
//!
//! let call = codec::build_request(
//!     Some(Id::Int(1)),
//!     "subtract",
//!     codec::positional_params([42, 23]).unwrap(),
//! ).unwrap();
//! assert_eq!(
//!     codec::encode_request(&call).unwrap(),
//!     r#"{"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":1}"#
//! );
//!
//! let empty: BTreeMap<String, i32> = BTreeMap::new();
//! let notice = codec::build_request(None, "notify", codec::named_params(empty).unwrap()).unwrap();
//! assert_eq!(
//!     codec::encode_request(&notice).unwrap(),
//!     r#"{"jsonrpc":"2.0","method":"notify","params":{}}"#
//! );
//! ```

use crate::error::{Error, Result};
use crate::types::{Id, JsonRpcRequest, JSONRPC_FIELD, JSONRPC_VERSION};
use serde::Serialize;
use serde_json::{Map, Value};

/// Convert any serializable value to a JSON value
pub fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::from)
}

/// Build positional parameters as a JSON array
///
/// Each value is converted independently and in order. The array has
/// exactly as many elements as the input; nothing is deduplicated,
/// dropped or padded. Empty input produces `[]`.
///
/// # Errors
///
/// Returns `Error::Serialization` for the first value that can't be
/// represented as JSON.
///
/// # Examples
///
/// ```rust
/// use textrpc_core::codec;
/// use serde_json::json;
///
/// let params = codec::positional_params([json!(1), json!("a"), json!(null)]).unwrap();
/// assert_eq!(params, json!([1, "a", null]));
///
/// let none: [i32; 0] = [];
/// assert_eq!(codec::positional_params(none).unwrap(), json!([]));
/// ```
pub fn positional_params<I, T>(values: I) -> Result<Value>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let array = values
        .into_iter()
        .map(to_json)
        .collect::<Result<Vec<Value>>>()?;
    Ok(Value::Array(array))
}

/// Build named parameters as a JSON object
///
/// Each value is converted and inserted under its key. The resulting object
/// has exactly the key set of the input. If the input repeats a key (only
/// possible with a plain list of pairs), the last value wins.
///
/// # Examples
///
/// ```rust
/// use textrpc_core::codec;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut args = HashMap::new();
/// args.insert("minuend", 42);
/// args.insert("subtrahend", 23);
///
/// let params = codec::named_params(args).unwrap();
/// assert_eq!(params, json!({"minuend": 42, "subtrahend": 23}));
/// ```
pub fn named_params<I, K, T>(entries: I) -> Result<Value>
where
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
    T: Serialize,
{
    let mut object = Map::new();
    for (key, value) in entries {
        object.insert(key.into(), to_json(value)?);
    }
    Ok(Value::Object(object))
}

/// Build a JSON-RPC 2.0 request
///
/// `id` of `None` produces a notification: the `id` field is left out
/// entirely rather than written as `null`.
///
/// `params` is normally the output of [`positional_params`] or
/// [`named_params`], but any JSON value is accepted as-is.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if `method` is empty.
pub fn build_request(id: Option<Id>, method: impl Into<String>, params: Value) -> Result<JsonRpcRequest> {
    let method = method.into();
    if method.is_empty() {
        return Err(Error::InvalidArgument("Method is not set".to_string()));
    }

    tracing::trace!(method = %method, id = ?id, "Building request");
    Ok(JsonRpcRequest::new(method, params, id))
}

/// Decode a JSON id value back to its native scalar type
///
/// Dispatch is ordered and based on explicit range checks:
///
/// 1. text becomes `Id::String`
/// 2. an integer in the `i32` range becomes `Id::Int`
/// 3. any other integer in the `i64` range becomes `Id::Long`
///
/// # Errors
///
/// Every other kind (float, boolean, null, array, object, or an unsigned
/// integer beyond `i64::MAX`) returns `Error::InvalidArgument` naming the
/// offending value.
///
/// # Examples
///
/// ```rust
/// use textrpc_core::{codec, Id};
/// use serde_json::json;
///
/// assert!(matches!(codec::decode_id(&json!(42)).unwrap(), Id::Int(42)));
/// assert!(matches!(codec::decode_id(&json!(9999999999i64)).unwrap(), Id::Long(9999999999)));
/// assert_eq!(codec::decode_id(&json!("abc")).unwrap(), Id::from("abc"));
/// assert!(codec::decode_id(&json!(1.5)).is_err());
/// ```
pub fn decode_id(value: &Value) -> Result<Id> {
    match value {
        Value::String(s) => Ok(Id::String(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(wide) => Ok(i32::try_from(wide).map(Id::Int).unwrap_or(Id::Long(wide))),
            None => Err(wrong_id(value)),
        },
        _ => Err(wrong_id(value)),
    }
}

fn wrong_id(value: &Value) -> Error {
    Error::InvalidArgument(format!("Wrong id={}", value))
}

/// Verify that a response declares protocol version "2.0"
///
/// A single response must be an object whose `jsonrpc` field is exactly
/// `"2.0"`. A batch response must be an array in which every element passes
/// the same check.
///
/// # Errors
///
/// - `Error::VersionMismatch` if a `jsonrpc` field is missing or different
/// - `Error::InvalidResponse` if the value (or a batch element) is not an object
pub fn check_version(response: &Value) -> Result<()> {
    match response {
        Value::Object(object) => match object.get(JSONRPC_FIELD) {
            Some(Value::String(v)) if v == JSONRPC_VERSION => Ok(()),
            other => {
                let actual = match other {
                    None => "<missing>".to_string(),
                    Some(Value::String(v)) => v.clone(),
                    Some(v) => v.to_string(),
                };
                tracing::warn!(actual = %actual, "Response version mismatch");
                Err(Error::VersionMismatch {
                    expected: JSONRPC_VERSION.to_string(),
                    actual,
                })
            }
        },
        Value::Array(items) => items.iter().try_for_each(check_version),
        other => Err(Error::InvalidResponse(format!(
            "expected a JSON object or array, got {}",
            other
        ))),
    }
}

/// Parse response text and verify its protocol version
///
/// # Errors
///
/// Returns `Error::InvalidResponse` if `text` isn't JSON, otherwise whatever
/// [`check_version`] returns.
///
/// # Examples
///
/// ```rust
/// use textrpc_core::{codec, Error};
///
/// assert!(codec::check_response_text(r#"{"jsonrpc":"2.0","result":1,"id":1}"#).is_ok());
/// assert!(matches!(
///     codec::check_response_text(r#"{"result":1,"id":1}"#),
///     Err(Error::VersionMismatch { .. })
/// ));
/// ```
pub fn check_response_text(text: &str) -> Result<()> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidResponse(format!("response is not valid JSON: {}", e)))?;
    check_version(&value)
}

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(Error::from)
}

/// Encode a single request to JSON text
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Encode several requests as a batch (a JSON array, in order)
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for an empty batch, which JSON-RPC 2.0
/// does not allow.
pub fn encode_batch(requests: &[JsonRpcRequest]) -> Result<String> {
    if requests.is_empty() {
        return Err(Error::InvalidArgument("Batch is empty".to_string()));
    }
    encode(&requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap, HashSet};

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_subtract_call_wire_format() {
        let req = build_request(Some(Id::Int(1)), "subtract", positional_params([42, 23]).unwrap()).unwrap();
        assert_eq!(
            encode_request(&req).unwrap(),
            r#"{"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":1}"#
        );
    }

    #[test]
    fn test_notification_wire_format() {
        let empty: HashMap<String, Value> = HashMap::new();
        let req = build_request(None, "notify", named_params(empty).unwrap()).unwrap();
        assert_eq!(
            encode_request(&req).unwrap(),
            r#"{"jsonrpc":"2.0","method":"notify","params":{}}"#
        );
        assert!(req.is_notification());
    }

    #[test]
    fn test_field_set_for_every_style_and_id() {
        let param_styles = vec![
            positional_params([1, 2, 3]).unwrap(),
            positional_params(Vec::<i32>::new()).unwrap(),
            named_params([("a", 1)]).unwrap(),
            named_params(Vec::<(String, i32)>::new()).unwrap(),
        ];
        let ids = vec![
            None,
            Some(Id::Int(0)),
            Some(Id::Long(i64::MAX)),
            Some(Id::from("")),
        ];

        for params in &param_styles {
            for id in &ids {
                let req = build_request(id.clone(), "m", params.clone()).unwrap();
                let value = req.to_value().unwrap();
                let expected: Vec<&str> = if id.is_some() {
                    vec!["id", "jsonrpc", "method", "params"]
                } else {
                    vec!["jsonrpc", "method", "params"]
                };
                assert_eq!(keys(&value), expected);
                assert_eq!(value["jsonrpc"], "2.0");
                assert_eq!(&value["params"], params);
            }
        }
    }

    #[test]
    fn test_empty_method_always_rejected() {
        for id in [None, Some(Id::Int(1)), Some(Id::from("x"))] {
            for params in [json!([]), json!({}), json!(null)] {
                let result = build_request(id.clone(), "", params);
                assert!(matches!(result, Err(Error::InvalidArgument(_))));
            }
        }
    }

    #[test]
    fn test_build_request_accepts_arbitrary_params() {
        let req = build_request(Some(Id::Int(3)), "raw", json!("scalar")).unwrap();
        assert_eq!(req.params(), &json!("scalar"));
    }

    #[test]
    fn test_positional_params_preserve_order_and_arity() {
        let params = positional_params([json!("b"), json!("a"), json!("b"), json!(null)]).unwrap();
        assert_eq!(params, json!(["b", "a", "b", null]));

        let params = positional_params(Vec::<Value>::new()).unwrap();
        assert!(params.is_array());
        assert_eq!(params.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_positional_params_propagate_conversion_errors() {
        // Maps with non-string keys can't become JSON objects
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);
        let result = positional_params([bad]);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_named_params_preserve_key_set() {
        let mut input = BTreeMap::new();
        input.insert("z".to_string(), json!(1));
        input.insert("a".to_string(), json!([1, 2]));
        input.insert("m".to_string(), json!({"nested": true}));

        let params = named_params(input.clone()).unwrap();
        let expected: HashSet<String> = input.keys().cloned().collect();
        let actual: HashSet<String> = params.as_object().unwrap().keys().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(params["m"], json!({"nested": true}));
    }

    #[test]
    fn test_decode_id_round_trip() {
        assert!(matches!(decode_id(&json!(42)).unwrap(), Id::Int(42)));
        assert!(matches!(decode_id(&json!(-1)).unwrap(), Id::Int(-1)));
        assert!(matches!(decode_id(&json!(9_999_999_999i64)).unwrap(), Id::Long(9_999_999_999)));
        assert!(matches!(decode_id(&json!(i32::MAX as i64 + 1)).unwrap(), Id::Long(_)));
        assert_eq!(decode_id(&json!("abc")).unwrap(), Id::String("abc".to_string()));

        for id in [Id::Int(42), Id::Long(9_999_999_999), Id::from("abc")] {
            let encoded = serde_json::to_value(&id).unwrap();
            assert_eq!(decode_id(&encoded).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_id_rejects_other_kinds() {
        for value in [json!(true), json!(1.5), json!(null), json!([1]), json!({"id": 1}), json!(u64::MAX)] {
            match decode_id(&value) {
                Err(Error::InvalidArgument(msg)) => assert!(msg.contains(&value.to_string())),
                other => panic!("Expected InvalidArgument for {}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_check_version() {
        assert!(check_version(&json!({"jsonrpc": "2.0", "result": 1, "id": 1})).is_ok());
        assert!(check_version(&json!([{"jsonrpc": "2.0", "result": 1, "id": 1}])).is_ok());

        match check_version(&json!({"jsonrpc": "1.0", "result": 1})) {
            Err(Error::VersionMismatch { actual, .. }) => assert_eq!(actual, "1.0"),
            other => panic!("Expected VersionMismatch, got {:?}", other),
        }
        match check_version(&json!({"result": 1})) {
            Err(Error::VersionMismatch { actual, .. }) => assert_eq!(actual, "<missing>"),
            other => panic!("Expected VersionMismatch, got {:?}", other),
        }
        assert!(check_version(&json!([{"jsonrpc": "2.0"}, {"jsonrpc": 2.0}])).is_err());
        assert!(matches!(check_version(&json!("2.0")), Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn test_check_response_text_rejects_garbage() {
        assert!(matches!(check_response_text("not json"), Err(Error::InvalidResponse(_))));
        assert!(check_response_text(r#"{"jsonrpc":"2.0","result":null,"id":1}"#).is_ok());
    }

    #[test]
    fn test_encode_batch() {
        let a = build_request(Some(Id::Int(1)), "a", json!([])).unwrap();
        let b = build_request(None, "b", json!({})).unwrap();
        assert_eq!(
            encode_batch(&[a, b]).unwrap(),
            r#"[{"jsonrpc":"2.0","method":"a","params":[],"id":1},{"jsonrpc":"2.0","method":"b","params":{}}]"#
        );
        assert!(matches!(encode_batch(&[]), Err(Error::InvalidArgument(_))));
    }
}
