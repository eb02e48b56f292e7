//! Fluent builders for single calls and notifications
//!
//! Both builders pick the parameter style from the methods used:
//! [`param`](RequestCall::param) adds a named parameter and
//! [`params`](RequestCall::params) sets the positional list. Using both on
//! one call is an error reported by `build`/`execute`. With neither, the
//! call carries an empty named object `{}`.
//!
//! Conversion of parameter values happens as they are added. A failure is
//! kept and reported when the call is built, so chains stay uninterrupted.

use crate::builder::RequestBuilder;
use serde::Serialize;
use serde_json::{Map, Value};
use textrpc_core::{codec, Error, Id, JsonRpcRequest, Params, Result};

/// Parameter state shared by both fluent builders
#[derive(Debug, Default)]
struct ParamsCollector {
    named: Map<String, Value>,
    positional: Option<Vec<Value>>,
    conversion_error: Option<String>,
}

impl ParamsCollector {
    fn param<T: Serialize>(&mut self, name: impl Into<String>, value: T) {
        match codec::to_json(value) {
            Ok(v) => {
                self.named.insert(name.into(), v);
            }
            Err(e) => self.record(e),
        }
    }

    fn params<I, T>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        match values.into_iter().map(codec::to_json).collect::<Result<Vec<Value>>>() {
            Ok(values) => self.positional = Some(values),
            Err(e) => self.record(e),
        }
    }

    fn record(&mut self, error: Error) {
        if self.conversion_error.is_none() {
            self.conversion_error = Some(error.to_string());
        }
    }

    fn resolve(&self) -> Result<Params> {
        if let Some(msg) = &self.conversion_error {
            return Err(Error::Serialization(msg.clone()));
        }
        match &self.positional {
            Some(_) if !self.named.is_empty() => Err(Error::InvalidArgument(
                "Both positional and named params are set".to_string(),
            )),
            Some(values) => Ok(Params::Positional(values.clone())),
            None => Ok(Params::Named(self.named.clone())),
        }
    }
}

/// Builder for a call that expects a response
///
/// Created by [`JsonRpcClient::create_request`](crate::JsonRpcClient::create_request).
///
/// # Examples
///
/// ```rust
/// use textrpc_client::{FnTransport, JsonRpcClient};
///
/// let client = JsonRpcClient::new(FnTransport::new(|_: &str| {
///     Ok(r#"{"jsonrpc":"2.0","result":19,"id":1}"#.to_string())
/// }));
///
/// let request = client
///     .create_request()
///     .method("subtract")
///     .id(1)
///     .params([42, 23])
///     .build()
///     .unwrap();
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":1}"#
/// );
/// ```
pub struct RequestCall<'a> {
    builder: RequestBuilder<'a>,
    method: String,
    id: Option<Id>,
    params: ParamsCollector,
}

impl<'a> RequestCall<'a> {
    pub(crate) fn new(builder: RequestBuilder<'a>) -> Self {
        Self {
            builder,
            method: String::new(),
            id: None,
            params: ParamsCollector::default(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a named parameter
    pub fn param<T: Serialize>(mut self, name: impl Into<String>, value: T) -> Self {
        self.params.param(name, value);
        self
    }

    /// Set the positional parameters, replacing any set before
    pub fn params<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        self.params.params(values);
        self
    }

    /// Build the request without sending it
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the method or the id is missing, or both
    ///   parameter styles were used
    /// - `Error::Serialization` if a parameter value couldn't be converted
    pub fn build(&self) -> Result<JsonRpcRequest> {
        let id = self
            .id
            .clone()
            .ok_or_else(|| Error::InvalidArgument("Id is not set".to_string()))?;
        let params = self.params.resolve()?;
        self.builder.request(Some(id), self.method.as_str(), params.into())
    }

    /// Build, send, and return the raw response text
    pub fn execute(&self) -> Result<String> {
        let request = self.build()?;
        self.builder.pass(&request)
    }
}

/// Builder for a notification (no id, no response expected)
///
/// Created by [`JsonRpcClient::create_notification`](crate::JsonRpcClient::create_notification).
pub struct NotificationCall<'a> {
    builder: RequestBuilder<'a>,
    method: String,
    params: ParamsCollector,
}

impl<'a> NotificationCall<'a> {
    pub(crate) fn new(builder: RequestBuilder<'a>) -> Self {
        Self {
            builder,
            method: String::new(),
            params: ParamsCollector::default(),
        }
    }

    /// Set the remote method name
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Add a named parameter
    pub fn param<T: Serialize>(mut self, name: impl Into<String>, value: T) -> Self {
        self.params.param(name, value);
        self
    }

    /// Set the positional parameters, replacing any set before
    pub fn params<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        self.params.params(values);
        self
    }

    /// Build the notification without sending it
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the method is missing or both parameter
    ///   styles were used
    /// - `Error::Serialization` if a parameter value couldn't be converted
    pub fn build(&self) -> Result<JsonRpcRequest> {
        let params = self.params.resolve()?;
        self.builder.request(None, self.method.as_str(), params.into())
    }

    /// Build and send; whatever the transport returns is discarded
    pub fn execute(&self) -> Result<()> {
        let request = self.build()?;
        self.builder.pass(&request).map(|_| ())
    }
}
