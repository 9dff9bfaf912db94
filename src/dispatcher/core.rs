use super::error::ProcessError;
use crate::runtime_config::RuntimeConfig;
use crate::validator::{Record, Shape, Validate, ValidationError};
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch path.
///
/// Param names use `Arc<str>` since they usually come from a static route
/// table and are cloned per request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of a processing function: a response value, or no value for an
/// empty 200 response.
pub type ProcessResult = Result<Option<Value>, ProcessError>;

/// Type-erased processing function held by an [`Endpoint`].
pub type ProcessFn = dyn Fn(Request) -> ProcessResult + Send + Sync;

/// Unvalidated request data as handed over by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    /// Route parameters, string-valued
    pub path_params: ParamVec,
    /// Query parameters in arrival order; a name may repeat
    pub query_params: ParamVec,
    /// Parsed request body, `None` when the request had none
    pub body: Option<Value>,
}

impl RawRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Get a path parameter by name. Last write wins on duplicates.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Route parameters as an object of strings. Last write wins on duplicates.
    #[must_use]
    pub fn parameters_value(&self) -> Value {
        let mut object = Record::new();
        for (name, value) in &self.path_params {
            object.insert(name.to_string(), Value::String(value.clone()));
        }
        Value::Object(object)
    }

    /// Query parameters as an object; a repeated name becomes an array of
    /// strings in arrival order.
    #[must_use]
    pub fn query_value(&self) -> Value {
        let mut object = Record::new();
        for (name, value) in &self.query_params {
            let value = Value::String(value.clone());
            match object.get_mut(name.as_ref()) {
                Some(Value::Array(values)) => values.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    object.insert(name.to_string(), value);
                }
            }
        }
        Value::Object(object)
    }
}

/// Validated request handed to a processing function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub parameters: Record,
    pub query: Record,
    pub body: Record,
}

/// Status and optional body produced for exactly one inbound call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResponse {
    /// HTTP status code (200, 400, 404, 500)
    pub status: u16,
    /// Response value; `None` for an empty body
    pub body: Option<Value>,
}

impl DispatchResponse {
    /// Response with no body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// 200 response carrying `body`; JSON `null` means no body.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        if body.is_null() {
            Self::empty(200)
        } else {
            Self {
                status: 200,
                body: Some(body),
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// Content type of [`body_bytes`](Self::body_bytes), `None` when empty.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match &self.body {
            None => None,
            Some(Value::String(_)) => Some("text/plain; charset=utf-8"),
            Some(_) => Some("application/json"),
        }
    }

    /// Wire body: strings are sent as-is, other values as JSON text.
    #[must_use]
    pub fn body_bytes(&self) -> Vec<u8> {
        match &self.body {
            None => Vec::new(),
            Some(Value::String(s)) => s.clone().into_bytes(),
            Some(other) => other.to_string().into_bytes(),
        }
    }
}

/// A processing function wrapped with input validation and status mapping.
///
/// Built with [`dispatch`]. Each call to [`handle`](Endpoint::handle) runs
/// the parameter, query and body shapes in that order; only if all pass is
/// the processing function invoked.
pub struct Endpoint {
    name: String,
    parameters: Shape,
    query: Shape,
    body: Shape,
    process: Box<ProcessFn>,
    config: RuntimeConfig,
}

impl Endpoint {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// Run the three shapes against `raw`. A missing body counts as `{}`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self, raw: &RawRequest) -> Result<Request, ValidationError> {
        let empty;
        let body = match &raw.body {
            Some(body) => body,
            None => {
                empty = Value::Object(Record::new());
                &empty
            }
        };

        Ok(Request {
            parameters: self.parameters.validate(&raw.parameters_value())?,
            query: self.query.validate(&raw.query_value())?,
            body: self.body.validate(body)?,
        })
    }

    /// Validate, process and map the outcome to a response.
    ///
    /// Always produces exactly one response:
    ///
    /// | Outcome                          | Status | Body           |
    /// |----------------------------------|--------|----------------|
    /// | validation failed                | 400    | empty          |
    /// | `Ok(Some(value))`                | 200    | value          |
    /// | `Ok(None)`                       | 200    | empty          |
    /// | `Err(ProcessError::NotFound)`    | 404    | empty          |
    /// | `Err(ProcessError::Validation)`  | 400    | empty          |
    /// | `Err(ProcessError::Internal)`    | 500    | empty          |
    /// | processing function panicked     | 500    | empty          |
    #[must_use]
    pub fn handle(&self, raw: RawRequest) -> DispatchResponse {
        let start = Instant::now();

        let request = match self.validate(&raw) {
            Ok(request) => request,
            Err(err) => {
                self.trace_failure(400, &err);
                return DispatchResponse::empty(400);
            }
        };

        debug!(endpoint = %self.name, "Request validated, processing");

        let outcome = catch_unwind(AssertUnwindSafe(|| (self.process)(request)));
        let response = match outcome {
            Ok(Ok(Some(body))) => DispatchResponse::ok(body),
            Ok(Ok(None)) => DispatchResponse::empty(200),
            Ok(Err(err)) => {
                let status = err.status();
                self.trace_failure(status, &err);
                DispatchResponse::empty(status)
            }
            Err(panic) => {
                error!(
                    endpoint = %self.name,
                    panic_message = %panic_message(panic.as_ref()),
                    "Processing function panicked"
                );
                DispatchResponse::empty(500)
            }
        };

        debug!(
            endpoint = %self.name,
            status = response.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Request processed"
        );
        response
    }

    fn trace_failure(&self, status: u16, err: &dyn fmt::Display) {
        if !self.config.trace {
            return;
        }
        if status >= 500 {
            warn!(endpoint = %self.name, status, error = %err, "Request failed");
        } else {
            info!(endpoint = %self.name, status, error = %err, "Request rejected");
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Configuration for an [`Endpoint`]; finish with
/// [`process`](EndpointBuilder::process).
///
/// Any shape left unset only accepts an empty object.
#[derive(Default)]
pub struct EndpointBuilder {
    name: Option<String>,
    parameters: Option<Shape>,
    query: Option<Shape>,
    body: Option<Shape>,
    config: RuntimeConfig,
}

impl EndpointBuilder {
    /// Name used in log records.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn parameters(mut self, shape: Shape) -> Self {
        self.parameters = Some(shape);
        self
    }

    #[must_use]
    pub fn query(mut self, shape: Shape) -> Self {
        self.query = Some(shape);
        self
    }

    #[must_use]
    pub fn body(mut self, shape: Shape) -> Self {
        self.body = Some(shape);
        self
    }

    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish the endpoint with its processing function.
    pub fn process<F>(self, process: F) -> Endpoint
    where
        F: Fn(Request) -> ProcessResult + Send + Sync + 'static,
    {
        Endpoint {
            name: self.name.unwrap_or_else(|| "endpoint".to_string()),
            parameters: self.parameters.unwrap_or_default(),
            query: self.query.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            process: Box::new(process),
            config: self.config,
        }
    }
}

/// Start configuring an [`Endpoint`].
///
/// ```rust
/// use serde_json::json;
/// use validize::dispatcher::{dispatch, RawRequest};
/// use validize::validator::{shape, string};
///
/// let endpoint = dispatch()
///     .parameters(shape().field("name", string("[a-z]+").unwrap()))
///     .process(|req| Ok(Some(json!(format!("Name was {}", req.parameters["name"].as_str().unwrap_or_default())))));
///
/// let ok = endpoint.handle(RawRequest::new().with_path_param("name", "abc"));
/// assert_eq!(ok.status, 200);
/// assert_eq!(ok.body_bytes(), b"Name was abc");
///
/// let rejected = endpoint.handle(RawRequest::new().with_path_param("name", "ABC"));
/// assert_eq!(rejected.status, 400);
/// assert!(rejected.is_empty());
/// ```
#[must_use]
pub fn dispatch() -> EndpointBuilder {
    EndpointBuilder::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_value_collects_repeats() {
        let raw = RawRequest::new()
            .with_query_param("tag", "a")
            .with_query_param("limit", "10")
            .with_query_param("tag", "b")
            .with_query_param("tag", "c");
        assert_eq!(
            raw.query_value(),
            json!({"tag": ["a", "b", "c"], "limit": "10"})
        );
    }

    #[test]
    fn test_path_params_last_write_wins() {
        let raw = RawRequest::new()
            .with_path_param("id", "org")
            .with_path_param("id", "user");
        assert_eq!(raw.get_path_param("id"), Some("user"));
        assert_eq!(raw.parameters_value(), json!({"id": "user"}));
    }

    #[test]
    fn test_response_body_encoding() {
        let text = DispatchResponse::ok(json!("hello"));
        assert_eq!(text.body_bytes(), b"hello");
        assert_eq!(text.content_type(), Some("text/plain; charset=utf-8"));

        let object = DispatchResponse::ok(json!({"a": 1}));
        assert_eq!(object.body_bytes(), br#"{"a":1}"#);
        assert_eq!(object.content_type(), Some("application/json"));

        let null = DispatchResponse::ok(Value::Null);
        assert!(null.is_empty());
        assert_eq!(null.content_type(), None);
        assert!(null.body_bytes().is_empty());
    }

    #[test]
    fn test_panic_message_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_default_shapes_require_empty_input() {
        let endpoint = dispatch().process(|_| Ok(None));
        assert_eq!(endpoint.handle(RawRequest::new()).status, 200);
        assert_eq!(
            endpoint
                .handle(RawRequest::new().with_query_param("page", "2"))
                .status,
            400
        );
        assert_eq!(
            endpoint
                .handle(RawRequest::new().with_body(json!({"x": 1})))
                .status,
            400
        );
        assert_eq!(endpoint.handle(RawRequest::new().with_body(json!([]))).status, 400);
    }
}
