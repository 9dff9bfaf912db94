use crate::dispatcher::{Endpoint, EndpointBuilder, ProcessError, Request};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;

/// Placeholder for a request part that carries no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Empty {}

/// Validated request converted into user types.
///
/// The shapes configured on the endpoint decide what gets through; this type
/// only deserializes the resulting records, so its structs should mirror them.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRequest<P = Empty, Q = Empty, B = Empty> {
    pub parameters: P,
    pub query: Q,
    pub body: B,
}

impl<P, Q, B> TryFrom<Request> for TypedRequest<P, Q, B>
where
    P: DeserializeOwned,
    Q: DeserializeOwned,
    B: DeserializeOwned,
{
    type Error = anyhow::Error;

    fn try_from(req: Request) -> Result<Self, Self::Error> {
        Ok(TypedRequest {
            parameters: serde_json::from_value(Value::Object(req.parameters))
                .context("route parameters do not fit the typed request")?,
            query: serde_json::from_value(Value::Object(req.query))
                .context("query does not fit the typed request")?,
            body: serde_json::from_value(Value::Object(req.body))
                .context("body does not fit the typed request")?,
        })
    }
}

/// Trait implemented by typed processing handlers.
///
/// A handler receives a [`TypedRequest`] built from the validated request and
/// returns a serializable response. A response that serializes to `null`
/// (such as `()` or `None`) produces an empty 200.
pub trait Handler: Send + Sync + 'static {
    type Parameters: DeserializeOwned + 'static;
    type Query: DeserializeOwned + 'static;
    type Body: DeserializeOwned + 'static;
    type Response: Serialize + 'static;

    /// Handle a typed request.
    ///
    /// # Errors
    ///
    /// The returned [`ProcessError`] decides the response status.
    fn handle(
        &self,
        req: TypedRequest<Self::Parameters, Self::Query, Self::Body>,
    ) -> Result<Self::Response, ProcessError>;
}

impl EndpointBuilder {
    /// Finish the endpoint with a function over typed request parts.
    ///
    /// A record that fails to deserialize, or a response that fails to
    /// serialize, is reported as a 500: the shapes and types disagree.
    pub fn process_typed<P, Q, B, R, F>(self, process: F) -> Endpoint
    where
        P: DeserializeOwned + 'static,
        Q: DeserializeOwned + 'static,
        B: DeserializeOwned + 'static,
        R: Serialize + 'static,
        F: Fn(TypedRequest<P, Q, B>) -> Result<R, ProcessError> + Send + Sync + 'static,
    {
        self.process(move |req| {
            let typed = TypedRequest::<P, Q, B>::try_from(req)?;
            let response = process(typed)?;
            let value = serde_json::to_value(response).context("response is not serializable")?;
            Ok(Some(value))
        })
    }

    /// Finish the endpoint with a [`Handler`].
    pub fn handler<H: Handler>(self, handler: H) -> Endpoint {
        self.process_typed(
            move |req: TypedRequest<H::Parameters, H::Query, H::Body>| handler.handle(req),
        )
    }
}
