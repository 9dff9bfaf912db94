//! # validize
//!
//! **validize** checks untrusted request input with composable validators and
//! runs a processing function only on input that passed.
//!
//! ## Overview
//!
//! Route parameters, query strings and request bodies arrive as untyped data.
//! Each endpoint declares what it accepts as three closed [`Shape`]s, and the
//! dispatcher turns every call into exactly one HTTP status plus an optional
//! body. Validation failures never reach the processing function, and error
//! details never reach the client.
//!
//! ## Architecture
//!
//! - **[`validator`]** - Primitive validators, optional fields and closed object shapes
//! - **[`dispatcher`]** - Validate-then-process endpoints with status mapping,
//!   plus a coroutine registry of named endpoints
//! - **[`typed`]** - Deserialize validated records into user structs
//! - **[`server`]** - Adapters between `http` crate types and the dispatcher
//! - **[`runtime_config`]** - Environment-driven settings (failure tracing, stack size)
//! - **[`logging`]** - Optional `tracing-subscriber` setup for applications
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as HTTP Server
//!     participant Adapter as server::raw_request_from_http
//!     participant Endpoint as dispatcher::Endpoint
//!     participant Shapes as validator::Shape
//!     participant Process as Processing Function
//!
//!     Server->>Adapter: http::Request + route params
//!     Adapter-->>Endpoint: RawRequest
//!     Endpoint->>Shapes: parameters, query, body
//!     alt any shape fails
//!         Shapes-->>Endpoint: ValidationError
//!         Endpoint-->>Server: 400, empty
//!     else all pass
//!         Shapes-->>Endpoint: Request (three records)
//!         Endpoint->>Process: Request
//!         Process-->>Endpoint: Ok(value) / Ok(None) / Err(ProcessError)
//!         Endpoint-->>Server: 200 / 404 / 400 / 500
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use validize::{dispatch, integer, optional, shape, string, RawRequest};
//!
//! let endpoint = dispatch()
//!     .name("create_user")
//!     .body(
//!         shape()
//!             .field("name", string("[A-Za-z ]{1,40}").unwrap())
//!             .field("age", optional(integer(0.0, 150.0))),
//!     )
//!     .process(|req| Ok(Some(json!({ "created": req.body["name"] }))));
//!
//! let ok = endpoint.handle(RawRequest::new().with_body(json!({"name": "Ada"})));
//! assert_eq!(ok.status, 200);
//! assert_eq!(ok.body, Some(json!({"created": "Ada"})));
//!
//! let rejected = endpoint.handle(RawRequest::new().with_body(json!({"name": "Ada", "admin": true})));
//! assert_eq!(rejected.status, 400);
//! ```
//!
//! ## Runtime
//!
//! [`Dispatcher`] serves each registered endpoint from its own `may`
//! coroutine. Configure the runtime before registering:
//!
//! ```rust,no_run
//! use validize::{dispatch, Dispatcher, RawRequest, RuntimeConfig};
//!
//! let config = RuntimeConfig::from_env();
//! may::config().set_stack_size(config.stack_size);
//!
//! let mut dispatcher = Dispatcher::new(config);
//! unsafe {
//!     dispatcher
//!         .register("ping", dispatch().config(config).process(|_| Ok(None)))
//!         .expect("failed to spawn endpoint coroutine");
//! }
//! let resp = dispatcher.dispatch("ping", RawRequest::new());
//! assert_eq!(resp.map(|r| r.status), Some(200));
//! ```

pub mod dispatcher;
pub mod logging;
pub mod runtime_config;
pub mod server;
pub mod typed;
pub mod validator;

pub use dispatcher::{
    dispatch, DispatchResponse, Dispatcher, Endpoint, ProcessError, ProcessResult, RawRequest,
    Request,
};
pub use runtime_config::RuntimeConfig;
pub use typed::{Handler, TypedRequest};
pub use validator::{
    boolean, from_fn, integer, number, optional, present, shape, string, Record, Shape, Validate,
    ValidationError,
};
