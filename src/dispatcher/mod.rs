//! # Dispatcher Module
//!
//! Wraps a processing function with input validation and a uniform mapping
//! from outcomes to HTTP status codes.
//!
//! ## Overview
//!
//! An [`Endpoint`] owns three [`Shape`](crate::validator::Shape)s (route
//! parameters, query, body) and a processing function. For every call it:
//!
//! 1. validates parameters, query and body, responding `400` with an empty
//!    body on the first failure (the processing function never runs)
//! 2. hands the validated [`Request`] to the processing function
//! 3. maps the result: a value → `200` with that value, no value → `200`
//!    empty, [`ProcessError::NotFound`] → `404`,
//!    [`ProcessError::Validation`] → `400`, anything else (including a
//!    panic) → `500`
//!
//! Failure responses never carry error details. With
//! [`RuntimeConfig::trace`](crate::runtime_config::RuntimeConfig) enabled the
//! failure message is logged instead.
//!
//! ```text
//! Validating ──fail──▶ Responded@400
//!     │
//!     ▼
//! Processing ──▶ Responded@200 | Responded@404 | Responded@400 | Responded@500
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use validize::dispatcher::{dispatch, ProcessError, RawRequest};
//! use validize::validator::{integer, shape};
//!
//! let endpoint = dispatch()
//!     .name("choose_option")
//!     .query(shape().field("option", integer(1.0, 3.0).coerce()))
//!     .process(|req| {
//!         let option = req.query["option"].clone();
//!         if option == json!(2) {
//!             return Err(ProcessError::not_found("option 2 is retired"));
//!         }
//!         Ok(Some(json!({ "chosenOption": option })))
//!     });
//!
//! let resp = endpoint.handle(RawRequest::new().with_query_param("option", "3"));
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body, Some(json!({"chosenOption": 3})));
//!
//! assert_eq!(endpoint.handle(RawRequest::new().with_query_param("option", "2")).status, 404);
//! assert_eq!(endpoint.handle(RawRequest::new().with_query_param("option", "9")).status, 400);
//! ```
//!
//! ## Coroutine Dispatch
//!
//! [`Dispatcher`] keeps named endpoints, each running in its own `may`
//! coroutine fed through an MPSC channel. [`Dispatcher::dispatch`] blocks the
//! caller (thread or coroutine) until the single response for that call is
//! available. Coroutine stack size comes from
//! [`RuntimeConfig::stack_size`](crate::runtime_config::RuntimeConfig).

mod core;
mod error;
mod registry;

pub use core::{
    dispatch, DispatchResponse, Endpoint, EndpointBuilder, ParamVec, ProcessFn, ProcessResult,
    RawRequest, Request, MAX_INLINE_PARAMS,
};
pub use error::ProcessError;
pub use registry::{DispatchJob, Dispatcher, EndpointSender};
