//! # Server Module
//!
//! Adapters between the `http` crate types used by HTTP servers and the
//! dispatcher's boundary types. The server and router themselves stay
//! outside this crate: they parse the body, match the route, and hand over
//! the route parameters.
//!
//! ```rust
//! use serde_json::json;
//! use validize::dispatcher::{dispatch, ParamVec};
//! use validize::server::{into_http_response, raw_request_from_http};
//! use validize::validator::{boolean, shape};
//!
//! let endpoint = dispatch()
//!     .query(shape().field("verbose", boolean().coerce()))
//!     .process(|req| Ok(Some(json!({ "verbose": req.query["verbose"] }))));
//!
//! let req = http::Request::get("/status?verbose=true").body(None).unwrap();
//! let raw = raw_request_from_http(req, ParamVec::new());
//! let resp = into_http_response(endpoint.handle(raw)).unwrap();
//!
//! assert_eq!(resp.status(), 200);
//! assert_eq!(resp.headers()["content-type"], "application/json");
//! assert_eq!(resp.body(), br#"{"verbose":true}"#);
//! ```

mod request;
mod response;

pub use request::{parse_query_params, parse_query_string, raw_request_from_http};
pub use response::{into_http_response, status_reason};
