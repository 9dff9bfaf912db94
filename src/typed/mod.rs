//! # Typed Module
//!
//! Type-safe access to validated requests.
//!
//! ## Overview
//!
//! Shapes produce [`Record`](crate::validator::Record)s of JSON values. When a
//! processing function prefers plain structs, [`TypedRequest`] deserializes
//! the validated parameters, query and body with `serde`, and the typed
//! response is serialized back. This keeps validation rules (ranges, patterns,
//! coercion, closed field sets) in the shapes while handlers work with Rust
//! types.
//!
//! ## Usage
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use validize::dispatcher::{dispatch, ProcessError, RawRequest};
//! use validize::typed::{Empty, TypedRequest};
//! use validize::validator::{integer, optional, shape, string};
//!
//! #[derive(Deserialize)]
//! struct Params { name: String }
//!
//! #[derive(Deserialize)]
//! struct Body { i: i64, s: Option<String> }
//!
//! #[derive(Serialize)]
//! struct Reply { name: String, i: i64, #[serde(skip_serializing_if = "Option::is_none")] s: Option<String> }
//!
//! let endpoint = dispatch()
//!     .parameters(shape().field("name", string("[a-z]+").unwrap()))
//!     .body(
//!         shape()
//!             .field("i", integer(1.0, 3.0))
//!             .field("s", optional(string("[a-f]+").unwrap())),
//!     )
//!     .process_typed(|req: TypedRequest<Params, Empty, Body>| -> Result<Reply, ProcessError> {
//!         Ok(Reply { name: req.parameters.name, i: req.body.i, s: req.body.s })
//!     });
//!
//! let raw = RawRequest::new()
//!     .with_path_param("name", "abc")
//!     .with_body(serde_json::json!({"i": 2}));
//! let resp = endpoint.handle(raw);
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body, Some(serde_json::json!({"name": "abc", "i": 2})));
//! ```

mod core;

pub use core::*;
