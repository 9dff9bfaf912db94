//! # Validator Module
//!
//! Composable validators for untrusted input held as a [`serde_json::Value`].
//!
//! ## Overview
//!
//! Every validator implements [`Validate`]: it consumes one borrowed value and
//! either produces a typed result or a [`ValidationError`]. Validators are
//! built once at startup and are immutable afterwards, so they can be shared by
//! any number of concurrent requests without synchronization.
//!
//! - **Primitives** - [`string`], [`number`], [`integer`], [`boolean`], with
//!   opt-in string coercion for values that arrive as text (route and query
//!   parameters)
//! - **Optional** - [`optional`] and [`present`] accept null/missing values and
//!   report them as absent
//! - **Shape** - [`shape`] validates a closed object field by field and nests
//!   like any other validator
//! - **Custom** - [`from_fn`] lifts a closure into a validator
//!
//! ## Composition
//!
//! ```rust
//! use serde_json::json;
//! use validize::validator::{boolean, integer, optional, shape, string, Validate};
//!
//! let address = shape()
//!     .field("city", string("[A-Za-z ]+").unwrap())
//!     .field("zip", optional(integer(0.0, 99999.0)));
//!
//! let user = shape()
//!     .field("name", string("[a-z]+").unwrap())
//!     .field("admin", boolean().coerce())
//!     .field("address", address);
//!
//! let input = json!({"name": "ada", "admin": "true", "address": {"city": "London"}});
//! let record = user.validate(&input).unwrap();
//! assert_eq!(record["admin"], json!(true));
//! ```
//!
//! ## Failure Semantics
//!
//! Validation is fail-fast: the first failing field aborts the whole shape
//! with that field's error. A declared field that is missing from the input is
//! handed to its validator as null, so a required field reports the same error
//! whether it was absent or of the wrong type.

mod core;
mod optional;
mod primitives;
mod shape;
#[cfg(test)]
mod tests;

pub use core::{from_fn, FieldValidator, FnValidator, IntoField, Record, Validate, ValidationError};
pub use optional::{optional, present, Optional, Unchecked};
pub use primitives::{
    boolean, integer, number, string, BooleanValidator, IntegerValidator, NumberValidator,
    StringValidator,
};
pub use shape::{shape, Shape};
