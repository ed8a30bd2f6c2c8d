//! # charm-schema — Schema Coercion Combinators
//!
//! A small library for turning an untyped document tree into a checked,
//! defaulted one without trusting its shape.
//!
//! ## Responsibilities
//!
//! - **Value model:** [`Value`], the tagged tree a document parser hands in.
//! - **Checkers:** scalar checkers ([`string`], [`bool`], [`int`],
//!   [`constant`]), alternatives ([`one_of`]), and containers ([`list`],
//!   [`string_map`], [`field_map`]) composed into a schema once and reused.
//! - **Errors:** [`SchemaError`] carries the [`Path`] of the failing node
//!   and the expected versus actual shape.
//!
//! ## Example
//!
//! ```
//! use charm_schema::{field_map, int, string, Checker, FieldDefault, Path, Value};
//!
//! let schema = field_map(
//!     vec![("name", string().boxed()), ("format", int().boxed())],
//!     vec![("format", FieldDefault::value(1_i64))],
//! );
//!
//! let mut doc = charm_schema::Map::new();
//! doc.insert("name".to_string(), Value::from("mysql"));
//!
//! let out = schema.coerce(&Value::Map(doc), &Path::root()).unwrap();
//! assert_eq!(out.get("format"), Some(&Value::Int(1)));
//! ```

pub mod checker;
pub mod error;
pub mod value;

// Re-export primary types.
pub use checker::{
    any, bool, constant, field_map, int, list, one_of, string, string_map, Checker, FieldDefault,
    FieldMap,
};
pub use error::{Path, SchemaError, SchemaResult, Segment};
pub use value::{Map, Value};
