//! # charm-meta — Charm Metadata
//!
//! Reads, validates and writes a charm's `metadata.yaml`:
//!
//! - **Decoding** (`decode.rs`): Parses YAML, drives it through the static
//!   metadata schema (`schema.rs`), expands relation shorthand and storage
//!   count ranges (`checkers.rs`), and builds a typed [`Meta`].
//!
//! - **Validation** (`validate.rs`): Cross-field rules the schema cannot
//!   express: reserved relation names, subordinate container scope, storage
//!   type coupling. Run by every decode; failure aborts it.
//!
//! - **Encoding** (`encode.rs`): Turns a record back into the most compact
//!   document that decodes to the same record.
//!
//! ## Crate Policy
//!
//! - Depends only on `charm-schema` internally.
//! - Library code never panics on input; every failure is a [`MetaError`].
//! - Records are plain data: build one, check it, encode it.

pub mod checkers;
pub mod decode;
pub mod encode;
pub mod error;
pub mod hooks;
pub mod meta;
pub mod parser;
pub mod schema;
pub mod series;
pub mod storage;
pub mod validate;

pub use decode::{decode_meta, parse_meta, read_meta};
pub use encode::encode_meta;
pub use error::{MetaError, MetaResult, ValidationError};
pub use meta::{Meta, Relation, RelationRole, RelationScope};
pub use series::is_valid_series;
pub use storage::{CountMax, Filesystem, Storage, StorageType};
