//! # Structural Errors
//!
//! Every checker failure carries the [`Path`] of the offending node and a
//! description of what was expected versus what was found. These errors
//! always mean the input document is malformed.

use std::fmt;

use thiserror::Error;

/// One step from a parent node to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Map key.
    Key(String),
    /// List index.
    Index(usize),
}

/// Location of a node inside a document, e.g. `storage.data.count` or
/// `tags[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Child path through a map key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.into()));
        Self(segments)
    }

    /// Child path through a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => f.write_str(k)?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// A document fragment did not match its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The node has the wrong shape or scalar kind.
    #[error("{path}: expected {expected}, got {got}")]
    Mismatch {
        /// Where the mismatch occurred.
        path: Path,
        /// Shape the checker accepts.
        expected: String,
        /// Description of the node actually found.
        got: String,
    },

    /// A field with no default is absent.
    #[error("{path}: expected {expected}, got nothing")]
    Missing {
        /// Path of the absent field.
        path: Path,
        /// Shape the field would have accepted.
        expected: String,
    },

    /// A map carries a key its schema does not declare.
    #[error("{path}: unknown field {field:?}")]
    UnknownField {
        /// Path of the enclosing map.
        path: Path,
        /// The undeclared key.
        field: String,
    },

    /// The node has the right kind but an unacceptable value.
    #[error("{path}: {message}")]
    Invalid {
        /// Where the value was found.
        path: Path,
        /// Human-readable reason.
        message: String,
    },
}

impl SchemaError {
    /// The path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Mismatch { path, .. }
            | Self::Missing { path, .. }
            | Self::UnknownField { path, .. }
            | Self::Invalid { path, .. } => path,
        }
    }
}

/// Result type alias for checker operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
