//! Metadata error types.
//!
//! Two user-facing classes are kept apart: [`MetaError::Schema`] for
//! documents whose shape does not match the schema, and
//! [`MetaError::Validation`] for well-shaped documents that break a
//! cross-field rule. [`MetaError::Internal`] is neither: it signals a
//! decoder defect and never describes the input.

use charm_schema::{Path, SchemaError};
use thiserror::Error;

use crate::meta::RelationRole;
use crate::storage::StorageType;

/// Errors that can occur while reading, decoding or emitting metadata.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Reading the byte stream failed.
    #[error("failed to read metadata: {0}")]
    Io(#[from] std::io::Error),

    /// The document parser rejected the bytes.
    #[error("failed to parse metadata YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document uses a YAML construct the value model cannot hold
    /// (floats, non-string mapping keys).
    #[error("metadata: {path}: {detail}")]
    UnsupportedValue { path: Path, detail: String },

    /// The document does not match the metadata schema.
    #[error("metadata: {0}")]
    Schema(#[from] SchemaError),

    /// The decoded record breaks a cross-field rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A value the schema guaranteed turned out to have the wrong shape.
    #[error("internal metadata decoder defect: {0}")]
    Internal(String),

    /// Emitting YAML for a record failed.
    #[error("failed to emit metadata YAML: {0}")]
    Emit(serde_yaml::Error),
}

impl MetaError {
    /// True for errors caused by the input document rather than the
    /// environment or the decoder itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Yaml(_) | Self::UnsupportedValue { .. } | Self::Schema(_) | Self::Validation(_)
        )
    }
}

/// Result type alias for metadata operations.
pub type MetaResult<T> = Result<T, MetaError>;

/// Cross-field rule violations found in a decoded record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("charm {charm:?} has mismatched relation name {name:?}; expected {expected:?}")]
    MismatchedRelationName {
        charm: String,
        name: String,
        expected: String,
    },

    #[error("charm {charm:?} has mismatched role \"{role}\"; expected \"{expected}\"")]
    MismatchedRole {
        charm: String,
        role: RelationRole,
        expected: RelationRole,
    },

    #[error("charm {charm:?} using a reserved relation name: {name:?}")]
    ReservedRelationName { charm: String, name: String },

    #[error("charm {charm:?} relation {relation:?} using a reserved interface: {interface:?}")]
    ReservedInterface {
        charm: String,
        relation: String,
        interface: String,
    },

    #[error("charm {charm:?} using a duplicated relation name: {name:?}")]
    DuplicateRelationName { charm: String, name: String },

    #[error("subordinate charm {charm:?} lacks \"requires\" relation with container scope")]
    SubordinateWithoutContainerScope { charm: String },

    #[error("charm {charm:?} declares invalid series: {series:?}")]
    InvalidSeries { charm: String, series: String },

    #[error("charm {charm:?} has mismatched storage name {name:?}; expected {expected:?}")]
    MismatchedStorageName {
        charm: String,
        name: String,
        expected: String,
    },

    #[error("charm {charm:?} storage {storage:?}: location may not be specified for \"type: {kind}\"")]
    LocationWithoutFilesystem {
        charm: String,
        storage: String,
        kind: StorageType,
    },

    #[error("charm {charm:?} storage {storage:?}: filesystem may not be specified for \"type: {kind}\"")]
    FilesystemWithoutFilesystem {
        charm: String,
        storage: String,
        kind: StorageType,
    },

    #[error("charm {charm:?} storage {storage:?}: invalid minimum count {min}")]
    InvalidCountMin {
        charm: String,
        storage: String,
        min: i64,
    },

    #[error("charm {charm:?} storage {storage:?}: invalid maximum count {max}")]
    InvalidCountMax {
        charm: String,
        storage: String,
        max: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display_has_metadata_prefix() {
        let err = MetaError::from(SchemaError::Missing {
            path: Path::root().key("name"),
            expected: "string".to_string(),
        });
        assert_eq!(err.to_string(), "metadata: name: expected string, got nothing");
        assert!(err.is_input_error());
    }

    #[test]
    fn validation_error_display_is_transparent() {
        let err = MetaError::from(ValidationError::SubordinateWithoutContainerScope {
            charm: "logger".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "subordinate charm \"logger\" lacks \"requires\" relation with container scope"
        );
    }

    #[test]
    fn mismatched_role_display() {
        let err = ValidationError::MismatchedRole {
            charm: "db".to_string(),
            role: RelationRole::Peer,
            expected: RelationRole::Provider,
        };
        assert_eq!(
            err.to_string(),
            "charm \"db\" has mismatched role \"peer\"; expected \"provider\""
        );
    }

    #[test]
    fn storage_type_coupling_display() {
        let err = ValidationError::LocationWithoutFilesystem {
            charm: "db".to_string(),
            storage: "data".to_string(),
            kind: StorageType::Block,
        };
        assert_eq!(
            err.to_string(),
            "charm \"db\" storage \"data\": location may not be specified for \"type: block\""
        );
    }

    #[test]
    fn internal_is_not_an_input_error() {
        let err = MetaError::Internal("relation entry is not a map".to_string());
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("defect"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err = MetaError::from(io_err);
        assert!(err.to_string().contains("truncated"));
        assert!(!err.is_input_error());
    }
}
