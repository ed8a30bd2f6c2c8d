//! # Metadata Schema
//!
//! The static checker composition describing a whole `metadata.yaml`
//! document. Each schema is built on first use and shared read-only for
//! the life of the process.
//!
//! | field | checker | default |
//! |---|---|---|
//! | `name`, `summary`, `description` | string | required |
//! | `format` | int | `1` |
//! | `subordinate` | bool | `false` |
//! | `series` | string | omitted |
//! | `categories`, `tags` | list of string | omitted |
//! | `provides`, `requires`, `peers` | map of relation | omitted |
//! | `storage` | map of storage entry | omitted |
//! | `revision` | int (obsolete) | omitted |

use std::sync::OnceLock;

use charm_schema::{
    bool, constant, field_map, int, list, one_of, string, string_map, Checker, FieldDefault,
    FieldMap, Path, SchemaResult, Value,
};

use crate::checkers::{relation_expander, storage_count};
use crate::meta::{RelationRole, RelationScope};
use crate::storage::StorageType;

/// Checker for a full relation map, after the limit has been filled in.
pub fn relation_schema() -> &'static FieldMap {
    static SCHEMA: OnceLock<FieldMap> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        field_map(
            vec![
                ("interface", string().boxed()),
                ("limit", one_of(vec![constant(Value::Null).boxed(), int().boxed()]).boxed()),
                (
                    "scope",
                    one_of(vec![
                        constant(RelationScope::Global.as_str()).boxed(),
                        constant(RelationScope::Container.as_str()).boxed(),
                    ])
                    .boxed(),
                ),
                ("optional", bool().boxed()),
            ],
            vec![
                ("scope", FieldDefault::value(RelationScope::Global.as_str())),
                ("optional", FieldDefault::value(false)),
            ],
        )
    })
}

/// Checker for one entry of a storage `filesystem` preference list, in its
/// full map form.
pub fn filesystem_schema() -> &'static FieldMap {
    static SCHEMA: OnceLock<FieldMap> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        field_map(
            vec![
                ("type", string().boxed()),
                ("mkfs-options", list(string()).boxed()),
                ("options", list(string()).boxed()),
            ],
            vec![
                ("mkfs-options", FieldDefault::Omit),
                ("options", FieldDefault::Omit),
            ],
        )
    })
}

/// Checker for one storage entry.
pub fn storage_schema() -> &'static FieldMap {
    static SCHEMA: OnceLock<FieldMap> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let storage_type = one_of(
            StorageType::all()
                .iter()
                .map(|t| constant(t.as_str()).boxed())
                .collect(),
        );
        field_map(
            vec![
                ("required", bool().boxed()),
                ("shared", bool().boxed()),
                ("read-only", bool().boxed()),
                ("persistent", bool().boxed()),
                ("count", storage_count().boxed()),
                ("location", string().boxed()),
                ("type", storage_type.boxed()),
                (
                    "filesystem",
                    list(one_of(vec![string().boxed(), SharedSchema(filesystem_schema).boxed()])).boxed(),
                ),
            ],
            vec![
                ("required", FieldDefault::value(false)),
                ("shared", FieldDefault::value(false)),
                ("read-only", FieldDefault::value(false)),
                ("persistent", FieldDefault::value(false)),
                ("count", FieldDefault::Omit),
                ("location", FieldDefault::Omit),
                ("filesystem", FieldDefault::Omit),
            ],
        )
    })
}

/// Checker for the whole document.
pub fn meta_schema() -> &'static FieldMap {
    static SCHEMA: OnceLock<FieldMap> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        field_map(
            vec![
                ("name", string().boxed()),
                ("summary", string().boxed()),
                ("description", string().boxed()),
                (
                    RelationRole::Peer.section(),
                    string_map(relation_expander(RelationRole::Peer)).boxed(),
                ),
                (
                    RelationRole::Provider.section(),
                    string_map(relation_expander(RelationRole::Provider)).boxed(),
                ),
                (
                    RelationRole::Requirer.section(),
                    string_map(relation_expander(RelationRole::Requirer)).boxed(),
                ),
                ("revision", int().boxed()),
                ("format", int().boxed()),
                ("subordinate", bool().boxed()),
                ("categories", list(string()).boxed()),
                ("tags", list(string()).boxed()),
                ("series", string().boxed()),
                ("storage", string_map(SharedSchema(storage_schema)).boxed()),
            ],
            vec![
                (RelationRole::Provider.section(), FieldDefault::Omit),
                (RelationRole::Requirer.section(), FieldDefault::Omit),
                (RelationRole::Peer.section(), FieldDefault::Omit),
                ("revision", FieldDefault::Omit),
                ("format", FieldDefault::value(1_i64)),
                ("subordinate", FieldDefault::value(false)),
                ("categories", FieldDefault::Omit),
                ("tags", FieldDefault::Omit),
                ("series", FieldDefault::Omit),
                ("storage", FieldDefault::Omit),
            ],
        )
    })
}

/// Delegates to a `&'static` schema so shared field maps can be nested
/// inside other combinators without being rebuilt.
#[derive(Clone, Copy)]
struct SharedSchema(fn() -> &'static FieldMap);

impl Checker for SharedSchema {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        (self.0)().coerce(value, path)
    }

    fn expected(&self) -> String {
        (self.0)().expected()
    }
}
