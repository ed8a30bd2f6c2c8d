//! # Metadata-Specific Checkers
//!
//! Two coercers that understand shorthand forms of the metadata document:
//!
//! - [`RelationExpander`] turns `server: mysql` into the full relation map
//!   `{interface: mysql, limit: <role default>, optional: false, scope: global}`,
//!   and fills the role-default limit into full maps that omit it.
//! - [`StorageCount`] accepts `count: 3`, `count: 2-4` or `count: 2-` and
//!   normalizes each to a `{min, max}` map.
//!
//! ## Count encoding
//!
//! The coerced count is `{min: Int | Null, max: Int | Null}`. A null `min`
//! means "not yet resolved": the bare-integer form leaves the minimum to
//! the decoder, which picks `max` or `0` from the entry's `required` flag.
//! A null `max` means unbounded. The two nulls sit in different fields
//! and are resolved into different types, so they cannot be confused.

use std::sync::LazyLock;

use charm_schema::{any, string, string_map, Checker, Map, Path, SchemaError, SchemaResult, Value};
use regex::Regex;

use crate::meta::{RelationRole, RelationScope};
use crate::schema;

/// Key of the resolved-or-not minimum in a coerced count.
pub const COUNT_MIN: &str = "min";
/// Key of the bounded-or-null maximum in a coerced count.
pub const COUNT_MAX: &str = "max";

static COUNT_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]*)$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Relation shorthand
// ---------------------------------------------------------------------------

/// Expands a relation given as a bare interface name or a map.
#[derive(Debug, Clone, Copy)]
pub struct RelationExpander {
    role: RelationRole,
}

pub fn relation_expander(role: RelationRole) -> RelationExpander {
    RelationExpander { role }
}

impl RelationExpander {
    fn default_limit(&self) -> Value {
        Value::from(self.role.default_limit())
    }
}

impl Checker for RelationExpander {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        if let Ok(interface) = string().coerce(value, path) {
            let mut full = Map::new();
            full.insert("interface".to_string(), interface);
            full.insert("limit".to_string(), self.default_limit());
            full.insert("optional".to_string(), Value::Bool(false));
            full.insert(
                "scope".to_string(),
                Value::from(RelationScope::Global.as_str()),
            );
            return Ok(Value::Map(full));
        }

        let Ok(Value::Map(mut map)) = string_map(any()).coerce(value, path) else {
            return Err(SchemaError::Mismatch {
                path: path.clone(),
                expected: self.expected(),
                got: value.describe(),
            });
        };
        map.entry("limit".to_string())
            .or_insert_with(|| self.default_limit());
        schema::relation_schema().coerce(&Value::Map(map), path)
    }

    fn expected(&self) -> String {
        "interface name string or relation map".to_string()
    }
}

// ---------------------------------------------------------------------------
// Storage count
// ---------------------------------------------------------------------------

/// Parses `m`, `m-n` and `m-` storage counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageCount;

pub fn storage_count() -> StorageCount {
    StorageCount
}

/// Build a coerced count map.
pub fn count_value(min: Option<i64>, max: Option<i64>) -> Value {
    let mut map = Map::new();
    map.insert(COUNT_MIN.to_string(), Value::from(min));
    map.insert(COUNT_MAX.to_string(), Value::from(max));
    Value::Map(map)
}

fn parse_bound(digits: &str, path: &Path, literal: &str) -> SchemaResult<i64> {
    digits.parse::<i64>().map_err(|_| SchemaError::Invalid {
        path: path.clone(),
        message: format!("count {literal:?} is out of range"),
    })
}

impl Checker for StorageCount {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        match value {
            Value::Int(m) if *m <= 0 => Err(SchemaError::Invalid {
                path: path.clone(),
                message: format!("invalid count {m}"),
            }),
            Value::Int(m) => Ok(count_value(None, Some(*m))),
            Value::String(s) => {
                let Some(caps) = COUNT_RANGE_RE.captures(s) else {
                    return Err(SchemaError::Invalid {
                        path: path.clone(),
                        message: format!("value {s:?} does not match 'm', 'm-n', or 'm-'"),
                    });
                };
                let min = parse_bound(&caps[1], path, s)?;
                let max = match &caps[2] {
                    "" => None,
                    digits => Some(parse_bound(digits, path, s)?),
                };
                Ok(count_value(Some(min), max))
            }
            other => Err(SchemaError::Mismatch {
                path: path.clone(),
                expected: self.expected(),
                got: other.describe(),
            }),
        }
    }

    fn expected(&self) -> String {
        "int or string".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_path() -> Path {
        Path::root().key("storage").key("data").key("count")
    }

    fn coerce_count(value: Value) -> SchemaResult<Value> {
        storage_count().coerce(&value, &count_path())
    }

    #[test]
    fn bare_count_leaves_minimum_unresolved() {
        assert_eq!(coerce_count(Value::Int(5)).unwrap(), count_value(None, Some(5)));
    }

    #[test]
    fn bounded_range() {
        assert_eq!(
            coerce_count(Value::from("2-4")).unwrap(),
            count_value(Some(2), Some(4))
        );
    }

    #[test]
    fn open_range_is_unbounded() {
        assert_eq!(
            coerce_count(Value::from("5-")).unwrap(),
            count_value(Some(5), None)
        );
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = coerce_count(Value::Int(0)).unwrap_err();
        assert_eq!(err.to_string(), "storage.data.count: invalid count 0");
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(coerce_count(Value::Int(-3)).is_err());
    }

    #[test]
    fn garbage_string_is_rejected_with_literal() {
        let err = coerce_count(Value::from("abc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "storage.data.count: value \"abc\" does not match 'm', 'm-n', or 'm-'"
        );
    }

    #[test]
    fn numeric_string_is_not_a_bare_count() {
        assert!(coerce_count(Value::from("5")).is_err());
    }

    #[test]
    fn oversized_bound_is_rejected() {
        let err = coerce_count(Value::from("99999999999999999999-")).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn count_rejects_other_kinds() {
        let err = coerce_count(Value::Bool(true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "storage.data.count: expected int or string, got bool(true)"
        );
    }

    #[test]
    fn shorthand_provider_relation_is_unbounded() {
        let out = relation_expander(RelationRole::Provider)
            .coerce(&Value::from("mysql"), &Path::root())
            .unwrap();
        assert_eq!(out.get("interface"), Some(&Value::from("mysql")));
        assert_eq!(out.get("limit"), Some(&Value::Null));
        assert_eq!(out.get("optional"), Some(&Value::Bool(false)));
        assert_eq!(out.get("scope"), Some(&Value::from("global")));
    }

    #[test]
    fn shorthand_requirer_relation_has_limit_one() {
        let out = relation_expander(RelationRole::Requirer)
            .coerce(&Value::from("mysql"), &Path::root())
            .unwrap();
        assert_eq!(out.get("limit"), Some(&Value::Int(1)));
    }

    #[test]
    fn full_map_gets_role_default_limit() {
        let mut map = Map::new();
        map.insert("interface".to_string(), Value::from("http"));
        map.insert("scope".to_string(), Value::from("container"));
        let out = relation_expander(RelationRole::Peer)
            .coerce(&Value::Map(map), &Path::root())
            .unwrap();
        assert_eq!(out.get("limit"), Some(&Value::Int(1)));
        assert_eq!(out.get("scope"), Some(&Value::from("container")));
        assert_eq!(out.get("optional"), Some(&Value::Bool(false)));
    }

    #[test]
    fn explicit_limit_is_kept() {
        let mut map = Map::new();
        map.insert("interface".to_string(), Value::from("http"));
        map.insert("limit".to_string(), Value::Int(4));
        let out = relation_expander(RelationRole::Provider)
            .coerce(&Value::Map(map), &Path::root())
            .unwrap();
        assert_eq!(out.get("limit"), Some(&Value::Int(4)));
    }

    #[test]
    fn relation_of_wrong_kind_reports_both_shapes() {
        let path = Path::root().key("provides").key("server");
        let err = relation_expander(RelationRole::Provider)
            .coerce(&Value::Int(3), &path)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "provides.server: expected interface name string or relation map, got int(3)"
        );
    }

    #[test]
    fn relation_map_without_interface_names_field() {
        let mut map = Map::new();
        map.insert("optional".to_string(), Value::Bool(true));
        let path = Path::root().key("requires").key("db");
        let err = relation_expander(RelationRole::Requirer)
            .coerce(&Value::Map(map), &path)
            .unwrap_err();
        assert_eq!(err.to_string(), "requires.db.interface: expected string, got nothing");
    }
}
