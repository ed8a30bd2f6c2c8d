//! # Decoder
//!
//! Drives a document through [`meta_schema`](crate::schema::meta_schema)
//! and builds the typed [`Meta`] record from the coerced tree, then runs
//! [`Meta::check`].
//!
//! The coerced tree is still loosely typed, but its shape is guaranteed by
//! the schema. Extraction therefore never reports input errors: a value of
//! the wrong kind at this stage is a decoder defect and surfaces as
//! [`MetaError::Internal`].

use std::collections::BTreeMap;
use std::io::Read;

use charm_schema::{Checker, Map, Path, Value};

use crate::checkers::{COUNT_MAX, COUNT_MIN};
use crate::error::{MetaError, MetaResult};
use crate::meta::{Meta, Relation, RelationRole, RelationScope};
use crate::parser;
use crate::schema;
use crate::storage::{CountMax, Filesystem, Storage, StorageType};

/// Read a `metadata.yaml` byte stream and return the validated record.
pub fn read_meta<R: Read>(mut reader: R) -> MetaResult<Meta> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_meta(&bytes)
}

/// Decode and validate `metadata.yaml` content.
pub fn parse_meta(bytes: &[u8]) -> MetaResult<Meta> {
    let document = parser::parse_document(bytes)?;
    decode_meta(&document)
}

/// Decode and validate an already-parsed document tree.
pub fn decode_meta(document: &Value) -> MetaResult<Meta> {
    let coerced = schema::meta_schema().coerce(document, &Path::root())?;
    let meta = build_meta(&coerced)?;
    tracing::debug!(
        charm = %meta.name,
        relations = meta.all_relations().count(),
        storage = meta.storage.len(),
        "decoded charm metadata"
    );
    meta.check()?;
    Ok(meta)
}

// ---------------------------------------------------------------------------
// Typed extraction
// ---------------------------------------------------------------------------

fn defect(detail: String) -> MetaError {
    tracing::error!(%detail, "metadata decoder invariant violated");
    MetaError::Internal(detail)
}

fn as_map<'a>(value: &'a Value, what: &str) -> MetaResult<&'a Map> {
    value
        .as_map()
        .ok_or_else(|| defect(format!("{what} is {}, not a map", value.kind())))
}

fn required<'a>(map: &'a Map, key: &str) -> MetaResult<&'a Value> {
    map.get(key)
        .ok_or_else(|| defect(format!("field {key:?} missing after schema coercion")))
}

fn str_field(map: &Map, key: &str) -> MetaResult<String> {
    let value = required(map, key)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| defect(format!("field {key:?} is {}, not a string", value.kind())))
}

fn bool_field(map: &Map, key: &str) -> MetaResult<bool> {
    let value = required(map, key)?;
    value
        .as_bool()
        .ok_or_else(|| defect(format!("field {key:?} is {}, not a bool", value.kind())))
}

fn int_field(map: &Map, key: &str) -> MetaResult<i64> {
    let value = required(map, key)?;
    value
        .as_int()
        .ok_or_else(|| defect(format!("field {key:?} is {}, not an int", value.kind())))
}

/// Integer field that may be absent or null.
fn opt_int_field(map: &Map, key: &str) -> MetaResult<Option<i64>> {
    match map.get(key).filter(|v| !v.is_null()) {
        None => Ok(None),
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(other) => Err(defect(format!(
            "field {key:?} is {}, not an int or null",
            other.kind()
        ))),
    }
}

/// List of strings that may be absent.
fn string_list(map: &Map, key: &str) -> MetaResult<Vec<String>> {
    let Some(value) = map.get(key) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_list()
        .ok_or_else(|| defect(format!("field {key:?} is {}, not a list", value.kind())))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                defect(format!("element of {key:?} is {}, not a string", item.kind()))
            })
        })
        .collect()
}

fn build_meta(coerced: &Value) -> MetaResult<Meta> {
    let m = as_map(coerced, "document")?;
    Ok(Meta {
        name: str_field(m, "name")?,
        summary: str_field(m, "summary")?,
        description: str_field(m, "description")?,
        subordinate: bool_field(m, "subordinate")?,
        provides: build_relations(m, RelationRole::Provider)?,
        requires: build_relations(m, RelationRole::Requirer)?,
        peers: build_relations(m, RelationRole::Peer)?,
        format: int_field(m, "format")?,
        old_revision: opt_int_field(m, "revision")?,
        categories: string_list(m, "categories")?,
        tags: string_list(m, "tags")?,
        series: match m.get("series") {
            Some(_) => str_field(m, "series")?,
            None => String::new(),
        },
        storage: build_storage(m)?,
    })
}

fn build_relations(m: &Map, role: RelationRole) -> MetaResult<BTreeMap<String, Relation>> {
    let Some(section) = m.get(role.section()) else {
        return Ok(BTreeMap::new());
    };
    let mut relations = BTreeMap::new();
    for (name, rel) in as_map(section, role.section())? {
        let rel = as_map(rel, "relation")?;
        let scope = str_field(rel, "scope")?
            .parse::<RelationScope>()
            .map_err(defect)?;
        relations.insert(
            name.clone(),
            Relation {
                name: name.clone(),
                role,
                interface: str_field(rel, "interface")?,
                optional: bool_field(rel, "optional")?,
                limit: opt_int_field(rel, "limit")?,
                scope,
            },
        );
    }
    Ok(relations)
}

fn build_storage(m: &Map) -> MetaResult<BTreeMap<String, Storage>> {
    let Some(section) = m.get("storage") else {
        return Ok(BTreeMap::new());
    };
    let mut stores = BTreeMap::new();
    for (name, entry) in as_map(section, "storage")? {
        let entry = as_map(entry, "storage entry")?;
        let kind = str_field(entry, "type")?
            .parse::<StorageType>()
            .map_err(defect)?;
        let (count_min, count_max) = resolve_count(entry)?;
        // An empty location means no location.
        let location = match entry.get("location") {
            Some(_) => Some(str_field(entry, "location")?).filter(|l| !l.is_empty()),
            None => None,
        };
        stores.insert(
            name.clone(),
            Storage {
                name: name.clone(),
                kind,
                shared: bool_field(entry, "shared")?,
                read_only: bool_field(entry, "read-only")?,
                persistent: bool_field(entry, "persistent")?,
                count_min,
                count_max,
                location,
                filesystem: build_filesystems(entry)?,
            },
        );
    }
    Ok(stores)
}

/// Turn the coerced `{min, max}` count into a concrete range.
///
/// An unresolved minimum comes from the bare-integer form (or an absent
/// count, which behaves as `1`): it becomes the maximum when the entry is
/// `required`, otherwise zero.
fn resolve_count(entry: &Map) -> MetaResult<(i64, CountMax)> {
    let is_required = bool_field(entry, "required")?;
    let (min, max) = match entry.get("count") {
        Some(count) => {
            let count = as_map(count, "count")?;
            (opt_int_field(count, COUNT_MIN)?, opt_int_field(count, COUNT_MAX)?)
        }
        None => (None, Some(1)),
    };
    let count_max = max.map_or(CountMax::Unbounded, CountMax::Bounded);
    let count_min = match (min, max) {
        (Some(min), _) => min,
        (None, Some(max)) if is_required => max,
        (None, Some(_)) => 0,
        (None, None) => {
            return Err(defect(
                "count has neither a minimum nor a maximum".to_string(),
            ))
        }
    };
    Ok((count_min, count_max))
}

fn build_filesystems(entry: &Map) -> MetaResult<Vec<Filesystem>> {
    let Some(value) = entry.get("filesystem") else {
        return Ok(Vec::new());
    };
    let items = value
        .as_list()
        .ok_or_else(|| defect(format!("filesystem is {}, not a list", value.kind())))?;
    items
        .iter()
        .map(|item| match item {
            Value::String(kind) => Ok(Filesystem::new(kind.clone())),
            Value::Map(fs) => Ok(Filesystem {
                kind: str_field(fs, "type")?,
                mkfs_options: string_list(fs, "mkfs-options")?,
                mount_options: string_list(fs, "options")?,
            }),
            other => Err(defect(format!(
                "filesystem entry is {}, not a string or map",
                other.kind()
            ))),
        })
        .collect()
}
