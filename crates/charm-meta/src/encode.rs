//! # Encoder
//!
//! Turns a [`Meta`] back into a document tree. Defaults are left out and
//! relations that only carry their interface collapse to the shorthand
//! string form, so the output is the most compact document that decodes
//! to the same record.

use charm_schema::{Map, Value};

use crate::error::MetaResult;
use crate::meta::{Meta, Relation, RelationScope};
use crate::parser;
use crate::storage::{Filesystem, Storage};

/// Encode a record as a document tree.
pub fn encode_meta(meta: &Meta) -> Value {
    let mut doc = Map::new();
    doc.insert("name".to_string(), Value::from(meta.name.as_str()));
    doc.insert("summary".to_string(), Value::from(meta.summary.as_str()));
    doc.insert("description".to_string(), Value::from(meta.description.as_str()));
    if meta.subordinate {
        doc.insert("subordinate".to_string(), Value::Bool(true));
    }
    if meta.format != 1 {
        doc.insert("format".to_string(), Value::Int(meta.format));
    }
    if let Some(revision) = meta.old_revision {
        doc.insert("revision".to_string(), Value::Int(revision));
    }
    insert_strings(&mut doc, "categories", &meta.categories);
    insert_strings(&mut doc, "tags", &meta.tags);
    if !meta.series.is_empty() {
        doc.insert("series".to_string(), Value::from(meta.series.as_str()));
    }

    for (section, relations) in [
        ("provides", &meta.provides),
        ("requires", &meta.requires),
        ("peers", &meta.peers),
    ] {
        if relations.is_empty() {
            continue;
        }
        let encoded = relations
            .iter()
            .map(|(name, rel)| (name.clone(), encode_relation(rel)))
            .collect();
        doc.insert(section.to_string(), Value::Map(encoded));
    }

    if !meta.storage.is_empty() {
        let encoded = meta
            .storage
            .iter()
            .map(|(name, store)| (name.clone(), encode_storage(store)))
            .collect();
        doc.insert("storage".to_string(), Value::Map(encoded));
    }

    Value::Map(doc)
}

impl Meta {
    /// Render the record as `metadata.yaml` text.
    pub fn to_yaml(&self) -> MetaResult<String> {
        parser::emit_document(&encode_meta(self))
    }
}

fn insert_strings(doc: &mut Map, key: &str, items: &[String]) {
    if !items.is_empty() {
        doc.insert(key.to_string(), strings(items));
    }
}

fn strings(items: &[String]) -> Value {
    Value::List(items.iter().map(|s| Value::from(s.as_str())).collect())
}

fn encode_relation(rel: &Relation) -> Value {
    if rel.is_shorthand() {
        return Value::from(rel.interface.as_str());
    }
    let mut map = Map::new();
    map.insert("interface".to_string(), Value::from(rel.interface.as_str()));
    if rel.limit != rel.role.default_limit() {
        // An unbounded limit on a non-provider has to be spelled `null`.
        map.insert("limit".to_string(), Value::from(rel.limit));
    }
    if rel.optional {
        map.insert("optional".to_string(), Value::Bool(true));
    }
    if rel.scope != RelationScope::Global {
        map.insert("scope".to_string(), Value::from(rel.scope.as_str()));
    }
    Value::Map(map)
}

fn encode_storage(store: &Storage) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(store.kind.as_str()));
    for (key, set) in [
        ("shared", store.shared),
        ("read-only", store.read_only),
        ("persistent", store.persistent),
    ] {
        if set {
            map.insert(key.to_string(), Value::Bool(true));
        }
    }

    match (store.count_min, store.count_max.bound()) {
        (0, Some(max)) => {
            if max != 1 {
                map.insert("count".to_string(), Value::Int(max));
            }
        }
        (min, Some(max)) if min == max => {
            map.insert("required".to_string(), Value::Bool(true));
            if max != 1 {
                map.insert("count".to_string(), Value::Int(max));
            }
        }
        (min, Some(max)) => {
            map.insert("count".to_string(), Value::String(format!("{min}-{max}")));
        }
        (min, None) => {
            map.insert("count".to_string(), Value::String(format!("{min}-")));
        }
    }

    if let Some(location) = &store.location {
        map.insert("location".to_string(), Value::from(location.as_str()));
    }
    if !store.filesystem.is_empty() {
        map.insert(
            "filesystem".to_string(),
            Value::List(store.filesystem.iter().map(encode_filesystem).collect()),
        );
    }
    Value::Map(map)
}

fn encode_filesystem(fs: &Filesystem) -> Value {
    if fs.is_bare() {
        return Value::from(fs.kind.as_str());
    }
    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(fs.kind.as_str()));
    insert_strings(&mut map, "mkfs-options", &fs.mkfs_options);
    insert_strings(&mut map, "options", &fs.mount_options);
    Value::Map(map)
}
