//! YAML document adapter.
//!
//! `serde_yaml` turns raw bytes into its own value tree; this module
//! converts that tree into the checker [`Value`] model and back. The value
//! model has no floats and only string keys, so documents using either
//! are rejected here with the path of the offending node.

use charm_schema::{Map, Path, Value};

use crate::error::{MetaError, MetaResult};

/// Parse a YAML byte stream into a [`Value`].
pub fn parse_document(bytes: &[u8]) -> MetaResult<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    yaml_to_value(yaml, &Path::root())
}

/// Render a [`Value`] as YAML text.
pub fn emit_document(value: &Value) -> MetaResult<String> {
    serde_yaml::to_string(&value_to_yaml(value)).map_err(MetaError::Emit)
}

/// Convert a `serde_yaml::Value` into the checker value model.
///
/// Tags are stripped and the inner value converted.
pub fn yaml_to_value(yaml: serde_yaml::Value, path: &Path) -> MetaResult<Value> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => n.as_i64().map(Value::Int).ok_or_else(|| {
            MetaError::UnsupportedValue {
                path: path.clone(),
                detail: format!("number {n} is not a 64-bit signed integer"),
            }
        }),
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => seq
            .into_iter()
            .enumerate()
            .map(|(i, item)| yaml_to_value(item, &path.index(i)))
            .collect::<MetaResult<Vec<_>>>()
            .map(Value::List),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    other => {
                        return Err(MetaError::UnsupportedValue {
                            path: path.clone(),
                            detail: format!("mapping key {} is not a string", describe_yaml(&other)),
                        })
                    }
                };
                let child = path.key(key.as_str());
                map.insert(key, yaml_to_value(v, &child)?);
            }
            Ok(Value::Map(map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value, path),
    }
}

/// Convert a checker value back into a `serde_yaml::Value`.
pub fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Int(i) => serde_yaml::Value::Number((*i).into()),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::List(items) => serde_yaml::Value::Sequence(items.iter().map(value_to_yaml).collect()),
        Value::Map(map) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (k, v) in map {
                mapping.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(mapping)
        }
    }
}

fn describe_yaml(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => format!("bool({b})"),
        serde_yaml::Value::Number(n) => format!("number({n})"),
        serde_yaml::Value::String(s) => format!("string({s:?})"),
        serde_yaml::Value::Sequence(_) => "list".to_string(),
        serde_yaml::Value::Mapping(_) => "map".to_string(),
        serde_yaml::Value::Tagged(tagged) => describe_yaml(&tagged.value),
    }
}
