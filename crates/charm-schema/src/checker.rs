//! # Checker Combinators
//!
//! A [`Checker`] validates one node of a [`Value`] tree and returns a
//! coerced copy of it. Checkers compose: [`list`], [`string_map`] and
//! [`field_map`] descend into containers, [`one_of`] tries alternatives,
//! and the scalar checkers ([`string`], [`bool`], [`int`], [`constant`])
//! accept exactly one kind with no conversion between kinds.
//!
//! All checkers are `Send + Sync` and hold no interior mutability, so a
//! schema built once can be shared by any number of concurrent decodes.

use std::collections::BTreeMap;

use crate::error::{Path, SchemaError, SchemaResult};
use crate::value::{Map, Value};

/// Validates and coerces a document node.
pub trait Checker: Send + Sync {
    /// Check `value` found at `path`, returning the coerced value.
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value>;

    /// Human-readable description of the accepted shape.
    fn expected(&self) -> String;

    /// Box the checker for storage inside a combinator.
    fn boxed(self) -> Box<dyn Checker>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl Checker for Box<dyn Checker> {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        (**self).coerce(value, path)
    }

    fn expected(&self) -> String {
        (**self).expected()
    }
}

fn mismatch(path: &Path, expected: String, got: &Value) -> SchemaError {
    SchemaError::Mismatch {
        path: path.clone(),
        expected,
        got: got.describe(),
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Accepts any value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

pub fn any() -> Any {
    Any
}

impl Checker for Any {
    fn coerce(&self, value: &Value, _path: &Path) -> SchemaResult<Value> {
        Ok(value.clone())
    }

    fn expected(&self) -> String {
        "any value".to_string()
    }
}

/// Accepts string scalars.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringChecker;

pub fn string() -> StringChecker {
    StringChecker
}

impl Checker for StringChecker {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(mismatch(path, self.expected(), other)),
        }
    }

    fn expected(&self) -> String {
        "string".to_string()
    }
}

/// Accepts boolean scalars.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolChecker;

pub fn bool() -> BoolChecker {
    BoolChecker
}

impl Checker for BoolChecker {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        match value {
            Value::Bool(_) => Ok(value.clone()),
            other => Err(mismatch(path, self.expected(), other)),
        }
    }

    fn expected(&self) -> String {
        "bool".to_string()
    }
}

/// Accepts integer scalars. A numeric string is not an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntChecker;

pub fn int() -> IntChecker {
    IntChecker
}

impl Checker for IntChecker {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        match value {
            Value::Int(_) => Ok(value.clone()),
            other => Err(mismatch(path, self.expected(), other)),
        }
    }

    fn expected(&self) -> String {
        "int".to_string()
    }
}

/// Accepts exactly one value.
#[derive(Debug, Clone)]
pub struct Const(Value);

pub fn constant(value: impl Into<Value>) -> Const {
    Const(value.into())
}

impl Checker for Const {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        if *value == self.0 {
            Ok(value.clone())
        } else {
            Err(mismatch(path, self.expected(), value))
        }
    }

    fn expected(&self) -> String {
        self.0.to_string()
    }
}

// ---------------------------------------------------------------------------
// Alternatives
// ---------------------------------------------------------------------------

/// Tries each checker in order and returns the first success.
pub struct OneOf(Vec<Box<dyn Checker>>);

/// Build a checker that accepts whatever the first matching alternative
/// accepts. When every alternative fails, the last failure is returned,
/// so list the most specific shape last if its error is the most useful.
pub fn one_of(checkers: Vec<Box<dyn Checker>>) -> OneOf {
    OneOf(checkers)
}

impl Checker for OneOf {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        let mut last = None;
        for checker in &self.0 {
            match checker.coerce(value, path) {
                Ok(v) => return Ok(v),
                Err(e) => last = Some(e),
            }
        }
        Err(last.unwrap_or_else(|| mismatch(path, self.expected(), value)))
    }

    fn expected(&self) -> String {
        if self.0.is_empty() {
            return "nothing".to_string();
        }
        self.0
            .iter()
            .map(|c| c.expected())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// Accepts a list whose every element passes the element checker.
pub struct List(Box<dyn Checker>);

pub fn list(element: impl Checker + 'static) -> List {
    List(Box::new(element))
}

impl Checker for List {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        let Value::List(items) = value else {
            return Err(mismatch(path, self.expected(), value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.0.coerce(item, &path.index(i)))
            .collect::<SchemaResult<Vec<_>>>()
            .map(Value::List)
    }

    fn expected(&self) -> String {
        "list".to_string()
    }
}

/// Accepts a map whose every value passes the value checker. Keys are
/// arbitrary strings.
pub struct StringMap(Box<dyn Checker>);

pub fn string_map(values: impl Checker + 'static) -> StringMap {
    StringMap(Box::new(values))
}

impl Checker for StringMap {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        let Value::Map(map) = value else {
            return Err(mismatch(path, self.expected(), value));
        };
        let mut out = Map::new();
        for (key, item) in map {
            out.insert(key.clone(), self.0.coerce(item, &path.key(key))?);
        }
        Ok(Value::Map(out))
    }

    fn expected(&self) -> String {
        "map".to_string()
    }
}

/// What a [`FieldMap`] does when the input omits a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    /// Leave the field out of the output.
    Omit,
    /// Insert this value.
    Value(Value),
}

impl FieldDefault {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

/// Accepts a map with a fixed set of declared keys.
///
/// Declared fields present in the input are checked; absent fields take
/// their default (or are left out for [`FieldDefault::Omit`]); absent
/// fields without a default are an error, and so are undeclared keys.
pub struct FieldMap {
    fields: BTreeMap<String, Box<dyn Checker>>,
    defaults: BTreeMap<String, FieldDefault>,
}

pub fn field_map(
    fields: Vec<(&str, Box<dyn Checker>)>,
    defaults: Vec<(&str, FieldDefault)>,
) -> FieldMap {
    FieldMap {
        fields: fields
            .into_iter()
            .map(|(k, c)| (k.to_string(), c))
            .collect(),
        defaults: defaults
            .into_iter()
            .map(|(k, d)| (k.to_string(), d))
            .collect(),
    }
}

impl Checker for FieldMap {
    fn coerce(&self, value: &Value, path: &Path) -> SchemaResult<Value> {
        let Value::Map(input) = value else {
            return Err(mismatch(path, self.expected(), value));
        };

        let mut out = Map::new();
        for (name, checker) in &self.fields {
            let field_path = path.key(name);
            match input.get(name) {
                Some(item) => {
                    out.insert(name.clone(), checker.coerce(item, &field_path)?);
                }
                None => match self.defaults.get(name) {
                    Some(FieldDefault::Omit) => {}
                    Some(FieldDefault::Value(default)) => {
                        out.insert(name.clone(), default.clone());
                    }
                    None => {
                        return Err(SchemaError::Missing {
                            path: field_path,
                            expected: checker.expected(),
                        })
                    }
                },
            }
        }

        if let Some(unknown) = input.keys().find(|k| !self.fields.contains_key(*k)) {
            return Err(SchemaError::UnknownField {
                path: path.clone(),
                field: unknown.clone(),
            });
        }

        Ok(Value::Map(out))
    }

    fn expected(&self) -> String {
        "map".to_string()
    }
}
