//! Configuration source trait and the in-memory map source.
//!
//! A `ConfigSource` answers typed and raw lookups over a flat dot-notation
//! key space and enumerates the keys under a prefix. The engine drives all
//! probing through this trait, so any backing store can be checked, from an
//! in-memory map to a layered runtime snapshot.

use std::collections::BTreeMap;

use crate::schema::TypeTag;
use crate::value::Value;

/// Result of a single source lookup.
///
/// A typed lookup that cannot decode the stored value as the requested type
/// reports `NotFound`, the same as a missing key. The engine distinguishes
/// the two cases by following up with a raw lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A value was produced for the path.
    Found(Value),
    /// No value could be produced for the path.
    NotFound,
}

impl Lookup {
    /// Whether the lookup produced a value.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The produced value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Trait for configuration stores the engine can probe.
///
/// # Example Implementation
///
/// ```ignore
/// impl ConfigSource for SnapshotSource {
///     fn get(&self, expected: &TypeTag, path: &str) -> Lookup {
///         match self.snapshot.decode(expected, path) {
///             Some(value) => Lookup::Found(value),
///             None => Lookup::NotFound,
///         }
///     }
///
///     fn get_raw(&self, path: &str) -> Lookup {
///         self.snapshot.raw(path).map_or(Lookup::NotFound, Lookup::Found)
///     }
///
///     fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
///         self.snapshot.keys().filter(|k| k.starts_with(prefix)).collect()
///     }
/// }
/// ```
pub trait ConfigSource: Send + Sync {
    /// Typed lookup: the value at `path` decoded as `expected`, if this
    /// source can produce one. A store that cannot decode the stored value
    /// as `expected` returns `NotFound`.
    fn get(&self, expected: &TypeTag, path: &str) -> Lookup;

    /// Raw lookup: the stored value at `path` with no decoding.
    fn get_raw(&self, path: &str) -> Lookup;

    /// Every key that starts with `prefix`. Order may be arbitrary; the
    /// engine's verdicts do not depend on it.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// In-memory source over a flat path-to-value map.
///
/// Lookups follow string-backed store conventions: a typed lookup coerces
/// the stored value toward the expected tag (numeric strings parse, `"true"`
/// parses case-insensitively, comma-separated strings split into string
/// elements). Stored arrays are returned as stored, so element checking is
/// left to the caller. Opaque lookups always miss, since a plain map cannot
/// decode application types.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: BTreeMap<String, Value>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_value(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(path, value);
        self
    }

    /// Insert a value at the given path.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(path.into(), value.into());
    }

    /// Build a source by flattening a JSON document into dotted paths.
    ///
    /// Objects recurse (`{"app": {"name": "x"}}` stores `app.name`), scalars
    /// store directly, and arrays of scalars store as array values. JSON
    /// nulls and objects nested inside arrays have no flat-path form and are
    /// skipped.
    pub fn from_json(root: &serde_json::Value) -> Self {
        let mut source = Self::new();
        flatten_json("", root, &mut source.values);
        source
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the source holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for MapSource {
    fn get(&self, expected: &TypeTag, path: &str) -> Lookup {
        match self.values.get(path).and_then(|value| coerce(expected, value)) {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }

    fn get_raw(&self, path: &str) -> Lookup {
        match self.values.get(path) {
            Some(value) => Lookup::Found(value.clone()),
            None => Lookup::NotFound,
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.values
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

/// Decode a stored value toward the expected tag, string-store style.
fn coerce(expected: &TypeTag, value: &Value) -> Option<Value> {
    match expected {
        TypeTag::String => match value {
            Value::Bool(b) => Some(Value::String(b.to_string())),
            Value::Integer(i) => Some(Value::String(i.to_string())),
            Value::Float(f) => Some(Value::String(f.to_string())),
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Array(_) => None,
        },
        TypeTag::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
            _ => None,
        },
        TypeTag::Numeric => match value {
            Value::Integer(i) => Some(Value::Integer(*i)),
            Value::Float(f) => Some(Value::Float(*f)),
            Value::String(s) => {
                if let Ok(i) = s.trim().parse::<i64>() {
                    Some(Value::Integer(i))
                } else if let Ok(f) = s.trim().parse::<f64>() {
                    Some(Value::Float(f))
                } else {
                    None
                }
            }
            _ => None,
        },
        // Element checking belongs to the caller; stored arrays pass through
        // unchanged, and comma-separated strings split into string elements.
        TypeTag::Sequence(_) => match value {
            Value::Array(items) => Some(Value::Array(items.clone())),
            Value::String(s) if s.is_empty() => Some(Value::Array(Vec::new())),
            Value::String(s) => Some(Value::Array(
                s.split(',')
                    .map(|part| Value::String(part.trim().to_string()))
                    .collect(),
            )),
            _ => None,
        },
        TypeTag::Opaque => None,
    }
}

fn flatten_json(prefix: &str, node: &serde_json::Value, out: &mut BTreeMap<String, Value>) {
    match node {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(&path, child, out);
            }
        }
        serde_json::Value::Array(items) => {
            if !prefix.is_empty() {
                let elements = items.iter().filter_map(json_scalar).collect();
                out.insert(prefix.to_string(), Value::Array(elements));
            }
        }
        serde_json::Value::Null => {}
        scalar => {
            if !prefix.is_empty() {
                if let Some(value) = json_scalar(scalar) {
                    out.insert(prefix.to_string(), value);
                }
            }
        }
    }
}

fn json_scalar(node: &serde_json::Value) -> Option<Value> {
    match node {
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        serde_json::Value::String(s) => Some(Value::String(s.clone())),
        _ => None,
    }
}
