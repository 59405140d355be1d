//! Ordered front-matter mapping.
//!
//! Front matter is kept as an open mapping so keys the pipeline does not
//! know about survive untouched and reach the templates. Values are a closed
//! set of scalars plus flat lists of scalars:
//!
//! | YAML                 | `MetaValue`          |
//! |----------------------|----------------------|
//! | `~` / empty          | `Null`               |
//! | `true`               | `Bool(true)`         |
//! | `42`                 | `Integer(42)`        |
//! | `1.5`                | `Float(1.5)`         |
//! | `hello`, `2019-09-01`| `Text(..)`           |
//! | `[a, b]`             | `List([Text, Text])` |
//!
//! Nested mappings and lists of lists are rejected.

use super::error::ContentError;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_yaml::Value;

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<MetaValue>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Convert a YAML value, rejecting anything that is not flat.
    fn from_yaml(key: &str, value: Value) -> Result<Self, ContentError> {
        match value {
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Sequence(_) | Value::Mapping(_) => Err(ContentError::malformed(
                        format!("`{key}` contains a nested structure"),
                    )),
                    scalar => Self::scalar_from_yaml(key, scalar),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Mapping(_) => Err(ContentError::malformed(format!(
                "`{key}` is a nested mapping"
            ))),
            scalar => Self::scalar_from_yaml(key, scalar),
        }
    }

    fn scalar_from_yaml(key: &str, value: Value) -> Result<Self, ContentError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(value) => Ok(Self::Bool(value)),
            Value::Number(number) => Ok(match number.as_i64() {
                Some(int) => Self::Integer(int),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(text) => Ok(Self::Text(text)),
            Value::Tagged(_) => Err(ContentError::malformed(format!(
                "`{key}` uses an unsupported YAML tag"
            ))),
            Value::Sequence(_) | Value::Mapping(_) => Err(ContentError::malformed(format!(
                "`{key}` contains a nested structure"
            ))),
        }
    }
}

/// Front-matter keys in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from a parsed YAML document.
    ///
    /// `null` (a block holding only comments) yields an empty mapping.
    pub fn from_yaml(value: Value) -> Result<Self, ContentError> {
        let mapping = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ContentError::malformed(
                    "front matter must be a key-value mapping",
                ));
            }
        };

        let mut metadata = Self::new();
        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(ContentError::malformed("front matter keys must be text"));
            };
            let value = MetaValue::from_yaml(&key, value)?;
            metadata.insert(key, value);
        }
        Ok(metadata)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Insert a value, keeping the original position when the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MetaValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, MetaValue)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
