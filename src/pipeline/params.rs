use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Prefix that turns a field name into a named SQL parameter (`title` -> `$title`).
pub const NAMED_PREFIX: char = '$';

/// A scalar bound to a named parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Param> for sea_orm::Value {
    fn from(param: Param) -> Self {
        match param {
            Param::Null => None::<String>.into(),
            Param::Bool(value) => value.into(),
            Param::Int(value) => value.into(),
            Param::Real(value) => value.into(),
            Param::Text(value) => value.into(),
        }
    }
}

pub type Params = BTreeMap<String, Param>;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot seed parameters from a non-object value")]
    NotAnObject,
    #[error("field `{0}` is not a scalar")]
    NotScalar(String),
    #[error("failed to serialize seed object: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-request accumulator of named values destined for persistence calls.
///
/// Created empty when a request arrives and dropped with it; stages add to it
/// as they go (path identifiers, validated body fields, generated ids).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStore {
    entries: Params,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.get(key)
    }

    /// A single-key mapping, for lookups that only need one bound value.
    /// An unbound key yields an empty mapping.
    pub fn entry(&self, key: &str) -> Params {
        self.entries
            .get_key_value(key)
            .map(|(key, value)| Params::from([(key.clone(), value.clone())]))
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &Params {
        &self.entries
    }

    /// Imports the top-level fields of `object`. With `prefixed`, every key is
    /// stored as a named parameter (`$field`).
    pub fn seed<T: Serialize>(&mut self, object: &T, prefixed: bool) -> Result<(), SeedError> {
        let JsonValue::Object(fields) = serde_json::to_value(object)? else {
            return Err(SeedError::NotAnObject);
        };

        for (key, value) in fields {
            let param = match value {
                JsonValue::Null => Param::Null,
                JsonValue::Bool(value) => Param::Bool(value),
                JsonValue::Number(number) => match number.as_i64() {
                    Some(value) => Param::Int(value),
                    None => Param::Real(number.as_f64().unwrap_or(f64::NAN)),
                },
                JsonValue::String(value) => Param::Text(value),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(SeedError::NotScalar(key));
                }
            };
            let key = if prefixed {
                format!("{NAMED_PREFIX}{key}")
            } else {
                key
            };
            self.entries.insert(key, param);
        }
        Ok(())
    }
}
