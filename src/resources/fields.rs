use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;

/// Typed access to the object a client sent under a resource key
/// (`{"menu": {...}}`), with the presence and numeric checks every input
/// shares.
pub struct Fields<'a> {
    resource: &'static str,
    object: &'a Map<String, JsonValue>,
}

impl<'a> Fields<'a> {
    pub fn from_body(body: &'a JsonValue, resource: &'static str) -> Result<Self, AppError> {
        match body.get(resource) {
            Some(JsonValue::Object(object)) => Ok(Self { resource, object }),
            Some(_) => Err(AppError::validation(format!(
                "`{resource}` must be an object"
            ))),
            None => Err(AppError::validation(format!(
                "request body must contain `{resource}`"
            ))),
        }
    }

    /// A present, non-empty string.
    pub fn text(&self, name: &str) -> Result<String, AppError> {
        match self.object.get(name) {
            Some(JsonValue::String(value)) if !value.is_empty() => Ok(value.clone()),
            _ => Err(self.invalid(name, "a non-empty string")),
        }
    }

    /// A finite, non-zero number, given either as a JSON number or as a
    /// numeric string.
    pub fn number(&self, name: &str) -> Result<f64, AppError> {
        let value = match self.object.get(name) {
            Some(JsonValue::Number(number)) => number.as_f64(),
            Some(JsonValue::String(text)) => parse_number(text),
            _ => None,
        };
        value
            .filter(|value| value.is_finite() && *value != 0.0)
            .ok_or_else(|| self.invalid(name, "a non-zero finite number"))
    }

    /// Like [`Fields::number`], but the value must also be integral.
    pub fn integer(&self, name: &str) -> Result<i64, AppError> {
        let value = self.number(name)?;
        if value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
            return Err(self.invalid(name, "a non-zero integer"));
        }
        Ok(value as i64)
    }

    /// A boolean, also accepting 0 and 1. Absent or null yields `default`.
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, AppError> {
        match self.object.get(name) {
            None | Some(JsonValue::Null) => Ok(default),
            Some(JsonValue::Bool(value)) => Ok(*value),
            Some(JsonValue::Number(number)) => match number.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(self.invalid(name, "a boolean")),
            },
            Some(_) => Err(self.invalid(name, "a boolean")),
        }
    }

    fn invalid(&self, name: &str, expected: &str) -> AppError {
        AppError::validation(format!("{}.{name} must be {expected}", self.resource))
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}
