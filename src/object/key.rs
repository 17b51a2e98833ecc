use std::fmt;

use serde_json::Value;

use crate::error::KeyError;

/// A caller-supplied object key, trimmed of surrounding whitespace.
///
/// No other restrictions apply: keys may contain slashes, dots or any other
/// characters the backing store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Build a key from a raw string, trimming whitespace.
    pub fn new(raw: &str) -> Result<Self, KeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Extract the `key` field from a JSON request body.
    ///
    /// The body must be a JSON object whose `key` is a string. An empty
    /// body is treated the same as a body without the field.
    pub fn from_json_body(body: &[u8]) -> Result<Self, KeyError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(KeyError::Missing);
        }

        let value: Value = serde_json::from_slice(body).map_err(|_| KeyError::MalformedBody)?;

        match value.get("key") {
            None | Some(Value::Null) => Err(KeyError::Missing),
            Some(Value::String(raw)) => Self::new(raw),
            Some(_) => Err(KeyError::NotAString),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
