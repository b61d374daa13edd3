// User identity as received at the edge

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque user identifier.
///
/// Carries whatever the caller sent, unvalidated. An absent value is the
/// empty string, so it still produces a queue name (`"user_"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coerce a loosely typed scalar into a user id.
    ///
    /// Strings pass through untouched, numbers become their decimal text
    /// (integral floats drop the `.0`, so `1.0` reads `"1"`), `true` becomes
    /// `"1"`, and `false`/`null` become the empty string.
    /// Arrays and objects have no text form and are rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null | Value::Bool(false) => Ok(Self::default()),
            Value::Bool(true) => Ok(Self::new("1")),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => Ok(Self::new(f.to_string())),
                _ => Ok(Self::new(n.to_string())),
            },
            Value::String(s) => Ok(Self::new(s.as_str())),
            Value::Array(_) => Err(DomainError::UnsupportedUserId("array".to_string())),
            Value::Object(_) => Err(DomainError::UnsupportedUserId("object".to_string())),
        }
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
