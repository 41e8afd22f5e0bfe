//! Record identifiers.

use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Opaque identifier assigned by the API.
///
/// The backend may emit numeric or string identifiers. The received JSON
/// representation is preserved so that cached records serialize back
/// unchanged, but identity is the textual form: `Number(7)` and
/// `Text("7")` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier, e.g. a serial primary key.
    Number(u64),
    /// Any other identifier, e.g. a UUID.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => fmt::Display::fmt(value, f),
            Self::Text(value) => f.pad(value),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for RecordId {}

// Must agree with `eq`, so both variants hash their textual form.
impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(value) => value.to_string().hash(state),
            Self::Text(value) => value.hash(state),
        }
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Ok(value
            .parse::<u64>()
            .map_or_else(|_| Self::Text(value.to_string()), Self::Number))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}
