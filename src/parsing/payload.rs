//! Decoding of OEIS search responses.
//!
//! The search endpoint has answered in several shapes over time:
//!
//! | Shape | Example |
//! |-------|---------|
//! | bare list | `[{"number": 45, ...}, ...]` |
//! | wrapper | `{"count": 1, "results": [...]}` |
//! | single record | `{"number": 45, "data": "0,1,1,..."}` |
//! | nothing | `null` |
//!
//! Each shape gets its own [`SearchPayload`] variant.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::core::hit::UNKNOWN_A_NUMBER;

/// Key under which wrapped responses hold their records
pub const RESULTS_KEY: &str = "results";

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Invalid search record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("Unexpected search payload: expected a list or an object, got {0}")]
    UnexpectedShape(&'static str),
}

/// One sequence entry from a search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRecord {
    /// Numeric catalog number, e.g. `45` for A000045
    #[serde(default, deserialize_with = "lenient_text")]
    pub number: Option<String>,

    /// Textual identifier, used when `number` is missing
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub offset: Option<String>,

    /// Comma-separated terms
    #[serde(default, deserialize_with = "lenient_text")]
    pub data: Option<String>,
}

impl SearchRecord {
    /// Canonical A-number for this record.
    ///
    /// Prefers the numeric `number` field (zero-padded to 6 digits), then the
    /// textual `id`, then the unknown-id sentinel.
    #[must_use]
    pub fn a_number(&self) -> String {
        if let Some(number) = self.number.as_deref().map(str::trim) {
            if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
                let digits = number.trim_start_matches('0');
                return format!("A{digits:0>6}");
            }
        }

        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => UNKNOWN_A_NUMBER.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().map_or("", str::trim)
    }

    #[must_use]
    pub fn offset(&self) -> &str {
        self.offset.as_deref().map_or("", str::trim)
    }

    #[must_use]
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }
}

/// A search response, normalized by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPayload {
    /// `null`, or a wrapper whose result list is `null`
    Empty,
    /// A bare JSON array of records
    List(Vec<SearchRecord>),
    /// An object holding the records under [`RESULTS_KEY`]
    Wrapped(Vec<SearchRecord>),
    /// A single record object
    Single(SearchRecord),
}

impl SearchPayload {
    /// Decode a parsed JSON value
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::UnexpectedShape` for scalar payloads and
    /// `PayloadError::InvalidRecord` if a record is not an object.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Null => Ok(Self::Empty),
            Value::Array(items) => Ok(Self::List(decode_records(items)?)),
            Value::Object(mut map) if map.contains_key(RESULTS_KEY) => {
                match map.remove(RESULTS_KEY).unwrap_or(Value::Null) {
                    Value::Null => Ok(Self::Empty),
                    Value::Array(items) => Ok(Self::Wrapped(decode_records(items)?)),
                    _ => Err(PayloadError::UnexpectedShape("non-list results")),
                }
            }
            Value::Object(map) => Ok(Self::Single(serde_json::from_value(Value::Object(map))?)),
            Value::Bool(_) => Err(PayloadError::UnexpectedShape("a boolean")),
            Value::Number(_) => Err(PayloadError::UnexpectedShape("a number")),
            Value::String(_) => Err(PayloadError::UnexpectedShape("a string")),
        }
    }

    /// Parse and decode raw JSON text
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidRecord` if the text is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// All records in response order
    #[must_use]
    pub fn records(&self) -> &[SearchRecord] {
        match self {
            Self::Empty => &[],
            Self::List(records) | Self::Wrapped(records) => records,
            Self::Single(record) => std::slice::from_ref(record),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

fn decode_records(items: Vec<Value>) -> Result<Vec<SearchRecord>, PayloadError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(PayloadError::from))
        .collect()
}

/// Accept a string or a number (and treat `null` as absent)
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
