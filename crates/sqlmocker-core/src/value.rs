//! Semantic types and the values carried by records and fixtures

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Text layout used for timestamps in literals and captured cells
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Semantic type of a record field
///
/// Only the first four kinds have a SQL mapping. `Unsupported` keeps the
/// declared type name so synthesis can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    Integer,
    Text,
    Decimal,
    Timestamp,
    Unsupported(String),
}

impl SemanticType {
    /// Whether this type has a DDL and literal mapping
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Decimal => "decimal",
            Self::Timestamp => "timestamp",
            Self::Unsupported(name) => name,
        }
    }
}

impl From<String> for SemanticType {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "integer" | "int" | "int64" => Self::Integer,
            "text" | "string" => Self::Text,
            "decimal" | "float" | "float64" => Self::Decimal,
            "timestamp" | "datetime" => Self::Timestamp,
            _ => Self::Unsupported(name),
        }
    }
}

impl From<SemanticType> for String {
    fn from(ty: SemanticType) -> Self {
        ty.name().to_string()
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete value of one of the four semantic kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Decimal(f64),
    Timestamp(DateTime<FixedOffset>),
}

impl Value {
    /// Semantic type of this value
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Integer(_) => SemanticType::Integer,
            Self::Text(_) => SemanticType::Text,
            Self::Decimal(_) => SemanticType::Decimal,
            Self::Timestamp(_) => SemanticType::Timestamp,
        }
    }

    /// Build a timestamp value from any timezone
    pub fn timestamp<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self::Timestamp(at.fixed_offset())
    }

    /// Timestamp normalized to UTC
    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(at) => Some(at.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Convert a JSON value into a value of the given semantic type
    ///
    /// Timestamps accept RFC 3339 or `YYYY-MM-DD HH:MM:SS` (read as UTC).
    pub fn from_json(ty: &SemanticType, json: &serde_json::Value) -> Result<Self, String> {
        use serde_json::Value as Json;

        match (ty, json) {
            (SemanticType::Integer, Json::Number(n)) => n
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| format!("'{}' is not an integer", n)),
            (SemanticType::Decimal, Json::Number(n)) => n
                .as_f64()
                .map(Self::Decimal)
                .ok_or_else(|| format!("'{}' is not a decimal", n)),
            (SemanticType::Text, Json::String(s)) => Ok(Self::Text(s.clone())),
            (SemanticType::Timestamp, Json::String(s)) => parse_timestamp(s).map(Self::Timestamp),
            (ty, other) => Err(format!("cannot read {} as {}", other, ty)),
        }
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at);
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        .map_err(|e| format!("invalid timestamp '{}': {}", text, e))
}

/// Cell text as a store would hand it back, not a SQL literal
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Timestamp(at) => write!(f, "{}", at.with_timezone(&Utc).format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(at: DateTime<Tz>) -> Self {
        Self::timestamp(at)
    }
}
