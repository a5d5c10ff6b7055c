use chrono::NaiveDateTime;
use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use serde_json::Value as JsonValue;

/// Timestamp layout written for bound timestamps and accepted when reading them back.
pub(crate) const TIMESTAMP_FORMAT: &str = "%F %T%.f";

/// Values bound as statement parameters and read back out of result rows.
///
/// The same enum serves both directions so a value read from one query can be
/// passed straight into the next:
/// ```rust
/// use sql_template::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value, stored by `SQLite` as 0/1
    Bool(bool),
    /// Timestamp value, stored as text
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value, stored as text
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl SqlValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the storage class, used in mapping diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Int(_) => "INTEGER",
            SqlValue::Float(_) => "REAL",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Bool(_) => "BOOLEAN",
            SqlValue::Timestamp(_) => "TIMESTAMP",
            SqlValue::Null => "NULL",
            SqlValue::Json(_) => "JSON",
            SqlValue::Blob(_) => "BLOB",
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let SqlValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(1) => Some(true),
            SqlValue::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Covers both "YYYY-MM-DD HH:MM:SS" and fractional seconds
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// JSON rendering used by views and the command-line front end.
    ///
    /// Blobs become arrays of byte values; timestamps use the bind format.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            SqlValue::Int(i) => JsonValue::from(*i),
            SqlValue::Float(f) => JsonValue::from(*f),
            SqlValue::Text(s) => JsonValue::String(s.clone()),
            SqlValue::Bool(b) => JsonValue::Bool(*b),
            SqlValue::Timestamp(dt) => JsonValue::String(dt.format(TIMESTAMP_FORMAT).to_string()),
            SqlValue::Null => JsonValue::Null,
            SqlValue::Json(v) => v.clone(),
            SqlValue::Blob(bytes) => JsonValue::from(bytes.clone()),
        }
    }

    /// Copy a driver value out of the row. `None` if TEXT is not valid UTF-8.
    pub(crate) fn from_value_ref(value: ValueRef<'_>) -> Option<Self> {
        let value = match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Int(i),
            ValueRef::Real(f) => SqlValue::Float(f),
            ValueRef::Text(bytes) => SqlValue::Text(std::str::from_utf8(bytes).ok()?.to_owned()),
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        };
        Some(value)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let output = match self {
            SqlValue::Int(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            SqlValue::Float(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Bool(b) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*b))),
            SqlValue::Timestamp(dt) => {
                ToSqlOutput::Owned(Value::Text(dt.format(TIMESTAMP_FORMAT).to_string()))
            }
            SqlValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            SqlValue::Json(v) => ToSqlOutput::Owned(Value::Text(v.to_string())),
            SqlValue::Blob(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes)),
        };
        Ok(output)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        SqlValue::Float(f64::from(value))
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(value: &[u8]) -> Self {
        SqlValue::Blob(value.to_vec())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<JsonValue> for SqlValue {
    fn from(value: JsonValue) -> Self {
        SqlValue::Json(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}
