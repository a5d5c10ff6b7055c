use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::types::SqlValue;

/// Assignment compatibility between a cell value and a field type.
///
/// Returns `None` when the value's storage class cannot be assigned to `Self`.
/// Conversions are limited to what `SQLite` storage makes unavoidable (booleans
/// stored as 0/1, whole reals stored as integers, timestamps and JSON stored
/// as text); there is no general coercion between numbers and text.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> Option<Self>;
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value.as_int()
    }
}

macro_rules! impl_from_sql_value_narrow_int {
    ($($ty:ty),*) => {
        $(
            impl FromSqlValue for $ty {
                fn from_sql_value(value: &SqlValue) -> Option<Self> {
                    value.as_int().and_then(|i| <$ty>::try_from(i).ok())
                }
            }
        )*
    };
}

impl_from_sql_value_narrow_int!(i32, i16, u32, u16, u64);

// NUMERIC affinity stores whole-valued reals as INTEGER
impl FromSqlValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value
            .as_float()
            .or_else(|| value.as_int().map(|i| i as f64))
    }
}

impl FromSqlValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        f64::from_sql_value(value).map(|f| f as f32)
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value.as_blob().map(<[u8]>::to_vec)
    }
}

impl FromSqlValue for NaiveDateTime {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        value.as_timestamp()
    }
}

impl FromSqlValue for JsonValue {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Json(json) => Some(json.clone()),
            SqlValue::Text(text) => serde_json::from_str(text).ok(),
            _ => None,
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_sql_value(value).map(Some)
    }
}
