//! Parameter-list normalisation.
//!
//! Every entry point accepts any [`IntoParams`] so callers can pass a slice,
//! an owned vector, a fixed array, or `()` for statements without
//! placeholders. The [`params!`](crate::params!) macro builds the list from
//! loose values.

use std::borrow::Cow;

use crate::types::SqlValue;

/// Anything that can serve as a positional parameter list.
pub trait IntoParams<'a> {
    fn into_params(self) -> Cow<'a, [SqlValue]>;
}

impl<'a> IntoParams<'a> for () {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Borrowed(&[])
    }
}

impl<'a> IntoParams<'a> for &'a [SqlValue] {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Borrowed(self)
    }
}

impl<'a> IntoParams<'a> for &'a Vec<SqlValue> {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<'a, const N: usize> IntoParams<'a> for &'a [SqlValue; N] {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<'a> IntoParams<'a> for Vec<SqlValue> {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Owned(self)
    }
}

impl<'a, const N: usize> IntoParams<'a> for [SqlValue; N] {
    fn into_params(self) -> Cow<'a, [SqlValue]> {
        Cow::Owned(self.into())
    }
}

/// Build a parameter list from loose values, each converted with `SqlValue::from`.
///
/// ```rust
/// use sql_template::prelude::*;
///
/// let params = sql_template::params![1, "a", None::<i64>];
/// assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Text("a".into()), SqlValue::Null]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::types::SqlValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::types::SqlValue::from($value)),+]
    };
}
