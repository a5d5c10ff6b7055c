/// Register a struct's fields so rows can be mapped into it.
///
/// The struct must implement `Default`; every listed field is filled from
/// the column with the same name. Fields left out of the list keep their
/// default value.
///
/// ```rust
/// #[derive(Debug, Default)]
/// struct Account {
///     id: i64,
///     email: String,
///     verified: bool,
/// }
///
/// sql_template::target_shape!(Account {
///     id: i64,
///     email: String,
///     verified: bool,
/// });
/// ```
#[macro_export]
macro_rules! target_shape {
    ($shape:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        impl $crate::mapping::TargetShape for $shape {
            fn fields() -> &'static [$crate::mapping::Field<Self>] {
                const FIELDS: &[$crate::mapping::Field<$shape>] = &[
                    $(
                        $crate::mapping::Field::new(
                            stringify!($field),
                            stringify!($ty),
                            |target: &mut $shape, value: &$crate::types::SqlValue| {
                                target.$field =
                                    <$ty as $crate::mapping::FromSqlValue>::from_sql_value(value)?;
                                Some(())
                            },
                        ),
                    )+
                ];
                FIELDS
            }
        }
    };
}
