/// Implement [`Record`](crate::mapping::Record) for a struct by listing its mapped fields.
///
/// Each field is matched to the column of the same name; `field => "Column"` maps a field to a
/// differently named column. Field types must implement
/// [`ColumnField`](crate::mapping::ColumnField).
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// #[derive(Default)]
/// struct Order {
///     id: i64,
///     customer: String,
///     qty: u16,
/// }
///
/// impl_record!(Order { id, customer => "CustomerName", qty });
/// assert_eq!(Order::COLUMNS, ["id", "CustomerName", "qty"]);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($record:ident { $($field:ident $(=> $column:literal)?),* $(,)? }) => {
        impl $crate::mapping::Record for $record {
            const COLUMNS: &'static [&'static str] =
                &[$($crate::__record_column!($field $(, $column)?)),*];

            fn set_column(
                &mut self,
                column: &str,
                raw: &[u8],
            ) -> ::std::result::Result<(), $crate::mapping::FieldError> {
                $(
                    if column == $crate::__record_column!($field $(, $column)?) {
                        return $crate::mapping::assign_column(&mut self.$field, raw);
                    }
                )*
                let _ = raw;
                ::std::result::Result::Err($crate::mapping::FieldError::UnknownColumn)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_column {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $column:literal) => {
        $column
    };
}

/// Declare a named text type.
///
/// The type wraps a `String`, converts into [`SqlArg::NamedText`](crate::SqlArg) (which
/// [`normalize_args`](crate::normalize_args) turns back into plain text before the driver sees
/// it) and can be used as a text field in records.
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// sql_text_type!(
///     /// A login handle.
///     pub struct Handle
/// );
///
/// let arg = SqlArg::from(Handle::from("@dora"));
/// assert_eq!(arg, SqlArg::NamedText { type_name: "Handle", value: "@dora".into() });
/// ```
#[macro_export]
macro_rules! sql_text_type {
    ($(#[$meta:meta])* $vis:vis struct $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(pub ::std::string::String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_owned())
            }
        }

        impl ::std::convert::From<::std::string::String> for $name {
            fn from(value: ::std::string::String) -> Self {
                $name(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::convert::From<$name> for $crate::SqlArg {
            fn from(value: $name) -> Self {
                $crate::SqlArg::NamedText {
                    type_name: stringify!($name),
                    value: value.0,
                }
            }
        }

        impl ::std::convert::From<&$name> for $crate::SqlArg {
            fn from(value: &$name) -> Self {
                $crate::SqlArg::NamedText {
                    type_name: stringify!($name),
                    value: value.0.clone(),
                }
            }
        }

        impl $crate::mapping::ColumnField for $name {
            const KIND: $crate::mapping::FieldKind = $crate::mapping::FieldKind::Text;

            fn from_column(
                raw: &[u8],
            ) -> ::std::result::Result<Self, $crate::mapping::FieldError> {
                <::std::string::String as $crate::mapping::ColumnField>::from_column(raw).map($name)
            }
        }
    };
}
