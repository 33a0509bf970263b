use crate::error::RowPoolError;

/// How a record field accepts column bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bytes are taken verbatim as UTF-8 text.
    Text,
    /// Bytes are parsed as a base-10 `i64`, then narrowed.
    Signed,
    /// Bytes are parsed as a base-10 `u64`, then narrowed.
    Unsigned,
    /// The field type cannot receive column bytes; assigning a non-NULL value is an error.
    Unsupported(&'static str),
}

/// Failure to store one column value into one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Parse(String),
    Unsupported(&'static str),
    UnknownColumn,
}

impl FieldError {
    /// Attach row and column context.
    pub(crate) fn at(self, row: usize, column: &str) -> RowPoolError {
        match self {
            FieldError::Parse(message) => RowPoolError::Conversion {
                row,
                column: column.to_owned(),
                message,
            },
            FieldError::Unsupported(kind) => RowPoolError::UnsupportedField {
                column: column.to_owned(),
                kind,
            },
            FieldError::UnknownColumn => RowPoolError::UnknownColumn {
                column: column.to_owned(),
            },
        }
    }
}

/// A type a record field may have.
///
/// Implemented for `String`, every integer width, `Option<T>` of those, and for named text
/// types declared with [`sql_text_type!`](crate::sql_text_type). Floats, `bool` and `char`
/// implement it as [`FieldKind::Unsupported`] so records holding them still compile, but any
/// non-NULL column aimed at such a field is rejected at mapping time.
pub trait ColumnField: Sized {
    const KIND: FieldKind;

    /// Decode the textual column bytes into a field value.
    ///
    /// # Errors
    /// [`FieldError::Parse`] for malformed or out-of-range input,
    /// [`FieldError::Unsupported`] for unsupported kinds.
    fn from_column(raw: &[u8]) -> Result<Self, FieldError>;
}

/// Store `raw` into `slot`.
///
/// Unsupported kinds are refused from [`ColumnField::KIND`] before any decoding.
///
/// # Errors
/// [`FieldError::Unsupported`] for unsupported kinds, otherwise the decoding error.
pub fn assign_column<T: ColumnField>(slot: &mut T, raw: &[u8]) -> Result<(), FieldError> {
    if let FieldKind::Unsupported(kind) = T::KIND {
        return Err(FieldError::Unsupported(kind));
    }
    *slot = T::from_column(raw)?;
    Ok(())
}

fn column_text(raw: &[u8]) -> Result<&str, FieldError> {
    std::str::from_utf8(raw).map_err(|e| FieldError::Parse(format!("invalid UTF-8: {e}")))
}

impl ColumnField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_column(raw: &[u8]) -> Result<Self, FieldError> {
        column_text(raw).map(str::to_owned)
    }
}

macro_rules! signed_field {
    ($($t:ty),*) => {
        $(impl ColumnField for $t {
            const KIND: FieldKind = FieldKind::Signed;

            fn from_column(raw: &[u8]) -> Result<Self, FieldError> {
                let text = column_text(raw)?;
                let wide: i64 = text
                    .parse()
                    .map_err(|e| FieldError::Parse(format!("{text:?} is not a signed integer: {e}")))?;
                <$t>::try_from(wide).map_err(|_| {
                    FieldError::Parse(format!("{wide} does not fit in {}", stringify!($t)))
                })
            }
        })*
    };
}

macro_rules! unsigned_field {
    ($($t:ty),*) => {
        $(impl ColumnField for $t {
            const KIND: FieldKind = FieldKind::Unsigned;

            fn from_column(raw: &[u8]) -> Result<Self, FieldError> {
                let text = column_text(raw)?;
                if text.starts_with('+') {
                    return Err(FieldError::Parse(format!(
                        "{text:?} is not an unsigned integer: explicit sign"
                    )));
                }
                let wide: u64 = text
                    .parse()
                    .map_err(|e| FieldError::Parse(format!("{text:?} is not an unsigned integer: {e}")))?;
                <$t>::try_from(wide).map_err(|_| {
                    FieldError::Parse(format!("{wide} does not fit in {}", stringify!($t)))
                })
            }
        })*
    };
}

macro_rules! unsupported_field {
    ($($t:ty),*) => {
        $(impl ColumnField for $t {
            const KIND: FieldKind = FieldKind::Unsupported(stringify!($t));

            fn from_column(_raw: &[u8]) -> Result<Self, FieldError> {
                Err(FieldError::Unsupported(stringify!($t)))
            }
        })*
    };
}

signed_field!(i8, i16, i32, i64, isize);
unsigned_field!(u8, u16, u32, u64, usize);
unsupported_field!(f32, f64, bool, char);

impl<T: ColumnField> ColumnField for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_column(raw: &[u8]) -> Result<Self, FieldError> {
        T::from_column(raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_taken_verbatim() {
        assert_eq!(String::from_column(b" Alice ").unwrap(), " Alice ");
        assert!(matches!(
            String::from_column(&[0xff, 0xfe]),
            Err(FieldError::Parse(_))
        ));
    }

    #[test]
    fn integers_parse_then_narrow() {
        assert_eq!(u8::from_column(b"255").unwrap(), 255);
        assert_eq!(i16::from_column(b"-300").unwrap(), -300);
        assert_eq!(u64::from_column(b"18446744073709551615").unwrap(), u64::MAX);
        assert!(matches!(u8::from_column(b"300"), Err(FieldError::Parse(m)) if m.contains("u8")));
        assert!(matches!(u32::from_column(b"-1"), Err(FieldError::Parse(_))));
        assert!(matches!(i64::from_column(b"12abc"), Err(FieldError::Parse(_))));
        assert!(matches!(u64::from_column(b"+5"), Err(FieldError::Parse(_))));
        assert!(matches!(u8::from_column(b"+5"), Err(FieldError::Parse(_))));
        assert_eq!(i32::from_column(b"+5").unwrap(), 5);
    }

    #[test]
    fn unsupported_kinds_refuse_assignment() {
        assert_eq!(f64::KIND, FieldKind::Unsupported("f64"));
        assert_eq!(f64::from_column(b"1.5"), Err(FieldError::Unsupported("f64")));
        assert!(bool::from_column(b"1").is_err());
    }

    struct Opaque;

    impl ColumnField for Opaque {
        const KIND: FieldKind = FieldKind::Unsupported("Opaque");

        fn from_column(_raw: &[u8]) -> Result<Self, FieldError> {
            Ok(Opaque)
        }
    }

    #[test]
    fn assignment_checks_kind_before_decoding() {
        let mut slot = Opaque;
        assert_eq!(
            assign_column(&mut slot, b"x"),
            Err(FieldError::Unsupported("Opaque"))
        );

        let mut age: Option<u8> = None;
        assign_column(&mut age, b"41").unwrap();
        assert_eq!(age, Some(41));
        assert!(assign_column(&mut age, b"-1").is_err());
        assert_eq!(age, Some(41));
    }

    #[test]
    fn option_wraps_inner_kind() {
        assert_eq!(<Option<u32>>::KIND, FieldKind::Unsigned);
        assert_eq!(<Option<u32>>::from_column(b"4").unwrap(), Some(4));
    }

    #[test]
    fn errors_carry_row_and_column() {
        let err = FieldError::Parse("bad".into()).at(3, "age");
        assert!(matches!(
            err,
            RowPoolError::Conversion { row: 3, ref column, .. } if column == "age"
        ));
        assert_eq!(
            FieldError::Unsupported("f32").at(0, "score").column(),
            Some("score")
        );
    }
}
