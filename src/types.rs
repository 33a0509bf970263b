use std::fmt;

/// A positional query argument.
///
/// Arguments are NULL, 64-bit integers or text. Values of other types convert into one of these
/// before they reach a query.
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// let args = vec![SqlArg::from(7_u32), SqlArg::from("alice"), SqlArg::Null];
/// assert_eq!(ArgList::from(args.as_slice()).to_string(), "[7 alice NULL]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    /// SQL NULL
    Null,
    /// Signed integer (64-bit)
    Int(i64),
    /// Unsigned integer (64-bit)
    UInt(u64),
    /// Plain text
    Text(String),
    /// Text carried by a caller-defined named type, before normalization.
    NamedText {
        type_name: &'static str,
        value: String,
    },
}

impl SqlArg {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for SqlArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Text(v) | Self::NamedText { value: v, .. } => f.write_str(v),
        }
    }
}

macro_rules! signed_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for SqlArg {
            fn from(value: $t) -> Self {
                SqlArg::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! unsigned_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for SqlArg {
            fn from(value: $t) -> Self {
                SqlArg::UInt(u64::from(value))
            }
        })*
    };
}

signed_arg!(i8, i16, i32, i64);
unsigned_arg!(u8, u16, u32, u64);

impl From<isize> for SqlArg {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        SqlArg::Int(value as i64)
    }
}

impl From<usize> for SqlArg {
    fn from(value: usize) -> Self {
        SqlArg::UInt(value as u64)
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_owned())
    }
}

impl From<&String> for SqlArg {
    fn from(value: &String) -> Self {
        SqlArg::Text(value.clone())
    }
}

impl<T: Into<SqlArg>> From<Option<T>> for SqlArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlArg::Null, Into::into)
    }
}

/// Owned argument list used for error context; renders as `[a b c]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList(pub Vec<SqlArg>);

impl From<&[SqlArg]> for ArgList {
    fn from(args: &[SqlArg]) -> Self {
        ArgList(args.to_vec())
    }
}

impl fmt::Display for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}
