//! Argument normalization.
//!
//! Drivers tend to reject caller-defined named types even when the underlying value is plain
//! text. Without normalization, binding an `Email` built with [`sql_text_type!`](crate::sql_text_type)
//! against the `SQLite` driver fails with:
//!
//! ```text
//! converting argument #1's type: unsupported type Email, a string
//! ```
//!
//! Every pool operation runs its arguments through [`normalize_args`] before they reach the
//! driver.

use std::borrow::Cow;

use crate::types::SqlArg;

/// Replace every named text value by its plain text form.
///
/// Other values pass through unchanged. The input is never modified; when nothing needs
/// rewriting the slice is returned borrowed.
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// sql_text_type!(pub struct Email);
///
/// let args = [SqlArg::from(Email::from("a@b.io")), SqlArg::Int(1)];
/// let fixed = normalize_args(&args);
/// assert_eq!(fixed[0], SqlArg::Text("a@b.io".into()));
/// assert_eq!(fixed[1], SqlArg::Int(1));
/// ```
#[must_use]
pub fn normalize_args(args: &[SqlArg]) -> Cow<'_, [SqlArg]> {
    if !args
        .iter()
        .any(|arg| matches!(arg, SqlArg::NamedText { .. }))
    {
        return Cow::Borrowed(args);
    }

    Cow::Owned(
        args.iter()
            .map(|arg| match arg {
                SqlArg::NamedText { value, .. } => SqlArg::Text(value.clone()),
                other => other.clone(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_args_are_borrowed() {
        let args = [SqlArg::Int(1), SqlArg::Text("x".into()), SqlArg::Null];
        assert!(matches!(normalize_args(&args), Cow::Borrowed(_)));
    }

    #[test]
    fn named_text_becomes_text_with_same_content() {
        let args = [
            SqlArg::UInt(9),
            SqlArg::NamedText {
                type_name: "Handle",
                value: "@carol".into(),
            },
        ];
        let fixed = normalize_args(&args);
        assert_eq!(
            fixed.as_ref(),
            &[SqlArg::UInt(9), SqlArg::Text("@carol".into())]
        );
        // input untouched
        assert!(matches!(args[1], SqlArg::NamedText { .. }));
    }

    #[test]
    fn empty_args() {
        assert!(normalize_args(&[]).is_empty());
    }
}
