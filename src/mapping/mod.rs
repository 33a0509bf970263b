//! Column-name driven mapping of result rows onto records.
//!
//! A record is any `Default` struct implementing [`Record`], normally through
//! [`impl_record!`](crate::impl_record), which generates a table from column name to a typed
//! setter. Columns are matched to fields by exact name: no case folding and no snake/camel
//! conversion. Per column:
//!
//! - NULL leaves the field at its default value;
//! - text fields take the bytes verbatim;
//! - signed and unsigned integer fields parse base-10 text at 64 bits, then narrow;
//! - unsupported field kinds and unknown column names are errors naming the column.

mod field;
mod select;

pub use field::{ColumnField, FieldError, FieldKind, assign_column};

use crate::error::RowPoolError;
use crate::results::RawRow;

/// A struct that rows can be mapped onto.
///
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
///     nickname: Option<String>,
/// }
///
/// impl_record!(Person { id, name, nickname => "nick" });
///
/// assert_eq!(Person::COLUMNS, ["id", "name", "nick"]);
/// let columns = vec!["id".to_string(), "name".to_string(), "nick".to_string()];
/// let row = RawRow::from_text([Some("7"), Some("Carol"), None]);
/// let person: Person = map_row(0, &columns, &row)?;
/// assert_eq!(person, Person { id: 7, name: "Carol".into(), nickname: None });
/// # Ok::<(), RowPoolError>(())
/// ```
pub trait Record: Default + Send {
    /// Column names this record accepts, in field declaration order.
    const COLUMNS: &'static [&'static str];

    /// Store one non-NULL column value.
    ///
    /// # Errors
    /// [`FieldError::UnknownColumn`] when no field is named `column`, or the field's
    /// decoding error.
    fn set_column(&mut self, column: &str, raw: &[u8]) -> Result<(), FieldError>;
}

/// Build a fresh record from one row.
///
/// `row_index` only feeds error messages. Non-NULL columns missing from [`Record::COLUMNS`]
/// are rejected without calling [`Record::set_column`].
///
/// # Errors
/// [`RowPoolError::Conversion`], [`RowPoolError::UnsupportedField`] or
/// [`RowPoolError::UnknownColumn`], each naming the offending column.
pub fn map_row<R: Record>(
    row_index: usize,
    columns: &[String],
    row: &RawRow,
) -> Result<R, RowPoolError> {
    let mut record = R::default();
    for (i, column) in columns.iter().enumerate() {
        let Some(raw) = row.get(i) else {
            continue;
        };
        if !R::COLUMNS.contains(&column.as_str()) {
            return Err(FieldError::UnknownColumn.at(row_index, column));
        }
        record
            .set_column(column, raw)
            .map_err(|err| err.at(row_index, column))?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: u32,
        balance: i64,
        owner: String,
        rating: f64,
    }

    crate::impl_record!(Account {
        id,
        balance,
        owner,
        rating
    });

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn maps_by_exact_name_in_any_order() {
        let row = RawRow::from_text([Some("bob"), Some("-20"), Some("3")]);
        let acct: Account = map_row(0, &columns(&["owner", "balance", "id"]), &row).unwrap();
        assert_eq!(
            acct,
            Account {
                id: 3,
                balance: -20,
                owner: "bob".into(),
                rating: 0.0
            }
        );
    }

    #[test]
    fn null_keeps_default_even_for_unsupported_fields() {
        let row = RawRow::from_text([Some("1"), None, None]);
        let acct: Account = map_row(0, &columns(&["id", "owner", "rating"]), &row).unwrap();
        assert_eq!(acct.id, 1);
        assert_eq!(acct.owner, "");
    }

    #[test]
    fn case_differences_do_not_match() {
        let row = RawRow::from_text([Some("1")]);
        let err = map_row::<Account>(0, &columns(&["ID"]), &row).unwrap_err();
        assert!(matches!(err, RowPoolError::UnknownColumn { ref column } if column == "ID"));
    }

    #[test]
    fn float_field_is_a_conversion_failure() {
        let row = RawRow::from_text([Some("4.5")]);
        let err = map_row::<Account>(0, &columns(&["rating"]), &row).unwrap_err();
        assert!(matches!(
            err,
            RowPoolError::UnsupportedField { ref column, kind: "f64" } if column == "rating"
        ));
    }

    /// Accepts any column in `set_column` but only declares `name`.
    #[derive(Default, Debug)]
    struct Loose {
        seen: Vec<String>,
    }

    impl Record for Loose {
        const COLUMNS: &'static [&'static str] = &["name"];

        fn set_column(&mut self, column: &str, _raw: &[u8]) -> Result<(), FieldError> {
            self.seen.push(column.to_owned());
            Ok(())
        }
    }

    #[test]
    fn declared_columns_gate_assignment() {
        let row = RawRow::from_text([Some("x"), None, Some("y")]);
        let ok: Loose = map_row(0, &columns(&["name", "extra", "name"]), &row).unwrap();
        assert_eq!(ok.seen, ["name", "name"]);

        let err = map_row::<Loose>(2, &columns(&["name", "name", "extra"]), &row).unwrap_err();
        assert!(matches!(err, RowPoolError::UnknownColumn { ref column } if column == "extra"));
    }

    #[test]
    fn macro_columns_follow_field_order_and_renames() {
        assert_eq!(Account::COLUMNS, ["id", "balance", "owner", "rating"]);
    }

    #[test]
    fn malformed_number_reports_row_and_column() {
        let row = RawRow::from_text([Some("ten")]);
        let err = map_row::<Account>(4, &columns(&["balance"]), &row).unwrap_err();
        assert!(matches!(
            err,
            RowPoolError::Conversion { row: 4, ref column, .. } if column == "balance"
        ));
    }
}
