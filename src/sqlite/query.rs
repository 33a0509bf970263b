use rusqlite::types::{Value, ValueRef};
use rusqlite::{Statement, params_from_iter};

use crate::error::DriverError;
use crate::results::{RawRow, ResultSet};

/// Render one `SQLite` value the way a text-protocol driver would.
///
/// Integers and reals become their decimal text, text and blobs are copied verbatim, NULL is
/// `None`.
#[must_use]
pub fn sqlite_value_to_text(value: ValueRef<'_>) -> Option<Vec<u8>> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string().into_bytes()),
        ValueRef::Real(f) => Some(f.to_string().into_bytes()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
    }
}

/// Run a prepared statement and collect its rows as textual bytes.
///
/// # Errors
/// Any `rusqlite` error raised while binding, stepping or reading columns.
pub fn build_result_set(stmt: &mut Statement<'_>, params: &[Value]) -> Result<ResultSet, DriverError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let col_count = column_names.len();

    let mut rows_iter = stmt.query(params_from_iter(params.iter()))?;
    let mut rows = Vec::new();
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            values.push(sqlite_value_to_text(row.get_ref(i)?));
        }
        rows.push(RawRow::new(values));
    }

    Ok(ResultSet::new(column_names, rows))
}
