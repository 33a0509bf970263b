use std::sync::Arc;

use super::row::RawRow;

/// Rows returned by a query, consumed front to back exactly once.
///
/// Column names are shared by every row and stay available while iterating.
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// let mut rs = ResultSet::new(
///     vec!["id".into(), "name".into()],
///     vec![RawRow::from_text([Some("1"), Some("Alice")])],
/// );
/// assert_eq!(rs.columns(), ["id", "name"]);
/// assert!(rs.next().is_some());
/// assert!(rs.next().is_none());
/// ```
#[derive(Debug)]
pub struct ResultSet {
    columns: Arc<Vec<String>>,
    rows: std::vec::IntoIter<RawRow>,
}

impl ResultSet {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            columns: Arc::new(columns),
            rows: rows.into_iter(),
        }
    }

    /// Column names in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shared handle to the column names.
    #[must_use]
    pub fn column_names(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.columns)
    }

    /// Rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Iterator for ResultSet {
    type Item = RawRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
