/// Outcome of a statement executed through `exec`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// Identifier generated by the statement, when the driver can report one.
    pub last_insert_id: Option<i64>,
}

impl ExecResult {
    #[must_use]
    pub fn new(rows_affected: u64, last_insert_id: Option<i64>) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}
