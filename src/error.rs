use thiserror::Error;

use crate::types::ArgList;

/// Failure reported by a [`Driver`](crate::driver::Driver) implementation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The driver refuses a parameter type it does not natively understand.
    /// `position` is 1-based.
    #[error("converting argument #{position}'s type: unsupported type {type_name}, a string")]
    UnsupportedArgument {
        position: usize,
        type_name: &'static str,
    },

    #[error("argument #{position} ({value}) is out of range for this driver")]
    ArgumentOutOfRange { position: usize, value: u64 },

    #[error("driver worker error: {0}")]
    Worker(String),

    /// Escape hatch for drivers whose native error type has no variant here.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum RowPoolError {
    #[error("failed to open connection #{index}: {source}")]
    Open {
        index: usize,
        #[source]
        source: DriverError,
    },

    #[error("connection #{index} failed liveness check: {source}")]
    Ping {
        index: usize,
        #[source]
        source: DriverError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("query failed: {source}. Query: {query} Args: {args}")]
    Query {
        #[source]
        source: DriverError,
        query: String,
        args: ArgList,
    },

    #[error("exec failed: {source}. Query: {query} Args: {args}")]
    Exec {
        #[source]
        source: DriverError,
        query: String,
        args: ArgList,
    },

    #[error("{operation}: {message}")]
    Shape {
        operation: &'static str,
        message: String,
    },

    #[error("select_one: got none. Query: {query} Args: {args}")]
    NoRows { query: String, args: ArgList },

    #[error("select_one: got multiple rows. Query: {query} Args: {args}")]
    MultipleRows { query: String, args: ArgList },

    #[error("query returned too many rows. Query: {query} Args: {args}")]
    TooManyRows { query: String, args: ArgList },

    #[error("expected exactly {expected} column(s), got {actual}. Query: {query}")]
    ColumnCount {
        expected: usize,
        actual: usize,
        query: String,
    },

    #[error("update_one affected {affected} rows. Query: {query:?} Args: {args}")]
    RowsAffected {
        affected: u64,
        query: String,
        args: ArgList,
    },

    #[error("driver did not report a generated identifier. Query: {query} Args: {args}")]
    LastInsertIdUnavailable { query: String, args: ArgList },

    #[error("bad value in row {row}, column {column}: {message}")]
    Conversion {
        row: usize,
        column: String,
        message: String,
    },

    #[error("bad row value for column {column}: field kind {kind} is not supported")]
    UnsupportedField { column: String, kind: &'static str },

    #[error("bad row value for column {column}: no field with that name")]
    UnknownColumn { column: String },
}

impl RowPoolError {
    /// Column name carried by conversion-type errors, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Conversion { column, .. }
            | Self::UnsupportedField { column, .. }
            | Self::UnknownColumn { column } => Some(column),
            _ => None,
        }
    }
}
