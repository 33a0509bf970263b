use rusqlite::types::Value;

use crate::error::DriverError;
use crate::types::SqlArg;

/// Convert one argument into a rusqlite `Value`.
///
/// Named text types are refused, like a strict driver would; the pool normalizes them away
/// before they get here. `position` is 1-based and only used for errors.
///
/// # Errors
/// [`DriverError::UnsupportedArgument`] for `NamedText`, [`DriverError::ArgumentOutOfRange`]
/// for unsigned values above `i64::MAX`.
pub fn sql_arg_to_sqlite_value(arg: &SqlArg, position: usize) -> Result<Value, DriverError> {
    match arg {
        SqlArg::Null => Ok(Value::Null),
        SqlArg::Int(v) => Ok(Value::Integer(*v)),
        SqlArg::UInt(v) => i64::try_from(*v)
            .map(Value::Integer)
            .map_err(|_| DriverError::ArgumentOutOfRange {
                position,
                value: *v,
            }),
        SqlArg::Text(s) => Ok(Value::Text(s.clone())),
        SqlArg::NamedText { type_name, .. } => Err(DriverError::UnsupportedArgument {
            position,
            type_name: *type_name,
        }),
    }
}

/// Unified `SQLite` parameter container.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert pool arguments into `SQLite` values.
    ///
    /// # Errors
    /// The first conversion failure, see [`sql_arg_to_sqlite_value`].
    pub fn convert(args: &[SqlArg]) -> Result<Self, DriverError> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| sql_arg_to_sqlite_value(arg, i + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Params)
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }
}
