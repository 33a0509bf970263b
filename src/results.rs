//! Driver output: forward-only result sets of textual rows, and exec summaries.

mod exec;
mod result_set;
mod row;

pub use exec::ExecResult;
pub use result_set::ResultSet;
pub use row::RawRow;
