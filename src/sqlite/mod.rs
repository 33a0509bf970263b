// SQLite driver - the `Driver` implementation shipped with the crate
//
// - config: options, builder and pool constructors
// - connection: connection handle and the blocking-call bridge
// - params: argument conversion to rusqlite values
// - query: textual result set building
// - executor: the `Driver` impl

pub mod config;
pub mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use executor::SqliteDriver;
pub use query::build_result_set;
