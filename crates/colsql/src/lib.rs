//! ## Crate layout
//! - `core`: column descriptors, predicates, value containers, the SQL
//!   compiler, decoder and CRUD handler, and the driver traits.
//! - `config`: TOML-backed column context (feature `config`).
//! - `sqlite`: `rusqlite` implementation of the driver traits (feature
//!   `sqlite`).
//!
//! The `prelude` module carries the vocabulary needed to describe columns
//! and build predicates and write payloads.

#[cfg(feature = "config")]
pub use colsql_config as config;
pub use colsql_core as core;
#[cfg(feature = "sqlite")]
pub use colsql_sqlite as sqlite;

pub use colsql_core::{Result, error::InternalError};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::core::handler::ColumnsHandler;
    pub use crate::core::sql::{HandlerConfig, PredicateCompiler, SqlColumnsHandler};

    #[cfg(feature = "config")]
    pub use crate::config::{ColumnSettings, ColumnsConfig, ConfigColumn, DependentConfigColumn};
    #[cfg(feature = "sqlite")]
    pub use crate::sqlite::{SqliteConnection, SqliteHandler, sqlite_handler};
}
