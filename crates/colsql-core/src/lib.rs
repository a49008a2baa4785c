//! Core of colsql: typed column descriptors, the predicate algebra and its
//! SQL compiler, null-aware result decoding, value containers, and the
//! generic CRUD handler that ties them to a statement execution service.

pub mod column;
pub mod data;
pub mod driver;
pub mod error;
pub mod handler;
pub mod predicate;
pub mod sql;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

use error::InternalError;

/// Result alias for every fallible core operation.
pub type Result<T> = std::result::Result<T, InternalError>;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, drivers or handlers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        column::{AnyColumn, AnyDependentColumn, Column, DependentColumn},
        data::{RowResult, RowValues, ScalarResult, WriteValues},
        predicate::{CompareOp, Predicate},
        value::{ColumnType, ColumnValue, Value},
    };
}
