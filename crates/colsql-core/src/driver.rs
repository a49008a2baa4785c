//! Statement execution boundary.
//!
//! The handler never talks to a database directly. It prepares statements
//! through a [`StatementFactory`], binds positional values, and reads rows
//! through a [`RowCursor`]. Statement handles are released on drop, so every
//! exit path of an operation closes its statement.

use crate::value::Value;

/// Error raised by the execution service, passed through untouched.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

///
/// StatementFactory
///

pub trait StatementFactory {
    type Statement<'a>: PreparedStatement
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, DriverError>;
}

impl<F: StatementFactory + ?Sized> StatementFactory for &F {
    type Statement<'a>
        = F::Statement<'a>
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, DriverError> {
        (**self).prepare(sql)
    }
}

///
/// PreparedStatement
///
/// Scoped handle on one SQL statement. Dropping it releases the statement.
///

pub trait PreparedStatement {
    type Rows<'s>: RowCursor
    where
        Self: 's;

    /// Bind `value` to the placeholder at `index` (1-based).
    fn bind(&mut self, index: usize, value: &Value) -> Result<(), DriverError>;

    /// Execute as a query and return a cursor positioned before the first row.
    fn query(&mut self) -> Result<Self::Rows<'_>, DriverError>;

    /// Execute as a write and return the affected row count.
    fn execute_update(&mut self) -> Result<u64, DriverError>;
}

///
/// RowCursor
///
/// Forward-only view over a result set. Numeric and boolean getters return
/// the store's zero-like stand-in for a stored null; [`was_null`] tells the
/// two apart for the most recent read.
///
/// [`was_null`]: RowCursor::was_null
///

pub trait RowCursor {
    /// Move to the next row; `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool, DriverError>;

    fn get_text(&mut self, column: &str) -> Result<Option<String>, DriverError>;
    fn get_int(&mut self, column: &str) -> Result<i32, DriverError>;
    fn get_long(&mut self, column: &str) -> Result<i64, DriverError>;
    fn get_bool(&mut self, column: &str) -> Result<bool, DriverError>;
    fn get_float(&mut self, column: &str) -> Result<f32, DriverError>;
    fn get_double(&mut self, column: &str) -> Result<f64, DriverError>;

    /// Whether the last value read was a stored null.
    fn was_null(&self) -> bool;
}
