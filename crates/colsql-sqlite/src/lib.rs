//! SQLite execution service for colsql handlers, on top of `rusqlite`.
//!
//! Rows are read the way JDBC drivers expose them: numeric getters return a
//! zero-like stand-in for a stored null and [`RowCursor::was_null`] reports
//! whether the last read was null.

use colsql_core::{
    driver::{DriverError, PreparedStatement, RowCursor, StatementFactory},
    sql::SqlColumnsHandler,
    value::{ColumnValue, Value},
};
use rusqlite::{
    Connection,
    types::{Null, Value as SqlValue},
};

/// Handler executing through SQLite.
pub type SqliteHandler<C, I> = SqlColumnsHandler<C, I, SqliteConnection>;

/// Build a handler for `table` over an open connection.
pub fn sqlite_handler<C, I: ColumnValue>(
    connection: Connection,
    context: C,
    table_name: impl Into<String>,
    id_column: impl Into<String>,
) -> SqliteHandler<C, I> {
    SqlColumnsHandler::new(
        SqliteConnection::new(connection),
        context,
        table_name,
        id_column,
    )
}

///
/// SqliteConnection
///
/// Statement factory over one owned connection. Every prepared statement is
/// fresh and finalized on drop.
///

#[derive(Debug)]
pub struct SqliteConnection {
    connection: Connection,
}

impl SqliteConnection {
    #[must_use]
    pub const fn new(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn open_in_memory() -> Result<Self, DriverError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    #[must_use]
    pub fn into_inner(self) -> Connection {
        self.connection
    }
}

impl StatementFactory for SqliteConnection {
    type Statement<'a> = SqliteStatement<'a>;

    fn prepare(&self, sql: &str) -> Result<SqliteStatement<'_>, DriverError> {
        let statement = self.connection.prepare(sql)?;
        tracing::trace!(
            parameters = statement.parameter_count(),
            "prepared sqlite statement"
        );

        Ok(SqliteStatement { statement })
    }
}

///
/// SqliteStatement
///

pub struct SqliteStatement<'c> {
    statement: rusqlite::Statement<'c>,
}

impl PreparedStatement for SqliteStatement<'_> {
    type Rows<'s>
        = SqliteRows<'s>
    where
        Self: 's;

    fn bind(&mut self, index: usize, value: &Value) -> Result<(), DriverError> {
        let statement = &mut self.statement;
        match value {
            Value::Null => statement.raw_bind_parameter(index, Null)?,
            Value::Text(v) => statement.raw_bind_parameter(index, v.as_str())?,
            Value::Integer(v) => statement.raw_bind_parameter(index, v)?,
            Value::Long(v) => statement.raw_bind_parameter(index, v)?,
            Value::Boolean(v) => statement.raw_bind_parameter(index, i64::from(*v))?,
            Value::Float(v) => statement.raw_bind_parameter(index, f64::from(*v))?,
            Value::Double(v) => statement.raw_bind_parameter(index, v)?,
        }

        Ok(())
    }

    fn query(&mut self) -> Result<SqliteRows<'_>, DriverError> {
        Ok(SqliteRows {
            rows: self.statement.raw_query(),
            current: Vec::new(),
            last_null: false,
        })
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        let changed = self.statement.raw_execute()?;

        Ok(u64::try_from(changed)?)
    }
}

///
/// SqliteRows
///
/// Cursor over a running query. The current row is copied out on
/// [`advance`](RowCursor::advance) so columns can be read by name in any
/// order; names match case-insensitively, as in SQLite itself.
///

pub struct SqliteRows<'s> {
    rows: rusqlite::Rows<'s>,
    current: Vec<(String, SqlValue)>,
    last_null: bool,
}

impl SqliteRows<'_> {
    fn read(&mut self, column: &str) -> Result<SqlValue, DriverError> {
        let value = self
            .current
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| format!("no such column in result row: {column}"))?;
        self.last_null = matches!(value, SqlValue::Null);

        Ok(value)
    }
}

fn materialize(row: &rusqlite::Row<'_>) -> rusqlite::Result<Vec<(String, SqlValue)>> {
    let statement: &rusqlite::Statement<'_> = row.as_ref();

    (0..statement.column_count())
        .map(|index| {
            let name = statement.column_name(index)?.to_string();
            Ok((name, SqlValue::from(row.get_ref(index)?)))
        })
        .collect()
}

fn unexpected(value: &SqlValue, wanted: &str) -> DriverError {
    format!("cannot read {:?} as {wanted}", value.data_type()).into()
}

impl RowCursor for SqliteRows<'_> {
    fn advance(&mut self) -> Result<bool, DriverError> {
        let next = match self.rows.next()? {
            Some(row) => Some(materialize(row)?),
            None => None,
        };
        self.last_null = false;

        match next {
            Some(row) => {
                self.current = row;
                Ok(true)
            }
            None => {
                self.current.clear();
                Ok(false)
            }
        }
    }

    fn get_text(&mut self, column: &str) -> Result<Option<String>, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v)),
            SqlValue::Integer(v) => Ok(Some(v.to_string())),
            SqlValue::Real(v) => Ok(Some(v.to_string())),
            SqlValue::Blob(v) => match String::from_utf8(v) {
                Ok(text) => Ok(Some(text)),
                Err(err) => Err(format!("blob in column {column} is not valid UTF-8: {err}").into()),
            },
        }
    }

    fn get_int(&mut self, column: &str) -> Result<i32, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(0),
            SqlValue::Integer(v) => Ok(i32::try_from(v)?),
            other => Err(unexpected(&other, "integer")),
        }
    }

    fn get_long(&mut self, column: &str) -> Result<i64, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(0),
            SqlValue::Integer(v) => Ok(v),
            other => Err(unexpected(&other, "long")),
        }
    }

    fn get_bool(&mut self, column: &str) -> Result<bool, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(false),
            SqlValue::Integer(v) => Ok(v != 0),
            other => Err(unexpected(&other, "boolean")),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn get_float(&mut self, column: &str) -> Result<f32, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(0.0),
            SqlValue::Real(v) => Ok(v as f32),
            SqlValue::Integer(v) => Ok(v as f32),
            other => Err(unexpected(&other, "float")),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn get_double(&mut self, column: &str) -> Result<f64, DriverError> {
        match self.read(column)? {
            SqlValue::Null => Ok(0.0),
            SqlValue::Real(v) => Ok(v),
            SqlValue::Integer(v) => Ok(v as f64),
            other => Err(unexpected(&other, "double")),
        }
    }

    fn was_null(&self) -> bool {
        self.last_null
    }
}
