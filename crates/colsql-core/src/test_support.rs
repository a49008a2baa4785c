//! Shared fixtures for unit tests: a sample context with switchable optional
//! columns, and an in-memory driver that records every statement it runs.

use crate::{
    column::{Column, DependentColumn},
    driver::{DriverError, PreparedStatement, RowCursor, StatementFactory},
    value::{ColumnValue, Value},
};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    marker::PhantomData,
};

///
/// SampleContext
///

#[derive(Clone, Debug, Default)]
pub(crate) struct SampleContext {
    ip_unnamed: bool,
    email_empty: bool,
    is_locked_empty: bool,
    last_login_empty: bool,
    default_for_is_active: bool,
    default_for_last_login: bool,
}

impl SampleContext {
    pub(crate) const fn set_empty_options(
        &mut self,
        email: bool,
        is_locked: bool,
        last_login: bool,
    ) {
        self.email_empty = email;
        self.is_locked_empty = is_locked;
        self.last_login_empty = last_login;
    }

    /// Resolve the required `ip` column to an empty name.
    pub(crate) const fn set_ip_unnamed(&mut self, unnamed: bool) {
        self.ip_unnamed = unnamed;
    }

    pub(crate) const fn set_use_defaults(&mut self, is_active: bool, last_login: bool) {
        self.default_for_is_active = is_active;
        self.default_for_last_login = last_login;
    }

    fn resolve_name(&self, key: &str) -> String {
        let name = match key {
            "id" => "id",
            "name" => "username",
            "ip" if self.ip_unnamed => "",
            "ip" => "ip",
            "email" if self.email_empty => "",
            "email" => "email",
            "is_locked" if self.is_locked_empty => "",
            "is_locked" => "is_locked",
            "is_active" => "is_active",
            "last_login" if self.last_login_empty => "",
            "last_login" => "last_login",
            other => panic!("unknown sample column '{other}'"),
        };

        name.to_string()
    }

    fn use_default_for_null(&self, key: &str) -> bool {
        match key {
            "is_active" => self.default_for_is_active,
            "last_login" => self.default_for_last_login,
            _ => false,
        }
    }
}

///
/// Person
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Person {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) ip: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) is_locked: Option<i32>,
    pub(crate) is_active: Option<i32>,
    pub(crate) last_login: Option<i64>,
}

impl Person {
    pub(crate) fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: Some(format!("{}@example.org", name.to_lowercase())),
            ..Self::default()
        }
    }

    pub(crate) fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(ToString::to_string);
        self
    }

    pub(crate) const fn with_last_login(mut self, last_login: Option<i64>) -> Self {
        self.last_login = last_login;
        self
    }
}

///
/// SampleColumn
///

pub(crate) struct SampleColumn<T> {
    key: &'static str,
    optional: bool,
    getter: fn(&Person) -> Option<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SampleColumn<T> {
    const fn new(key: &'static str, optional: bool, getter: fn(&Person) -> Option<T>) -> Self {
        Self {
            key,
            optional,
            getter,
            _marker: PhantomData,
        }
    }
}

/// Sample column singletons.
pub(crate) mod columns {
    use super::SampleColumn;

    pub(crate) static ID: SampleColumn<i32> = SampleColumn::new("id", false, |p| Some(p.id));
    pub(crate) static NAME: SampleColumn<String> =
        SampleColumn::new("name", false, |p| Some(p.name.clone()));
    pub(crate) static IP: SampleColumn<String> = SampleColumn::new("ip", false, |p| p.ip.clone());
    pub(crate) static EMAIL: SampleColumn<String> =
        SampleColumn::new("email", true, |p| p.email.clone());
    pub(crate) static IS_LOCKED: SampleColumn<i32> =
        SampleColumn::new("is_locked", true, |p| p.is_locked);
    pub(crate) static IS_ACTIVE: SampleColumn<i32> =
        SampleColumn::new("is_active", false, |p| p.is_active);
    pub(crate) static LAST_LOGIN: SampleColumn<i64> =
        SampleColumn::new("last_login", true, |p| p.last_login);
}

impl<T: ColumnValue> Column<SampleContext> for SampleColumn<T> {
    type Value = T;

    fn key(&self) -> &'static str {
        self.key
    }

    fn resolve_name(&self, context: &SampleContext) -> String {
        context.resolve_name(self.key)
    }

    fn is_column_used(&self, context: &SampleContext) -> bool {
        !self.optional || !self.resolve_name(context).is_empty()
    }

    fn use_default_for_null(&self, context: &SampleContext) -> bool {
        context.use_default_for_null(self.key)
    }
}

impl<T: ColumnValue> DependentColumn<SampleContext, Person> for SampleColumn<T> {
    fn value_from(&self, dependent: &Person) -> Option<T> {
        (self.getter)(dependent)
    }
}

///
/// RecordingStatements
///
/// In-memory driver. Responses are queued up front and consumed in order by
/// executed statements; every execution is logged with its bindings.
///

#[derive(Default)]
pub(crate) struct RecordingStatements {
    responses: RefCell<VecDeque<Response>>,
    executed: RefCell<Vec<Executed>>,
    prepared: Cell<usize>,
    released: Cell<usize>,
    fail_on_prepare: Cell<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Executed {
    pub(crate) sql: String,
    pub(crate) bindings: Vec<Value>,
}

enum Response {
    Rows(Vec<HashMap<String, Value>>),
    Updated(u64),
}

impl RecordingStatements {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a query result; each row is a list of `(column name, value)`.
    pub(crate) fn respond_rows(&self, rows: Vec<Vec<(&str, Value)>>) -> &Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect()
            })
            .collect();
        self.responses.borrow_mut().push_back(Response::Rows(rows));
        self
    }

    pub(crate) fn respond_updated(&self, count: u64) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Response::Updated(count));
        self
    }

    pub(crate) fn fail_next_prepare(&self) {
        self.fail_on_prepare.set(true);
    }

    pub(crate) fn executed(&self) -> Vec<Executed> {
        self.executed.borrow().clone()
    }

    pub(crate) fn executed_sql(&self) -> Vec<String> {
        self.executed.borrow().iter().map(|e| e.sql.clone()).collect()
    }

    /// Number of prepared statements not yet dropped.
    pub(crate) fn open_statements(&self) -> usize {
        self.prepared.get() - self.released.get()
    }

    fn record(&self, sql: &str, bindings: &[Option<Value>]) -> Result<(), DriverError> {
        let bindings = bindings
            .iter()
            .enumerate()
            .map(|(i, b)| b.clone().ok_or_else(|| format!("parameter {} not bound", i + 1)))
            .collect::<Result<Vec<_>, _>>()?;
        self.executed.borrow_mut().push(Executed {
            sql: sql.to_string(),
            bindings,
        });

        Ok(())
    }

    fn next_response(&self) -> Result<Response, DriverError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| "no response queued".into())
    }
}

impl StatementFactory for RecordingStatements {
    type Statement<'a> = RecordingStatement<'a>;

    fn prepare(&self, sql: &str) -> Result<RecordingStatement<'_>, DriverError> {
        if self.fail_on_prepare.replace(false) {
            return Err("database is locked".into());
        }
        self.prepared.set(self.prepared.get() + 1);

        Ok(RecordingStatement {
            owner: self,
            sql: sql.to_string(),
            bindings: vec![None; sql.matches('?').count()],
        })
    }
}

pub(crate) struct RecordingStatement<'a> {
    owner: &'a RecordingStatements,
    sql: String,
    bindings: Vec<Option<Value>>,
}

impl PreparedStatement for RecordingStatement<'_> {
    type Rows<'s>
        = RecordedRows
    where
        Self: 's;

    fn bind(&mut self, index: usize, value: &Value) -> Result<(), DriverError> {
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.bindings.get_mut(i))
            .ok_or_else(|| format!("parameter index {index} out of range"))?;
        *slot = Some(value.clone());

        Ok(())
    }

    fn query(&mut self) -> Result<RecordedRows, DriverError> {
        self.owner.record(&self.sql, &self.bindings)?;
        match self.owner.next_response()? {
            Response::Rows(rows) => Ok(RecordedRows::new(rows)),
            Response::Updated(_) => Err("queued response is an update count".into()),
        }
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        self.owner.record(&self.sql, &self.bindings)?;
        match self.owner.next_response()? {
            Response::Updated(count) => Ok(count),
            Response::Rows(_) => Err("queued response is a row set".into()),
        }
    }
}

impl Drop for RecordingStatement<'_> {
    fn drop(&mut self) {
        self.owner.released.set(self.owner.released.get() + 1);
    }
}

///
/// RecordedRows
///
/// Cursor with JDBC-style getters: numeric reads of a stored null yield the
/// zero-like stand-in and set the null signal.
///

pub(crate) struct RecordedRows {
    rows: VecDeque<HashMap<String, Value>>,
    current: Option<HashMap<String, Value>>,
    last_null: bool,
}

impl RecordedRows {
    pub(crate) fn new(rows: Vec<HashMap<String, Value>>) -> Self {
        Self {
            rows: rows.into(),
            current: None,
            last_null: false,
        }
    }

    pub(crate) fn single(row: Vec<(&str, Value)>) -> Self {
        let row = row
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let mut rows = Self::new(vec![row]);
        rows.current = rows.rows.pop_front();
        rows
    }

    fn read(&mut self, column: &str) -> Result<Value, DriverError> {
        let row = self.current.as_ref().ok_or("cursor is not on a row")?;
        let value = row
            .get(column)
            .cloned()
            .ok_or_else(|| format!("no such column: {column}"))?;
        self.last_null = value.is_null();

        Ok(value)
    }
}

impl RowCursor for RecordedRows {
    fn advance(&mut self) -> Result<bool, DriverError> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn get_text(&mut self, column: &str) -> Result<Option<String>, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v)),
            other => Ok(Some(other.to_string())),
        }
    }

    fn get_int(&mut self, column: &str) -> Result<i32, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(0),
            Value::Integer(v) => Ok(v),
            Value::Long(v) => Ok(i32::try_from(v)?),
            other => Err(format!("cannot read {other} as integer").into()),
        }
    }

    fn get_long(&mut self, column: &str) -> Result<i64, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(0),
            Value::Integer(v) => Ok(i64::from(v)),
            Value::Long(v) => Ok(v),
            other => Err(format!("cannot read {other} as long").into()),
        }
    }

    fn get_bool(&mut self, column: &str) -> Result<bool, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(false),
            Value::Boolean(v) => Ok(v),
            Value::Integer(v) => Ok(v != 0),
            other => Err(format!("cannot read {other} as boolean").into()),
        }
    }

    fn get_float(&mut self, column: &str) -> Result<f32, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(0.0),
            Value::Float(v) => Ok(v),
            other => Err(format!("cannot read {other} as float").into()),
        }
    }

    fn get_double(&mut self, column: &str) -> Result<f64, DriverError> {
        match self.read(column)? {
            Value::Null => Ok(0.0),
            Value::Float(v) => Ok(f64::from(v)),
            Value::Double(v) => Ok(v),
            other => Err(format!("cannot read {other} as double").into()),
        }
    }

    fn was_null(&self) -> bool {
        self.last_null
    }
}
