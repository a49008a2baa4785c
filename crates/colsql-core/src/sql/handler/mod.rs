//! Generic CRUD over one table.
//!
//! Every operation prepares exactly the statements it needs, binds values
//! positionally, and drops the statement before returning. Columns that are
//! not used in the handler's context, or that resolve to an empty name, are
//! skipped everywhere: they are never named in SQL and read back as null.


use crate::{
    Result,
    column::{AnyColumn, AnyDependentColumn, Column},
    data::{RowResult, RowValues, ScalarResult, WriteValues},
    driver::{PreparedStatement, RowCursor, StatementFactory},
    error::InternalError,
    handler::ColumnsHandler,
    predicate::Predicate,
    sql::{PLACEHOLDER_SELECTOR, PredicateCompiler, ResultDecoder, active_name},
    value::{ColumnValue, Value},
};
use std::marker::PhantomData;

/// Alias under which `count` exposes its single result column.
const COUNT_ALIAS: &str = "row_count";

///
/// HandlerConfig
///
/// Everything a [`SqlColumnsHandler`] is built from. The compiler and decoder
/// default to a plain [`PredicateCompiler`] and an empty [`ResultDecoder`].
///

pub struct HandlerConfig<C, F> {
    statements: F,
    context: C,
    table_name: String,
    id_column: String,
    compiler: PredicateCompiler,
    decoder: ResultDecoder,
}

impl<C, F> HandlerConfig<C, F> {
    pub fn new(
        statements: F,
        context: C,
        table_name: impl Into<String>,
        id_column: impl Into<String>,
    ) -> Self {
        Self {
            statements,
            context,
            table_name: table_name.into(),
            id_column: id_column.into(),
            compiler: PredicateCompiler::new(),
            decoder: ResultDecoder::new(),
        }
    }

    #[must_use]
    pub fn with_compiler(mut self, compiler: PredicateCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    #[must_use]
    pub fn with_decoder(mut self, decoder: ResultDecoder) -> Self {
        self.decoder = decoder;
        self
    }
}

///
/// SqlColumnsHandler
///
/// Reads and writes columns of the rows of one table, addressed either by
/// the value of the identifier column `I` or by a [`Predicate`].
///
/// Single-identifier writes report whether a row changed; the identifier
/// column is expected to be unique, so more than one affected row is an
/// invariant violation.
///

pub struct SqlColumnsHandler<C, I, F> {
    statements: F,
    context: C,
    table_name: String,
    id_column: String,
    compiler: PredicateCompiler,
    decoder: ResultDecoder,
    _id: PhantomData<fn(&I)>,
}

impl<C, I, F> SqlColumnsHandler<C, I, F>
where
    I: ColumnValue,
    F: StatementFactory,
{
    pub fn new(
        statements: F,
        context: C,
        table_name: impl Into<String>,
        id_column: impl Into<String>,
    ) -> Self {
        Self::from_config(HandlerConfig::new(
            statements, context, table_name, id_column,
        ))
    }

    pub fn from_config(config: HandlerConfig<C, F>) -> Self {
        Self {
            statements: config.statements,
            context: config.context,
            table_name: config.table_name,
            id_column: config.id_column,
            compiler: config.compiler,
            decoder: config.decoder,
            _id: PhantomData,
        }
    }

    pub const fn context(&self) -> &C {
        &self.context
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub const fn statements(&self) -> &F {
        &self.statements
    }

    pub const fn compiler(&self) -> &PredicateCompiler {
        &self.compiler
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Read one column of the row with identifier `id`.
    ///
    /// An unused or unnamed column still selects `1`, so row existence is reported
    /// faithfully; its value is always `None`.
    pub fn retrieve<K>(&self, id: &I, column: &K) -> Result<ScalarResult<K::Value>>
    where
        K: Column<C>,
    {
        let name = active_name::<C>(column, &self.context);
        let selector = name.as_deref().unwrap_or(PLACEHOLDER_SELECTOR);
        let sql = format!(
            "SELECT {selector} FROM {} WHERE {} = ?",
            self.table_name, self.id_column
        );

        let mut statement = self.prepare(&sql, &[id.to_value()])?;
        let mut rows = statement.query().map_err(InternalError::driver)?;
        if !rows.advance().map_err(InternalError::driver)? {
            return Ok(ScalarResult::ABSENT);
        }
        if name.is_none() {
            return Ok(ScalarResult::Present(None));
        }

        let value = self
            .decoder
            .decode_typed(&mut rows, column, &self.context)?;

        Ok(ScalarResult::Present(value))
    }

    /// Read several columns of the row with identifier `id` in one query.
    pub fn retrieve_columns(&self, id: &I, columns: &[&dyn AnyColumn<C>]) -> Result<RowResult> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.select_list(columns),
            self.table_name,
            self.id_column
        );

        let mut statement = self.prepare(&sql, &[id.to_value()])?;
        let mut rows = statement.query().map_err(InternalError::driver)?;
        if !rows.advance().map_err(InternalError::driver)? {
            return Ok(RowResult::ABSENT);
        }

        Ok(RowResult::Present(self.read_row(&mut rows, columns)?))
    }

    /// Read one column of every row matching `predicate`, in store order.
    ///
    /// For an unused or unnamed column no select runs: the result is one `None` per
    /// matching row, as counted by [`count`](Self::count).
    pub fn retrieve_where<K>(
        &self,
        predicate: &Predicate<'_, C>,
        column: &K,
    ) -> Result<Vec<Option<K::Value>>>
    where
        K: Column<C>,
    {
        let Some(name) = active_name::<C>(column, &self.context) else {
            let matching = self.count(predicate)?;
            let matching = usize::try_from(matching).map_err(|_| {
                InternalError::handler_invariant(format!(
                    "{matching} matching rows do not fit in memory"
                ))
            })?;

            return Ok(vec![None; matching]);
        };

        let filter = self.compiler.compile(predicate, &self.context);
        let sql = format!(
            "SELECT {name} FROM {} WHERE {}",
            self.table_name, filter.sql
        );

        let mut statement = self.prepare(&sql, &filter.bindings)?;
        let mut rows = statement.query().map_err(InternalError::driver)?;
        let mut values = Vec::new();
        while rows.advance().map_err(InternalError::driver)? {
            values.push(
                self.decoder
                    .decode_typed(&mut rows, column, &self.context)?,
            );
        }

        Ok(values)
    }

    /// Read several columns of every row matching `predicate`.
    pub fn retrieve_columns_where(
        &self,
        predicate: &Predicate<'_, C>,
        columns: &[&dyn AnyColumn<C>],
    ) -> Result<Vec<RowValues>> {
        let filter = self.compiler.compile(predicate, &self.context);
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            self.select_list(columns),
            self.table_name,
            filter.sql
        );

        let mut statement = self.prepare(&sql, &filter.bindings)?;
        let mut rows = statement.query().map_err(InternalError::driver)?;
        let mut matching = Vec::new();
        while rows.advance().map_err(InternalError::driver)? {
            matching.push(self.read_row(&mut rows, columns)?);
        }

        Ok(matching)
    }

    /// Count the rows matching `predicate`.
    pub fn count(&self, predicate: &Predicate<'_, C>) -> Result<u64> {
        let filter = self.compiler.compile(predicate, &self.context);
        let sql = format!(
            "SELECT COUNT(1) AS {COUNT_ALIAS} FROM {} WHERE {}",
            self.table_name, filter.sql
        );

        let mut statement = self.prepare(&sql, &filter.bindings)?;
        let mut rows = statement.query().map_err(InternalError::driver)?;
        if !rows.advance().map_err(InternalError::driver)? {
            return Err(InternalError::handler_invariant(format!(
                "could not fetch count for SQL '{sql}'"
            )));
        }
        let count = rows
            .get_long(COUNT_ALIAS)
            .map_err(InternalError::driver)?;

        u64::try_from(count).map_err(|_| {
            InternalError::handler_invariant(format!("store reported a row count of {count}"))
        })
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Write one column of the row with identifier `id`.
    ///
    /// Writing an unused column is a successful no-op. A null value for a
    /// column with the store-default policy writes `DEFAULT`.
    pub fn update<K>(&self, id: &I, column: &K, value: impl Into<Option<K::Value>>) -> Result<bool>
    where
        K: Column<C>,
    {
        if active_name::<C>(column, &self.context).is_none() {
            return Ok(true);
        }

        self.update_values(id, &WriteValues::with(column, value).build())
    }

    /// Write several columns of the row with identifier `id`.
    ///
    /// Returns `false` without touching the store when no used column is
    /// left to write.
    pub fn update_values(&self, id: &I, values: &WriteValues<'_, C>) -> Result<bool> {
        let set = self.write_set(values);
        if set.is_empty() {
            tracing::debug!(table = %self.table_name, "update skipped, no used columns");
            return Ok(false);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table_name,
            set.assignments(),
            self.id_column
        );
        let mut bindings = set.bindings;
        bindings.push(id.to_value());

        self.execute_single(&sql, &bindings)
    }

    /// Write the given columns of the row with identifier `id`, taking each
    /// value from `dependent`.
    pub fn update_from<D>(
        &self,
        id: &I,
        dependent: &D,
        columns: &[&dyn AnyDependentColumn<C, D>],
    ) -> Result<bool> {
        self.update_values(id, &WriteValues::from_dependent(dependent, columns))
    }

    /// Write one column of every row matching `predicate`; returns the
    /// affected row count.
    pub fn update_where<K>(
        &self,
        predicate: &Predicate<'_, C>,
        column: &K,
        value: impl Into<Option<K::Value>>,
    ) -> Result<u64>
    where
        K: Column<C>,
    {
        self.update_values_where(predicate, &WriteValues::with(column, value).build())
    }

    /// Write several columns of every row matching `predicate`; returns the
    /// affected row count.
    pub fn update_values_where(
        &self,
        predicate: &Predicate<'_, C>,
        values: &WriteValues<'_, C>,
    ) -> Result<u64> {
        let set = self.write_set(values);
        if set.is_empty() {
            tracing::debug!(table = %self.table_name, "update skipped, no used columns");
            return Ok(0);
        }

        let filter = self.compiler.compile(predicate, &self.context);
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table_name,
            set.assignments(),
            filter.sql
        );
        let mut bindings = set.bindings;
        bindings.extend(filter.bindings);

        let mut statement = self.prepare(&sql, &bindings)?;

        statement.execute_update().map_err(InternalError::driver)
    }

    /// Insert one row.
    ///
    /// Unlike updates, an insert with no used column left is a configuration
    /// error: every insert has to write something.
    pub fn insert(&self, values: &WriteValues<'_, C>) -> Result<bool> {
        let set = self.write_set(values);
        if set.is_empty() {
            let keys: Vec<_> = values.iter().map(|(column, _)| column.key()).collect();

            return Err(InternalError::handler_config(format!(
                "cannot perform insert when all columns are empty: [{}]",
                keys.join(", ")
            )));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES({})",
            self.table_name,
            set.names.join(", "),
            set.slots.join(", ")
        );

        self.execute_single(&sql, &set.bindings)
    }

    /// Insert one row, taking each column's value from `dependent`.
    pub fn insert_from<D>(&self, dependent: &D, columns: &[&dyn AnyDependentColumn<C, D>]) -> Result<bool> {
        self.insert(&WriteValues::from_dependent(dependent, columns))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn prepare(&self, sql: &str, bindings: &[Value]) -> Result<F::Statement<'_>> {
        tracing::debug!(sql, bindings = bindings.len(), "preparing statement");

        let mut statement = self
            .statements
            .prepare(sql)
            .map_err(InternalError::driver)?;
        for (index, value) in bindings.iter().enumerate() {
            statement
                .bind(index + 1, value)
                .map_err(InternalError::driver)?;
        }

        Ok(statement)
    }

    // Run a write addressed by identifier; it may touch at most one row.
    fn execute_single(&self, sql: &str, bindings: &[Value]) -> Result<bool> {
        let mut statement = self.prepare(sql, bindings)?;

        match statement.execute_update().map_err(InternalError::driver)? {
            0 => Ok(false),
            1 => Ok(true),
            count => Err(InternalError::handler_invariant(format!(
                "found {count} rows updated/inserted by statement, expected only 1"
            ))),
        }
    }

    fn select_list(&self, columns: &[&dyn AnyColumn<C>]) -> String {
        let mut seen = Vec::new();
        let mut names = Vec::new();
        for &column in columns {
            if seen.contains(&column.key()) {
                continue;
            }
            if let Some(name) = active_name(column, &self.context) {
                seen.push(column.key());
                names.push(name);
            }
        }

        if names.is_empty() {
            PLACEHOLDER_SELECTOR.to_string()
        } else {
            names.join(", ")
        }
    }

    fn read_row(&self, cursor: &mut dyn RowCursor, columns: &[&dyn AnyColumn<C>]) -> Result<RowValues> {
        let mut row = RowValues::new();
        for &column in columns {
            let value = if active_name(column, &self.context).is_some() {
                self.decoder.decode(cursor, column, &self.context)?
            } else {
                Value::Null
            };
            row.put_value(column, value)?;
        }

        Ok(row)
    }

    fn write_set(&self, values: &WriteValues<'_, C>) -> WriteSet {
        let mut set = WriteSet::default();
        for (column, value) in values.iter() {
            let Some(name) = active_name(column, &self.context) else {
                continue;
            };

            set.names.push(name);
            if value.is_null() && column.use_default_for_null(&self.context) {
                set.slots.push("DEFAULT");
            } else {
                set.slots.push("?");
                set.bindings.push(value.clone());
            }
        }

        set
    }
}

impl<C, I, F> ColumnsHandler<C, I> for SqlColumnsHandler<C, I, F>
where
    I: ColumnValue,
    F: StatementFactory,
{
    fn retrieve<K>(&self, id: &I, column: &K) -> Result<ScalarResult<K::Value>>
    where
        K: Column<C>,
    {
        Self::retrieve(self, id, column)
    }

    fn retrieve_columns(&self, id: &I, columns: &[&dyn AnyColumn<C>]) -> Result<RowResult> {
        Self::retrieve_columns(self, id, columns)
    }

    fn retrieve_where<K>(
        &self,
        predicate: &Predicate<'_, C>,
        column: &K,
    ) -> Result<Vec<Option<K::Value>>>
    where
        K: Column<C>,
    {
        Self::retrieve_where(self, predicate, column)
    }

    fn retrieve_columns_where(
        &self,
        predicate: &Predicate<'_, C>,
        columns: &[&dyn AnyColumn<C>],
    ) -> Result<Vec<RowValues>> {
        Self::retrieve_columns_where(self, predicate, columns)
    }

    fn count(&self, predicate: &Predicate<'_, C>) -> Result<u64> {
        Self::count(self, predicate)
    }

    fn update<K>(&self, id: &I, column: &K, value: impl Into<Option<K::Value>>) -> Result<bool>
    where
        K: Column<C>,
    {
        Self::update(self, id, column, value)
    }

    fn update_values(&self, id: &I, values: &WriteValues<'_, C>) -> Result<bool> {
        Self::update_values(self, id, values)
    }

    fn update_values_where(
        &self,
        predicate: &Predicate<'_, C>,
        values: &WriteValues<'_, C>,
    ) -> Result<u64> {
        Self::update_values_where(self, predicate, values)
    }

    fn insert(&self, values: &WriteValues<'_, C>) -> Result<bool> {
        Self::insert(self, values)
    }
}

///
/// WriteSet
///
/// Used columns of one write: resolved names, their value slots (`?` or
/// `DEFAULT`) and the values bound to the `?` slots.
///

#[derive(Default)]
struct WriteSet {
    names: Vec<String>,
    slots: Vec<&'static str>,
    bindings: Vec<Value>,
}

impl WriteSet {
    const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn assignments(&self) -> String {
        self.names
            .iter()
            .zip(&self.slots)
            .map(|(name, slot)| format!("{name} = {slot}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
