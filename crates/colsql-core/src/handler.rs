//! Storage-neutral CRUD contract over typed columns.

use crate::{
    Result,
    column::{AnyColumn, AnyDependentColumn, Column},
    data::{RowResult, RowValues, ScalarResult, WriteValues},
    predicate::Predicate,
};

///
/// ColumnsHandler
///
/// Reads and writes columns of rows addressed by an identifier of type `I`
/// or by a [`Predicate`], with columns resolved against the context `C`.
///
/// Columns that are not used in the context read back as null and are never
/// written. Expected negative outcomes are values: an unknown identifier is
/// `Absent`, a write that touched nothing is `false` or `0`.
///

pub trait ColumnsHandler<C, I> {
    /// Read one column of the row with identifier `id`.
    fn retrieve<K>(&self, id: &I, column: &K) -> Result<ScalarResult<K::Value>>
    where
        K: Column<C>;

    /// Read several columns of the row with identifier `id`.
    fn retrieve_columns(&self, id: &I, columns: &[&dyn AnyColumn<C>]) -> Result<RowResult>;

    /// Read one column of every row matching `predicate`.
    fn retrieve_where<K>(
        &self,
        predicate: &Predicate<'_, C>,
        column: &K,
    ) -> Result<Vec<Option<K::Value>>>
    where
        K: Column<C>;

    /// Read several columns of every row matching `predicate`.
    fn retrieve_columns_where(
        &self,
        predicate: &Predicate<'_, C>,
        columns: &[&dyn AnyColumn<C>],
    ) -> Result<Vec<RowValues>>;

    /// Count the rows matching `predicate`.
    fn count(&self, predicate: &Predicate<'_, C>) -> Result<u64>;

    /// Write one column of the row with identifier `id`.
    fn update<K>(&self, id: &I, column: &K, value: impl Into<Option<K::Value>>) -> Result<bool>
    where
        K: Column<C>;

    /// Write several columns of the row with identifier `id`.
    fn update_values(&self, id: &I, values: &WriteValues<'_, C>) -> Result<bool>;

    /// Write the given columns of the row with identifier `id`, reading each
    /// value off `dependent`.
    fn update_from<D>(
        &self,
        id: &I,
        dependent: &D,
        columns: &[&dyn AnyDependentColumn<C, D>],
    ) -> Result<bool> {
        self.update_values(id, &WriteValues::from_dependent(dependent, columns))
    }

    /// Write one column of every row matching `predicate`.
    fn update_where<K>(
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

    /// Write several columns of every row matching `predicate`.
    fn update_values_where(
        &self,
        predicate: &Predicate<'_, C>,
        values: &WriteValues<'_, C>,
    ) -> Result<u64>;

    /// Insert one row.
    fn insert(&self, values: &WriteValues<'_, C>) -> Result<bool>;

    /// Insert one row, reading each column's value off `dependent`.
    fn insert_from<D>(&self, dependent: &D, columns: &[&dyn AnyDependentColumn<C, D>]) -> Result<bool> {
        self.insert(&WriteValues::from_dependent(dependent, columns))
    }
}
