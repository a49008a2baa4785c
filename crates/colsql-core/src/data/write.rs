use crate::{
    Result,
    column::{AnyColumn, AnyDependentColumn, Column},
    error::InternalError,
    value::{ColumnValue, Value},
};
use std::fmt;

///
/// WriteValues
///
/// Immutable, insertion-ordered column → value map for one write.
/// Built through [`WriteValues::with`]; setting the same column twice keeps
/// its first position and the last value.
///

pub struct WriteValues<'a, C> {
    entries: Vec<(&'a dyn AnyColumn<C>, Value)>,
}

impl<'a, C> WriteValues<'a, C> {
    /// Start a builder with its first column.
    #[must_use]
    pub fn with<K>(column: &'a K, value: impl Into<Option<K::Value>>) -> WriteValuesBuilder<'a, C>
    where
        K: Column<C>,
    {
        WriteValuesBuilder {
            values: Self {
                entries: Vec::new(),
            },
        }
        .and(column, value)
    }

    /// Read every column's value off `dependent`.
    #[must_use]
    pub fn from_dependent<D>(dependent: &D, columns: &[&'a dyn AnyDependentColumn<C, D>]) -> Self {
        let mut values = Self {
            entries: Vec::with_capacity(columns.len()),
        };
        for &column in columns {
            values.set(column, column.extract(dependent));
        }

        values
    }

    /// Typed read; an error means the column was never set.
    pub fn get<K>(&self, column: &K) -> Result<Option<K::Value>>
    where
        K: Column<C>,
    {
        let key = Column::key(column);
        let (_, value) = self
            .entries
            .iter()
            .find(|(c, _)| c.key() == key)
            .ok_or_else(|| InternalError::missing_value(key))?;

        match value {
            Value::Null => Ok(None),
            value => <K::Value as ColumnValue>::from_value(value)
                .map(Some)
                .ok_or_else(|| {
                    InternalError::type_mismatch(format!(
                        "column '{key}' holds {value}, not {}",
                        <K::Value as ColumnValue>::TYPE
                    ))
                }),
        }
    }

    /// Columns and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a dyn AnyColumn<C>, &Value)> {
        self.entries.iter().map(|(column, value)| (*column, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, column: &'a dyn AnyColumn<C>, value: Value) {
        let key = column.key();
        match self.entries.iter_mut().find(|(c, _)| c.key() == key) {
            Some(entry) => *entry = (column, value),
            None => self.entries.push((column, value)),
        }
    }
}

impl<C> Clone for WriteValues<'_, C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C> fmt::Debug for WriteValues<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(column, value)| (column.key(), value)))
            .finish()
    }
}

///
/// WriteValuesBuilder
///

pub struct WriteValuesBuilder<'a, C> {
    values: WriteValues<'a, C>,
}

impl<'a, C> WriteValuesBuilder<'a, C> {
    #[must_use]
    pub fn and<K>(mut self, column: &'a K, value: impl Into<Option<K::Value>>) -> Self
    where
        K: Column<C>,
    {
        self.values.set(column, Value::from_option(value.into()));
        self
    }

    #[must_use]
    pub fn build(self) -> WriteValues<'a, C> {
        self.values
    }
}
