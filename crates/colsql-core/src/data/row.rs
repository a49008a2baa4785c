use crate::{
    Result,
    column::{AnyColumn, Column},
    error::InternalError,
    value::{ColumnValue, Value},
};
use std::collections::BTreeMap;

///
/// RowValues
///
/// Column values of one row, keyed by column key. Every slot is checked
/// against its column's semantic type on the way in.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowValues {
    values: BTreeMap<&'static str, Value>,
}

impl RowValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a typed value (or null) for `column`.
    pub fn put<C, K>(&mut self, column: &K, value: Option<K::Value>)
    where
        K: Column<C>,
    {
        self.values
            .insert(Column::key(column), Value::from_option(value));
    }

    /// Store an untyped slot for `column`, rejecting values of another type.
    pub fn put_value<C>(&mut self, column: &dyn AnyColumn<C>, value: Value) -> Result<()> {
        let expected = column.column_type();
        if !value.fits(expected) {
            return Err(InternalError::type_mismatch(format!(
                "column '{}' expects {expected}, got {value}",
                column.key(),
            )));
        }
        self.values.insert(column.key(), value);

        Ok(())
    }

    /// Typed read. `Ok(None)` is a stored null; an error means the column
    /// was never put.
    pub fn get<C, K>(&self, column: &K) -> Result<Option<K::Value>>
    where
        K: Column<C>,
    {
        let key = Column::key(column);
        match self.get_value(key)? {
            Value::Null => Ok(None),
            value => <K::Value as ColumnValue>::from_value(value).map(Some).ok_or_else(|| {
                InternalError::type_mismatch(format!(
                    "column '{key}' holds {value}, not {}",
                    <K::Value as ColumnValue>::TYPE
                ))
            }),
        }
    }

    /// Untyped read by column key.
    pub fn get_value(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| InternalError::missing_value(key))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

///
/// RowResult
///
/// Outcome of reading several columns of one row.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RowResult {
    #[default]
    Absent,
    Present(RowValues),
}

impl RowResult {
    pub const ABSENT: Self = Self::Absent;

    #[must_use]
    pub const fn row_exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Typed read; every column is missing when the row is absent.
    pub fn get<C, K>(&self, column: &K) -> Result<Option<K::Value>>
    where
        K: Column<C>,
    {
        match self {
            Self::Present(values) => values.get(column),
            Self::Absent => Err(InternalError::missing_value(Column::key(column))),
        }
    }

    #[must_use]
    pub const fn values(&self) -> Option<&RowValues> {
        match self {
            Self::Present(values) => Some(values),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Option<RowValues> {
        match self {
            Self::Present(values) => Some(values),
            Self::Absent => None,
        }
    }
}
