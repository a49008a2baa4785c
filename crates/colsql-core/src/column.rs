use crate::value::{ColumnType, ColumnValue, Value};
use std::fmt;

///
/// Column
///
/// A typed, addressable datum of a row. Name, activity and the null/default
/// policy are resolved against a caller-supplied context `C` on every call, so
/// one set of column descriptors can serve several deployments.
///
/// Identity is the [`key`](Column::key), not the resolved name.
///

pub trait Column<C> {
    type Value: ColumnValue;

    /// Literal identifier of this column, unique within its context type.
    fn key(&self) -> &'static str;

    /// Physical name to use in generated SQL. May be empty.
    fn resolve_name(&self, context: &C) -> String;

    /// Whether the column exists in the target schema. Inactive columns are
    /// never referenced in generated SQL.
    fn is_column_used(&self, context: &C) -> bool;

    /// Whether a null write should use the store's `DEFAULT` keyword instead
    /// of binding null.
    fn use_default_for_null(&self, context: &C) -> bool;
}

///
/// DependentColumn
///
/// Column whose value can be read off an existing domain object `D`.
/// Extraction must be pure.
///

pub trait DependentColumn<C, D>: Column<C> {
    fn value_from(&self, dependent: &D) -> Option<Self::Value>;
}

///
/// AnyColumn
///
/// Object-safe view of a [`Column`] with its value type erased, used for
/// heterogeneous column lists. Implemented for every `Column<C>`.
///

pub trait AnyColumn<C> {
    fn key(&self) -> &'static str;
    fn column_type(&self) -> ColumnType;
    fn resolve_name(&self, context: &C) -> String;
    fn is_column_used(&self, context: &C) -> bool;
    fn use_default_for_null(&self, context: &C) -> bool;
}

impl<C, K> AnyColumn<C> for K
where
    K: Column<C>,
{
    fn key(&self) -> &'static str {
        Column::key(self)
    }

    fn column_type(&self) -> ColumnType {
        K::Value::TYPE
    }

    fn resolve_name(&self, context: &C) -> String {
        Column::resolve_name(self, context)
    }

    fn is_column_used(&self, context: &C) -> bool {
        Column::is_column_used(self, context)
    }

    fn use_default_for_null(&self, context: &C) -> bool {
        Column::use_default_for_null(self, context)
    }
}

impl<C> fmt::Debug for dyn AnyColumn<C> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column[{}: {}]", self.key(), self.column_type())
    }
}

///
/// AnyDependentColumn
///

pub trait AnyDependentColumn<C, D>: AnyColumn<C> {
    fn extract(&self, dependent: &D) -> Value;
}

impl<C, D, K> AnyDependentColumn<C, D> for K
where
    K: DependentColumn<C, D>,
{
    fn extract(&self, dependent: &D) -> Value {
        Value::from_option(self.value_from(dependent))
    }
}
