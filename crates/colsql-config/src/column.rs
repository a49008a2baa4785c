use crate::ColumnsConfig;
use colsql_core::{
    column::{Column, DependentColumn},
    value::ColumnValue,
};
use std::marker::PhantomData;

///
/// ConfigColumn
///
/// Column descriptor resolved against a [`ColumnsConfig`]. A column with an
/// empty `name` is never used. Required columns ignore `enabled`; optional
/// ones can also be switched off per deployment with `enabled = false`.
///

pub struct ConfigColumn<T> {
    key: &'static str,
    optional: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ConfigColumn<T> {
    #[must_use]
    pub const fn required(key: &'static str) -> Self {
        Self {
            key,
            optional: false,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            optional: true,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

impl<T: ColumnValue> Column<ColumnsConfig> for ConfigColumn<T> {
    type Value = T;

    fn key(&self) -> &'static str {
        self.key
    }

    fn resolve_name(&self, context: &ColumnsConfig) -> String {
        context.resolve_name(self.key)
    }

    fn is_column_used(&self, context: &ColumnsConfig) -> bool {
        let named = !context.resolve_name(self.key).is_empty();

        named && (!self.optional || context.is_enabled(self.key))
    }

    fn use_default_for_null(&self, context: &ColumnsConfig) -> bool {
        context.default_on_null(self.key)
    }
}

///
/// DependentConfigColumn
///
/// [`ConfigColumn`] that can also read its value off a domain object `D`.
///

pub struct DependentConfigColumn<T, D> {
    column: ConfigColumn<T>,
    getter: fn(&D) -> Option<T>,
}

impl<T, D> DependentConfigColumn<T, D> {
    #[must_use]
    pub const fn required(key: &'static str, getter: fn(&D) -> Option<T>) -> Self {
        Self {
            column: ConfigColumn::required(key),
            getter,
        }
    }

    #[must_use]
    pub const fn optional(key: &'static str, getter: fn(&D) -> Option<T>) -> Self {
        Self {
            column: ConfigColumn::optional(key),
            getter,
        }
    }
}

impl<T: ColumnValue, D> Column<ColumnsConfig> for DependentConfigColumn<T, D> {
    type Value = T;

    fn key(&self) -> &'static str {
        Column::key(&self.column)
    }

    fn resolve_name(&self, context: &ColumnsConfig) -> String {
        Column::resolve_name(&self.column, context)
    }

    fn is_column_used(&self, context: &ColumnsConfig) -> bool {
        Column::is_column_used(&self.column, context)
    }

    fn use_default_for_null(&self, context: &ColumnsConfig) -> bool {
        Column::use_default_for_null(&self.column, context)
    }
}

impl<T: ColumnValue, D> DependentColumn<ColumnsConfig, D> for DependentConfigColumn<T, D> {
    fn value_from(&self, dependent: &D) -> Option<T> {
        (self.getter)(dependent)
    }
}
