
use crate::{
    Result,
    column::{AnyColumn, Column},
    driver::{DriverError, RowCursor},
    error::InternalError,
    value::{ColumnType, ColumnValue, Value},
};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// Reads one column, by resolved name, off the cursor's current row.
type DecodeFn = fn(&mut dyn RowCursor, &str) -> std::result::Result<Value, DriverError>;

///
/// ResultDecoder
///
/// Per-type decoding of row values.
///
/// Strategies are picked per [`ColumnType`] on first use and cached. Two
/// threads filling the same slot at once both install the same function
/// pointer, so the race is harmless.
///

#[derive(Debug, Default)]
pub struct ResultDecoder {
    strategies: RwLock<HashMap<ColumnType, DecodeFn>>,
}

impl ResultDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `column` from the current row into an untyped slot.
    pub fn decode<C>(
        &self,
        cursor: &mut dyn RowCursor,
        column: &dyn AnyColumn<C>,
        context: &C,
    ) -> Result<Value> {
        let decode = self.strategy(column.column_type());

        decode(cursor, &column.resolve_name(context)).map_err(InternalError::driver)
    }

    /// Decode `column` from the current row into its native type.
    pub fn decode_typed<C, K>(
        &self,
        cursor: &mut dyn RowCursor,
        column: &K,
        context: &C,
    ) -> Result<Option<K::Value>>
    where
        K: Column<C>,
    {
        let decode = self.strategy(<K::Value as ColumnValue>::TYPE);
        let value = decode(cursor, &Column::resolve_name(column, context))
            .map_err(InternalError::driver)?;

        match value {
            Value::Null => Ok(None),
            value => <K::Value as ColumnValue>::from_value(&value)
                .map(Some)
                .ok_or_else(|| {
                    InternalError::decoder_invariant(format!(
                        "decoded {value} for {} column '{}'",
                        <K::Value as ColumnValue>::TYPE,
                        Column::key(column),
                    ))
                }),
        }
    }

    /// Number of column types with a cached strategy.
    #[must_use]
    pub fn cached_types(&self) -> usize {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn strategy(&self, ty: ColumnType) -> DecodeFn {
        let cached = self
            .strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty)
            .copied();
        if let Some(decode) = cached {
            return decode;
        }

        let decode = strategy_for(ty);
        self.strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ty, decode);
        tracing::trace!(column_type = %ty, "cached decoding strategy");

        decode
    }
}

fn strategy_for(ty: ColumnType) -> DecodeFn {
    match ty {
        ColumnType::Text => |cursor, name| Ok(Value::from_option(cursor.get_text(name)?)),
        ColumnType::Integer => |cursor, name| {
            let value = cursor.get_int(name)?;
            Ok(null_if_stand_in(value, cursor, Value::Integer))
        },
        ColumnType::Long => |cursor, name| {
            let value = cursor.get_long(name)?;
            Ok(null_if_stand_in(value, cursor, Value::Long))
        },
        ColumnType::Boolean => |cursor, name| {
            let value = cursor.get_bool(name)?;
            Ok(null_if_stand_in(value, cursor, Value::Boolean))
        },
        ColumnType::Float => |cursor, name| {
            let value = cursor.get_float(name)?;
            Ok(null_if_stand_in(value, cursor, Value::Float))
        },
        ColumnType::Double => |cursor, name| {
            let value = cursor.get_double(name)?;
            Ok(null_if_stand_in(value, cursor, Value::Double))
        },
    }
}

// A zero-like read is only null when the cursor also signals null.
fn null_if_stand_in<T>(value: T, cursor: &dyn RowCursor, wrap: fn(T) -> Value) -> Value
where
    T: Default + PartialEq,
{
    if value == T::default() && cursor.was_null() {
        Value::Null
    } else {
        wrap(value)
    }
}
