use std::fmt;

///
/// ColumnType
///
/// Semantic type of a column: the logical value kind, independent of how the
/// store represents it. Selects the decoding strategy and is the run-time
/// check applied when values enter a container.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ColumnType {
    Text,
    Integer,
    Long,
    Boolean,
    Float,
    Double,
}

impl ColumnType {
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Integer,
        Self::Long,
        Self::Boolean,
        Self::Float,
        Self::Double,
    ];

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }

    /// Whether the store's native "no value" representation of this type
    /// collides with a real value (0, 0.0, false).
    #[must_use]
    pub const fn has_zero_stand_in(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// Value
///
/// Untyped slot holding one column value. Containers and bindings store
/// values in this form; typed access goes through [`ColumnValue`].
///
/// Null → SQL NULL (and the trigger for the store-default policy on writes).
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    Float(f32),
    Double(f64),
}

impl Value {
    /// Semantic type of the held value, `None` for `Null`.
    #[must_use]
    pub const fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(ColumnType::Text),
            Self::Integer(_) => Some(ColumnType::Integer),
            Self::Long(_) => Some(ColumnType::Long),
            Self::Boolean(_) => Some(ColumnType::Boolean),
            Self::Float(_) => Some(ColumnType::Float),
            Self::Double(_) => Some(ColumnType::Double),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value may be stored for a column of type `ty`.
    #[must_use]
    pub fn fits(&self, ty: ColumnType) -> bool {
        self.column_type().is_none_or(|own| own == ty)
    }

    /// Lift an optional typed value into a slot.
    pub fn from_option<T: ColumnValue>(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| v.to_value())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}

///
/// ColumnValue
///
/// Native Rust representation of a semantic type.
///

pub trait ColumnValue: Clone + Sized + 'static {
    const TYPE: ColumnType;

    fn to_value(&self) -> Value;

    /// Recover the native value; `None` for `Null` or a slot of another type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_column_value {
    ($native:ty, $variant:ident, $ty:ident) => {
        impl ColumnValue for $native {
            const TYPE: ColumnType = ColumnType::$ty;

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }

        impl From<$native> for Value {
            fn from(v: $native) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_column_value!(String, Text, Text);
impl_column_value!(i32, Integer, Integer);
impl_column_value!(i64, Long, Long);
impl_column_value!(bool, Boolean, Boolean);
impl_column_value!(f32, Float, Float);
impl_column_value!(f64, Double, Double);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: ColumnValue> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fits_every_type() {
        for ty in ColumnType::ALL {
            assert!(Value::Null.fits(ty), "null should fit {ty}");
        }
    }

    #[test]
    fn values_fit_only_their_own_type() {
        assert!(Value::Long(3).fits(ColumnType::Long));
        assert!(!Value::Long(3).fits(ColumnType::Integer));
        assert!(!Value::Text("3".into()).fits(ColumnType::Long));
        assert!(Value::Boolean(false).fits(ColumnType::Boolean));
    }

    #[test]
    fn native_values_round_trip_through_slots() {
        assert_eq!(i32::from_value(&20_i32.to_value()), Some(20));
        assert_eq!(String::from_value(&Value::from("bob")), Some("bob".into()));
        assert_eq!(bool::from_value(&Value::Null), None);
        assert_eq!(i64::from_value(&Value::Integer(4)), None);
    }

    #[test]
    fn optional_values_become_null_slots() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5_f64)), Value::Double(2.5));
    }

    #[test]
    fn only_text_lacks_a_zero_stand_in() {
        let without_stand_in: Vec<_> = ColumnType::ALL
            .into_iter()
            .filter(|ty| !ty.has_zero_stand_in())
            .collect();

        assert_eq!(without_stand_in, vec![ColumnType::Text]);
    }
}
