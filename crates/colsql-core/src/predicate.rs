use crate::{
    column::{AnyColumn, Column},
    value::{ColumnValue, Value},
};
use derive_more::Display;
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Predicate AST
///
/// Closed boolean-expression tree over the columns of one context type `C`.
/// The tree is pure data: activity checks, name resolution and SQL emission
/// all happen in the compiler against a concrete context.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<>")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
}

///
/// ComparePredicate
///

pub struct ComparePredicate<'a, C> {
    pub column: &'a dyn AnyColumn<C>,
    pub op: CompareOp,
    pub value: Value,
}

impl<C> Clone for ComparePredicate<'_, C> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            op: self.op,
            value: self.value.clone(),
        }
    }
}

impl<C> fmt::Debug for ComparePredicate<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparePredicate")
            .field("column", &self.column)
            .field("op", &self.op)
            .field("value", &self.value)
            .finish()
    }
}

///
/// Predicate
///

pub enum Predicate<'a, C> {
    AlwaysTrue,
    Compare(ComparePredicate<'a, C>),
    /// Case-insensitive text equality. Whether the store needs an explicit
    /// collation for this is a per-deployment compiler setting.
    EqualsIgnoreCase {
        column: &'a dyn AnyColumn<C>,
        value: String,
        negated: bool,
    },
    IsNull(&'a dyn AnyColumn<C>),
    IsNotNull(&'a dyn AnyColumn<C>),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
}

impl<'a, C> Predicate<'a, C> {
    #[must_use]
    pub const fn always_true() -> Self {
        Self::AlwaysTrue
    }

    fn compare<K>(column: &'a K, op: CompareOp, value: K::Value) -> Self
    where
        K: Column<C>,
    {
        Self::Compare(ComparePredicate {
            column,
            op,
            value: value.to_value(),
        })
    }

    #[must_use]
    pub fn eq<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte<K: Column<C>>(column: &'a K, value: K::Value) -> Self {
        Self::compare(column, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn eq_ignore_case<K>(column: &'a K, value: impl Into<String>) -> Self
    where
        K: Column<C, Value = String>,
    {
        Self::EqualsIgnoreCase {
            column,
            value: value.into(),
            negated: false,
        }
    }

    #[must_use]
    pub fn ne_ignore_case<K>(column: &'a K, value: impl Into<String>) -> Self
    where
        K: Column<C, Value = String>,
    {
        Self::EqualsIgnoreCase {
            column,
            value: value.into(),
            negated: true,
        }
    }

    #[must_use]
    pub fn is_null<K: Column<C>>(column: &'a K) -> Self {
        Self::IsNull(column)
    }

    #[must_use]
    pub fn is_not_null<K: Column<C>>(column: &'a K) -> Self {
        Self::IsNotNull(column)
    }

    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }
}

impl<C> Clone for Predicate<'_, C> {
    fn clone(&self) -> Self {
        match self {
            Self::AlwaysTrue => Self::AlwaysTrue,
            Self::Compare(cmp) => Self::Compare(cmp.clone()),
            Self::EqualsIgnoreCase {
                column,
                value,
                negated,
            } => Self::EqualsIgnoreCase {
                column: *column,
                value: value.clone(),
                negated: *negated,
            },
            Self::IsNull(column) => Self::IsNull(*column),
            Self::IsNotNull(column) => Self::IsNotNull(*column),
            Self::And(left, right) => Self::And(left.clone(), right.clone()),
            Self::Or(left, right) => Self::Or(left.clone(), right.clone()),
        }
    }
}

impl<C> fmt::Debug for Predicate<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysTrue => f.write_str("AlwaysTrue"),
            Self::Compare(cmp) => cmp.fmt(f),
            Self::EqualsIgnoreCase {
                column,
                value,
                negated,
            } => f
                .debug_struct("EqualsIgnoreCase")
                .field("column", column)
                .field("value", value)
                .field("negated", negated)
                .finish(),
            Self::IsNull(column) => f.debug_tuple("IsNull").field(column).finish(),
            Self::IsNotNull(column) => f.debug_tuple("IsNotNull").field(column).finish(),
            Self::And(left, right) => f.debug_tuple("And").field(left).field(right).finish(),
            Self::Or(left, right) => f.debug_tuple("Or").field(left).field(right).finish(),
        }
    }
}

impl<C> BitAnd for Predicate<'_, C> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(self, rhs)
    }
}

impl<'a, C> BitAnd for &Predicate<'a, C> {
    type Output = Predicate<'a, C>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::and(self.clone(), rhs.clone())
    }
}

impl<C> BitOr for Predicate<'_, C> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(self, rhs)
    }
}

impl<'a, C> BitOr for &Predicate<'a, C> {
    type Output = Predicate<'a, C>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::or(self.clone(), rhs.clone())
    }
}
