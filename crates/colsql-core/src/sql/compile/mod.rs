#[cfg(test)]
mod tests;

use crate::{
    column::AnyColumn,
    predicate::{ComparePredicate, Predicate},
    sql::{TAUTOLOGY, active_name},
    value::Value,
};

///
/// CompiledFilter
///
/// WHERE-clause text with one `?` per entry of `bindings`, in order.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledFilter {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl CompiledFilter {
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

///
/// PredicateCompiler
///
/// Turns a predicate tree into parameterized SQL for one context.
///
/// Columns that are not used in the context, or whose name resolves to the
/// empty string, are neutralized to `1 = 1` in place, so `AND` / `OR` nodes
/// around them stay well formed.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PredicateCompiler {
    no_case_collation: bool,
}

impl PredicateCompiler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            no_case_collation: false,
        }
    }

    /// Append ` COLLATE NOCASE` to case-insensitive comparisons.
    ///
    /// Stores differ in whether text equality is case sensitive by default,
    /// so this is set per deployment and never inferred.
    #[must_use]
    pub const fn with_no_case_collation(mut self, enabled: bool) -> Self {
        self.no_case_collation = enabled;
        self
    }

    #[must_use]
    pub const fn no_case_collation(&self) -> bool {
        self.no_case_collation
    }

    #[must_use]
    pub fn compile<C>(&self, predicate: &Predicate<'_, C>, context: &C) -> CompiledFilter {
        let mut filter = CompiledFilter::default();
        self.emit(predicate, context, &mut filter);

        filter
    }

    fn emit<C>(&self, predicate: &Predicate<'_, C>, context: &C, out: &mut CompiledFilter) {
        match predicate {
            Predicate::AlwaysTrue => out.sql.push_str(TAUTOLOGY),
            Predicate::Compare(cmp) => Self::emit_compare(cmp, context, out),
            Predicate::EqualsIgnoreCase {
                column,
                value,
                negated,
            } => {
                let Some(name) = active_name(*column, context) else {
                    out.sql.push_str(TAUTOLOGY);
                    return;
                };
                let op = if *negated { "<>" } else { "=" };
                out.sql.push_str(&format!("{name} {op} ?"));
                if self.no_case_collation {
                    out.sql.push_str(" COLLATE NOCASE");
                }
                out.bindings.push(Value::Text(value.clone()));
            }
            Predicate::IsNull(column) => Self::emit_null_check(*column, "IS NULL", context, out),
            Predicate::IsNotNull(column) => {
                Self::emit_null_check(*column, "IS NOT NULL", context, out);
            }
            Predicate::And(left, right) => self.emit_combined(left, "AND", right, context, out),
            Predicate::Or(left, right) => self.emit_combined(left, "OR", right, context, out),
        }
    }

    fn emit_compare<C>(cmp: &ComparePredicate<'_, C>, context: &C, out: &mut CompiledFilter) {
        match active_name(cmp.column, context) {
            Some(name) => {
                out.sql.push_str(&format!("{name} {} ?", cmp.op));
                out.bindings.push(cmp.value.clone());
            }
            None => out.sql.push_str(TAUTOLOGY),
        }
    }

    fn emit_null_check<C>(
        column: &dyn AnyColumn<C>,
        check: &str,
        context: &C,
        out: &mut CompiledFilter,
    ) {
        match active_name(column, context) {
            Some(name) => out.sql.push_str(&format!("{name} {check}")),
            None => out.sql.push_str(TAUTOLOGY),
        }
    }

    fn emit_combined<C>(
        &self,
        left: &Predicate<'_, C>,
        op: &str,
        right: &Predicate<'_, C>,
        context: &C,
        out: &mut CompiledFilter,
    ) {
        out.sql.push('(');
        self.emit(left, context, out);
        out.sql.push_str(&format!(") {op} ("));
        self.emit(right, context, out);
        out.sql.push(')');
    }
}
