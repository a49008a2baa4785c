//! SQL generation and execution: predicate compilation, null-aware row
//! decoding, and the CRUD handler built on both.

use crate::column::AnyColumn;

pub mod compile;
pub mod decode;
pub mod handler;

pub use compile::{CompiledFilter, PredicateCompiler};
pub use decode::ResultDecoder;
pub use handler::{HandlerConfig, SqlColumnsHandler};

/// Neutral fragment emitted wherever a condition must hold trivially.
pub(crate) const TAUTOLOGY: &str = "1 = 1";

/// Selector used when a read path has no active column to name.
pub(crate) const PLACEHOLDER_SELECTOR: &str = "1";

/// Name under which `column` may appear in generated SQL.
///
/// `None` for columns that are not used in `context` and for columns whose
/// name resolves to the empty string; both are treated as absent.
pub(crate) fn active_name<C>(column: &dyn AnyColumn<C>, context: &C) -> Option<String> {
    if !column.is_column_used(context) {
        return None;
    }
    let name = column.resolve_name(context);

    (!name.is_empty()).then_some(name)
}
