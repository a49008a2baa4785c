//! Per-request value containers.
//!
//! Read paths hand back [`ScalarResult`] and [`RowResult`], which keep "no
//! such row" apart from "row with a null value". Write paths take
//! [`WriteValues`], an ordered column → value map built once per request.

mod row;
mod scalar;
mod write;


pub use row::{RowResult, RowValues};
pub use scalar::ScalarResult;
pub use write::{WriteValues, WriteValuesBuilder};
