//! Cell engine API.
//!
//! - [`Cell`], [`CellType`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`], [`CellRange`] - Address and range resolution (A1 notation ↔ col/row)
//! - [`extract_dependencies`] - Cells a formula reads
//! - [`recalc_plan`] - Cycle detection and recompute ordering
//! - [`preprocess_formula`] - Range function expansion and reference substitution
//! - [`evaluate_formula`] - Full formula evaluation
//! - [`format_number`] - Format values for display

mod arith;
mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod preprocess;
mod range;
mod style;

pub use arith::eval_arithmetic;
pub use cell::{Cell, CellIssue, CellType, Grid, cell_value};
pub(crate) use cell_ref::ADDRESS_PATTERN;
pub use cell_ref::{CellRef, MAX_COLS, MAX_ROWS, parse_address};
pub use cycle::{RecalcPlan, recalc_plan};
pub use deps::extract_dependencies;
pub use error::{FormulaError, Result};
pub use eval::evaluate_formula;
pub use format::{format_cell, format_number};
pub use preprocess::{
    expand_range_functions, number_literal, preprocess_formula, substitute_references,
};
pub use range::{CellRange, enumerate_range, parse_range};
pub use style::{Alignment, CellStyle, StyleChange};
