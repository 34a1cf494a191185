//! Formula preprocessing.
//!
//! Before arithmetic, a formula is rewritten into plain numeric text:
//!
//! - **Range functions**: `SUM(A1:B5)` → the computed total, e.g. `42`
//! - **References**: `A1` → that cell's current value, `0` when absent
//!
//! Range calls are expanded first so their corner addresses are consumed
//! before bare references are substituted.

use regex::Captures;

use super::cell::{Grid, cell_value};
use super::cell_ref::CellRef;
use super::deps::cell_ref_re;
use super::range::CellRange;
use crate::builtins::{RangeFunction, range_fn_re};

/// Render a number so it can be spliced into expression text.
/// Negative values are parenthesised so `2-A1` stays well formed.
pub fn number_literal(n: f64) -> String {
    if n.is_sign_negative() && n != 0.0 {
        format!("({})", n)
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Replace every `SUM`/`AVERAGE`/`COUNT` call with its numeric result.
pub fn expand_range_functions(formula: &str, grid: &Grid) -> String {
    range_fn_re()
        .replace_all(formula, |caps: &Captures| {
            let function = RangeFunction::from_name(&caps[1]);
            let start = CellRef::from_str(&caps[2]);
            let end = CellRef::from_str(&caps[3]);
            match (function, start, end) {
                (Some(function), Some(start), Some(end)) => {
                    number_literal(function.apply(&CellRange::new(start, end), grid))
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace every bare cell address with the value stored for it.
pub fn substitute_references(expr: &str, grid: &Grid) -> String {
    cell_ref_re()
        .replace_all(expr, |caps: &Captures| match CellRef::from_str(&caps[0]) {
            Some(cell_ref) => number_literal(cell_value(grid, &cell_ref)),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Run both rewriting steps, producing text for [`super::eval_arithmetic`].
pub fn preprocess_formula(formula: &str, grid: &Grid) -> String {
    let expanded = expand_range_functions(formula, grid);
    substitute_references(&expanded, grid)
}
