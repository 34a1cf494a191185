//! Range functions available in formulas: `SUM`, `AVERAGE`, `COUNT`.
//!
//! Each takes exactly one `<addr>:<addr>` argument. Names are case-sensitive.

use regex::Regex;
use std::sync::OnceLock;

use crate::engine::{CellRange, Grid, cell_value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeFunction {
    Sum,
    Average,
    Count,
}

struct RangeBuiltin {
    sheet_name: &'static str,
    function: RangeFunction,
}

const RANGE_BUILTINS: &[RangeBuiltin] = &[
    RangeBuiltin {
        sheet_name: "SUM",
        function: RangeFunction::Sum,
    },
    RangeBuiltin {
        sheet_name: "AVERAGE",
        function: RangeFunction::Average,
    },
    RangeBuiltin {
        sheet_name: "COUNT",
        function: RangeFunction::Count,
    },
];

/// Regex that matches built-in range calls like `SUM(A1:B5)`.
///
/// Captures:
/// - group 1: function name (e.g. `SUM`)
/// - group 2: start cell ref (e.g. `A1`)
/// - group 3: end cell ref (e.g. `B5`)
pub fn range_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = RANGE_BUILTINS
            .iter()
            .map(|b| b.sheet_name)
            .collect::<Vec<_>>()
            .join("|");
        let addr = crate::engine::ADDRESS_PATTERN;
        Regex::new(&format!(
            r"\b({})\(\s*({})\s*:\s*({})\s*\)",
            names, addr, addr
        ))
        .expect("built-in range regex must compile")
    })
}

impl RangeFunction {
    pub fn from_name(sheet_name: &str) -> Option<RangeFunction> {
        RANGE_BUILTINS
            .iter()
            .find(|b| b.sheet_name == sheet_name)
            .map(|b| b.function)
    }

    /// Reduce a range of the grid to a single number.
    pub fn apply(self, range: &CellRange, grid: &Grid) -> f64 {
        match self {
            RangeFunction::Sum => sum_range(range, grid),
            RangeFunction::Average => {
                // Denominator is the size of the range, not the populated cells.
                let n = range.len();
                if n == 0 {
                    0.0
                } else {
                    sum_range(range, grid) / n as f64
                }
            }
            RangeFunction::Count => range
                .cells()
                .filter(|c| grid.get(c).is_some_and(|cell| !cell.is_blank()))
                .count() as f64,
        }
    }
}

fn sum_range(range: &CellRange, grid: &Grid) -> f64 {
    range.cells().map(|c| cell_value(grid, &c)).sum()
}
