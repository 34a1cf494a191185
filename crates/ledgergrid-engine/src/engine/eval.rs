//! Formula evaluation against a grid.

use log::trace;

use super::Grid;
use super::arith::eval_arithmetic;
use super::error::Result;
use super::preprocess::preprocess_formula;

/// Evaluate a formula (without the leading `=`) against the grid.
///
/// Referenced cells contribute their stored value; no other formula is
/// re-evaluated along the way.
pub fn evaluate_formula(formula: &str, grid: &Grid) -> Result<f64> {
    let expr = preprocess_formula(formula, grid);
    trace!("formula {:?} expanded to {:?}", formula, expr);
    eval_arithmetic(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, CellRef, FormulaError};

    fn grid_with(entries: &[(&str, &str)]) -> Grid {
        let grid = Grid::new();
        for (addr, raw) in entries {
            grid.insert(CellRef::from_str(addr).unwrap(), Cell::from_input(raw));
        }
        grid
    }

    #[test]
    fn test_evaluate_with_synthetic_grid() {
        let grid = grid_with(&[("A1", "5"), ("A2", "3"), ("B1", "2")]);
        assert_eq!(evaluate_formula("SUM(A1:A2)", &grid), Ok(8.0));
        assert_eq!(evaluate_formula("(A1 + A2) / B1", &grid), Ok(4.0));
        assert_eq!(evaluate_formula("A1 - SUM(A1:A2) * B1", &grid), Ok(-11.0));
    }

    #[test]
    fn test_missing_cells_are_zero() {
        let grid = Grid::new();
        assert_eq!(evaluate_formula("J20 + 1", &grid), Ok(1.0));
        assert_eq!(evaluate_formula("AVERAGE(A1:B2)", &grid), Ok(0.0));
    }

    #[test]
    fn test_failures_are_reported() {
        let grid = grid_with(&[("A1", "5")]);
        assert!(evaluate_formula("A1+", &grid).is_err());
        assert!(evaluate_formula("MAX(A1:A2)", &grid).is_err());
        assert_eq!(
            evaluate_formula("A1/(A1-5)", &grid),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn test_reads_stored_value_of_formula_cells() {
        let grid = grid_with(&[("A1", "=100")]);
        // Stored value has not been computed yet, so it still reads as 0.
        assert_eq!(evaluate_formula("A1 + 1", &grid), Ok(1.0));
    }
}
