//! Rectangular cell ranges (`A1:B5`).

use std::fmt;

use super::cell_ref::{CellRef, parse_address};
use super::error::{FormulaError, Result};

/// An inclusive rectangle of cells. Corners are normalised on construction,
/// so `B2:A1` and `A1:B2` describe the same range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(a: CellRef, b: CellRef) -> CellRange {
        CellRange {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// Number of cells covered by the range.
    pub fn len(&self) -> usize {
        (self.end.row - self.start.row + 1) * (self.end.col - self.start.col + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells in the range, row by row, left to right.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.start.row..=self.end.row)
            .flat_map(move |row| (self.start.col..=self.end.col).map(move |col| CellRef::new(col, row)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parse a range like `"A1:B5"`.
pub fn parse_range(range: &str) -> Result<CellRange> {
    let Some((start, end)) = range.split_once(':') else {
        return Err(FormulaError::InvalidRange(range.to_string()));
    };
    let start = parse_address(start.trim())?;
    let end = parse_address(end.trim())?;
    Ok(CellRange::new(start, end))
}

/// Enumerate every address between two corners, inclusive, in row-major order.
pub fn enumerate_range(start: &str, end: &str) -> Result<Vec<CellRef>> {
    let range = CellRange::new(parse_address(start)?, parse_address(end)?);
    Ok(range.cells().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_enumerate_row_major() {
        let cells = enumerate_range("A1", "B2").unwrap();
        let names: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_enumerate_is_symmetric() {
        let forward: HashSet<CellRef> = enumerate_range("A1", "B2").unwrap().into_iter().collect();
        let backward: HashSet<CellRef> = enumerate_range("B2", "A1").unwrap().into_iter().collect();
        assert_eq!(forward, backward);

        let mixed: HashSet<CellRef> = enumerate_range("B1", "A2").unwrap().into_iter().collect();
        assert_eq!(forward, mixed);
    }

    #[test]
    fn test_single_cell_range() {
        assert_eq!(enumerate_range("C3", "C3").unwrap(), vec![CellRef::new(2, 2)]);
    }

    #[test]
    fn test_whole_grid_range() {
        let range = parse_range("A1:O30").unwrap();
        assert_eq!(range.len(), 450);
        assert_eq!(range.cells().count(), 450);
    }

    #[test]
    fn test_parse_range_rejects_bad_input() {
        assert!(parse_range("A1").is_err());
        assert!(parse_range("A1:Z1").is_err());
        assert!(parse_range("invalid").is_err());
    }
}
