//! Cell reference parsing and formatting.
//!
//! Converts between canonical addresses (`"A1"` .. `"O30"`) and zero-indexed
//! column/row coordinates. The grid is fixed at 15 columns (A-O) by 30 rows.
//!
//! # Examples
//!
//! ```
//! use ledgergrid_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::FormulaError;

/// Number of addressable columns (A through O).
pub const MAX_COLS: usize = 15;
/// Number of addressable rows (1 through 30).
pub const MAX_ROWS: usize = 30;

/// Pattern fragment matching one canonical address, without anchors.
pub(crate) const ADDRESS_PATTERN: &str = r"[A-O](?:30|[12][0-9]|[1-9])";

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a canonical address such as `"C7"`.
    /// Returns None for anything outside `[A-O][1-30]`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        let caps = address_re().captures(name)?;
        let col = (caps["col"].as_bytes()[0] - b'A') as usize;
        let row = caps["row"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Convert a column index to its letter (0 -> A, 14 -> O).
    pub fn col_to_letter(col: usize) -> char {
        (b'A' + (col % 26) as u8) as char
    }
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<col>[A-O])(?<row>30|[12][0-9]|[1-9])$")
            .expect("address regex must compile")
    })
}

/// Parse an address, reporting the offending text on failure.
pub fn parse_address(text: &str) -> Result<CellRef, FormulaError> {
    CellRef::from_str(text).ok_or_else(|| FormulaError::InvalidReference(text.to_string()))
}

impl std::str::FromStr for CellRef {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letter(self.col), self.row + 1)
    }
}
