//! Cell data structures for the grid.
//!
//! - [`CellType`] - What the raw input was classified as (empty, text, number, formula)
//! - [`Cell`] - Raw input, derived value, dependencies, style and diagnostics
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;

use super::cell_ref::CellRef;
use super::deps::extract_dependencies;
use super::error::FormulaError;
use super::style::CellStyle;

/// The classified content of a cell, derived from its raw input.
#[derive(Clone, Debug, PartialEq)]
pub enum CellType {
    Empty,
    Text(String),
    Number(f64),
    /// Formula expression without the leading `=`.
    Formula(String),
}

/// Why a formula cell holds `0` instead of a real result.
#[derive(Clone, Debug, PartialEq)]
pub enum CellIssue {
    /// Expansion or arithmetic failed.
    Formula(FormulaError),
    /// The cell sits on, or reads through, a reference cycle.
    Cycle(Vec<CellRef>),
}

impl std::fmt::Display for CellIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellIssue::Formula(err) => write!(f, "{}", err),
            CellIssue::Cycle(path) => {
                let names: Vec<String> = path.iter().map(|c| c.to_string()).collect();
                write!(f, "Circular reference: {}", names.join(" -> "))
            }
        }
    }
}

/// A cell in the grid.
///
/// `raw_input` is the source of truth. `value` is always derived from it and
/// can be recomputed at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub raw_input: String,
    pub contents: CellType,
    pub depends_on: Vec<CellRef>,
    pub value: f64,
    pub style: CellStyle,
    pub issue: Option<CellIssue>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            raw_input: String::new(),
            contents: CellType::Empty,
            depends_on: vec![],
            value: 0.0,
            style: CellStyle::default(),
            issue: None,
        }
    }

    /// Classify raw user input.
    /// - Empty string or whitespace -> Empty
    /// - First character is '=' -> Formula (without the '='), value pending evaluation
    /// - Finite number, surrounding whitespace allowed -> Number
    /// - Otherwise -> Text, which counts as 0 in arithmetic
    pub fn from_input(input: &str) -> Cell {
        let trimmed = input.trim();
        let (contents, depends_on, value) = if trimmed.is_empty() {
            (CellType::Empty, vec![], 0.0)
        } else if let Some(formula) = input.strip_prefix('=') {
            (
                CellType::Formula(formula.to_string()),
                extract_dependencies(formula),
                0.0,
            )
        } else if let Some(n) = parse_number(trimmed) {
            (CellType::Number(n), vec![], n)
        } else {
            (CellType::Text(trimmed.to_string()), vec![], 0.0)
        };

        Cell {
            raw_input: input.to_string(),
            contents,
            depends_on,
            value,
            style: CellStyle::default(),
            issue: None,
        }
    }

    pub fn formula(&self) -> Option<&str> {
        match &self.contents {
            CellType::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.contents, CellType::Formula(_))
    }

    /// True when the raw input is missing or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.raw_input.trim().is_empty()
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Sparse grid storage keyed by coordinates. Only populated cells are stored.
pub type Grid = DashMap<CellRef, Cell>;

/// Numeric value of a cell for use in arithmetic. Missing cells are 0.
pub fn cell_value(grid: &Grid, cell_ref: &CellRef) -> f64 {
    grid.get(cell_ref).map(|c| c.value).unwrap_or(0.0)
}
